//! A minimal stand-in for a Bitcoin Core node's wallet RPC.
//!
//! Speaks JSON-RPC over HTTP with basic auth, reports errors with HTTP 500 and
//! a JSON error object, and writes `dumpwallet` output to the requested path
//! on the local filesystem.

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

/// A request the node received with valid credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Request path without the leading slash, e.g. `wallet/hot`
    pub path: String,
    /// RPC method name
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
    /// Permission bits of the dump target when `dumpwallet` arrived
    pub target_mode: Option<u32>,
}

struct NodeState {
    locked: bool,
    calls: Vec<RecordedCall>,
}

/// Mock node configuration and state.
pub struct MockNode {
    authorization: String,
    passphrase: String,
    dump: String,
    state: Mutex<NodeState>,
}

impl MockNode {
    /// A node accepting `alice`/`s3cret` whose wallet dump is `dump`.
    pub fn new(dump: &str) -> Self {
        Self {
            // base64("alice:s3cret")
            authorization: "Basic YWxpY2U6czNjcmV0".to_string(),
            passphrase: "hunter2".to_string(),
            dump: dump.to_string(),
            state: Mutex::new(NodeState {
                locked: false,
                calls: Vec::new(),
            }),
        }
    }

    /// Encrypts and locks the wallet; `hunter2` unlocks it.
    pub fn locked(self) -> Self {
        self.state.lock().unwrap().locked = true;
        self
    }

    /// Every authenticated call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Names of the methods called so far.
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.method).collect()
    }

    fn handle(&self, path: &str, authorization: Option<String>, request: Value) -> Response {
        if authorization.as_deref() != Some(self.authorization.as_str()) {
            return warp::reply::with_status(warp::reply(), StatusCode::UNAUTHORIZED).into_response();
        }

        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let method = request
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let params = request
            .get("params")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut state = self.state.lock().unwrap();
        let target_mode = match (method.as_str(), params.first().and_then(Value::as_str)) {
            ("dumpwallet", Some(target)) => file_mode(Path::new(target)),
            _ => None,
        };
        state.calls.push(RecordedCall {
            path: path.to_string(),
            method: method.clone(),
            params: params.clone(),
            target_mode,
        });

        match method.as_str() {
            "dumpwallet" => {
                if state.locked {
                    return error(
                        id,
                        -13,
                        "Error: Please enter the wallet passphrase with walletpassphrase first.",
                    );
                }
                let Some(target) = params.first().and_then(Value::as_str) else {
                    return error(id, -1, "dumpwallet \"filename\"");
                };
                if let Err(e) = std::fs::write(target, &self.dump) {
                    return error(id, -8, &format!("Cannot open wallet dump file: {}", e));
                }
                success(id, json!({ "filename": target }))
            }
            "walletpassphrase" => {
                let passphrase = params.first().and_then(Value::as_str);
                if passphrase != Some(self.passphrase.as_str()) {
                    return error(
                        id,
                        -14,
                        "Error: The wallet passphrase entered was incorrect.",
                    );
                }
                state.locked = false;
                success(id, Value::Null)
            }
            _ => {
                let response = json!({
                    "result": null,
                    "error": { "code": -32601, "message": "Method not found" },
                    "id": id,
                });
                warp::reply::with_status(warp::reply::json(&response), StatusCode::NOT_FOUND)
                    .into_response()
            }
        }
    }
}

fn success(id: Value, result: Value) -> Response {
    warp::reply::json(&json!({ "result": result, "error": null, "id": id })).into_response()
}

fn error(id: Value, code: i64, message: &str) -> Response {
    let response = json!({
        "result": null,
        "error": { "code": code, "message": message },
        "id": id,
    });
    warp::reply::with_status(warp::reply::json(&response), StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path).ok().map(|meta| meta.permissions().mode())
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> Option<u32> {
    None
}

/// Serves `node` on an ephemeral localhost port. Must be called inside a tokio runtime.
pub fn spawn(node: Arc<MockNode>) -> SocketAddr {
    let route = warp::post()
        .and(warp::path::tail())
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::body::json())
        .map(move |tail: warp::path::Tail, authorization: Option<String>, request: Value| {
            node.handle(tail.as_str(), authorization, request)
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}
