//! JSON-RPC message types for the Bitcoin Core wallet interface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code Bitcoin Core returns when the wallet must be unlocked first.
pub const RPC_WALLET_UNLOCK_NEEDED: i64 = -13;

/// A JSON-RPC 1.0 request as accepted by Bitcoin Core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version tag
    pub jsonrpc: String,
    /// Request identifier, echoed back by the node
    pub id: u64,
    /// The method to call
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Creates a new request.
    pub fn new(id: u64, method: &str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "1.0".to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }
}

/// The error object carried in a failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// Numeric error code
    pub code: i64,
    /// Human readable message
    pub message: String,
}

/// A JSON-RPC response from the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// The result, `null` on error
    #[serde(default)]
    pub result: Option<Value>,
    /// The error, `null` on success
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    /// Identifier of the request this answers
    #[serde(default)]
    pub id: Option<Value>,
}

/// Result of a successful `dumpwallet` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpWalletResult {
    /// Absolute path of the file the node wrote
    pub filename: String,
}
