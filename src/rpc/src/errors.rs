//! Error types for the RPC client.

use crate::types::RPC_WALLET_UNLOCK_NEEDED;
use thiserror::Error;

/// Errors that can occur while talking to the node.
#[derive(Error, Debug)]
pub enum RpcError {
    /// Error when the HTTP request could not be completed.
    #[error("Failed to reach node: {0}")]
    Transport(#[from] reqwest::Error),

    /// Error when the node rejects the RPC credentials.
    #[error("Node rejected the RPC credentials (HTTP {status})")]
    Unauthorized {
        /// The HTTP status code returned
        status: u16,
    },

    /// Error when the wallet is encrypted and locked.
    #[error("Wallet is locked: {message}")]
    WalletLocked {
        /// The message reported by the node
        message: String,
    },

    /// Error reported by the node for any other reason.
    #[error("Node returned error {code}: {message}")]
    Node {
        /// The error code
        code: i64,
        /// The error message
        message: String,
    },

    /// Error when the node's reply cannot be understood.
    #[error("Invalid response from node: {0}")]
    InvalidResponse(String),

    /// Error when a request cannot be built from the given arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RpcError {
    /// Classifies an error object returned by the node.
    pub fn from_node(code: i64, message: String) -> Self {
        if code == RPC_WALLET_UNLOCK_NEEDED {
            RpcError::WalletLocked { message }
        } else {
            RpcError::Node { code, message }
        }
    }

    /// Returns true if the error means the wallet must be unlocked first.
    pub fn is_wallet_locked(&self) -> bool {
        matches!(self, RpcError::WalletLocked { .. })
    }
}
