//! JSON-RPC client for the Bitcoin Core wallet calls used by the seed extractor.

pub mod client;
pub mod errors;
pub mod types;

// Re-export commonly used types and functions
pub use client::{connect, BitcoinRpcClient, Credentials, RpcEndpoint, WalletRpc};
pub use errors::RpcError;
pub use types::DumpWalletResult;
