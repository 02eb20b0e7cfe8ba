//! Error types for the seed extractor.

use rpc::RpcError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting the seed.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Error when bitcoin.conf lacks `rpcuser` or `rpcpassword`.
    #[error("Missing {0} from bitcoin.conf")]
    MissingCredential(&'static str),

    /// Error when bitcoin.conf cannot be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        /// The config file path
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Error when no home directory can be determined.
    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    /// Error when the temporary dump file cannot be created, secured or removed.
    #[error("Temporary dump file error in {}: {source}", .dir.display())]
    TempFile {
        /// The directory holding the dump file
        dir: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Error when the wallet dump cannot be read back.
    #[error("Failed to read wallet dump {}: {source}", .path.display())]
    DumpRead {
        /// The dump file path
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Error when the passphrase prompt fails.
    #[error("Failed to read passphrase: {0}")]
    Prompt(std::io::Error),

    /// Error when an RPC call fails.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Error when the wallet is locked and prompting is disabled.
    #[error("Please unlock your wallet and try again.")]
    WalletLocked,
}
