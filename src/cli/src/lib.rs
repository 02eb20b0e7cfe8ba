//! Extracts the HD wallet seed from a running Bitcoin Core node.

pub mod config;
pub mod dump;
pub mod errors;
pub mod extract;
pub mod scan;
pub mod tempdump;

// Re-export commonly used types and functions
pub use dump::{PassphrasePrompt, TerminalPrompt, WalletDumper};
pub use errors::SeedError;
pub use extract::{run, ExtractOptions, SeedExtractor};
pub use scan::ExtendedMasterKey;
