//! The extraction pipeline: credentials, dump, scan, cleanup.

use crate::config;
use crate::dump::{PassphrasePrompt, WalletDumper, DEFAULT_UNLOCK_TIMEOUT};
use crate::errors::SeedError;
use crate::scan::{self, ExtendedMasterKey};
use crate::tempdump::{self, TempDumpFile};
use rpc::{RpcEndpoint, WalletRpc};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default RPC address of a mainnet node.
pub const DEFAULT_RPC_ADDR: &str = "127.0.0.1:8332";

/// Settings for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Path to bitcoin.conf
    pub config_path: PathBuf,
    /// `host:port` of the node's RPC server
    pub rpc_addr: String,
    /// Wallet to dump on a multi-wallet node
    pub rpc_wallet: Option<String>,
    /// Seconds to keep the wallet unlocked after a passphrase is entered
    pub unlock_timeout: u64,
    /// Directory for the dump file, `~/Private` or `~` when unset
    pub dump_dir: Option<PathBuf>,
}

impl ExtractOptions {
    /// Creates options with the defaults for everything but the config path.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            rpc_addr: DEFAULT_RPC_ADDR.to_string(),
            rpc_wallet: None,
            unlock_timeout: DEFAULT_UNLOCK_TIMEOUT,
            dump_dir: None,
        }
    }
}

/// Extracts the master key through a node connection.
pub struct SeedExtractor<'a, R: WalletRpc + ?Sized> {
    rpc: &'a R,
    prompt: Option<Box<dyn PassphrasePrompt + 'a>>,
    unlock_timeout: u64,
}

impl<'a, R: WalletRpc + ?Sized> SeedExtractor<'a, R> {
    /// Creates an extractor for `rpc`.
    pub fn new(rpc: &'a R) -> Self {
        Self {
            rpc,
            prompt: None,
            unlock_timeout: DEFAULT_UNLOCK_TIMEOUT,
        }
    }

    /// Prompts for a passphrase if the wallet is locked; `None` gives up instead.
    pub fn with_prompt(mut self, prompt: Option<Box<dyn PassphrasePrompt + 'a>>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Sets how long the wallet stays unlocked.
    pub fn with_unlock_timeout(mut self, seconds: u64) -> Self {
        self.unlock_timeout = seconds;
        self
    }

    /// Dumps the wallet into a new file in `dir` and scans it.
    ///
    /// The dump file is gone when this returns, whatever the outcome.
    pub async fn extract(self, dir: &Path) -> Result<Option<ExtendedMasterKey>, SeedError> {
        let dump = TempDumpFile::create_in(dir)?;
        info!("Dumping wallet to {}", dump.path().display());

        let mut dumper = WalletDumper::new(self.rpc)
            .with_prompt(self.prompt)
            .with_unlock_timeout(self.unlock_timeout);

        // Early returns drop `dump`, which unlinks the file.
        dumper.dump(dump.path()).await?;
        let seed = scan::read_masterkey(dump.path())?;

        dump.close()?;
        info!("Removed wallet dump");

        if seed.is_none() {
            warn!("No extended private masterkey found in the wallet dump");
        }
        Ok(seed)
    }
}

/// Runs the whole pipeline with the given options.
pub async fn run(
    options: &ExtractOptions,
    prompt: Option<Box<dyn PassphrasePrompt>>,
) -> Result<Option<ExtendedMasterKey>, SeedError> {
    let credentials = config::read_credentials(&options.config_path)?;
    let endpoint = RpcEndpoint::new(credentials, &options.rpc_addr)?
        .with_wallet(options.rpc_wallet.clone());
    let client = rpc::connect(endpoint)?;

    let dir = match &options.dump_dir {
        Some(dir) => dir.clone(),
        None => tempdump::default_dump_dir()?,
    };

    SeedExtractor::new(&client)
        .with_prompt(prompt)
        .with_unlock_timeout(options.unlock_timeout)
        .extract(&dir)
        .await
}
