//! Prints the HD wallet seed of a running Bitcoin Core node.

use anyhow::Result;
use colored::Colorize;
use hdseed::{config, ExtractOptions, PassphrasePrompt, SeedError, TerminalPrompt};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments.
#[derive(Debug, StructOpt)]
#[structopt(name = "get-hd-seed", about = "Extract the Bitcoin Core HD wallet seed")]
struct Opt {
    /// Path to bitcoin.conf [default: ~/.bitcoin/bitcoin.conf]
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// RPC address
    #[structopt(long, default_value = "127.0.0.1:8332")]
    rpc_addr: String,

    /// Disable password prompt
    #[structopt(long)]
    no_prompt: bool,

    /// Wallet to dump on a multi-wallet node
    #[structopt(long)]
    rpc_wallet: Option<String>,

    /// Seconds to keep the wallet unlocked after entering the passphrase
    #[structopt(long, default_value = "5")]
    unlock_timeout: u64,

    /// Directory for the temporary dump file [default: ~/Private if it exists, else ~]
    #[structopt(long, parse(from_os_str))]
    dump_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout only ever carries the seed
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opt = Opt::from_args();

    let config_path = match opt.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    let options = ExtractOptions {
        config_path,
        rpc_addr: opt.rpc_addr,
        rpc_wallet: opt.rpc_wallet,
        unlock_timeout: opt.unlock_timeout,
        dump_dir: opt.dump_dir,
    };

    let prompt: Option<Box<dyn PassphrasePrompt>> = if opt.no_prompt {
        None
    } else {
        Some(Box::new(TerminalPrompt))
    };

    // Ctrl-C drops the pipeline future, and with it the dump file guard.
    let outcome = tokio::select! {
        biased;
        Ok(()) = tokio::signal::ctrl_c() => None,
        outcome = hdseed::run(&options, prompt) => Some(outcome),
    };

    // The dump file is already removed at this point.
    let outcome = match outcome {
        Some(outcome) => outcome,
        None => {
            eprintln!("\nInterrupted");
            std::process::exit(130);
        }
    };

    match outcome {
        Ok(Some(seed)) => {
            println!("{}", seed);
            eprintln!("{}", "WARNING: Keep this seed safe and private!".red());
        }
        // Already reported as a warning by the extractor
        Ok(None) => {}
        Err(SeedError::WalletLocked) => {
            eprintln!("{}", SeedError::WalletLocked);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
