//! Dumps the wallet, unlocking it once if the node reports it locked.
//!
//! The flow is a small state machine:
//!
//! ```text
//! Attempting --ok--> Succeeded
//!     |
//!     +--locked, no prompt--> LockedNonPromptable --> FatalAbort
//!     |
//!     +--locked, prompt--> LockedPromptable --passphrase--> Unlocking --> Retrying
//!                                |                                          ^
//!                                +--------------empty passphrase------------+
//!
//! Retrying --ok--> Succeeded
//! any failed call or prompt --> FatalAbort
//! ```
//!
//! `Retrying` never leads back to a locked state, so the node is asked to dump
//! the wallet at most twice.

use crate::errors::SeedError;
use async_trait::async_trait;
use rpc::WalletRpc;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Seconds the wallet stays unlocked after a passphrase is entered.
pub const DEFAULT_UNLOCK_TIMEOUT: u64 = 5;

/// Prompt shown when the wallet turns out to be locked.
pub const PASSPHRASE_PROMPT: &str = "Wallet was locked; enter your passphrase here: ";

/// Source of the wallet passphrase.
#[async_trait]
pub trait PassphrasePrompt: Send {
    /// Shows `message` and reads a passphrase.
    async fn read_passphrase(&mut self, message: &str) -> io::Result<String>;
}

/// Reads the passphrase from the terminal without echoing it.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl PassphrasePrompt for TerminalPrompt {
    async fn read_passphrase(&mut self, message: &str) -> io::Result<String> {
        let message = message.to_string();
        // Off the runtime threads, so a Ctrl-C can be handled while the prompt waits.
        tokio::task::spawn_blocking(move || rpassword::prompt_password(message))
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
    }
}

/// States of a dump run.
pub enum DumpState {
    /// First `dumpwallet` call
    Attempting,
    /// Wallet locked, a passphrase may be asked for
    LockedPromptable,
    /// Wallet locked, prompting disabled
    LockedNonPromptable,
    /// Unlocking with the entered passphrase
    Unlocking(String),
    /// Second and final `dumpwallet` call
    Retrying,
    /// The dump file has been written
    Succeeded,
    /// The run failed with this error
    FatalAbort(SeedError),
}

impl DumpState {
    /// Name of the state, without any data it carries.
    pub fn name(&self) -> &'static str {
        match self {
            DumpState::Attempting => "Attempting",
            DumpState::LockedPromptable => "LockedPromptable",
            DumpState::LockedNonPromptable => "LockedNonPromptable",
            DumpState::Unlocking(_) => "Unlocking",
            DumpState::Retrying => "Retrying",
            DumpState::Succeeded => "Succeeded",
            DumpState::FatalAbort(_) => "FatalAbort",
        }
    }
}

impl fmt::Debug for DumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpState::FatalAbort(e) => write!(f, "FatalAbort({})", e),
            other => f.write_str(other.name()),
        }
    }
}

/// Drives the dump state machine against a node.
pub struct WalletDumper<'a, R: WalletRpc + ?Sized> {
    rpc: &'a R,
    prompt: Option<Box<dyn PassphrasePrompt + 'a>>,
    unlock_timeout: u64,
    visited: Vec<&'static str>,
}

impl<'a, R: WalletRpc + ?Sized> WalletDumper<'a, R> {
    /// Creates a dumper that gives up if the wallet is locked.
    pub fn new(rpc: &'a R) -> Self {
        Self {
            rpc,
            prompt: None,
            unlock_timeout: DEFAULT_UNLOCK_TIMEOUT,
            visited: Vec::new(),
        }
    }

    /// Asks `prompt` for a passphrase when the wallet is locked.
    pub fn with_prompt(mut self, prompt: Option<Box<dyn PassphrasePrompt + 'a>>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Sets how long the wallet stays unlocked.
    pub fn with_unlock_timeout(mut self, seconds: u64) -> Self {
        self.unlock_timeout = seconds;
        self
    }

    /// Names of the states the last `dump` went through, in order.
    pub fn visited(&self) -> &[&'static str] {
        &self.visited
    }

    /// Dumps the wallet to `path`.
    pub async fn dump(&mut self, path: &Path) -> Result<(), SeedError> {
        self.visited.clear();
        let mut state = DumpState::Attempting;

        loop {
            debug!(?state, "Wallet dump state");
            self.visited.push(state.name());
            state = match state {
                DumpState::Attempting => match self.rpc.dump_wallet(path).await {
                    Ok(result) => {
                        debug!("Node wrote {}", result.filename);
                        DumpState::Succeeded
                    }
                    Err(e) if e.is_wallet_locked() => {
                        info!("Wallet is locked");
                        if self.prompt.is_some() {
                            DumpState::LockedPromptable
                        } else {
                            DumpState::LockedNonPromptable
                        }
                    }
                    Err(e) => DumpState::FatalAbort(e.into()),
                },
                DumpState::LockedNonPromptable => DumpState::FatalAbort(SeedError::WalletLocked),
                DumpState::LockedPromptable => {
                    let answer = match self.prompt.as_mut() {
                        Some(prompt) => prompt
                            .read_passphrase(PASSPHRASE_PROMPT)
                            .await
                            .map_err(SeedError::Prompt),
                        None => Err(SeedError::WalletLocked),
                    };

                    match answer {
                        Ok(passphrase) => {
                            let passphrase = passphrase.trim();
                            if passphrase.is_empty() {
                                // Lets the user unlock the wallet by other means and just retry.
                                DumpState::Retrying
                            } else {
                                DumpState::Unlocking(passphrase.to_string())
                            }
                        }
                        Err(e) => DumpState::FatalAbort(e),
                    }
                }
                DumpState::Unlocking(passphrase) => {
                    match self.rpc.wallet_passphrase(&passphrase, self.unlock_timeout).await {
                        Ok(()) => {
                            info!("Unlocked wallet for {} seconds", self.unlock_timeout);
                            DumpState::Retrying
                        }
                        Err(e) => DumpState::FatalAbort(e.into()),
                    }
                }
                DumpState::Retrying => match self.rpc.dump_wallet(path).await {
                    Ok(result) => {
                        debug!("Node wrote {}", result.filename);
                        DumpState::Succeeded
                    }
                    Err(e) => DumpState::FatalAbort(e.into()),
                },
                DumpState::Succeeded => return Ok(()),
                DumpState::FatalAbort(e) => return Err(e),
            };
        }
    }
}
