//! Reads RPC credentials from bitcoin.conf.

use crate::errors::SeedError;
use lazy_static::lazy_static;
use regex::Regex;
use rpc::Credentials;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

lazy_static! {
    static ref RPCUSER: Regex = Regex::new(r"^\s*rpcuser\s*=\s*(.*)$").unwrap();
    static ref RPCPASS: Regex = Regex::new(r"^\s*rpcpassword\s*=\s*(.*)$").unwrap();
}

/// Default location of bitcoin.conf, `~/.bitcoin/bitcoin.conf`.
pub fn default_config_path() -> Result<PathBuf, SeedError> {
    let home = dirs::home_dir().ok_or(SeedError::HomeDirUnavailable)?;
    Ok(home.join(".bitcoin").join("bitcoin.conf"))
}

/// Reads `rpcuser` and `rpcpassword` from the config file at `path`.
pub fn read_credentials<P: AsRef<Path>>(path: P) -> Result<Credentials, SeedError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| SeedError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let credentials = parse_credentials(&contents)?;
    debug!("Read RPC credentials from {}", path.display());

    Ok(credentials)
}

/// Scans config lines for the RPC credentials. The last occurrence of each key wins.
pub fn parse_credentials(contents: &str) -> Result<Credentials, SeedError> {
    let mut rpc_user = None;
    let mut rpc_pass = None;

    for line in contents.lines() {
        if let Some(caps) = RPCUSER.captures(line) {
            rpc_user = Some(caps[1].trim_end().to_string());
            continue;
        }
        if let Some(caps) = RPCPASS.captures(line) {
            rpc_pass = Some(caps[1].trim_end().to_string());
        }
    }

    match (rpc_user, rpc_pass) {
        (None, _) => Err(SeedError::MissingCredential("rpcuser")),
        (_, None) => Err(SeedError::MissingCredential("rpcpassword")),
        (Some(user), Some(pass)) => Ok(Credentials::new(user, pass)),
    }
}
