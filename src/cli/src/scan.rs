//! Finds the extended private master key in a wallet dump.

use crate::errors::SeedError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

lazy_static! {
    static ref MASTERKEY: Regex = Regex::new(r"^# extended private masterkey: (\S+)$").unwrap();
}

/// The extended private master key of an HD wallet.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedMasterKey(String);

impl ExtendedMasterKey {
    /// Gets the key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ExtendedMasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ExtendedMasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExtendedMasterKey(<redacted>)")
    }
}

/// Returns the master key from the first matching line, reading no further.
pub fn scan_masterkey<R: BufRead>(reader: R) -> io::Result<Option<ExtendedMasterKey>> {
    for line in reader.lines() {
        let line = line?;
        if let Some(caps) = MASTERKEY.captures(&line) {
            return Ok(Some(ExtendedMasterKey(caps[1].to_string())));
        }
    }
    Ok(None)
}

/// Scans the dump file at `path`.
pub fn read_masterkey(path: &Path) -> Result<Option<ExtendedMasterKey>, SeedError> {
    let to_error = |source| SeedError::DumpRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_error)?;
    scan_masterkey(BufReader::new(file)).map_err(to_error)
}
