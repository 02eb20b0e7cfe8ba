//! Temporary file the node writes the wallet dump into.
//!
//! The file is created owner-only and is unlinked when the guard is dropped,
//! so every return path out of the extractor removes it.

use crate::errors::SeedError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};
use tracing::debug;

/// File name prefix of the dump file.
pub const DUMP_PREFIX: &str = "tmp-wallet-";

/// File name suffix of the dump file.
pub const DUMP_SUFFIX: &str = ".txt";

/// Picks `<home>/Private` if it exists, otherwise `home` itself.
pub fn dump_dir(home: &Path) -> PathBuf {
    let private = home.join("Private");
    if private.exists() {
        private
    } else {
        home.to_path_buf()
    }
}

/// The dump directory under the current user's home.
pub fn default_dump_dir() -> Result<PathBuf, SeedError> {
    let home = dirs::home_dir().ok_or(SeedError::HomeDirUnavailable)?;
    Ok(dump_dir(&home))
}

/// A uniquely named, owner-only file that is removed on drop.
#[derive(Debug)]
pub struct TempDumpFile {
    path: TempPath,
    dir: PathBuf,
}

impl TempDumpFile {
    /// Creates a new dump file in `dir`.
    pub fn create_in(dir: &Path) -> Result<Self, SeedError> {
        let to_error = |source| SeedError::TempFile {
            dir: dir.to_path_buf(),
            source,
        };

        // tempfile opens the file with mode 0600 already; the explicit chmod
        // keeps the guarantee independent of that.
        let file = Builder::new()
            .prefix(DUMP_PREFIX)
            .suffix(DUMP_SUFFIX)
            .tempfile_in(dir)
            .map_err(to_error)?;
        restrict_to_owner(file.as_file()).map_err(to_error)?;

        let path = file.into_temp_path();
        debug!("Created dump file {}", path.display());

        Ok(Self {
            path,
            dir: dir.to_path_buf(),
        })
    }

    /// Gets the path of the dump file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file, reporting any failure to do so.
    pub fn close(self) -> Result<(), SeedError> {
        let dir = self.dir;
        self.path
            .close()
            .map_err(|source| SeedError::TempFile { dir, source })
    }
}

#[cfg(unix)]
fn restrict_to_owner(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &File) -> io::Result<()> {
    Ok(())
}
