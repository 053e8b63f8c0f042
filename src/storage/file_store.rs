//! File Store
//!
//! Owns the `files/` tree: one directory per table, one file per record
//! named by its content address.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::address::ContentAddress;
use crate::error::{DbError, Result};

use super::{Encoding, Payload};

/// Manages record files under `<root>/files`
///
/// Holds no open handles; every call opens and closes what it needs.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// `<root>/files`
    files_dir: PathBuf,

    /// fsync each record file after writing
    sync_writes: bool,
}

impl FileStore {
    /// Name of the files directory under the store root
    pub const FILES_DIR: &'static str = "files";

    /// Create a file store rooted at `<root>/files` (no I/O)
    pub fn new(root: &Path, sync_writes: bool) -> Self {
        Self {
            files_dir: root.join(Self::FILES_DIR),
            sync_writes,
        }
    }

    /// Create the `files/` directory if it does not exist
    pub fn create_files_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.files_dir)?;
        Ok(())
    }

    /// Create `<root>/files/<table>` if absent (idempotent)
    pub fn ensure_table_dir(&self, table: &str) -> Result<()> {
        fs::create_dir_all(self.table_dir(table))?;
        Ok(())
    }

    /// Path of a record file (no I/O)
    pub fn path_for(&self, table: &str, address: &ContentAddress) -> PathBuf {
        self.table_dir(table).join(address.as_str())
    }

    /// Whether a record file exists
    pub fn exists(&self, table: &str, address: &ContentAddress) -> bool {
        self.path_for(table, address).is_file()
    }

    /// Write a new record file.
    ///
    /// Fails with `AlreadyExists` if a file is already at that address.
    /// The payload is encoded before anything touches the disk, so an
    /// `InvalidPayload` failure leaves no file behind.
    pub fn write(&self, table: &str, address: &ContentAddress, payload: &Payload) -> Result<()> {
        let bytes = payload.encode()?;
        let path = self.path_for(table, address);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => DbError::AlreadyExists(format!("{table}/{address}")),
                _ => DbError::Io(e),
            })?;

        self.write_all(file, &bytes)?;
        trace!(path = %path.display(), bytes = bytes.len(), "wrote new record file");
        Ok(())
    }

    /// Write a record file, replacing any existing content
    pub fn write_overwrite(
        &self,
        table: &str,
        address: &ContentAddress,
        payload: &Payload,
    ) -> Result<()> {
        let bytes = payload.encode()?;
        let path = self.path_for(table, address);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        self.write_all(file, &bytes)?;
        trace!(path = %path.display(), bytes = bytes.len(), "overwrote record file");
        Ok(())
    }

    /// Read a record file and decode it with `encoding`
    pub fn read(&self, table: &str, address: &ContentAddress, encoding: Encoding) -> Result<Payload> {
        let path = self.path_for(table, address);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DbError::NotFound(format!("{table}/{address}")),
            _ => DbError::Io(e),
        })?;

        Payload::decode(&bytes, encoding)
    }

    /// The `files/` directory
    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn table_dir(&self, table: &str) -> PathBuf {
        self.files_dir.join(table)
    }

    fn write_all(&self, mut file: fs::File, bytes: &[u8]) -> Result<()> {
        file.write_all(bytes)?;
        if self.sync_writes {
            file.sync_all()?;
        }
        Ok(())
    }
}
