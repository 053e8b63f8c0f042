//! In-memory manifest with load/init/persist

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::address::ContentAddress;
use crate::config::ManifestWriteMode;
use crate::error::{Corruption, DbError, Result};
use crate::storage::FileStore;

use super::document::{FileMap, ManifestDocument};

/// The authoritative `(table, name) -> content address` mapping
///
/// Lookups and inserts are pure in-memory operations. The whole map is
/// written back to `db.json` by [`Manifest::persist`].
#[derive(Debug)]
pub struct Manifest {
    /// `<root>/db.json`
    path: PathBuf,

    /// How `persist` writes the document
    write_mode: ManifestWriteMode,

    filemap: FileMap,
}

impl Manifest {
    /// Manifest filename under the store root
    pub const FILENAME: &'static str = "db.json";

    /// Load and schema-check `<root>/db.json`
    pub fn load(root: &Path, write_mode: ManifestWriteMode) -> Result<Self> {
        let path = root.join(Self::FILENAME);

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DbError::Corrupt(Corruption::MissingManifest),
            _ => DbError::Io(e),
        })?;

        let document = ManifestDocument::parse(&bytes)?;

        debug!(
            path = %path.display(),
            tables = document.filemap.len(),
            "loaded manifest"
        );

        Ok(Self {
            path,
            write_mode,
            filemap: document.filemap,
        })
    }

    /// Write an empty manifest to `<root>/db.json` and return it
    pub fn init(root: &Path, write_mode: ManifestWriteMode) -> Result<Self> {
        let manifest = Self {
            path: root.join(Self::FILENAME),
            write_mode,
            filemap: FileMap::new(),
        };
        manifest.persist()?;
        Ok(manifest)
    }

    /// Check that every mapped record has its file on disk.
    ///
    /// Stops at the first missing file.
    pub fn validate_against(&self, files: &FileStore) -> Result<()> {
        for (table, names) in &self.filemap {
            for (name, filename) in names {
                let address = ContentAddress::from_manifest(filename.as_str());
                if !files.exists(table, &address) {
                    warn!(%table, %name, %address, "manifest entry has no backing file");
                    return Err(DbError::Corrupt(Corruption::MissingFile {
                        table: table.clone(),
                        name: name.clone(),
                        address: address.into_string(),
                    }));
                }
            }
        }
        Ok(())
    }

    /// Rewrite `db.json` with the full current mapping
    pub fn persist(&self) -> Result<()> {
        let bytes = ManifestDocument {
            filemap: self.filemap.clone(),
        }
        .to_bytes()?;

        match self.write_mode {
            ManifestWriteMode::Atomic => {
                let tmp_path = self.tmp_path();
                {
                    let mut file = File::create(&tmp_path)?;
                    file.write_all(&bytes)?;
                    file.sync_all()?;
                }
                fs::rename(&tmp_path, &self.path)?;
            }
            ManifestWriteMode::Overwrite => {
                fs::write(&self.path, &bytes)?;
            }
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "persisted manifest");
        Ok(())
    }

    /// Look up the content address of a record
    pub fn get(&self, table: &str, name: &str) -> Option<ContentAddress> {
        self.filemap
            .get(table)?
            .get(name)
            .map(|filename| ContentAddress::from_manifest(filename.as_str()))
    }

    /// Map a record to its content address, creating the table entry if needed
    pub fn set(&mut self, table: &str, name: &str, address: &ContentAddress) {
        self.filemap
            .entry(table.to_string())
            .or_default()
            .insert(name.to_string(), address.to_string());
    }

    pub fn contains(&self, table: &str, name: &str) -> bool {
        self.filemap
            .get(table)
            .is_some_and(|names| names.contains_key(name))
    }

    /// Table names, sorted
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.filemap.keys().map(String::as_str)
    }

    /// Record names in a table, sorted (empty if the table is unknown)
    pub fn names(&self, table: &str) -> impl Iterator<Item = &str> {
        self.filemap
            .get(table)
            .into_iter()
            .flat_map(|names| names.keys().map(String::as_str))
    }

    /// Total number of mapped records across all tables
    pub fn entry_count(&self) -> usize {
        self.filemap.values().map(|names| names.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Path of `db.json`
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}
