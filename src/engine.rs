//! Engine Module
//!
//! The store engine that ties the manifest and the file store together.
//!
//! ## Responsibilities
//! - Open an existing root (load + validate) or initialize a fresh one
//! - Create, fetch and update records
//! - Keep the manifest and record files consistent (file first, manifest second)
//! - Hold the per-session record cache

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::address::ContentAddress;
use crate::config::Config;
use crate::error::{Corruption, DbError, Result};
use crate::manifest::Manifest;
use crate::storage::{Encoding, FileStore, Payload};
use crate::table::validate_table_name;

/// An open store
///
/// ## Record cache
///
/// `create` remembers the payload it wrote under `table/address`, and
/// `fetch` answers from that cache before touching the disk. The cache is
/// never filled by `fetch` or `update` and never invalidated, so after
/// `create` then `update` in the same session, `fetch` still returns the
/// created value. A fresh `Store` on the same root sees the updated one.
///
/// ## Single writer
///
/// Nothing guards the root against a second `Store` (in this process or
/// another). Running two against one root loses updates.
#[derive(Debug)]
pub struct Store {
    /// Store configuration
    config: Config,

    /// Authoritative record index (`db.json`)
    manifest: Manifest,

    /// Record files (`files/`)
    files: FileStore,

    /// Payloads written by `create` in this session, keyed `table/address`
    cache: HashMap<String, Payload>,
}

impl Store {
    /// Open or create a store at `path` with default settings
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().data_dir(path.as_ref()).build();
        Self::open_with_config(config)
    }

    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Missing or empty root: create it, an empty `db.json`, then `files/`
    /// 2. Otherwise: load `db.json`, then check every entry has its file
    pub fn open_with_config(config: Config) -> Result<Self> {
        let root = config.data_dir.as_path();
        let files = FileStore::new(root, config.sync_writes);

        let manifest = if Self::is_uninitialized(root)? {
            fs::create_dir_all(root)?;
            let manifest = Manifest::init(root, config.manifest_write_mode)?;
            files.create_files_dir()?;
            info!(root = %root.display(), "initialized new store");
            manifest
        } else {
            let manifest = Manifest::load(root, config.manifest_write_mode).map_err(|e| {
                warn!(root = %root.display(), error = %e, "failed to load manifest");
                e
            })?;
            manifest.validate_against(&files)?;
            // A crash during init can leave db.json without files/
            files.create_files_dir()?;
            info!(
                root = %root.display(),
                records = manifest.entry_count(),
                "opened store"
            );
            manifest
        };

        Ok(Self {
            config,
            manifest,
            files,
            cache: HashMap::new(),
        })
    }

    /// Create a new record.
    ///
    /// Steps:
    /// 1. Validate table name
    /// 2. Ensure the table directory exists
    /// 3. Write the record file (strict insert)
    /// 4. Cache the payload
    /// 5. Update and persist the manifest
    pub fn create(&mut self, table: &str, name: &str, payload: impl Into<Payload>) -> Result<()> {
        let payload = payload.into();
        validate_table_name(table)?;

        self.files.ensure_table_dir(table)?;

        let address = ContentAddress::of(name);

        self.files
            .write(table, &address, &payload)
            .map_err(|e| match e {
                DbError::AlreadyExists(_) => {
                    DbError::AlreadyExists(format!("{table}/{name} ({address})"))
                }
                other => other,
            })?;

        self.cache.insert(Self::cache_key(table, &address), payload);

        self.manifest.set(table, name, &address);
        self.manifest.persist()?;

        debug!(%table, %name, %address, "created record");
        Ok(())
    }

    /// Fetch a record, decoding it with `encoding`
    ///
    /// Lookup order:
    /// 1. Record cache (values created this session)
    /// 2. Manifest, then the record file
    ///
    /// A record missing from both is reported as
    /// `Corrupt(MappedFileNotFound)`; use [`DbError::is_not_found`] to
    /// treat it as plain absence.
    pub fn fetch(&self, table: &str, name: &str, encoding: Encoding) -> Result<Payload> {
        validate_table_name(table)?;

        let address = ContentAddress::of(name);

        if let Some(payload) = self.cache.get(&Self::cache_key(table, &address)) {
            debug!(%table, %name, "fetched record from cache");
            return payload.clone().into_encoding(encoding);
        }

        let address = self.manifest.get(table, name).ok_or_else(|| {
            DbError::Corrupt(Corruption::MappedFileNotFound {
                table: table.to_string(),
                name: name.to_string(),
            })
        })?;

        let payload = self.files.read(table, &address, encoding)?;
        debug!(%table, %name, %address, "fetched record from disk");
        Ok(payload)
    }

    /// Overwrite an existing record's content.
    ///
    /// The content address does not change, so the manifest is not
    /// rewritten. The record cache is not touched.
    pub fn update(&mut self, table: &str, name: &str, payload: impl Into<Payload>) -> Result<()> {
        let payload = payload.into();
        validate_table_name(table)?;

        let address = self
            .manifest
            .get(table, name)
            .ok_or_else(|| DbError::NotFound(format!("{table}/{name}")))?;

        self.files.write_overwrite(table, &address, &payload)?;

        debug!(%table, %name, %address, "updated record");
        Ok(())
    }

    // =========================================================================
    // Typed Convenience
    // =========================================================================

    /// Create a record from any serializable value
    pub fn create_json<T: Serialize + ?Sized>(&mut self, table: &str, name: &str, value: &T) -> Result<()> {
        validate_table_name(table)?;
        self.create(table, name, Payload::json(value)?)
    }

    /// Fetch a structured record and deserialize it
    pub fn fetch_json<T: DeserializeOwned>(&self, table: &str, name: &str) -> Result<T> {
        self.fetch(table, name, Encoding::Structured)?.deserialize()
    }

    /// Overwrite a record with any serializable value
    pub fn update_json<T: Serialize + ?Sized>(&mut self, table: &str, name: &str, value: &T) -> Result<()> {
        validate_table_name(table)?;
        self.update(table, name, Payload::json(value)?)
    }

    /// Create a raw text record
    pub fn create_text(&mut self, table: &str, name: &str, text: &str) -> Result<()> {
        self.create(table, name, Payload::text(text))
    }

    /// Fetch a record as raw text
    pub fn fetch_text(&self, table: &str, name: &str) -> Result<String> {
        self.fetch(table, name, Encoding::Text)?.into_text()
    }

    /// Overwrite a record with raw text
    pub fn update_text(&mut self, table: &str, name: &str, text: &str) -> Result<()> {
        self.update(table, name, Payload::text(text))
    }

    // =========================================================================
    // Manifest Queries
    // =========================================================================

    /// Whether the manifest maps `(table, name)`
    pub fn contains(&self, table: &str, name: &str) -> Result<bool> {
        validate_table_name(table)?;
        Ok(self.manifest.contains(table, name))
    }

    /// All table names, sorted
    pub fn tables(&self) -> Vec<String> {
        self.manifest.tables().map(str::to_string).collect()
    }

    /// All record names in a table, sorted
    pub fn names(&self, table: &str) -> Result<Vec<String>> {
        validate_table_name(table)?;
        Ok(self.manifest.names(table).map(str::to_string).collect())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the store root
    pub fn root(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of payloads held in the record cache
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Number of records in the manifest
    pub fn record_count(&self) -> usize {
        self.manifest.entry_count()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn cache_key(table: &str, address: &ContentAddress) -> String {
        format!("{table}/{address}")
    }

    /// A root that does not exist, or is an empty directory, gets initialized
    fn is_uninitialized(root: &Path) -> Result<bool> {
        if !root.exists() {
            return Ok(true);
        }
        if root.is_dir() {
            return Ok(fs::read_dir(root)?.next().is_none());
        }
        Ok(false)
    }
}
