//! Configuration for OhNoDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for an OhNoDB store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory of the store
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── db.json          (manifest)
    ///     └── files/           (one directory per table)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// How the manifest is rewritten after each create
    pub manifest_write_mode: ManifestWriteMode,

    /// fsync each record file after writing it
    pub sync_writes: bool,
}

/// Manifest write strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestWriteMode {
    /// Write `db.json.tmp`, fsync, then rename over `db.json`
    Atomic,

    /// Truncate and rewrite `db.json` in place (a crash mid-write can lose it)
    Overwrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./ohnodb_data"),
            manifest_write_mode: ManifestWriteMode::Atomic,
            sync_writes: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (store root)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the manifest write strategy
    pub fn manifest_write_mode(mut self, mode: ManifestWriteMode) -> Self {
        self.config.manifest_write_mode = mode;
        self
    }

    /// fsync record files after every write
    pub fn sync_writes(mut self, enabled: bool) -> Self {
        self.config.sync_writes = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
