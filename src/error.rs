//! Error types for OhNoDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DbError
pub type Result<T> = std::result::Result<T, DbError>;

/// Unified error type for OhNoDB operations
#[derive(Debug, Error)]
pub enum DbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    // -------------------------------------------------------------------------
    // Integrity Errors
    // -------------------------------------------------------------------------
    #[error("Database is corrupt: {0}")]
    Corrupt(#[from] Corruption),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

impl DbError {
    /// True for any error that means "no such record".
    ///
    /// `fetch` reports a manifest miss as `Corrupt(MappedFileNotFound)`;
    /// this lets callers handle it the same way as `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DbError::NotFound(_) | DbError::Corrupt(Corruption::MappedFileNotFound { .. })
        )
    }

    /// True if this is an integrity failure of any kind
    pub fn is_corrupt(&self) -> bool {
        matches!(self, DbError::Corrupt(_))
    }
}

/// Reason a store was judged corrupt
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Corruption {
    /// `db.json` is not valid JSON
    #[error("[MANIFEST PARSE ERROR] {0}")]
    ParseError(String),

    /// `db.json` is valid JSON but not `{"filemap": {table: {name: address}}}`
    #[error("[MANIFEST SCHEMA ERROR] {0}")]
    SchemaError(String),

    /// Root exists and holds data, but there is no `db.json`
    #[error("[MANIFEST MISSING]")]
    MissingManifest,

    /// A manifest entry points at a file that is not on disk (startup check)
    #[error("[STARTUP FILE NOT FOUND: {table}/{name}:{address}]")]
    MissingFile {
        table: String,
        name: String,
        address: String,
    },

    /// A fetched record has no manifest entry
    #[error("[MAPPED FILE NOT FOUND: {table}/{name}]")]
    MappedFileNotFound { table: String, name: String },
}
