//! # OhNoDB
//!
//! A minimal embedded record store with:
//! - Named records grouped into tables
//! - One content-addressed file per record
//! - A single JSON manifest mapping `(table, name)` to its file
//! - Startup integrity checks between the manifest and the files
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Store Engine                          │
//! │            (create / fetch / update, record cache)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Manifest   │          │ File Store  │
//!   │  (db.json)  │          │  (files/)   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Content   │
//!                           │  Addresser  │
//!                           └─────────────┘
//! ```
//!
//! ## On-disk Layout
//!
//! ```text
//! <root>/
//!   db.json                  {"filemap": {table: {name: address}}}
//!   files/
//!     <table>/
//!       <content_address>    one file per record
//! ```
//!
//! Every mutating operation writes the record file first, then the
//! manifest. A crash in between leaves an orphaned file, never a manifest
//! entry without its file.
//!
//! ## Preconditions
//!
//! One process, one thread, one [`Store`] per root. No locking is
//! performed on the root directory.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod address;
pub mod manifest;
pub mod storage;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Corruption, DbError, Result};
pub use config::{Config, ManifestWriteMode};
pub use engine::Store;
pub use storage::{Encoding, Payload};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of OhNoDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
