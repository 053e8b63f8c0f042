//! Manifest Module
//!
//! The single index of the store, persisted as `<root>/db.json`.
//!
//! ## Responsibilities
//! - Map `(table, record name)` to a content address
//! - Reject malformed documents on load (parse vs. schema errors)
//! - Verify on open that every entry has its record file
//! - Rewrite the whole document after every create
//!
//! ## Document Format
//! ```text
//! {
//!   "filemap": {
//!     "users": {
//!       "alice": "2bd806c97f0e00af1a1fc3328fa763a9269723c8db8fac4f93af71db186d6e90"
//!     }
//!   }
//! }
//! ```
//!
//! Invariant: an entry in the manifest implies a file on disk. The
//! converse does not hold; a crash between writing a record file and
//! persisting the manifest leaves an orphaned file.

mod document;
mod map;

pub use document::{FileMap, ManifestDocument};
pub use map::Manifest;
