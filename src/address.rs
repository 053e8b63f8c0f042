//! Content Addresser
//!
//! Derives a record's filename from its name: the lowercase hex SHA-256
//! digest of the name's UTF-8 bytes. The table is not part of the hash, so
//! the same name in two tables maps to the same filename in two different
//! table directories.

use std::fmt;

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a record name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Length of an address in hex characters
    pub const LEN: usize = 64;

    /// Compute the address for a record name
    pub fn of(name: &str) -> Self {
        Self(hex::encode(Sha256::digest(name.as_bytes())))
    }

    /// Wrap an address read back from the manifest.
    ///
    /// Manifest loading rejects values that are not [`well formed`](Self::is_well_formed),
    /// so the wrapped string is always a single path segment.
    pub fn from_manifest(filename: impl Into<String>) -> Self {
        Self(filename.into())
    }

    /// Whether `s` has the shape of an address: 64 lowercase hex characters
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == Self::LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
