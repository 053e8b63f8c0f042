//! Table name validation
//!
//! Table names are used verbatim as directory names under `files/`, so
//! this check is the only thing standing between a caller and the
//! filesystem. A valid name contains printable ASCII only
//! (`0x20..=0x7E`). There is no length limit and no reserved word.

use crate::error::{DbError, Result};

/// Check whether every byte of `name` is printable ASCII
pub fn is_valid_table_name(name: &str) -> bool {
    name.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Validate a table name, returning `InvalidTableName` on failure
pub fn validate_table_name(name: &str) -> Result<()> {
    if is_valid_table_name(name) {
        Ok(())
    } else {
        Err(DbError::InvalidTableName(name.to_string()))
    }
}
