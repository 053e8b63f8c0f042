//! Manifest document (`db.json`)
//!
//! Parsing happens in two passes so that "not JSON" and "JSON of the
//! wrong shape" are reported as different corruption reasons.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::ContentAddress;
use crate::error::{Corruption, DbError, Result};
use crate::table::is_valid_table_name;

/// `table -> (record name -> content address)`
pub type FileMap = BTreeMap<String, BTreeMap<String, String>>;

/// The on-disk shape: `{"filemap": {table: {name: address}}}`
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ManifestDocument {
    pub filemap: FileMap,
}

impl ManifestDocument {
    /// Parse and schema-check manifest bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| DbError::Corrupt(Corruption::ParseError(e.to_string())))?;

        let document: ManifestDocument = serde_json::from_value(value)
            .map_err(|e| DbError::Corrupt(Corruption::SchemaError(e.to_string())))?;

        if let Some(table) = document.filemap.keys().find(|t| !is_valid_table_name(t)) {
            return Err(DbError::Corrupt(Corruption::SchemaError(format!(
                "invalid table name {table:?}"
            ))));
        }

        for (table, names) in &document.filemap {
            if let Some((name, address)) = names
                .iter()
                .find(|(_, address)| !ContentAddress::is_well_formed(address))
            {
                return Err(DbError::Corrupt(Corruption::SchemaError(format!(
                    "{table}/{name} maps to {address:?}, not a content address"
                ))));
            }
        }

        Ok(document)
    }

    /// Serialize for writing to disk
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| DbError::InvalidPayload(e.to_string()))
    }
}
