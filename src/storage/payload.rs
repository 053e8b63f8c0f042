//! Record payloads
//!
//! A record body is either structured (JSON) or opaque text. The store
//! does not remember which one a record was written as; the reader picks
//! an [`Encoding`] and a mismatch surfaces as `InvalidPayload`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{DbError, Result};

/// How a record file is interpreted on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Parse the file as JSON
    #[default]
    Structured,

    /// Return the file as UTF-8 text
    Text,
}

/// A record body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Build a structured payload from any serializable value
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| DbError::InvalidPayload(e.to_string()))
    }

    /// Build a raw text payload
    pub fn text(text: impl Into<String>) -> Self {
        Payload::Text(text.into())
    }

    /// The encoding this payload is written with
    pub fn encoding(&self) -> Encoding {
        match self {
            Payload::Json(_) => Encoding::Structured,
            Payload::Text(_) => Encoding::Text,
        }
    }

    /// Serialize to the bytes stored in a record file
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Payload::Json(value) => {
                serde_json::to_vec(value).map_err(|e| DbError::InvalidPayload(e.to_string()))
            }
            Payload::Text(text) => Ok(text.as_bytes().to_vec()),
        }
    }

    /// Interpret record file bytes with the given encoding
    pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<Self> {
        match encoding {
            Encoding::Structured => serde_json::from_slice(bytes)
                .map(Payload::Json)
                .map_err(|e| DbError::InvalidPayload(format!("invalid JSON data: {e}"))),
            Encoding::Text => std::str::from_utf8(bytes)
                .map(|s| Payload::Text(s.to_string()))
                .map_err(|e| DbError::InvalidPayload(format!("invalid UTF-8 text: {e}"))),
        }
    }

    /// Re-read this payload as if its encoded bytes were decoded with `encoding`
    pub fn into_encoding(self, encoding: Encoding) -> Result<Self> {
        match (self, encoding) {
            (p @ Payload::Json(_), Encoding::Structured) => Ok(p),
            (p @ Payload::Text(_), Encoding::Text) => Ok(p),
            (p, encoding) => Payload::decode(&p.encode()?, encoding),
        }
    }

    /// Deserialize into a typed value.
    ///
    /// Text payloads are parsed as JSON first.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        let result = match self {
            Payload::Json(value) => serde_json::from_value(value),
            Payload::Text(text) => serde_json::from_str(&text),
        };
        result.map_err(|e| DbError::InvalidPayload(e.to_string()))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }

    /// Take the text out of a payload, serializing JSON if needed
    pub fn into_text(self) -> Result<String> {
        match self {
            Payload::Text(text) => Ok(text),
            Payload::Json(value) => {
                serde_json::to_string(&value).map_err(|e| DbError::InvalidPayload(e.to_string()))
            }
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}
