//! Storage-assigned record identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the storage backend when a record is persisted.
///
/// The format is backend specific (see [`IdFormat`]); the domain treats it as
/// an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Identifier shape produced by a storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFormat {
    /// 24 lowercase hexadecimal digits, as rendered from a document-store
    /// object id.
    ObjectId,
    /// Decimal value of an atomically incremented counter.
    Counter,
}

const OBJECT_ID_HEX_LEN: usize = 24;

impl IdFormat {
    /// Whether `raw` is a well-formed identifier in this format.
    ///
    /// # Examples
    /// ```
    /// use search_admin::domain::IdFormat;
    ///
    /// assert!(IdFormat::ObjectId.accepts("66d8420df6e5311a791e0a08"));
    /// assert!(!IdFormat::ObjectId.accepts("1"));
    /// assert!(IdFormat::Counter.accepts("42"));
    /// assert!(!IdFormat::Counter.accepts("4a"));
    /// ```
    pub fn accepts(self, raw: &str) -> bool {
        match self {
            Self::ObjectId => {
                raw.len() == OBJECT_ID_HEX_LEN
                    && raw.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
            }
            Self::Counter => raw.parse::<u64>().is_ok() && raw.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}
