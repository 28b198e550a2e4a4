//! Documents and their keys
//!
//! A document is an immutable pairing of a unique key and a JSON body.
//! Storage and maintenance of documents live behind the engine's
//! collaborator traits; the core only needs field resolution and a stable
//! identity for deduplication.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FieldPath;

/// The unique, orderable identity of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Creates a document key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable document: key plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    key: DocumentKey,
    body: Value,
}

impl Document {
    /// Creates a new document.
    ///
    /// After construction, the document cannot be modified.
    pub fn new(key: DocumentKey, body: Value) -> Self {
        Self { key, body }
    }

    /// Returns the document key.
    #[inline]
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Returns the document body.
    #[inline]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Resolves a field path against the body.
    pub fn field(&self, path: &FieldPath) -> Option<&Value> {
        path.resolve(&self.body)
    }
}
