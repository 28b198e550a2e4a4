//! Field paths addressing values inside a document body
//!
//! A field path is an ordered, non-empty sequence of segments. Path grammar
//! beyond dot-splitting (escaping, backtick quoting) is owned by the outer
//! client layers; this core only walks already-split segments.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered, non-empty sequence of segments addressing one document field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Creates a field path from segments.
    ///
    /// Returns `None` if the sequence is empty or any segment is empty.
    pub fn new(segments: Vec<String>) -> Option<Self> {
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    /// Creates a field path by splitting a dot-separated string.
    ///
    /// Returns `None` for an empty string or empty segments ("a..b").
    pub fn from_dot_separated(path: &str) -> Option<Self> {
        Self::new(path.split('.').map(str::to_string).collect())
    }

    /// Returns the path segments in order.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the dot-joined canonical form of this path.
    pub fn canonical_string(&self) -> String {
        self.segments.join(".")
    }

    /// Resolves this path against a document body.
    ///
    /// Walks one map lookup per segment; returns `None` as soon as a segment
    /// is missing or an intermediate value is not an object.
    pub fn resolve<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        let mut current = body;
        for segment in &self.segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}
