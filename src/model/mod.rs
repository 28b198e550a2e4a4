//! Core value types shared across the query core
//!
//! Field paths, document keys, documents, and snapshot versions are
//! immutable values: constructed once, read-only afterward.

mod document;
mod field_path;
mod version;

pub use document::{Document, DocumentKey};
pub use field_path::FieldPath;
pub use version::SnapshotVersion;
