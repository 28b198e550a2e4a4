//! Structured logging for the query stack
//!
//! One log line is one event, emitted synchronously as a single JSON
//! object with deterministic key ordering. Logging is read-only: it never
//! influences query results, and a write failure is swallowed rather than
//! surfaced to the caller.

mod logger;

pub use logger::{Logger, Severity};
