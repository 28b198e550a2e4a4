//! Normalization error types
//!
//! Error code:
//! - NIMBUS_TOO_MANY_DNF_TERMS (ERROR)
//!
//! Internal contract breaches during normalization (an empty composite
//! reaching distribution, a non-DNF normalization result) are programmer
//! errors and assert fatally instead of producing an error value.

use std::fmt;

use crate::observability::Severity;

/// Result type for bounded normalization operations.
pub type DnfResult<T> = Result<T, DnfError>;

/// DNF expansion exceeded the configured term cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnfError {
    term_count: usize,
    max_terms: usize,
}

impl DnfError {
    /// Creates a term-cap overflow error.
    pub fn too_many_terms(term_count: usize, max_terms: usize) -> Self {
        Self {
            term_count,
            max_terms,
        }
    }

    /// Returns the string code for this error.
    pub fn code(&self) -> &'static str {
        "NIMBUS_TOO_MANY_DNF_TERMS"
    }

    /// Returns the severity of this error. Overflow is recoverable: the
    /// caller can fall back to an unindexed execution path.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Returns the number of terms the expansion produced.
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// Returns the cap that was exceeded.
    pub fn max_terms(&self) -> usize {
        self.max_terms
    }
}

impl fmt::Display for DnfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ERROR] {}: normalization produced {} disjunctive terms (limit {})",
            self.code(),
            self.term_count,
            self.max_terms
        )
    }
}

impl std::error::Error for DnfError {}
