//! Engine error types
//!
//! Error code:
//! - NIMBUS_COLLABORATOR_FAILED (ERROR)
//!
//! Internal contract breaches (a servability claim without a usable index,
//! an empty composite reaching execution) are programmer errors and are
//! asserted fatal rather than surfaced as error values: continuing would
//! silently produce a wrong query result, which is worse than a crash.

use std::fmt;

use crate::observability::Severity;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by query execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Failure reported by the index-capability or document-view
    /// collaborator, preserved verbatim.
    Collaborator(String),
}

impl EngineError {
    /// Creates a collaborator failure, preserving the collaborator's detail.
    pub fn collaborator(detail: impl Into<String>) -> Self {
        Self::Collaborator(detail.into())
    }

    /// Returns the string code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Collaborator(_) => "NIMBUS_COLLABORATOR_FAILED",
        }
    }

    /// Returns the severity of this error.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Collaborator(_) => Severity::Error,
        }
    }

    /// Returns the failure detail.
    pub fn message(&self) -> &str {
        match self {
            Self::Collaborator(detail) => detail,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code(), self.message())
    }
}

impl std::error::Error for EngineError {}
