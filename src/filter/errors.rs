//! Filter construction errors
//!
//! All construction failures are reported synchronously at construction
//! time; a filter tree is never partially built.

use thiserror::Error;

/// Result type for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;

/// Invalid-argument conditions raised by the filter construction API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Field path was empty or contained an empty segment
    #[error("Invalid field path: {0:?}")]
    InvalidFieldPath(String),

    /// Operator requires a non-null operand
    #[error("Operator {0} requires a non-null value")]
    MissingValue(&'static str),

    /// Operator requires a JSON array operand
    #[error("Operator {0} requires an array operand")]
    ArrayOperandRequired(&'static str),

    /// AND/OR given zero subfilters
    #[error("Composite {0} filter requires at least one subfilter")]
    EmptyComposite(&'static str),
}
