//! Field filter operators

use serde::{Deserialize, Serialize};

/// The closed set of operators a field filter can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Strictly less than
    #[serde(rename = "<")]
    LessThan,

    /// Less than or equal
    #[serde(rename = "<=")]
    LessThanOrEqual,

    /// Equality
    #[serde(rename = "==")]
    Equal,

    /// Inequality
    #[serde(rename = "!=")]
    NotEqual,

    /// Strictly greater than
    #[serde(rename = ">")]
    GreaterThan,

    /// Greater than or equal
    #[serde(rename = ">=")]
    GreaterThanOrEqual,

    /// Array field contains the operand
    #[serde(rename = "array_contains")]
    ArrayContains,

    /// Array field intersects the operand array
    #[serde(rename = "array_contains_any")]
    ArrayContainsAny,

    /// Field value is an element of the operand array
    #[serde(rename = "in")]
    In,

    /// Field value is absent from the operand array
    #[serde(rename = "not_in")]
    NotIn,
}

impl Operator {
    /// Returns the canonical text of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::ArrayContains => "array_contains",
            Operator::ArrayContainsAny => "array_contains_any",
            Operator::In => "in",
            Operator::NotIn => "not_in",
        }
    }

    /// Returns true if this is an inequality operator.
    ///
    /// A query may carry at most one inequality field in the execution
    /// model, so callers use this to enforce the single-inequality
    /// constraint.
    pub fn is_inequality(&self) -> bool {
        matches!(
            self,
            Operator::LessThan
                | Operator::LessThanOrEqual
                | Operator::GreaterThan
                | Operator::GreaterThanOrEqual
                | Operator::NotEqual
                | Operator::NotIn
        )
    }

    /// Returns true if this operator's operand must be a JSON array.
    pub fn requires_array_operand(&self) -> bool {
        matches!(
            self,
            Operator::ArrayContainsAny | Operator::In | Operator::NotIn
        )
    }
}
