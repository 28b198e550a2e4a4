//! Leaf field predicates
//!
//! Evaluation is strict: a missing field never matches, a `Null` field
//! value never matches, and ordering comparisons apply only between two
//! numbers or two strings (no type coercion).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Document, FieldPath};

use super::Operator;

/// A leaf predicate comparing one document field to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    field: FieldPath,
    op: Operator,
    value: Value,
}

impl FieldFilter {
    /// Creates a field filter.
    ///
    /// Argument validation happens in the `Filter` construction API; by the
    /// time this constructor runs the operand is known to fit the operator.
    pub(crate) fn new(field: FieldPath, op: Operator, value: Value) -> Self {
        Self { field, op, value }
    }

    /// Returns the field path.
    #[inline]
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    /// Returns the operator.
    #[inline]
    pub fn op(&self) -> Operator {
        self.op
    }

    /// Returns the comparison operand.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns true if this filter carries an inequality operator.
    pub fn is_inequality(&self) -> bool {
        self.op.is_inequality()
    }

    /// Evaluates this predicate against a document.
    pub fn matches(&self, document: &Document) -> bool {
        let Some(field_value) = document.field(&self.field) else {
            return false;
        };
        // Null field values never match, for any operator.
        if field_value.is_null() {
            return false;
        }
        self.matches_value(field_value)
    }

    fn matches_value(&self, actual: &Value) -> bool {
        match self.op {
            Operator::Equal => actual == &self.value,
            Operator::NotEqual => actual != &self.value,
            Operator::LessThan => {
                matches!(compare_values(actual, &self.value), Some(Ordering::Less))
            }
            Operator::LessThanOrEqual => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::GreaterThan => {
                matches!(compare_values(actual, &self.value), Some(Ordering::Greater))
            }
            Operator::GreaterThanOrEqual => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::ArrayContains => actual
                .as_array()
                .map_or(false, |elements| elements.contains(&self.value)),
            Operator::ArrayContainsAny => match (actual.as_array(), self.value.as_array()) {
                (Some(elements), Some(operands)) => {
                    elements.iter().any(|element| operands.contains(element))
                }
                _ => false,
            },
            Operator::In => self
                .value
                .as_array()
                .map_or(false, |operands| operands.contains(actual)),
            Operator::NotIn => self
                .value
                .as_array()
                .map_or(false, |operands| !operands.contains(actual)),
        }
    }

    /// Returns the deterministic identity string of this filter.
    pub fn canonical_id(&self) -> String {
        format!(
            "{}{}{}",
            self.field.canonical_string(),
            self.op.as_str(),
            self.value
        )
    }
}

/// Compares two values for ordering purposes.
///
/// Only number/number and string/string pairs are comparable; everything
/// else yields `None` (and therefore never matches a range operator).
fn compare_values(actual: &Value, bound: &Value) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                return Some(ai.cmp(&bi));
            }
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
