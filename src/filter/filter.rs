//! The filter tree and its construction API
//!
//! `Filter` is a closed sum over leaf and composite nodes, so every
//! consumer branches with exhaustive pattern matching. Construction
//! validates arguments eagerly: field paths are resolved immediately and a
//! leaf can never exist in an unresolved state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Document, FieldPath};

use super::errors::{FilterError, FilterResult};
use super::{CompositeFilter, CompositeOperator, FieldFilter, Operator};

/// A predicate tree: a leaf field predicate or an AND/OR composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// Leaf predicate over one document field
    Field(FieldFilter),
    /// AND/OR combination of sub-filters
    Composite(CompositeFilter),
}

impl Filter {
    /// Constructs a leaf field filter, validating the operand.
    pub fn field_filter(field: &str, op: Operator, value: Value) -> FilterResult<Self> {
        let path = FieldPath::from_dot_separated(field)
            .ok_or_else(|| FilterError::InvalidFieldPath(field.to_string()))?;
        if value.is_null() {
            return Err(FilterError::MissingValue(op.as_str()));
        }
        if op.requires_array_operand() && !value.is_array() {
            return Err(FilterError::ArrayOperandRequired(op.as_str()));
        }
        Ok(Filter::Field(FieldFilter::new(path, op, value)))
    }

    /// `field == value`
    pub fn equal_to(field: &str, value: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::Equal, value)
    }

    /// `field != value`
    pub fn not_equal_to(field: &str, value: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::NotEqual, value)
    }

    /// `field < value`
    pub fn less_than(field: &str, value: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::LessThan, value)
    }

    /// `field <= value`
    pub fn less_than_or_equal(field: &str, value: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::LessThanOrEqual, value)
    }

    /// `field > value`
    pub fn greater_than(field: &str, value: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::GreaterThan, value)
    }

    /// `field >= value`
    pub fn greater_than_or_equal(field: &str, value: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::GreaterThanOrEqual, value)
    }

    /// Array field contains `value`.
    pub fn array_contains(field: &str, value: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::ArrayContains, value)
    }

    /// Array field intersects the `values` array.
    pub fn array_contains_any(field: &str, values: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::ArrayContainsAny, values)
    }

    /// Field value is an element of the `values` array.
    pub fn is_in(field: &str, values: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::In, values)
    }

    /// Field value is absent from the `values` array.
    pub fn not_in(field: &str, values: Value) -> FilterResult<Self> {
        Self::field_filter(field, Operator::NotIn, values)
    }

    /// Conjunction of the given filters.
    pub fn and(filters: Vec<Filter>) -> FilterResult<Self> {
        Self::composite(CompositeOperator::And, filters)
    }

    /// Disjunction of the given filters.
    pub fn or(filters: Vec<Filter>) -> FilterResult<Self> {
        Self::composite(CompositeOperator::Or, filters)
    }

    fn composite(op: CompositeOperator, filters: Vec<Filter>) -> FilterResult<Self> {
        if filters.is_empty() {
            return Err(FilterError::EmptyComposite(op.as_str()));
        }
        Ok(Filter::Composite(CompositeFilter::new(op, filters)))
    }

    /// Recursively evaluates the tree against a document.
    ///
    /// AND short-circuits on the first false child, OR on the first true
    /// child; leaves evaluate their operator against the field value.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::Field(field) => field.matches(document),
            Filter::Composite(composite) => composite.matches(document),
        }
    }

    /// Returns the first inequality field filter in pre-order, if any.
    pub fn inequality_filter(&self) -> Option<&FieldFilter> {
        match self {
            Filter::Field(field) => field.is_inequality().then_some(field),
            Filter::Composite(composite) => composite
                .filters()
                .iter()
                .find_map(|f| f.inequality_filter()),
        }
    }

    /// Flattens this tree by associativity.
    ///
    /// Child composites sharing the parent's connective are inlined
    /// recursively, left to right. A leaf flattens to itself.
    pub fn flatten(&self) -> Vec<Filter> {
        match self {
            Filter::Field(_) => vec![self.clone()],
            Filter::Composite(composite) => {
                let mut flattened = Vec::with_capacity(composite.filters().len());
                flatten_into(composite, &mut flattened);
                flattened
            }
        }
    }

    /// Returns the deterministic identity string of this tree.
    pub fn canonical_id(&self) -> String {
        match self {
            Filter::Field(field) => field.canonical_id(),
            Filter::Composite(composite) => composite.canonical_id(),
        }
    }
}

fn flatten_into(composite: &CompositeFilter, out: &mut Vec<Filter>) {
    for child in composite.filters() {
        match child {
            Filter::Composite(inner) if inner.op() == composite.op() => {
                flatten_into(inner, out);
            }
            _ => out.push(child.clone()),
        }
    }
}
