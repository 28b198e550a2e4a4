//! Composite AND/OR predicates

use serde::{Deserialize, Serialize};

use crate::model::Document;

use super::Filter;

/// The logical connective of a composite filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeOperator {
    /// Conjunction: true iff all children are true
    #[serde(rename = "and")]
    And,
    /// Disjunction: true iff any child is true
    #[serde(rename = "or")]
    Or,
}

impl CompositeOperator {
    /// Returns the canonical text of this connective.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeOperator::And => "and",
            CompositeOperator::Or => "or",
        }
    }
}

/// An AND/OR combination of sub-filters.
///
/// The child sequence is never empty: the construction API rejects empty
/// conjunctions and disjunctions before a composite is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeFilter {
    op: CompositeOperator,
    filters: Vec<Filter>,
}

impl CompositeFilter {
    /// Creates a composite filter over a non-empty child sequence.
    pub(crate) fn new(op: CompositeOperator, filters: Vec<Filter>) -> Self {
        assert!(!filters.is_empty(), "empty composite filter");
        Self { op, filters }
    }

    /// Returns the logical connective.
    #[inline]
    pub fn op(&self) -> CompositeOperator {
        self.op
    }

    /// Returns the children in declaration order.
    #[inline]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Consumes the composite, returning its connective and children.
    pub(crate) fn into_parts(self) -> (CompositeOperator, Vec<Filter>) {
        (self.op, self.filters)
    }

    /// Returns true if this composite is a conjunction.
    pub fn is_conjunction(&self) -> bool {
        self.op == CompositeOperator::And
    }

    /// Returns true if this composite is a disjunction.
    pub fn is_disjunction(&self) -> bool {
        self.op == CompositeOperator::Or
    }

    /// Returns true if every child is a field filter (no nested composites).
    pub fn is_flat(&self) -> bool {
        self.filters.iter().all(|f| matches!(f, Filter::Field(_)))
    }

    /// Returns true if this is a flat conjunction (AND of field filters only).
    pub fn is_flat_conjunction(&self) -> bool {
        self.is_conjunction() && self.is_flat()
    }

    /// Returns a new composite with one more child appended.
    ///
    /// Filters are immutable; the receiver is unchanged.
    pub fn with_added_filter(&self, filter: Filter) -> Self {
        let mut filters = self.filters.clone();
        filters.push(filter);
        Self::new(self.op, filters)
    }

    /// Returns a new composite with the given children appended.
    pub fn with_added_filters(&self, extra: &[Filter]) -> Self {
        let mut filters = self.filters.clone();
        filters.extend_from_slice(extra);
        Self::new(self.op, filters)
    }

    /// Evaluates this composite against a document, short-circuiting.
    pub fn matches(&self, document: &Document) -> bool {
        match self.op {
            CompositeOperator::And => self.filters.iter().all(|f| f.matches(document)),
            CompositeOperator::Or => self.filters.iter().any(|f| f.matches(document)),
        }
    }

    /// Returns the deterministic identity string of this composite.
    pub fn canonical_id(&self) -> String {
        let children: Vec<String> = self.filters.iter().map(|f| f.canonical_id()).collect();
        format!("{}({})", self.op.as_str(), children.join(","))
    }
}
