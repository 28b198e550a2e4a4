//! Index-addressable query identity

use crate::filter::Filter;
use crate::model::FieldPath;

/// The identity of a query as the index layer sees it: collection plus
/// filter and ordering fields, without limit or cursor state.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    collection: String,
    filter: Option<Filter>,
    order_by: Vec<FieldPath>,
}

impl Target {
    /// Creates a target.
    pub(crate) fn new(
        collection: String,
        filter: Option<Filter>,
        order_by: Vec<FieldPath>,
    ) -> Self {
        Self {
            collection,
            filter,
            order_by,
        }
    }

    /// Returns the collection this target addresses.
    #[inline]
    pub fn collection_id(&self) -> &str {
        &self.collection
    }

    /// Returns the filter, if any.
    #[inline]
    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Returns the ordering fields.
    #[inline]
    pub fn order_by(&self) -> &[FieldPath] {
        &self.order_by
    }

    /// Derives the sub-target for one DNF term of this target's filter.
    ///
    /// Collection and ordering fields are preserved; only the filter is
    /// replaced.
    pub fn with_filter(&self, term: Filter) -> Self {
        Self {
            collection: self.collection.clone(),
            filter: Some(term),
            order_by: self.order_by.clone(),
        }
    }

    /// Returns the deterministic index-lookup key for this target.
    pub fn canonical_id(&self) -> String {
        let filter_id = self
            .filter
            .as_ref()
            .map(|f| f.canonical_id())
            .unwrap_or_default();
        let order_id: Vec<String> = self
            .order_by
            .iter()
            .map(|p| p.canonical_string())
            .collect();
        format!("{}|f:{}|ob:{}", self.collection, filter_id, order_id.join(","))
    }
}
