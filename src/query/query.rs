//! Query handle consumed by the engine

use crate::filter::Filter;
use crate::model::{Document, DocumentKey, FieldPath};

use super::Target;

/// A query over a collection, or a point lookup of a single document.
///
/// Built once by query-building code and read-only afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    document_key: Option<DocumentKey>,
    filter: Option<Filter>,
    order_by: Vec<FieldPath>,
    limit: Option<u64>,
}

impl Query {
    /// Creates a query over every document of a collection.
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            document_key: None,
            filter: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Creates a point lookup of a single document.
    pub fn document(collection: impl Into<String>, key: DocumentKey) -> Self {
        Self {
            collection: collection.into(),
            document_key: Some(key),
            filter: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Sets the filter tree.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Appends an ordering field.
    pub fn with_order_by(mut self, path: FieldPath) -> Self {
        self.order_by.push(path);
        self
    }

    /// Sets the limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the collection this query addresses.
    #[inline]
    pub fn collection_id(&self) -> &str {
        &self.collection
    }

    /// Returns the filter tree, if any.
    #[inline]
    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Returns the ordering fields in declaration order.
    #[inline]
    pub fn order_by(&self) -> &[FieldPath] {
        &self.order_by
    }

    /// Returns the limit, if any.
    #[inline]
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the document key for a point lookup.
    #[inline]
    pub fn document_key(&self) -> Option<&DocumentKey> {
        self.document_key.as_ref()
    }

    /// Returns true if this query addresses a single document by key.
    pub fn is_document_query(&self) -> bool {
        self.document_key.is_some()
    }

    /// Returns true if this query matches every document unconditionally.
    ///
    /// Such queries gain nothing from an index and always take the
    /// full-scan path.
    pub fn matches_all_documents(&self) -> bool {
        self.document_key.is_none()
            && self.filter.is_none()
            && self.order_by.is_empty()
            && self.limit.is_none()
    }

    /// Evaluates the full (non-decomposed) query predicate against a
    /// document. A query without a filter matches everything.
    pub fn matches(&self, document: &Document) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(document))
    }

    /// Derives this query's index-addressable target.
    pub fn to_target(&self) -> Target {
        Target::new(
            self.collection.clone(),
            self.filter.clone(),
            self.order_by.clone(),
        )
    }
}
