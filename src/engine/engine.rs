//! Query execution over index-backed collaborators

use std::collections::{BTreeMap, BTreeSet};

use crate::dnf::dnf_terms;
use crate::model::{Document, DocumentKey, SnapshotVersion};
use crate::observability::Logger;
use crate::query::{Query, Target};

use super::config::EngineConfig;
use super::errors::EngineResult;

/// Read-only view of the secondary indexes.
pub trait IndexCapability {
    /// Returns true if indexes exist that can produce the target's result
    /// set on their own. The decision is the index layer's; the engine
    /// never second-guesses it.
    fn can_serve_from_index(&self, target: &Target) -> EngineResult<bool>;

    /// Returns the keys of every document the indexes report as matching
    /// the target.
    fn documents_matching_target(&self, target: &Target)
        -> EngineResult<BTreeSet<DocumentKey>>;

    /// Returns the oldest watermark among the indexes serving the given
    /// targets. Every write at or before it is reflected in all of them.
    fn least_recent_index_read_time(&self, targets: &[Target])
        -> EngineResult<SnapshotVersion>;
}

/// Read-only view of the document store.
pub trait DocumentView {
    /// Scans for documents matching the query, restricted to documents
    /// written after `since`. `SnapshotVersion::none()` scans everything.
    fn documents_matching_query(
        &self,
        query: &Query,
        since: SnapshotVersion,
    ) -> EngineResult<BTreeMap<DocumentKey, Document>>;

    /// Fetches the documents for the given keys. Keys with no current
    /// document are absent from the result.
    fn documents(
        &self,
        keys: &BTreeSet<DocumentKey>,
    ) -> EngineResult<BTreeMap<DocumentKey, Document>>;
}

/// Executes queries by combining indexed lookups with a residual scan over
/// documents written after the indexes' watermark.
///
/// Stateless between calls; collaborators are injected once at
/// construction and shared immutably.
pub struct QueryEngine<'a, I, D> {
    index: &'a I,
    documents: &'a D,
    config: EngineConfig,
}

impl<'a, I: IndexCapability, D: DocumentView> QueryEngine<'a, I, D> {
    /// Creates an engine over the given collaborators.
    pub fn new(index: &'a I, documents: &'a D, config: EngineConfig) -> Self {
        Self {
            index,
            documents,
            config,
        }
    }

    /// Returns every document matching the query, keyed and deduplicated.
    ///
    /// Document queries resolve directly against the store. Collection
    /// queries go through the indexes when possible and fall back to a
    /// full collection scan otherwise; either path yields the same result
    /// set, only the cost differs.
    pub fn get_documents_matching_query(
        &self,
        query: &Query,
    ) -> EngineResult<BTreeMap<DocumentKey, Document>> {
        if query.is_document_query() {
            return self
                .documents
                .documents_matching_query(query, SnapshotVersion::none());
        }
        self.perform_collection_query(query)
    }

    fn perform_collection_query(
        &self,
        query: &Query,
    ) -> EngineResult<BTreeMap<DocumentKey, Document>> {
        debug_assert!(!query.is_document_query());

        if query.matches_all_documents() {
            return self.execute_full_collection_scan(query, "matches all documents");
        }

        let target = query.to_target();
        if !self.index.can_serve_from_index(&target)? {
            return self.execute_full_collection_scan(query, "not servable from index");
        }

        let terms = match dnf_terms(query.filter(), self.config.max_disjunctive_terms) {
            Ok(terms) => terms,
            Err(err) => {
                Logger::warn(
                    "QUERY_TERM_CAP_EXCEEDED",
                    &[
                        ("collection", query.collection_id()),
                        ("term_count", &err.term_count().to_string()),
                        ("max_terms", &err.max_terms().to_string()),
                    ],
                );
                return self.execute_full_collection_scan(query, "disjunctive term cap");
            }
        };

        // A servable filterless query (pure order-by) has no terms; the
        // target itself is the single index lookup.
        let sub_targets: Vec<Target> = if terms.is_empty() {
            vec![target]
        } else {
            terms.into_iter().map(|term| target.with_filter(term)).collect()
        };

        let mut keys = BTreeSet::new();
        for sub_target in &sub_targets {
            keys.extend(self.index.documents_matching_target(sub_target)?);
        }
        let mut results = self.documents.documents(&keys)?;

        // One residual scan from the oldest watermark covers every
        // sub-target, at the price of re-reading documents the fresher
        // indexes already returned.
        let watermark = self.index.least_recent_index_read_time(&sub_targets)?;
        let additional = self.documents.documents_matching_query(query, watermark)?;

        for (key, document) in additional {
            match results.get(&key) {
                Some(indexed) => {
                    // A correctly maintained index and the scan must agree
                    // on the document at a given key.
                    if indexed != &document {
                        debug_assert!(
                            false,
                            "indexed and scanned copies disagree for {}",
                            key
                        );
                        Logger::warn(
                            "QUERY_MERGE_DIVERGENCE",
                            &[("collection", query.collection_id()), ("key", key.as_str())],
                        );
                    }
                }
                None => {
                    results.insert(key, document);
                }
            }
        }

        Ok(results)
    }

    fn execute_full_collection_scan(
        &self,
        query: &Query,
        reason: &str,
    ) -> EngineResult<BTreeMap<DocumentKey, Document>> {
        Logger::debug(
            "QUERY_FULL_SCAN",
            &[("collection", query.collection_id()), ("reason", reason)],
        );
        self.documents
            .documents_matching_query(query, SnapshotVersion::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::filter::Filter;
    use crate::model::FieldPath;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::cell::{Cell, RefCell};

    fn version(seconds: i64) -> SnapshotVersion {
        SnapshotVersion::new(Utc.timestamp_opt(seconds, 0).unwrap())
    }

    fn doc(key: &str, body: Value) -> Document {
        Document::new(DocumentKey::new(key), body)
    }

    /// Index stub: evaluates sub-target filters over the documents it has
    /// absorbed, all sharing one watermark.
    struct MockIndex {
        servable: bool,
        indexed: Vec<Document>,
        read_times: Vec<SnapshotVersion>,
        target_lookups: Cell<usize>,
    }

    impl MockIndex {
        fn new(servable: bool, indexed: Vec<Document>, read_times: Vec<SnapshotVersion>) -> Self {
            Self {
                servable,
                indexed,
                read_times,
                target_lookups: Cell::new(0),
            }
        }
    }

    impl IndexCapability for MockIndex {
        fn can_serve_from_index(&self, _target: &Target) -> EngineResult<bool> {
            Ok(self.servable)
        }

        fn documents_matching_target(
            &self,
            target: &Target,
        ) -> EngineResult<BTreeSet<DocumentKey>> {
            self.target_lookups.set(self.target_lookups.get() + 1);
            Ok(self
                .indexed
                .iter()
                .filter(|d| target.filter().map_or(true, |f| f.matches(d)))
                .map(|d| d.key().clone())
                .collect())
        }

        fn least_recent_index_read_time(
            &self,
            _targets: &[Target],
        ) -> EngineResult<SnapshotVersion> {
            Ok(self
                .read_times
                .iter()
                .copied()
                .min()
                .unwrap_or_else(SnapshotVersion::none))
        }
    }

    /// Store stub: documents with per-document write versions; residual
    /// scans return matches written strictly after `since`.
    struct MockStore {
        docs: Vec<(Document, SnapshotVersion)>,
        last_scan_since: RefCell<Option<SnapshotVersion>>,
    }

    impl MockStore {
        fn new(docs: Vec<(Document, SnapshotVersion)>) -> Self {
            Self {
                docs,
                last_scan_since: RefCell::new(None),
            }
        }
    }

    impl DocumentView for MockStore {
        fn documents_matching_query(
            &self,
            query: &Query,
            since: SnapshotVersion,
        ) -> EngineResult<BTreeMap<DocumentKey, Document>> {
            *self.last_scan_since.borrow_mut() = Some(since);
            Ok(self
                .docs
                .iter()
                .filter(|(d, written)| {
                    (since.is_none() || *written > since)
                        && query.document_key().map_or(true, |k| k == d.key())
                        && query.matches(d)
                })
                .map(|(d, _)| (d.key().clone(), d.clone()))
                .collect())
        }

        fn documents(
            &self,
            keys: &BTreeSet<DocumentKey>,
        ) -> EngineResult<BTreeMap<DocumentKey, Document>> {
            Ok(self
                .docs
                .iter()
                .filter(|(d, _)| keys.contains(d.key()))
                .map(|(d, _)| (d.key().clone(), d.clone()))
                .collect())
        }
    }

    struct FailingIndex;

    impl IndexCapability for FailingIndex {
        fn can_serve_from_index(&self, _target: &Target) -> EngineResult<bool> {
            Err(EngineError::collaborator("index catalog unavailable"))
        }

        fn documents_matching_target(
            &self,
            _target: &Target,
        ) -> EngineResult<BTreeSet<DocumentKey>> {
            Err(EngineError::collaborator("index catalog unavailable"))
        }

        fn least_recent_index_read_time(
            &self,
            _targets: &[Target],
        ) -> EngineResult<SnapshotVersion> {
            Err(EngineError::collaborator("index catalog unavailable"))
        }
    }

    #[test]
    fn test_document_query_short_circuits_index() {
        let index = MockIndex::new(true, Vec::new(), vec![version(10)]);
        let store = MockStore::new(vec![
            (doc("users/alice", json!({"name": "Alice"})), version(5)),
            (doc("users/bob", json!({"name": "Bob"})), version(5)),
        ]);
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let query = Query::document("users", DocumentKey::new("users/alice"));
        let results = engine.get_documents_matching_query(&query).unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.contains_key(&DocumentKey::new("users/alice")));
        assert_eq!(index.target_lookups.get(), 0);
        // Point lookups scan from the zero version.
        assert_eq!(
            *store.last_scan_since.borrow(),
            Some(SnapshotVersion::none())
        );
    }

    #[test]
    fn test_match_all_query_skips_index() {
        let index = MockIndex::new(true, Vec::new(), vec![version(10)]);
        let store = MockStore::new(vec![
            (doc("users/alice", json!({"a": 1})), version(5)),
            (doc("users/bob", json!({"a": 2})), version(6)),
        ]);
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let results = engine
            .get_documents_matching_query(&Query::collection("users"))
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(index.target_lookups.get(), 0);
    }

    #[test]
    fn test_unservable_query_full_scan() {
        let index = MockIndex::new(false, Vec::new(), vec![version(10)]);
        let store = MockStore::new(vec![
            (doc("users/alice", json!({"age": 30})), version(5)),
            (doc("users/bob", json!({"age": 15})), version(6)),
        ]);
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let query = Query::collection("users")
            .with_filter(Filter::greater_than_or_equal("age", json!(18)).unwrap());
        let results = engine.get_documents_matching_query(&query).unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.contains_key(&DocumentKey::new("users/alice")));
        assert_eq!(index.target_lookups.get(), 0);
        assert_eq!(
            *store.last_scan_since.borrow(),
            Some(SnapshotVersion::none())
        );
    }

    #[test]
    fn test_indexed_results_merged_with_residual_scan() {
        // doc1 and doc2 are indexed at watermark 2; doc3 arrived at 3 and
        // only the residual scan can see it.
        let doc1 = doc("coll/doc1", json!({"foo": true, "n": 1}));
        let doc2 = doc("coll/doc2", json!({"foo": true, "n": 2}));
        let doc3 = doc("coll/doc3", json!({"foo": true, "n": 3}));

        let index = MockIndex::new(true, vec![doc1.clone(), doc2.clone()], vec![version(2)]);
        let store = MockStore::new(vec![
            (doc1, version(1)),
            (doc2, version(2)),
            (doc3, version(3)),
            (doc("coll/doc4", json!({"foo": false})), version(3)),
        ]);
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let query = Query::collection("coll")
            .with_filter(Filter::equal_to("foo", json!(true)).unwrap());
        let results = engine.get_documents_matching_query(&query).unwrap();

        let keys: Vec<&str> = results.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["coll/doc1", "coll/doc2", "coll/doc3"]);
        assert_eq!(*store.last_scan_since.borrow(), Some(version(2)));
    }

    #[test]
    fn test_overlapping_results_deduplicated() {
        // Watermark none: the residual scan re-reads everything the index
        // returned. Each key must still appear exactly once.
        let doc1 = doc("coll/doc1", json!({"foo": true}));
        let index = MockIndex::new(
            true,
            vec![doc1.clone()],
            vec![SnapshotVersion::none()],
        );
        let store = MockStore::new(vec![(doc1.clone(), version(1))]);
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let query = Query::collection("coll")
            .with_filter(Filter::equal_to("foo", json!(true)).unwrap());
        let results = engine.get_documents_matching_query(&query).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[doc1.key()], doc1);
    }

    /// Store stub that hands out different copies of the same key from its
    /// keyed fetch and its scan, simulating a torn read.
    struct DivergentStore {
        fetched: Document,
        scanned: Document,
    }

    impl DocumentView for DivergentStore {
        fn documents_matching_query(
            &self,
            _query: &Query,
            _since: SnapshotVersion,
        ) -> EngineResult<BTreeMap<DocumentKey, Document>> {
            Ok(BTreeMap::from([(
                self.scanned.key().clone(),
                self.scanned.clone(),
            )]))
        }

        fn documents(
            &self,
            _keys: &BTreeSet<DocumentKey>,
        ) -> EngineResult<BTreeMap<DocumentKey, Document>> {
            Ok(BTreeMap::from([(
                self.fetched.key().clone(),
                self.fetched.clone(),
            )]))
        }
    }

    #[test]
    #[should_panic(expected = "disagree")]
    fn test_merge_divergence_asserts() {
        let fetched = doc("coll/doc1", json!({"foo": true, "stale": true}));
        let index = MockIndex::new(true, vec![fetched.clone()], vec![SnapshotVersion::none()]);
        let store = DivergentStore {
            fetched,
            scanned: doc("coll/doc1", json!({"foo": true, "stale": false})),
        };
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let query = Query::collection("coll")
            .with_filter(Filter::equal_to("foo", json!(true)).unwrap());
        let _ = engine.get_documents_matching_query(&query);
    }

    #[test]
    fn test_disjunction_fans_out_per_term() {
        let doc1 = doc("coll/doc1", json!({"a": 1}));
        let doc2 = doc("coll/doc2", json!({"b": 2}));
        let index = MockIndex::new(true, vec![doc1, doc2], vec![version(9)]);
        let store = MockStore::new(vec![
            (doc("coll/doc1", json!({"a": 1})), version(1)),
            (doc("coll/doc2", json!({"b": 2})), version(1)),
        ]);
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let filter = Filter::or(vec![
            Filter::equal_to("a", json!(1)).unwrap(),
            Filter::equal_to("b", json!(2)).unwrap(),
        ])
        .unwrap();
        let query = Query::collection("coll").with_filter(filter);
        let results = engine.get_documents_matching_query(&query).unwrap();

        assert_eq!(results.len(), 2);
        // One index lookup per disjunctive term.
        assert_eq!(index.target_lookups.get(), 2);
    }

    #[test]
    fn test_term_cap_overflow_falls_back_to_full_scan() {
        let index = MockIndex::new(true, Vec::new(), vec![version(9)]);
        let store = MockStore::new(vec![(
            doc("coll/doc1", json!({"a": 1, "b": 1})),
            version(1),
        )]);
        let engine = QueryEngine::new(
            &index,
            &store,
            EngineConfig {
                max_disjunctive_terms: 1,
            },
        );

        // Two terms > cap of one: correctness is preserved via full scan.
        let filter = Filter::and(vec![
            Filter::equal_to("a", json!(1)).unwrap(),
            Filter::or(vec![
                Filter::equal_to("b", json!(1)).unwrap(),
                Filter::equal_to("b", json!(2)).unwrap(),
            ])
            .unwrap(),
        ])
        .unwrap();
        let query = Query::collection("coll").with_filter(filter);
        let results = engine.get_documents_matching_query(&query).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(index.target_lookups.get(), 0);
        assert_eq!(
            *store.last_scan_since.borrow(),
            Some(SnapshotVersion::none())
        );
    }

    #[test]
    fn test_servable_filterless_query_uses_target_itself() {
        let doc1 = doc("coll/doc1", json!({"age": 3}));
        let index = MockIndex::new(true, vec![doc1.clone()], vec![version(9)]);
        let store = MockStore::new(vec![(doc1, version(1))]);
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        // order-by makes the query indexable without a filter.
        let query = Query::collection("coll")
            .with_order_by(FieldPath::from_dot_separated("age").unwrap());
        let results = engine.get_documents_matching_query(&query).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(index.target_lookups.get(), 1);
    }

    #[test]
    fn test_collaborator_failure_propagates_verbatim() {
        let index = FailingIndex;
        let store = MockStore::new(Vec::new());
        let engine = QueryEngine::new(&index, &store, EngineConfig::default());

        let query = Query::collection("coll")
            .with_filter(Filter::equal_to("a", json!(1)).unwrap());
        let err = engine.get_documents_matching_query(&query).unwrap_err();

        assert_eq!(err, EngineError::collaborator("index catalog unavailable"));
    }
}
