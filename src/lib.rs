//! nimbusdb-client - filter composition and query execution core
//!
//! Three layers, bottom to top:
//!
//! - [`filter`]: a closed tree of field predicates composed with AND/OR,
//!   validated at construction and immutable afterward
//! - [`dnf`]: pure rewriting of a filter tree into disjunctive normal form
//!   and extraction of its OR-terms, with a cap on the expansion
//! - [`engine`]: query execution that unions per-term index lookups with a
//!   residual scan from the indexes' oldest watermark
//!
//! [`model`] holds the shared value types (documents, keys, field paths,
//! snapshot versions) and [`query`] the read-only query handle the engine
//! consumes.

pub mod dnf;
pub mod engine;
pub mod filter;
pub mod model;
pub mod observability;
pub mod query;
