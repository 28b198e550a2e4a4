//! Query and target handles
//!
//! A `Query` identifies a collection (or a single document) plus the filter
//! tree the caller built. A `Target` is the query's index-addressable
//! identity, the handle the index-capability collaborator reasons about.
//! Ordering and limit state live on the query but their application is the
//! caller's responsibility, outside this core.

#[allow(clippy::module_inception)]
mod query;
mod target;

pub use query::Query;
pub use target::Target;
