//! Indexed query engine
//!
//! Executes a query by combining partial results obtained from secondary
//! indexes with a residual scan over documents the indexes have not yet
//! absorbed, merging the two sets without duplication or omission.
//!
//! The engine owns no storage: index capability and document access are
//! collaborator traits injected at construction, and every call to them is
//! a synchronous, already-consistent read. Collaborator failures propagate
//! unchanged; they are not retried here.

mod config;
#[allow(clippy::module_inception)]
mod engine;
mod errors;

pub use config::EngineConfig;
pub use engine::{DocumentView, IndexCapability, QueryEngine};
pub use errors::{EngineError, EngineResult};
