//! Filter data model
//!
//! Filters form a recursive predicate tree: leaf field predicates
//! (`FieldFilter`) and composite AND/OR nodes (`CompositeFilter`) over
//! sub-filters. Trees are immutable values: composing filters always
//! constructs a new tree.
//!
//! Construction goes through the associated functions on [`Filter`]
//! (`equal_to`, `less_than`, ..., `and`, `or`), which validate their
//! arguments up front so that a malformed tree is never partially built.

mod composite;
mod errors;
mod field;
#[allow(clippy::module_inception)]
mod filter;
mod operator;

pub use composite::{CompositeFilter, CompositeOperator};
pub use errors::{FilterError, FilterResult};
pub use field::FieldFilter;
pub use filter::Filter;
pub use operator::Operator;
