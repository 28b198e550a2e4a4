//! DNF normalization
//!
//! Pure functions that rewrite a filter tree into logically equivalent
//! disjunctive normal form (an OR of ANDs of leaf predicates) using the
//! associativity and distribution laws, and extract the OR-terms of the
//! result for per-term index execution.
//!
//! Full DNF expansion is exponential in the number of nested disjunctive
//! clauses; term extraction therefore takes an explicit cap and reports
//! overflow instead of silently consuming unbounded memory.

mod errors;
mod normalize;
mod terms;

pub use errors::{DnfError, DnfResult};
pub use normalize::{
    apply_association, apply_distribution, compute_dnf, is_disjunctive_normal_form,
};
pub use terms::{dnf_terms, DEFAULT_MAX_DISJUNCTIVE_TERMS};
