//! DNF term extraction
//!
//! Splits a normalized filter into the OR-terms the query engine executes
//! one sub-query apiece. The number of terms is capped: full DNF expansion
//! is exponential in the nested disjunctive clauses, and a caller fanning
//! out per-term index lookups must see the blow-up as an explicit error
//! rather than an unbounded allocation.

use crate::filter::Filter;

use super::errors::{DnfError, DnfResult};
use super::normalize::{compute_dnf, is_disjunctive_normal_form};

/// Default cap on the number of disjunctive terms a query may expand to.
pub const DEFAULT_MAX_DISJUNCTIVE_TERMS: usize = 64;

/// Returns the terms of the filter's disjunctive normal form.
///
/// `None` yields the empty sequence (a query without a filter has no terms
/// to execute). A leaf or flat-conjunction result is a single term;
/// otherwise the disjunction's direct children are the terms, each already
/// a leaf or a flat conjunction by the DNF invariant.
///
/// Returns `NIMBUS_TOO_MANY_DNF_TERMS` when the expansion exceeds
/// `max_terms`.
pub fn dnf_terms(filter: Option<&Filter>, max_terms: usize) -> DnfResult<Vec<Filter>> {
    let Some(filter) = filter else {
        return Ok(Vec::new());
    };

    let normalized = compute_dnf(filter.clone());
    assert!(
        is_disjunctive_normal_form(&normalized),
        "normalization did not produce disjunctive normal form"
    );

    let terms = match normalized {
        Filter::Field(_) => vec![normalized],
        Filter::Composite(composite) => {
            if composite.is_flat_conjunction() {
                vec![Filter::Composite(composite)]
            } else {
                composite.into_parts().1
            }
        }
    };

    if terms.len() > max_terms {
        return Err(DnfError::too_many_terms(terms.len(), max_terms));
    }
    Ok(terms)
}
