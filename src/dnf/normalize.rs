//! Boolean-algebra rewriting towards disjunctive normal form
//!
//! Two rewriting passes over immutable filter trees:
//!
//! 1. Associativity: `A | (B | C)` becomes `A | B | C`, and likewise for
//!    conjunctions. Single-child composites collapse to their child.
//! 2. Distribution of conjunction over disjunction:
//!    `P & (Q | R)` becomes `(P & Q) | (P & R)`. Only this direction is
//!    applied, since the goal is an OR of ANDs.
//!
//! `compute_dnf` combines the two bottom-up, folding distribution pairwise
//! over an AND-list rather than expanding in one step, which keeps
//! intermediate trees flat.

use crate::filter::{CompositeFilter, CompositeOperator, FieldFilter, Filter};

/// Returns whether the given filter is in disjunctive normal form.
///
/// DNF is one of: a single field filter; a flat conjunction; or a
/// disjunction whose children are each a field filter or a flat
/// conjunction.
pub fn is_disjunctive_normal_form(filter: &Filter) -> bool {
    is_leaf(filter) || is_flat_conjunction(filter) || is_disjunction_of_terms(filter)
}

fn is_leaf(filter: &Filter) -> bool {
    matches!(filter, Filter::Field(_))
}

fn is_flat_conjunction(filter: &Filter) -> bool {
    matches!(filter, Filter::Composite(c) if c.is_flat_conjunction())
}

fn is_disjunction_of_terms(filter: &Filter) -> bool {
    match filter {
        Filter::Composite(c) if c.is_disjunction() => c
            .filters()
            .iter()
            .all(|sub| is_leaf(sub) || is_flat_conjunction(sub)),
        _ => false,
    }
}

/// Applies the associativity law, flattening nested composites that share
/// an operator with their parent.
///
/// `A | (B | C)` becomes `A | B | C`; a composite with exactly one child
/// collapses to that child after recursive association. Mixed AND/OR
/// nesting is left for distribution.
pub fn apply_association(filter: Filter) -> Filter {
    let composite = match filter {
        Filter::Field(_) => return filter,
        Filter::Composite(c) => c,
    };

    if composite.filters().len() == 1 {
        let (_, mut filters) = composite.into_parts();
        let only = filters.pop().expect("empty composite filter");
        return apply_association(only);
    }

    // Association applied to an already-flat composite is itself.
    if composite.is_flat() {
        return Filter::Composite(composite);
    }

    let (op, filters) = composite.into_parts();
    let associated: Vec<Filter> = filters.into_iter().map(apply_association).collect();

    // Inline children that share this composite's operator:
    // (A | (B | C)) -> (A | B | C), while (A | (B & C)) stays as is.
    let mut flattened = Vec::with_capacity(associated.len());
    for sub in associated {
        match sub {
            Filter::Composite(inner) if inner.op() == op => {
                flattened.extend(inner.into_parts().1);
            }
            other => flattened.push(other),
        }
    }

    if flattened.len() == 1 {
        return flattened.pop().expect("empty composite filter");
    }
    Filter::Composite(CompositeFilter::new(op, flattened))
}

/// Distributes the conjunction of two filters over any disjunctions,
/// `P & (Q | R)` becoming `(P & Q) | (P & R)`.
///
/// Every result is re-associated before being returned so intermediate
/// trees stay flat for subsequent pairwise distributions.
pub fn apply_distribution(lhs: Filter, rhs: Filter) -> Filter {
    let result = match (lhs, rhs) {
        (Filter::Field(l), Filter::Field(r)) => distribute_leaves(l, r),
        (Filter::Field(l), Filter::Composite(r)) => distribute_field(l, r),
        (Filter::Composite(l), Filter::Field(r)) => distribute_field(r, l),
        (Filter::Composite(l), Filter::Composite(r)) => distribute_composites(l, r),
    };
    apply_association(result)
}

fn distribute_leaves(lhs: FieldFilter, rhs: FieldFilter) -> Filter {
    // The conjunction of two leaves is a two-element flat conjunction.
    Filter::Composite(CompositeFilter::new(
        CompositeOperator::And,
        vec![Filter::Field(lhs), Filter::Field(rhs)],
    ))
}

fn distribute_field(field: FieldFilter, composite: CompositeFilter) -> Filter {
    if composite.is_conjunction() {
        // A & (B & C) -> (B & C & A): flat AND absorption.
        return Filter::Composite(composite.with_added_filter(Filter::Field(field)));
    }
    // A & (B | C) -> (A & B) | (A & C)
    let (_, subfilters) = composite.into_parts();
    let results: Vec<Filter> = subfilters
        .into_iter()
        .map(|sub| apply_distribution(Filter::Field(field.clone()), sub))
        .collect();
    Filter::Composite(CompositeFilter::new(CompositeOperator::Or, results))
}

fn distribute_composites(lhs: CompositeFilter, rhs: CompositeFilter) -> Filter {
    assert!(
        !lhs.filters().is_empty() && !rhs.filters().is_empty(),
        "empty composite filter in distribution"
    );

    // (A & B) & (C & D) -> (A & B & C & D): a plain merge.
    if lhs.is_conjunction() && rhs.is_conjunction() {
        return Filter::Composite(lhs.with_added_filters(rhs.filters()));
    }

    // At least one side is a disjunction: distribute each of its disjuncts
    // over the other side and OR the results. When both sides are
    // disjunctions the left one is picked.
    let (disjunction, other) = if lhs.is_disjunction() {
        (lhs, rhs)
    } else {
        (rhs, lhs)
    };
    let (_, disjuncts) = disjunction.into_parts();
    let results: Vec<Filter> = disjuncts
        .into_iter()
        .map(|sub| apply_distribution(sub, Filter::Composite(other.clone())))
        .collect();
    Filter::Composite(CompositeFilter::new(CompositeOperator::Or, results))
}

/// Rewrites a filter tree into an equivalent disjunctive normal form.
///
/// Leaves return themselves; single-child composites recurse into their
/// child; otherwise children are normalized bottom-up, the parent is
/// re-associated, and any remaining AND-over-OR nesting is resolved by a
/// left fold of pairwise distribution.
pub fn compute_dnf(filter: Filter) -> Filter {
    let composite = match filter {
        Filter::Field(_) => return filter,
        Filter::Composite(c) => c,
    };

    if composite.filters().len() == 1 {
        let (_, mut filters) = composite.into_parts();
        let only = filters.pop().expect("empty composite filter");
        return compute_dnf(only);
    }

    let (op, filters) = composite.into_parts();
    let normalized: Vec<Filter> = filters.into_iter().map(compute_dnf).collect();
    let rebuilt = apply_association(Filter::Composite(CompositeFilter::new(op, normalized)));

    if is_disjunctive_normal_form(&rebuilt) {
        return rebuilt;
    }

    // Only a conjunction whose children include a disjunction can still be
    // out of DNF here: a disjunction of DNF children is itself in DNF, and
    // leaves were returned above.
    let Filter::Composite(conjunction) = rebuilt else {
        unreachable!("field filters are always in DNF form");
    };
    assert!(
        conjunction.is_conjunction(),
        "disjunction of DNF subfilters is itself in DNF form"
    );
    assert!(
        conjunction.filters().len() > 1,
        "single-child composites are already in DNF form"
    );

    let (_, children) = conjunction.into_parts();
    let mut children = children.into_iter();
    let mut running = children.next().expect("empty composite filter");
    for next in children {
        running = apply_distribution(running, next);
    }
    running
}
