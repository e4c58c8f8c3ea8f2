//! Length-based multiplicity analysis.
//!
//! Under any assignment the two sides have equal length, so
//!
//! ```text
//! sum_v (left(v) - right(v)) * |v| = ground(right) - ground(left)
//! ```
//!
//! where `left(v)`/`right(v)` count the occurrences of variable `v` and
//! `ground` counts constants and letters. The analysis only reasons about the
//! signs of the per-variable imbalances and the ground totals; it never looks
//! at symbol order.

use std::collections::BTreeSet;

use crate::equation::Equation;
use crate::symbol::Symbol;

/// Result of the length analysis.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LengthVerdict {
    /// No lengths satisfy the counting constraint.
    Unsatisfiable,
    /// `variable` is the only imbalanced variable and must have exactly `length` symbols.
    Forced { variable: Symbol, length: usize },
    Inconclusive,
}

pub fn check_length_rules(eq: &Equation) -> LengthVerdict {
    let left = eq.left().structure();
    let right = eq.right().structure();
    let ground_diff = right.ground_total() as i64 - left.ground_total() as i64;

    let variables: BTreeSet<&Symbol> = left.variables().chain(right.variables()).map(|(v, _)| v).collect();
    let imbalances: Vec<(&Symbol, i64)> = variables
        .into_iter()
        .map(|v| (v, left.count(v) as i64 - right.count(v) as i64))
        .filter(|&(_, d)| d != 0)
        .collect();

    if imbalances.is_empty() {
        return if ground_diff == 0 {
            LengthVerdict::Inconclusive
        } else {
            LengthVerdict::Unsatisfiable
        };
    }

    if imbalances.iter().all(|&(_, d)| d > 0) && ground_diff < 0 {
        return LengthVerdict::Unsatisfiable;
    }
    if imbalances.iter().all(|&(_, d)| d < 0) && ground_diff > 0 {
        return LengthVerdict::Unsatisfiable;
    }

    if let [(variable, d)] = imbalances.as_slice() {
        if ground_diff % d != 0 || ground_diff / d < 0 {
            return LengthVerdict::Unsatisfiable;
        }
        return LengthVerdict::Forced {
            variable: (*variable).clone(),
            length: (ground_diff / d) as usize,
        };
    }

    LengthVerdict::Inconclusive
}
