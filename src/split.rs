//! Splitting equations at equidecomposable prefixes and suffixes.
//!
//! Two runs of equal length whose variable and letter multisets coincide
//! denote words of equal length under every assignment, so an equation whose
//! sides start (or end) with such runs is equivalent to the conjunction of the
//! runs' equation and the remainder's equation.

use crate::equation::Equation;
use crate::structure::Structure;
use crate::symbol::Symbol;
use crate::system::EqSystem;

/// Checks two equal-length runs.
///
/// Returns `(decomposable, literally_equal)`.
pub fn check_equidecomposability(a: &[Symbol], b: &[Symbol]) -> (bool, bool) {
    debug_assert_eq!(a.len(), b.len());
    if a == b {
        return (true, true);
    }

    let sa = Structure::from_symbols(a);
    let sb = Structure::from_symbols(b);
    if sa.vars_total() + sa.letters_total() == 0 && sb.vars_total() + sb.letters_total() == 0 {
        // Constant-only runs must match symbol by symbol.
        return (false, false);
    }

    let same = sa.variables().eq(sb.variables()) && sa.letters().eq(sb.letters());
    (same, false)
}

impl Equation {
    /// Splits the equation into a system of smaller equations.
    ///
    /// Returns the equation itself as a singleton system when it has no split
    /// point.
    pub fn split_by_equidecomposability(&self) -> EqSystem {
        let left: Vec<Symbol> = self.left().iter().cloned().collect();
        let right: Vec<Symbol> = self.right().iter().cloned().collect();

        let mut members = Vec::new();
        split_runs(&left, &right, &mut members);

        if members.len() <= 1 {
            EqSystem::single(self.clone())
        } else {
            EqSystem::new(members)
        }
    }
}

fn split_runs(left: &[Symbol], right: &[Symbol], members: &mut Vec<Equation>) {
    if left.is_empty() && right.is_empty() {
        return;
    }
    let n = left.len().min(right.len());

    for k in 1..=n {
        if k == left.len() && k == right.len() {
            break;
        }
        let (decomposable, equal) = check_equidecomposability(&left[..k], &right[..k]);
        if decomposable {
            if !equal {
                members.push(Equation::new(left[..k].to_vec(), right[..k].to_vec()));
            }
            split_runs(&left[k..], &right[k..], members);
            return;
        }
    }

    let (l, r) = (left.len(), right.len());
    for k in 1..=n {
        if k == l && k == r {
            break;
        }
        let (decomposable, equal) = check_equidecomposability(&left[l - k..], &right[r - k..]);
        if decomposable {
            split_runs(&left[..l - k], &right[..r - k], members);
            if !equal {
                members.push(Equation::new(left[l - k..].to_vec(), right[r - k..].to_vec()));
            }
            return;
        }
    }

    members.push(Equation::new(left.to_vec(), right.to_vec()));
}
