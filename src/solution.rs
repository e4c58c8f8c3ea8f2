//! Solution extraction from accepting derivation subtrees.
//!
//! Every TRUE path from the root spells out a sequence of standard
//! substitutions. Collecting the value each substitution assigns to its
//! variable gives one symbolic solution; alternative accepting branches become
//! a disjunction, and the members of a split system a conjunction.
//!
//! # Examples
//!
//! ```
//! use weq_rs::options::{PrintOptions, SolveOptions};
//! use weq_rs::solver::Solver;
//! use weq_rs::trace::NoTrace;
//!
//! let mut solver = Solver::new("{a, b}", "{u}", "u = a b", PrintOptions::default(), SolveOptions::default()).unwrap();
//! solver.solve(&mut NoTrace).unwrap();
//! assert_eq!(solver.solutions().unwrap().to_string(), "u = a b");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::equation::Equation;
use crate::node::{DerivationTree, NodeStatus};
use crate::reference::NodeId;
use crate::symbol::Symbol;

/// Symbolic description of a set of solutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionSystem {
    /// `variable = value`.
    Assignment(Equation),
    /// All parts hold; the empty conjunction is `true`.
    And(Vec<SolutionSystem>),
    /// Some part holds.
    Or(Vec<SolutionSystem>),
}

impl SolutionSystem {
    /// Merges nested conjunctions and disjunctions and unwraps singletons.
    pub fn flatten(self) -> SolutionSystem {
        match self {
            SolutionSystem::Assignment(eq) => SolutionSystem::Assignment(eq),
            SolutionSystem::And(parts) => {
                let mut flat = Vec::with_capacity(parts.len());
                for part in parts.into_iter().map(SolutionSystem::flatten) {
                    match part {
                        SolutionSystem::And(inner) => flat.extend(inner),
                        other => flat.push(other),
                    }
                }
                if flat.len() == 1 {
                    flat.pop().unwrap_or(SolutionSystem::And(Vec::new()))
                } else {
                    SolutionSystem::And(flat)
                }
            }
            SolutionSystem::Or(parts) => {
                let mut flat = Vec::with_capacity(parts.len());
                for part in parts.into_iter().map(SolutionSystem::flatten) {
                    match part {
                        SolutionSystem::Or(inner) => flat.extend(inner),
                        other => flat.push(other),
                    }
                }
                if flat.len() == 1 {
                    flat.pop().unwrap_or(SolutionSystem::Or(Vec::new()))
                } else {
                    SolutionSystem::Or(flat)
                }
            }
        }
    }

    /// Assignments mentioned anywhere in the system.
    pub fn assignments(&self) -> Vec<&Equation> {
        match self {
            SolutionSystem::Assignment(eq) => vec![eq],
            SolutionSystem::And(parts) | SolutionSystem::Or(parts) => {
                parts.iter().flat_map(|part| part.assignments()).collect()
            }
        }
    }

    fn is_compound(&self) -> bool {
        match self {
            SolutionSystem::Assignment(_) => false,
            SolutionSystem::And(parts) | SolutionSystem::Or(parts) => parts.len() > 1,
        }
    }
}

impl fmt::Display for SolutionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (parts, separator, empty) = match self {
            SolutionSystem::Assignment(eq) => return write!(f, "{}", eq),
            SolutionSystem::And(parts) => (parts, " & ", "true"),
            SolutionSystem::Or(parts) => (parts, " | ", "false"),
        };
        if parts.is_empty() {
            return write!(f, "{}", empty);
        }
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", separator)?;
            }
            if part.is_compound() {
                write!(f, "({})", part)?;
            } else {
                write!(f, "{}", part)?;
            }
        }
        Ok(())
    }
}

type Assignments = BTreeMap<Symbol, Vec<Symbol>>;

/// Walks the TRUE subtree of a finished derivation.
pub struct SolutionExtractor<'a> {
    tree: &'a DerivationTree,
}

impl<'a> SolutionExtractor<'a> {
    pub fn new(tree: &'a DerivationTree) -> Self {
        Self { tree }
    }

    /// Returns `None` unless the root is TRUE.
    pub fn extract(&self) -> Option<SolutionSystem> {
        let root = self.tree.root();
        if self.tree.node(root).status() != NodeStatus::True {
            return None;
        }
        Some(self.walk(root, Assignments::new()).flatten())
    }

    fn walk(&self, id: NodeId, mut acc: Assignments) -> SolutionSystem {
        let node = self.tree.node(id);
        if let Some(substitution) = node.substitution().filter(|s| s.is_standard()) {
            acc.entry(substitution.left_part().clone())
                .or_default()
                .extend(substitution.value());
        }

        let accepting: Vec<NodeId> = node
            .children()
            .iter()
            .copied()
            .filter(|&child| self.tree.node(child).status() == NodeStatus::True)
            .collect();

        if node.system().len() > 1 {
            let mut parts = to_assignments(acc);
            parts.extend(accepting.into_iter().map(|member| self.walk(member, Assignments::new())));
            return SolutionSystem::And(parts);
        }

        match accepting.as_slice() {
            [] => SolutionSystem::And(to_assignments(acc)),
            [child] => self.walk(*child, acc),
            children => SolutionSystem::Or(children.iter().map(|&child| self.walk(child, acc.clone())).collect()),
        }
    }
}

fn to_assignments(acc: Assignments) -> Vec<SolutionSystem> {
    acc.into_iter()
        .map(|(variable, value)| SolutionSystem::Assignment(Equation::new(vec![variable], value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(var: &str, value: &[&str]) -> SolutionSystem {
        SolutionSystem::Assignment(Equation::new(
            vec![Symbol::variable(var)],
            value.iter().map(|&c| Symbol::constant(c)).collect(),
        ))
    }

    #[test]
    fn test_flatten() {
        let nested = SolutionSystem::And(vec![
            SolutionSystem::And(vec![assign("u", &["a"])]),
            SolutionSystem::And(vec![assign("v", &[]), SolutionSystem::And(vec![])]),
        ]);
        assert_eq!(
            nested.flatten(),
            SolutionSystem::And(vec![assign("u", &["a"]), assign("v", &[])])
        );

        let single = SolutionSystem::Or(vec![SolutionSystem::And(vec![assign("u", &["a"])])]);
        assert_eq!(single.flatten(), assign("u", &["a"]));
    }

    #[test]
    fn test_display() {
        assert_eq!(SolutionSystem::And(vec![]).to_string(), "true");
        let system = SolutionSystem::Or(vec![
            SolutionSystem::And(vec![assign("u", &["a"]), assign("v", &[])]),
            assign("u", &["b"]),
        ]);
        assert_eq!(system.to_string(), "(u = a & v = $) | u = b");
        assert_eq!(system.assignments().len(), 3);
    }
}
