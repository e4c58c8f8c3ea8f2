//! # weq-rs: Word equations in Rust
//!
//! **`weq-rs`** decides satisfiability of **word equations** by exploring a
//! derivation tree of Nielsen transformations.
//!
//! ## What is a word equation?
//!
//! A word equation is an equality between two sequences of constants and
//! variables, e.g. `u a v = v a u` over the constants `{a}` and the variables
//! `{u, v}`. A solution assigns a (possibly empty) word over the constants to
//! every variable so that both sides spell the same word.
//!
//! ## How it works
//!
//! - The equation is reduced by stripping its common prefix and suffix.
//! - The leading symbols of both sides select a transformation rule, whose
//!   alternatives become children in the derivation tree.
//! - A branch stops when its equation becomes an identity (TRUE), a
//!   contradiction (FALSE), a repeat of an ancestor, or exceeds the depth
//!   bound (CYCLED).
//! - Quadratic equations may optionally be split into independent parts, and
//!   a length analysis may prune branches whose lengths cannot match.
//!
//! ## Basic Usage
//!
//! ```rust
//! use weq_rs::options::{PrintOptions, SolveOptions};
//! use weq_rs::solver::{Solver, Verdict};
//! use weq_rs::trace::NoTrace;
//!
//! // 1. Parse the alphabets and the equation
//! let mut solver = Solver::new("{}", "{u, v, z}", "u u v v = z z", PrintOptions::default(), SolveOptions::default())?;
//!
//! // 2. Run the derivation
//! let report = solver.solve(&mut NoTrace)?;
//! assert_eq!(report.verdict, Verdict::True);
//!
//! // 3. Inspect the solution found
//! assert_eq!(solver.solutions().unwrap().to_string(), "u = z");
//! # Ok::<(), weq_rs::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`solver`]**: The [`Solver`][crate::solver::Solver] front-end.
//! - **[`equation`]**: Equations and their reduction, substitution and comparison.
//! - **[`node`]**: The derivation tree.
//! - **[`dot`]**: Streaming the derivation tree as a Graphviz digraph.
//! - **[`solution`]**: Symbolic solutions read off the accepting subtree.

pub mod alphabet;
mod derivation;
pub mod dot;
pub mod equation;
pub mod error;
pub mod length;
pub mod letters;
pub mod node;
pub mod options;
pub mod part;
pub mod reference;
pub mod solution;
pub mod solver;
pub mod split;
pub mod structure;
pub mod substitution;
pub mod symbol;
pub mod system;
pub mod trace;
