//! Solver front-end.
//!
//! A [`Solver`] owns the parsed alphabets, the root equation and the options
//! of one problem. Each call to [`Solver::solve`] builds a fresh derivation
//! tree, reports it to a [`TraceSink`] and returns a [`SolveReport`].
//!
//! # Examples
//!
//! ```
//! use weq_rs::options::{PrintOptions, SolveOptions};
//! use weq_rs::solver::{Solver, Verdict};
//! use weq_rs::trace::NoTrace;
//!
//! let mut solver = Solver::new("{a}", "{u}", "a u = u", PrintOptions::default(), SolveOptions::default()).unwrap();
//! let report = solver.solve(&mut NoTrace).unwrap();
//! assert_eq!(report.verdict, Verdict::False);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use log::info;

use crate::alphabet::Alphabet;
use crate::derivation::Derivation;
use crate::equation::Equation;
use crate::error::Error;
use crate::letters::LetterGenerator;
use crate::node::{DerivationTree, NodeStatus};
use crate::options::{AlgorithmMode, PrintOptions, SolveOptions};
use crate::solution::{SolutionExtractor, SolutionSystem};
use crate::system::EqSystem;
use crate::trace::TraceSink;

/// Final answer of a run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Verdict {
    True,
    False,
    /// Undecided within the depth bound.
    Cycled,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::True => write!(f, "TRUE"),
            Verdict::False => write!(f, "FALSE"),
            Verdict::Cycled => write!(f, "CYCLED"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub verdict: Verdict,
    pub elapsed: Duration,
    /// Number of nodes in the derivation tree.
    pub nodes: usize,
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} nodes, {:.3} s)", self.verdict, self.nodes, self.elapsed.as_secs_f64())
    }
}

#[derive(Debug, Clone)]
pub struct Solver {
    constants: Alphabet,
    variables: Alphabet,
    equation: Equation,
    mode: AlgorithmMode,
    options: SolveOptions,
    print_options: PrintOptions,
    tree: Option<DerivationTree>,
    has_solution: bool,
    cycled: bool,
}

impl Solver {
    /// Parses both alphabets and the equation.
    pub fn new(
        constants: &str,
        variables: &str,
        equation: &str,
        print_options: PrintOptions,
        options: SolveOptions,
    ) -> Result<Self, Error> {
        let constants = Alphabet::parse(constants)?;
        let variables = Alphabet::parse(variables)?;
        let equation = Equation::parse(equation, &constants, &variables)?;
        Self::from_parts(constants, variables, equation, print_options, options)
    }

    pub fn from_parts(
        constants: Alphabet,
        variables: Alphabet,
        equation: Equation,
        print_options: PrintOptions,
        options: SolveOptions,
    ) -> Result<Self, Error> {
        let mode = options.mode()?;
        Ok(Self {
            constants,
            variables,
            equation,
            mode,
            options,
            print_options,
            tree: None,
            has_solution: false,
            cycled: false,
        })
    }

    pub fn constants(&self) -> &Alphabet {
        &self.constants
    }

    pub fn variables(&self) -> &Alphabet {
        &self.variables
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Runs the derivation, tracing every node and edge to `sink`.
    pub fn solve(&mut self, sink: &mut dyn TraceSink) -> Result<SolveReport, Error> {
        info!(
            "solve(equation = {}, mode = {}, cycle_range = {})",
            self.equation,
            self.mode,
            self.options.effective_cycle_range()
        );
        let start = Instant::now();

        let tree = DerivationTree::new(EqSystem::single(self.equation.clone()));
        let letters = LetterGenerator::new(&self.constants, &self.variables);
        let mut engine = Derivation::new(tree, sink, letters, self.options.clone(), self.print_options.clone(), self.mode);
        let result = engine.run();

        let outcome = engine.finish();
        let nodes = outcome.tree.len();
        self.tree = Some(outcome.tree);
        self.has_solution = outcome.has_solution;
        self.cycled = outcome.cycled;

        let status = result.map_err(|source| Error::TraceSink {
            elapsed: start.elapsed(),
            source,
        })?;
        let report = SolveReport {
            verdict: status.verdict(),
            elapsed: start.elapsed(),
            nodes,
        };
        info!("solve: {}", report);
        Ok(report)
    }

    /// The derivation tree of the last run.
    pub fn tree(&self) -> Option<&DerivationTree> {
        self.tree.as_ref()
    }

    /// Some node of the last run reached an identity.
    ///
    /// This is the raw leaf flag, not the verdict: a member of a split system
    /// can reach an identity while the system, and the run, is FALSE.
    pub fn has_solution(&self) -> bool {
        self.has_solution
    }

    /// Some branch of the last run hit the depth bound.
    pub fn cycled(&self) -> bool {
        self.cycled
    }

    /// Symbolic solutions of the last run, if it was TRUE.
    pub fn solutions(&self) -> Option<SolutionSystem> {
        let tree = self.tree.as_ref()?;
        if tree.node(tree.root()).status() != NodeStatus::True {
            return None;
        }
        SolutionExtractor::new(tree).extract()
    }
}
