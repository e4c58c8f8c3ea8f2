//! Solver configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Depth bound used when `cycle_range` is left at zero.
pub const DEFAULT_CYCLE_RANGE: usize = 100;

/// How Rule 1 grows variables.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum AlgorithmMode {
    /// Plain Nielsen transformations.
    #[default]
    Standard,
    /// Interleaves a fresh letter between the two variables of Rule 1.
    Finite,
}

impl FromStr for AlgorithmMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Standard" => Ok(AlgorithmMode::Standard),
            "Finite" => Ok(AlgorithmMode::Finite),
            _ => Err(Error::AlgorithmMode(s.to_string())),
        }
    }
}

impl fmt::Display for AlgorithmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmMode::Standard => write!(f, "Standard"),
            AlgorithmMode::Finite => write!(f, "Finite"),
        }
    }
}

/// Options controlling the search.
///
/// # Examples
///
/// ```
/// use weq_rs::options::SolveOptions;
///
/// let options = SolveOptions::default()
///     .with_algorithm_mode("Finite")
///     .with_cycle_range(20)
///     .with_full_graph(true);
/// assert_eq!(options.effective_cycle_range(), 20);
/// assert!(options.mode().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// `"Standard"` or `"Finite"`.
    pub algorithm_mode: String,
    /// Maximum derivation depth; 0 selects [`DEFAULT_CYCLE_RANGE`].
    pub cycle_range: usize,
    /// Split quadratic equations into independent parts.
    pub split_by_equidecomposability: bool,
    /// Keep exploring after the first solution.
    pub full_graph: bool,
    /// Keep evaluating system members after one fails.
    pub full_system: bool,
    /// Run the length analysis before dispatching rules.
    pub length_analysis: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            algorithm_mode: AlgorithmMode::Standard.to_string(),
            cycle_range: DEFAULT_CYCLE_RANGE,
            split_by_equidecomposability: false,
            full_graph: false,
            full_system: false,
            length_analysis: false,
        }
    }
}

impl SolveOptions {
    pub fn with_algorithm_mode(mut self, mode: impl Into<String>) -> Self {
        self.algorithm_mode = mode.into();
        self
    }

    pub fn with_cycle_range(mut self, cycle_range: usize) -> Self {
        self.cycle_range = cycle_range;
        self
    }

    pub fn with_split_by_equidecomposability(mut self, split: bool) -> Self {
        self.split_by_equidecomposability = split;
        self
    }

    pub fn with_full_graph(mut self, full_graph: bool) -> Self {
        self.full_graph = full_graph;
        self
    }

    pub fn with_full_system(mut self, full_system: bool) -> Self {
        self.full_system = full_system;
        self
    }

    pub fn with_length_analysis(mut self, length_analysis: bool) -> Self {
        self.length_analysis = length_analysis;
        self
    }

    pub fn mode(&self) -> Result<AlgorithmMode, Error> {
        self.algorithm_mode.parse()
    }

    pub fn effective_cycle_range(&self) -> usize {
        if self.cycle_range == 0 {
            DEFAULT_CYCLE_RANGE
        } else {
            self.cycle_range
        }
    }
}

/// Options controlling the node labels handed to the trace sink.
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// Prefix labels with the rule path of the node.
    pub show_paths: bool,
    /// Append the variable/constant/letter totals of the node.
    pub show_structure: bool,
}

impl PrintOptions {
    pub fn with_paths(mut self, show_paths: bool) -> Self {
        self.show_paths = show_paths;
        self
    }

    pub fn with_structure(mut self, show_structure: bool) -> Self {
        self.show_structure = show_structure;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("Finite".parse::<AlgorithmMode>().unwrap(), AlgorithmMode::Finite);
        assert_eq!("Standard".parse::<AlgorithmMode>().unwrap(), AlgorithmMode::Standard);
        assert!(matches!("finite".parse::<AlgorithmMode>(), Err(Error::AlgorithmMode(m)) if m == "finite"));
    }

    #[test]
    fn test_defaults() {
        let options = SolveOptions::default();
        assert_eq!(options.mode().unwrap(), AlgorithmMode::Standard);
        assert_eq!(options.effective_cycle_range(), 100);
        assert_eq!(options.with_cycle_range(0).effective_cycle_range(), DEFAULT_CYCLE_RANGE);
    }
}
