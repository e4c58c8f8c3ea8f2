//! Word equations.
//!
//! An [`Equation`] is a pair of [`EqPart`]s together with their merged
//! [`Structure`]. Equations are values: every derivation node owns its own
//! copy, [`Equation::reduce`] mutates in place, and [`Equation::substitute`]
//! produces a fresh, already reduced, equation.
//!
//! # Examples
//!
//! ```
//! use weq_rs::alphabet::Alphabet;
//! use weq_rs::equation::Equation;
//!
//! let consts = Alphabet::parse("{a, b, c, d}").unwrap();
//! let vars = Alphabet::parse("{u, v, x, y}").unwrap();
//!
//! let mut eq = Equation::parse("a b x = $ a b v", &consts, &vars).unwrap();
//! assert!(eq.reduce());
//! assert_eq!(eq.to_string(), "x = v");
//! ```

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use crate::alphabet::Alphabet;
use crate::error::Error;
use crate::part::EqPart;
use crate::structure::Structure;
use crate::substitution::Substitution;
use crate::symbol::Symbol;

/// Separator between the two sides in equation text.
pub const SEPARATOR: &str = " = ";

#[derive(Debug, Clone)]
pub struct Equation {
    left: EqPart,
    right: EqPart,
    structure: Structure,
    equidecomposable: OnceCell<bool>,
    regularly_ordered: OnceCell<bool>,
}

impl Equation {
    pub fn new(left: Vec<Symbol>, right: Vec<Symbol>) -> Self {
        Self::from_parts(EqPart::new(left), EqPart::new(right))
    }

    pub fn from_parts(left: EqPart, right: EqPart) -> Self {
        let structure = Structure::merge(left.structure(), right.structure());
        Self {
            left,
            right,
            structure,
            equidecomposable: OnceCell::new(),
            regularly_ordered: OnceCell::new(),
        }
    }

    /// Parses `"<tok> ... = <tok> ..."`, splitting on the first `" = "`.
    pub fn parse(text: &str, constants: &Alphabet, variables: &Alphabet) -> Result<Self, Error> {
        let (left, right) = text.split_once(SEPARATOR).ok_or_else(|| Error::EquationSyntax {
            text: text.to_string(),
        })?;
        let left = EqPart::parse(left, constants, variables)?;
        let right = EqPart::parse(right, constants, variables)?;
        Ok(Self::from_parts(left, right))
    }

    pub fn left(&self) -> &EqPart {
        &self.left
    }

    pub fn right(&self) -> &EqPart {
        &self.right
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Leading non-`Empty` symbols of both sides.
    pub fn leading(&self) -> (Option<&Symbol>, Option<&Symbol>) {
        (self.left.first(), self.right.first())
    }

    /// Both sides denote the same word, ignoring `Empty`.
    pub fn check_equality(&self) -> bool {
        self.left.iter().eq(self.right.iter())
    }

    /// One side is empty while the other still has a constant or a letter.
    pub fn check_inequality(&self) -> bool {
        (self.left.is_empty() && self.right.structure().ground_total() > 0)
            || (self.right.is_empty() && self.left.structure().ground_total() > 0)
    }

    /// Strips the common prefix and suffix of both sides.
    ///
    /// Afterwards `Empty` survives only as the sole symbol of an empty side.
    /// Returns whether any non-`Empty` symbol was removed.
    pub fn reduce(&mut self) -> bool {
        let left: Vec<Symbol> = self.left.iter().cloned().collect();
        let right: Vec<Symbol> = self.right.iter().cloned().collect();

        let prefix = left.iter().zip(right.iter()).take_while(|(a, b)| a == b).count();
        let max_suffix = left.len().min(right.len()) - prefix;
        let suffix = left
            .iter()
            .rev()
            .zip(right.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let untouched = prefix == 0
            && suffix == 0
            && left.len() + usize::from(left.is_empty()) == self.left.symbols().len()
            && right.len() + usize::from(right.is_empty()) == self.right.symbols().len();
        if untouched {
            return false;
        }

        let mut left_structure = self.left.structure().clone();
        let mut right_structure = self.right.structure().clone();
        for symbol in left[..prefix].iter().chain(&left[left.len() - suffix..]) {
            left_structure.sub(symbol);
            self.structure.sub(symbol);
        }
        for symbol in right[..prefix].iter().chain(&right[right.len() - suffix..]) {
            right_structure.sub(symbol);
            self.structure.sub(symbol);
        }

        self.left = EqPart::from_parts(left[prefix..left.len() - suffix].to_vec(), left_structure);
        self.right = EqPart::from_parts(right[prefix..right.len() - suffix].to_vec(), right_structure);
        self.equidecomposable = OnceCell::new();
        self.regularly_ordered = OnceCell::new();

        prefix + suffix > 0
    }

    /// Applies `substitution` to both sides and reduces the result.
    pub fn substitute(&self, substitution: &Substitution) -> Equation {
        let mut eq = Self::from_parts(self.left.substitute(substitution), self.right.substitute(substitution));
        eq.reduce();
        eq
    }

    /// Nulls every variable of the non-empty side.
    ///
    /// Expects one side to be empty already. Returns the reduced result and
    /// the nulled variables in order of first appearance.
    pub fn substitute_vars_with_empty(&self) -> (Equation, Vec<Symbol>) {
        debug_assert!(self.left.is_empty() || self.right.is_empty());

        let null = |part: &EqPart, nulled: &mut Vec<Symbol>| -> EqPart {
            let symbols = part
                .symbols()
                .iter()
                .map(|symbol| {
                    if symbol.is_variable() {
                        if !nulled.contains(symbol) {
                            nulled.push(symbol.clone());
                        }
                        Symbol::Empty
                    } else {
                        symbol.clone()
                    }
                })
                .collect();
            EqPart::new(symbols)
        };

        let mut nulled = Vec::new();
        let left = null(&self.left, &mut nulled);
        let right = null(&self.right, &mut nulled);
        let mut eq = Self::from_parts(left, right);
        eq.reduce();
        (eq, nulled)
    }

    /// Every variable occurs at most twice.
    pub fn is_quadratic(&self) -> bool {
        self.structure.variables().all(|(_, count)| count <= 2)
    }

    /// Both sides list the same distinct variables in order of first appearance.
    pub fn is_regularly_ordered(&self) -> bool {
        *self.regularly_ordered.get_or_init(|| {
            fn first_appearances(part: &EqPart) -> Vec<&Symbol> {
                let mut seen = Vec::new();
                for symbol in part.iter().filter(|s| s.is_variable()) {
                    if !seen.contains(&symbol) {
                        seen.push(symbol);
                    }
                }
                seen
            }
            first_appearances(&self.left) == first_appearances(&self.right)
        })
    }

    /// The equation splits into more than one equidecomposable part.
    pub fn is_equidecomposable(&self) -> bool {
        *self
            .equidecomposable
            .get_or_init(|| self.split_by_equidecomposability().len() > 1)
    }

    /// Equality up to a consistent bijective renaming of letters.
    pub fn check_sameness(&self, other: &Equation) -> bool {
        if self.left.len() != other.left.len()
            || self.right.len() != other.right.len()
            || self.structure.letters_range_len() != other.structure.letters_range_len()
        {
            return false;
        }

        let mut forward: HashMap<&str, &str> = HashMap::new();
        let mut backward: HashMap<&str, &str> = HashMap::new();
        let pairs = self
            .left
            .iter()
            .zip(other.left.iter())
            .chain(self.right.iter().zip(other.right.iter()));
        for (a, b) in pairs {
            match (a, b) {
                (Symbol::Letter(x), Symbol::Letter(y)) => {
                    if *forward.entry(x.as_str()).or_insert(y.as_str()) != y.as_str() {
                        return false;
                    }
                    if *backward.entry(y.as_str()).or_insert(x.as_str()) != x.as_str() {
                        return false;
                    }
                }
                _ if a == b => {}
                _ => return false,
            }
        }
        true
    }
}

impl PartialEq for Equation {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right
    }
}

impl Eq for Equation {}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, SEPARATOR, self.right)
    }
}
