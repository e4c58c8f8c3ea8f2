use std::fmt;

use crate::equation::Equation;
use crate::symbol::Symbol;

/// The role a substitution plays in the derivation tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SubstitutionKind {
    /// Rewrites a symbol; the only kind applied to equations.
    Standard,
    /// Edge into a split system or one of its members.
    Splitting,
    /// Edge from the parsed root to its reduced form.
    Reducing,
    /// Edge nulling one variable of an equation whose other side is empty.
    Applying,
}

/// A single-symbol-to-sequence rewrite.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Substitution {
    left_part: Symbol,
    right_part: Vec<Symbol>,
    kind: SubstitutionKind,
}

impl Substitution {
    /// Standard substitution `symbol -> replacement`.
    pub fn new(symbol: Symbol, replacement: Vec<Symbol>) -> Self {
        let right_part = if replacement.is_empty() {
            vec![Symbol::Empty]
        } else {
            replacement
        };
        Self {
            left_part: symbol,
            right_part,
            kind: SubstitutionKind::Standard,
        }
    }

    /// Standard substitution `symbol -> $`.
    pub fn to_empty(symbol: Symbol) -> Self {
        Self::new(symbol, vec![Symbol::Empty])
    }

    pub fn splitting() -> Self {
        Self {
            left_part: Symbol::Empty,
            right_part: vec![Symbol::Empty],
            kind: SubstitutionKind::Splitting,
        }
    }

    pub fn reducing() -> Self {
        Self {
            left_part: Symbol::Empty,
            right_part: vec![Symbol::Empty],
            kind: SubstitutionKind::Reducing,
        }
    }

    /// Label for nulling `variable` while solving an equation with an empty side.
    pub fn applying(variable: Symbol) -> Self {
        Self {
            kind: SubstitutionKind::Applying,
            ..Self::to_empty(variable)
        }
    }

    pub fn left_part(&self) -> &Symbol {
        &self.left_part
    }

    pub fn right_part(&self) -> &[Symbol] {
        &self.right_part
    }

    pub fn kind(&self) -> SubstitutionKind {
        self.kind
    }

    pub fn is_standard(&self) -> bool {
        self.kind == SubstitutionKind::Standard
    }

    /// The prefix this substitution assigns to its symbol.
    ///
    /// Trailing occurrences of the substituted symbol and `Empty` are dropped,
    /// so `u -> a u` has value `a` and `u -> $` has the empty value.
    pub fn value(&self) -> Vec<Symbol> {
        let mut value: Vec<Symbol> = self.right_part.iter().filter(|s| !s.is_empty()).cloned().collect();
        if value.last() == Some(&self.left_part) {
            value.pop();
        }
        value
    }

    /// Renders the assignment as the equation `symbol = value`.
    pub fn to_equation(&self) -> Equation {
        Equation::new(vec![self.left_part.clone()], self.value())
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SubstitutionKind::Splitting => write!(f, "split"),
            SubstitutionKind::Reducing => write!(f, "reduce"),
            SubstitutionKind::Standard | SubstitutionKind::Applying => {
                write!(f, "{} -> ", self.left_part)?;
                for (i, symbol) in self.right_part.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", symbol)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value() {
        let u = Symbol::variable("u");
        let a = Symbol::constant("a");
        let w = Symbol::letter("A");

        assert_eq!(Substitution::new(u.clone(), vec![a.clone(), u.clone()]).value(), vec![a.clone()]);
        assert!(Substitution::to_empty(u.clone()).value().is_empty());
        assert_eq!(
            Substitution::new(u.clone(), vec![a.clone(), w.clone(), u.clone()]).value(),
            vec![a.clone(), w]
        );
        assert_eq!(Substitution::new(u.clone(), vec![Symbol::variable("v")]).value(), vec![Symbol::variable("v")]);
    }

    #[test]
    fn test_to_equation() {
        let u = Symbol::variable("u");
        let a = Symbol::constant("a");

        let eq = Substitution::new(u.clone(), vec![a, u.clone()]).to_equation();
        assert_eq!(eq.to_string(), "u = a");
        assert_eq!(Substitution::to_empty(u).to_equation().to_string(), "u = $");
    }

    #[test]
    fn test_kinds_and_display() {
        let u = Symbol::variable("u");
        assert!(Substitution::to_empty(u.clone()).is_standard());
        assert_eq!(Substitution::applying(u.clone()).kind(), SubstitutionKind::Applying);
        assert_eq!(Substitution::applying(u.clone()).to_string(), "u -> $");
        assert_eq!(Substitution::splitting().to_string(), "split");
        assert_eq!(Substitution::new(u.clone(), vec![]).right_part(), &[Symbol::Empty]);
    }
}
