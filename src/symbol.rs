use std::fmt;

use crate::alphabet::Alphabet;
use crate::error::{ClassificationKind, Error};

/// Token that denotes the empty word.
pub const EMPTY_MARKER: &str = "$";

/// An element of the free monoid.
///
/// `Empty` carries no name, so every empty word is equal to every other one.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Symbol {
    Constant(String),
    Variable(String),
    /// Fresh auxiliary symbol introduced during solving.
    Letter(String),
    Empty,
}

impl Symbol {
    pub fn constant(name: impl Into<String>) -> Self {
        Symbol::Constant(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Symbol::Variable(name.into())
    }

    pub fn letter(name: impl Into<String>) -> Self {
        Symbol::Letter(name.into())
    }

    /// Classifies a token against the constant and variable alphabets.
    pub fn classify(token: &str, constants: &Alphabet, variables: &Alphabet) -> Result<Self, Error> {
        match (constants.contains(token), variables.contains(token)) {
            (true, true) => Err(Error::SymbolClassification {
                token: token.to_string(),
                kind: ClassificationKind::Ambiguous,
            }),
            (true, false) => Ok(Symbol::constant(token)),
            (false, true) => Ok(Symbol::variable(token)),
            (false, false) if token == EMPTY_MARKER => Ok(Symbol::Empty),
            (false, false) => Err(Error::SymbolClassification {
                token: token.to_string(),
                kind: ClassificationKind::Unknown,
            }),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Symbol::Constant(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Symbol::Variable(_))
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Symbol::Letter(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Symbol::Empty)
    }

    /// Constants and letters: symbols no substitution can rewrite away.
    pub fn is_ground(&self) -> bool {
        matches!(self, Symbol::Constant(_) | Symbol::Letter(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Constant(name) | Symbol::Variable(name) | Symbol::Letter(name) => name,
            Symbol::Empty => EMPTY_MARKER,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabets() -> (Alphabet, Alphabet) {
        (Alphabet::from_words(["a", "b", "x"]), Alphabet::from_words(["u", "v", "x"]))
    }

    #[test]
    fn test_classify() {
        let (consts, vars) = alphabets();
        assert_eq!(Symbol::classify("a", &consts, &vars).unwrap(), Symbol::constant("a"));
        assert_eq!(Symbol::classify("u", &consts, &vars).unwrap(), Symbol::variable("u"));
        assert_eq!(Symbol::classify("$", &consts, &vars).unwrap(), Symbol::Empty);
    }

    #[test]
    fn test_classify_errors() {
        let (consts, vars) = alphabets();
        assert!(matches!(
            Symbol::classify("x", &consts, &vars),
            Err(Error::SymbolClassification {
                kind: ClassificationKind::Ambiguous,
                ..
            })
        ));
        assert!(matches!(
            Symbol::classify("q", &consts, &vars),
            Err(Error::SymbolClassification {
                kind: ClassificationKind::Unknown,
                ..
            })
        ));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Symbol::Empty, Symbol::Empty);
        assert_ne!(Symbol::constant("a"), Symbol::variable("a"));
        assert_ne!(Symbol::letter("A"), Symbol::letter("B"));
        assert!(Symbol::letter("A").is_ground());
        assert!(!Symbol::variable("u").is_ground());
        assert_eq!(Symbol::Empty.to_string(), "$");
    }
}
