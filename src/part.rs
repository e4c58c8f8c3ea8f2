use std::fmt;

use crate::alphabet::Alphabet;
use crate::error::Error;
use crate::structure::Structure;
use crate::substitution::Substitution;
use crate::symbol::Symbol;

/// One side of an equation.
///
/// # Invariants
///
/// - `symbols` is never empty: an empty side is the single symbol `Empty`.
/// - `structure` counts exactly the non-`Empty` symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqPart {
    symbols: Vec<Symbol>,
    structure: Structure,
}

impl EqPart {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        let structure = Structure::from_symbols(&symbols);
        Self::from_parts(symbols, structure)
    }

    pub fn empty() -> Self {
        Self::new(vec![Symbol::Empty])
    }

    pub(crate) fn from_parts(mut symbols: Vec<Symbol>, structure: Structure) -> Self {
        if symbols.is_empty() {
            symbols.push(Symbol::Empty);
        }
        debug_assert_eq!(structure, Structure::from_symbols(&symbols));
        Self { symbols, structure }
    }

    /// Tokenizes one side of an equation.
    pub fn parse(text: &str, constants: &Alphabet, variables: &Alphabet) -> Result<Self, Error> {
        let symbols = text
            .split_whitespace()
            .map(|token| Symbol::classify(token, constants, variables))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(symbols))
    }

    /// All stored symbols, including `Empty` markers.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Non-`Empty` symbols.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols.iter().filter(|s| !s.is_empty())
    }

    /// Number of non-`Empty` symbols.
    pub fn len(&self) -> usize {
        self.structure.total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leading non-`Empty` symbol.
    pub fn first(&self) -> Option<&Symbol> {
        self.iter().next()
    }

    /// Replaces every occurrence of the substituted symbol, without reducing.
    ///
    /// The structure is derived from the old one: the substituted symbol is
    /// removed and each replacement symbol is added once per occurrence.
    pub fn substitute(&self, substitution: &Substitution) -> EqPart {
        let target = substitution.left_part();
        let occurrences = self.structure.count(target);
        if occurrences == 0 {
            return self.clone();
        }

        let mut symbols = Vec::with_capacity(self.symbols.len() + occurrences * substitution.right_part().len());
        for symbol in &self.symbols {
            if symbol == target {
                symbols.extend_from_slice(substitution.right_part());
            } else {
                symbols.push(symbol.clone());
            }
        }

        let mut structure = self.structure.clone();
        structure.sub_times(target, occurrences);
        for symbol in substitution.right_part() {
            structure.add_times(symbol, occurrences);
        }

        Self::from_parts(symbols, structure)
    }
}

impl fmt::Display for EqPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_empty_part() {
        let part = EqPart::new(vec![]);
        assert_eq!(part.symbols(), &[Symbol::Empty]);
        assert!(part.is_empty());
        assert_eq!(part.first(), None);
        assert_eq!(part.to_string(), "$");
    }

    #[test]
    fn test_parse() {
        let consts = Alphabet::from_words(["a"]);
        let vars = Alphabet::from_words(["u"]);
        let part = EqPart::parse("u a $ u", &consts, &vars).unwrap();
        assert_eq!(part.len(), 3);
        assert_eq!(part.structure().count(&Symbol::variable("u")), 2);
        assert_eq!(part.first(), Some(&Symbol::variable("u")));
    }

    #[test]
    fn test_substitute_structure() {
        let u = Symbol::variable("u");
        let a = Symbol::constant("a");
        let part = EqPart::new(vec![u.clone(), a.clone(), u.clone()]);

        let res = part.substitute(&Substitution::new(u.clone(), vec![a.clone(), u.clone()]));
        assert_eq!(res.to_string(), "a u a a u");
        assert_eq!(res.structure(), &Structure::from_symbols(res.symbols()));
        assert_eq!(res.structure().count(&a), 3);
        assert_eq!(res.structure().count(&u), 2);

        let res = part.substitute(&Substitution::to_empty(u.clone()));
        assert_eq!(res.to_string(), "$ a $");
        assert_eq!(res.len(), 1);
    }
}
