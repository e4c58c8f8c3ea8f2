//! Multiset bookkeeping for equation sides.
//!
//! A [`Structure`] counts the occurrences of every symbol, partitioned into
//! constants, variables and letters, and caches the per-category totals so
//! that the solver can query lengths and multiplicities in constant time.

use std::collections::BTreeMap;

use crate::symbol::Symbol;

/// Occurrence counts of symbols, by category.
///
/// # Invariants
///
/// - A symbol is a key iff its count is nonzero.
/// - Each cached total equals the sum of the counts in its category.
/// - `Empty` symbols are never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    constants: BTreeMap<Symbol, usize>,
    variables: BTreeMap<Symbol, usize>,
    letters: BTreeMap<Symbol, usize>,
    consts_total: usize,
    vars_total: usize,
    letters_total: usize,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_symbols<'a>(symbols: impl IntoIterator<Item = &'a Symbol>) -> Self {
        let mut structure = Self::new();
        for symbol in symbols {
            structure.add(symbol);
        }
        structure
    }

    fn category_mut(&mut self, symbol: &Symbol) -> Option<(&mut BTreeMap<Symbol, usize>, &mut usize)> {
        match symbol {
            Symbol::Constant(_) => Some((&mut self.constants, &mut self.consts_total)),
            Symbol::Variable(_) => Some((&mut self.variables, &mut self.vars_total)),
            Symbol::Letter(_) => Some((&mut self.letters, &mut self.letters_total)),
            Symbol::Empty => None,
        }
    }

    fn category(&self, symbol: &Symbol) -> Option<&BTreeMap<Symbol, usize>> {
        match symbol {
            Symbol::Constant(_) => Some(&self.constants),
            Symbol::Variable(_) => Some(&self.variables),
            Symbol::Letter(_) => Some(&self.letters),
            Symbol::Empty => None,
        }
    }

    pub fn add(&mut self, symbol: &Symbol) {
        self.add_times(symbol, 1);
    }

    pub fn add_times(&mut self, symbol: &Symbol, n: usize) {
        if n == 0 {
            return;
        }
        if let Some((map, total)) = self.category_mut(symbol) {
            *map.entry(symbol.clone()).or_insert(0) += n;
            *total += n;
        }
    }

    pub fn sub(&mut self, symbol: &Symbol) {
        self.sub_times(symbol, 1);
    }

    /// Removes `n` occurrences of `symbol`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` occurrences are present.
    pub fn sub_times(&mut self, symbol: &Symbol, n: usize) {
        if n == 0 {
            return;
        }
        if let Some((map, total)) = self.category_mut(symbol) {
            let count = map.get_mut(symbol).map(|c| {
                assert!(*c >= n, "Cannot remove {} occurrences of '{}', only {} present", n, symbol, c);
                *c -= n;
                *c
            });
            assert!(count.is_some(), "Cannot remove '{}': not present", symbol);
            if count == Some(0) {
                map.remove(symbol);
            }
            *total -= n;
        }
    }

    /// Category-wise sum of two structures.
    pub fn merge(a: &Structure, b: &Structure) -> Structure {
        let mut merged = a.clone();
        for (symbol, count) in b.constants().chain(b.variables()).chain(b.letters()) {
            merged.add_times(symbol, count);
        }
        merged
    }

    /// Number of occurrences of `symbol` (always 0 for `Empty`).
    pub fn count(&self, symbol: &Symbol) -> usize {
        self.category(symbol)
            .and_then(|map| map.get(symbol))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.count(symbol) > 0
    }

    /// Number of distinct variables.
    pub fn vars_range_len(&self) -> usize {
        self.variables.len()
    }

    /// Number of distinct constants.
    pub fn consts_range_len(&self) -> usize {
        self.constants.len()
    }

    /// Number of distinct letters.
    pub fn letters_range_len(&self) -> usize {
        self.letters.len()
    }

    pub fn vars_total(&self) -> usize {
        self.vars_total
    }

    pub fn consts_total(&self) -> usize {
        self.consts_total
    }

    pub fn letters_total(&self) -> usize {
        self.letters_total
    }

    /// Constants plus letters.
    pub fn ground_total(&self) -> usize {
        self.consts_total + self.letters_total
    }

    pub fn total(&self) -> usize {
        self.consts_total + self.vars_total + self.letters_total
    }

    pub fn constants(&self) -> impl Iterator<Item = (&Symbol, usize)> + '_ {
        self.constants.iter().map(|(s, &c)| (s, c))
    }

    pub fn variables(&self) -> impl Iterator<Item = (&Symbol, usize)> + '_ {
        self.variables.iter().map(|(s, &c)| (s, c))
    }

    pub fn letters(&self) -> impl Iterator<Item = (&Symbol, usize)> + '_ {
        self.letters.iter().map(|(s, &c)| (s, c))
    }
}
