//! Fresh letter generation.

use crate::alphabet::Alphabet;
use crate::symbol::Symbol;

/// Per-run source of fresh letters.
///
/// Candidate words are `A, B, ..., Z, AA, AB, ...`; any word already known to
/// the run (a constant, a variable, or a letter handed out before) is skipped.
#[derive(Debug, Clone)]
pub struct LetterGenerator {
    registry: Alphabet,
    next: u64,
}

impl LetterGenerator {
    pub fn new(constants: &Alphabet, variables: &Alphabet) -> Self {
        let registry = Alphabet::from_words(constants.words().iter().chain(variables.words()).cloned());
        Self { registry, next: 0 }
    }

    pub fn fresh(&mut self) -> Symbol {
        loop {
            let word = letter_word(self.next);
            self.next += 1;
            if self.registry.insert(word.clone()) {
                return Symbol::Letter(word);
            }
        }
    }

    /// All words known to this run, generated letters included.
    pub fn registry(&self) -> &Alphabet {
        &self.registry
    }
}

/// Bijective base-26 numeral: `0 -> A`, `25 -> Z`, `26 -> AA`.
fn letter_word(mut n: u64) -> String {
    let mut chars = Vec::new();
    loop {
        chars.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    chars.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_words() {
        assert_eq!(letter_word(0), "A");
        assert_eq!(letter_word(25), "Z");
        assert_eq!(letter_word(26), "AA");
        assert_eq!(letter_word(27), "AB");
        assert_eq!(letter_word(26 + 26 * 26), "AAA");
    }

    #[test]
    fn test_fresh_skips_known_words() {
        let consts = Alphabet::from_words(["A", "C"]);
        let vars = Alphabet::from_words(["B"]);
        let mut letters = LetterGenerator::new(&consts, &vars);

        assert_eq!(letters.fresh(), Symbol::letter("D"));
        assert_eq!(letters.fresh(), Symbol::letter("E"));
        assert!(letters.registry().contains("D"));
    }

    #[test]
    fn test_fresh_never_repeats() {
        let mut letters = LetterGenerator::new(&Alphabet::new(), &Alphabet::new());
        let words: Vec<_> = (0..60).map(|_| letters.fresh()).collect();
        for (i, w) in words.iter().enumerate() {
            assert!(!words[..i].contains(w));
        }
        assert_eq!(words[26], Symbol::letter("AA"));
    }
}
