//! Alphabets of known words.
//!
//! An alphabet is written as `{w1, w2, ...}`: words are separated by a comma
//! followed by exactly one space, and `{}` is the empty alphabet.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An insertion-ordered set of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    words: Vec<String>,
    lookup: HashSet<String>,
    /// Length (in chars) of the longest word.
    max_len: usize,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut alphabet = Self::new();
        for word in words {
            alphabet.insert(word);
        }
        alphabet
    }

    /// Parses the `{w1, w2, ...}` syntax.
    ///
    /// ```
    /// use weq_rs::alphabet::Alphabet;
    ///
    /// let alphabet = Alphabet::parse("{a, bc}").unwrap();
    /// assert!(alphabet.contains("bc"));
    /// assert_eq!(alphabet.max_len(), 2);
    /// assert!(Alphabet::parse("{a,b}").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, Error> {
        let syntax_error = |reason: &str| Error::AlphabetSyntax {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| syntax_error("expected words enclosed in '{' and '}'"))?;

        let mut alphabet = Self::new();
        if inner.is_empty() {
            return Ok(alphabet);
        }

        for word in inner.split(", ") {
            if word.is_empty() {
                return Err(syntax_error("empty word"));
            }
            if word.chars().any(|c| c.is_whitespace() || matches!(c, ',' | '{' | '}')) {
                return Err(syntax_error(&format!("malformed word '{}'", word)));
            }
            alphabet.insert(word);
        }
        Ok(alphabet)
    }

    /// Inserts a word, returning `false` if it was already present.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.lookup.contains(&word) {
            return false;
        }
        self.max_len = self.max_len.max(word.chars().count());
        self.lookup.insert(word.clone());
        self.words.push(word);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromStr for Alphabet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::parse(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.words.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_parse_words() {
        let alphabet = Alphabet::parse("{u, v, xyz}").unwrap();
        assert_eq!(alphabet.words(), &["u", "v", "xyz"]);
        assert_eq!(alphabet.max_len(), 3);
        assert!(alphabet.contains("v"));
        assert!(!alphabet.contains("w"));
    }

    #[test]
    fn test_parse_empty() {
        let alphabet = Alphabet::parse("{}").unwrap();
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.max_len(), 0);
    }

    #[test]
    fn test_parse_errors() {
        for text in ["a, b", "{a,b}", "{a,  b}", "{a, }", "{, a}", "{a b}", "{a", "a}"] {
            let res = Alphabet::parse(text);
            assert!(matches!(res, Err(Error::AlphabetSyntax { .. })), "{} should fail", text);
        }
    }

    #[test]
    fn test_duplicates_kept_once() {
        let alphabet = Alphabet::parse("{a, b, a}").unwrap();
        assert_eq!(alphabet.len(), 2);
    }

    #[test]
    fn test_display_round_trip() {
        let alphabet: Alphabet = "{a, bb}".parse().unwrap();
        assert_eq!(alphabet.to_string(), "{a, bb}");
        assert_eq!(Alphabet::parse(&alphabet.to_string()).unwrap(), alphabet);
        assert_eq!(Alphabet::new().to_string(), "{}");
    }
}
