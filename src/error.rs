//! Error type shared by parsing, solver setup and tracing.

use std::fmt;
use std::time::Duration;

use crate::trace::TraceError;

/// Why a token could not be classified against the alphabets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClassificationKind {
    /// The token is in neither alphabet and is not the empty marker.
    Unknown,
    /// The token is in both alphabets.
    Ambiguous,
}

/// Errors produced while setting up or running a solver.
#[derive(Debug)]
pub enum Error {
    /// Malformed alphabet text.
    AlphabetSyntax { text: String, reason: String },
    /// Equation text without a space-delimited `=`.
    EquationSyntax { text: String },
    /// A token that matches zero or both alphabets.
    SymbolClassification { token: String, kind: ClassificationKind },
    /// Unrecognized algorithm mode string.
    AlgorithmMode(String),
    /// The trace sink failed; the run was aborted after `elapsed`.
    TraceSink { elapsed: Duration, source: TraceError },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlphabetSyntax { text, reason } => {
                write!(f, "Alphabet syntax error in '{}': {}", text, reason)
            }
            Error::EquationSyntax { text } => {
                write!(f, "Equation syntax error in '{}': expected ' = ' separator", text)
            }
            Error::SymbolClassification { token, kind } => match kind {
                ClassificationKind::Unknown => {
                    write!(f, "Symbol '{}' matches neither the constants nor the variables", token)
                }
                ClassificationKind::Ambiguous => {
                    write!(f, "Symbol '{}' matches both the constants and the variables", token)
                }
            },
            Error::AlgorithmMode(mode) => {
                write!(f, "Unknown algorithm mode '{}' (expected 'Finite' or 'Standard')", mode)
            }
            Error::TraceSink { elapsed, source } => {
                write!(f, "Trace sink failed after {:?}: {}", elapsed, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TraceSink { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_classification() {
        let err = Error::SymbolClassification {
            token: "q".to_string(),
            kind: ClassificationKind::Unknown,
        };
        assert_eq!(
            err.to_string(),
            "Symbol 'q' matches neither the constants nor the variables"
        );
    }

    #[test]
    fn test_trace_sink_source() {
        use std::error::Error as _;

        let err = Error::TraceSink {
            elapsed: Duration::from_millis(3),
            source: "disk full".into(),
        };
        assert_eq!(err.source().map(|e| e.to_string()), Some("disk full".to_string()));
        assert!(Error::AlgorithmMode("Fast".into()).source().is_none());
    }
}
