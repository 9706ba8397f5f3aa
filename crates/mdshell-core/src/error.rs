// ── Core error types ──
//
// The resolvers themselves are total and never fail. Errors only surface
// when a caller asks for strict parsing of a state token (config files,
// CLI flags) instead of the lenient path the shell uses at render time.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownToken {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl CoreError {
    pub(crate) fn unknown_token<I, S>(kind: &'static str, value: &str, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let expected = expected
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownToken {
            kind,
            value: value.to_owned(),
            expected,
        }
    }
}
