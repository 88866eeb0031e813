//! Error types for the flip pipeline

use thiserror::Error;

/// Error returned by [`crate::transform`].
///
/// Ordinary CSS, malformed or not, never produces an error: text a stage does
/// not recognise is passed through unchanged. Both variants indicate that the
/// pipeline itself could not complete.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JanusError {
    /// The regex engine gave up, typically on its backtracking limit
    #[error("pattern matching failed: {0}")]
    Regex(#[from] fancy_regex::Error),
    /// Placeholder count no longer matches the captured originals
    #[error("placeholder {token} appears {found} times but {expected} regions were protected")]
    TokenMismatch { token: &'static str, expected: usize, found: usize },
}
