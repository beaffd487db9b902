//! Error types for symbol parsing.

use thiserror::Error;

/// Errors from parsing stem or branch characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Text is not one of the ten stem characters.
    #[error("unknown heavenly stem: {0:?}")]
    UnknownStem(String),
    /// Text is not one of the twelve branch characters.
    #[error("unknown earthly branch: {0:?}")]
    UnknownBranch(String),
}
