//! Classified failures surfaced to the caller.
//!
//! Every variant carries enough diagnostic payload to be rendered directly to
//! the requesting agent; callers are expected to show these verbatim rather
//! than wrap them in a generic error string.

use thiserror::Error;

use crate::strategy::StrategyKind;

/// Errors raised while locating or applying an edit.
#[derive(Debug, Clone, Error)]
pub enum PatchError {
    /// No strategy located `old_text` in the content.
    #[error(
        "no match found for old_text (strategies tried: {}). \
         Check whitespace and indentation, include more surrounding context, \
         or try the flexible strategy. Searched for:\n{old_text}",
        format_strategies(.attempted)
    )]
    NoMatchFound {
        /// Strategies attempted, in order.
        attempted: Vec<StrategyKind>,
        /// The text that could not be located.
        old_text: String,
    },

    /// A match was found but occurs more than once and the caller did not
    /// declare an expectation of that count.
    #[error(
        "ambiguous match: {strategy} strategy found {} occurrences at lines {locations:?}. \
         Add surrounding context to old_text to disambiguate, or set \
         expected_occurrences to replace all of them",
        .locations.len()
    )]
    AmbiguousMatch {
        /// Strategy that produced the ambiguous outcome.
        strategy: StrategyKind,
        /// 1-indexed starting line of every candidate.
        locations: Vec<usize>,
    },

    /// The caller declared `expected_occurrences` and the actual count differs.
    #[error(
        "occurrence mismatch: expected {expected} occurrence(s) of old_text but \
         the {strategy} strategy found {actual}"
    )]
    OccurrenceMismatch {
        /// Strategy that produced the outcome.
        strategy: StrategyKind,
        /// Count the caller declared.
        expected: usize,
        /// Count actually found.
        actual: usize,
    },

    /// The edit operation itself is malformed (rejected before matching).
    #[error("invalid edit: {0}")]
    InvalidEdit(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, PatchError>;

fn format_strategies(attempted: &[StrategyKind]) -> String {
    attempted
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
