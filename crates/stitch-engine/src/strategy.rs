//! Strategy selection and the ambiguity / occurrence-count policy.
//!
//! The auto cascade tries exact, then flexible, then fuzzy; each matcher is a
//! pure function and the first one to produce an outcome wins. A specific
//! requested strategy runs alone with the same post-checks.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PatchError, Result};
use crate::types::{EditOperation, MatchOutcome};
use crate::{exact, flexible, fuzzy};

/// Tolerance policy requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    Exact,
    Flexible,
    Fuzzy,
    /// Ordered fallthrough: exact, then flexible, then fuzzy.
    #[default]
    Auto,
}

/// The concrete strategy that produced a [`MatchOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Exact,
    Flexible,
    Fuzzy,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Exact => write!(f, "exact"),
            StrategyKind::Flexible => write!(f, "flexible"),
            StrategyKind::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

impl MatchStrategy {
    fn attempts(self) -> &'static [StrategyKind] {
        match self {
            MatchStrategy::Exact => &[StrategyKind::Exact],
            MatchStrategy::Flexible => &[StrategyKind::Flexible],
            MatchStrategy::Fuzzy => &[StrategyKind::Fuzzy],
            MatchStrategy::Auto => &[
                StrategyKind::Exact,
                StrategyKind::Flexible,
                StrategyKind::Fuzzy,
            ],
        }
    }
}

/// Run the requested strategy (or the auto cascade) for one edit and apply
/// the ambiguity and occurrence-count policy to whatever it finds.
pub(crate) fn locate(
    content: &str,
    edit: &EditOperation,
    strategy: MatchStrategy,
    fail_on_ambiguous: bool,
) -> Result<MatchOutcome> {
    let attempts = strategy.attempts();
    for kind in attempts {
        let outcome = match kind {
            StrategyKind::Exact => exact::find_and_replace(content, edit),
            StrategyKind::Flexible => flexible::find_and_replace(content, edit),
            StrategyKind::Fuzzy => fuzzy::find_and_replace(content, edit),
        };
        match outcome {
            Some(outcome) => {
                debug!(strategy = %kind, occurrences = outcome.occurrences, "match found");
                return check_outcome(outcome, edit, fail_on_ambiguous);
            }
            None => debug!(strategy = %kind, "no match, falling through"),
        }
    }
    Err(PatchError::NoMatchFound {
        attempted: attempts.to_vec(),
        old_text: edit.old_text.clone(),
    })
}

/// A multi-occurrence exact or flexible match is ambiguous unless the caller
/// declared an expectation of exactly that count. Fuzzy never reports more
/// than one occurrence, so the ambiguity check does not apply to it. Any
/// declared `expected_occurrences` must then match the actual count.
fn check_outcome(
    outcome: MatchOutcome,
    edit: &EditOperation,
    fail_on_ambiguous: bool,
) -> Result<MatchOutcome> {
    if fail_on_ambiguous
        && outcome.strategy != StrategyKind::Fuzzy
        && outcome.occurrences > 1
        && edit.expected_occurrences != Some(outcome.occurrences)
    {
        return Err(PatchError::AmbiguousMatch {
            strategy: outcome.strategy,
            locations: outcome.ambiguity_locations,
        });
    }

    if let Some(expected) = edit.expected_occurrences {
        if expected != outcome.occurrences {
            return Err(PatchError::OccurrenceMismatch {
                strategy: outcome.strategy,
                expected,
                actual: outcome.occurrences,
            });
        }
    }

    Ok(outcome)
}
