//! Request and result types for the patch engine.

use serde::{Deserialize, Serialize};

use crate::strategy::{MatchStrategy, StrategyKind};

/// One declared find/replace pair plus optional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditOperation {
    /// Text to locate in the (progressively mutated) content.
    pub old_text: String,
    /// Replacement text.
    pub new_text: String,
    /// Human-readable intent, used only in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Number of occurrences the caller expects the match to have.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_occurrences: Option<usize>,
}

/// 1-indexed, inclusive line range of the first (primary) match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// Result of one matcher invocation. Constructed fresh per attempt and never
/// mutated afterwards; `occurrences` always reflects the count found *before*
/// replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Strategy that produced the match.
    pub strategy: StrategyKind,
    /// Non-overlapping matches found before replacement.
    pub occurrences: usize,
    /// Content with the replacement(s) applied.
    pub modified_content: String,
    /// Location of the first match.
    pub line_range: Option<LineRange>,
    /// Starting line of every occurrence when more than one was found.
    pub ambiguity_locations: Vec<usize>,
    /// Advisory for the caller (multi-match notice, fuzzy review notice).
    pub warning: Option<String>,
}

/// An ordered batch of edits plus the matching policy to apply them under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    /// Edits, applied strictly in order; edit `k` searches the output of
    /// edits `1..k-1`.
    pub edits: Vec<EditOperation>,
    /// Tolerance policy used to locate `old_text` (default: auto cascade).
    #[serde(default)]
    pub matching_strategy: MatchStrategy,
    /// Compute the result without persisting it.
    #[serde(default)]
    pub dry_run: bool,
    /// Fail when a match occurs more than once without a declared expectation.
    #[serde(default = "default_fail_on_ambiguous")]
    pub fail_on_ambiguous: bool,
}

fn default_fail_on_ambiguous() -> bool {
    true
}

/// Outcome of a fully successful [`EditRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct EditResult {
    /// Final content, with the original line-ending style restored. The
    /// caller owns persistence and must skip it on dry-run requests.
    pub new_content: String,
    /// One diagnostic line per applied edit.
    pub diff_summary: String,
    /// Coarse per-edit line-count tally, not a true diff.
    pub lines_added: usize,
    /// Coarse per-edit line-count tally, not a true diff.
    pub lines_removed: usize,
    /// Number of edits applied (equals the request length on success).
    pub edits_applied: usize,
    /// Advisories accumulated across edits.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: EditRequest = serde_json::from_str(
            r#"{"edits": [{"old_text": "a", "new_text": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(request.matching_strategy, MatchStrategy::Auto);
        assert!(!request.dry_run);
        assert!(request.fail_on_ambiguous);
        assert!(request.edits[0].instruction.is_none());
        assert!(request.edits[0].expected_occurrences.is_none());
    }

    #[test]
    fn test_request_explicit_fields() {
        let request: EditRequest = serde_json::from_str(
            r#"{
                "edits": [{
                    "old_text": "a",
                    "new_text": "b",
                    "instruction": "rename",
                    "expected_occurrences": 2
                }],
                "matching_strategy": "flexible",
                "dry_run": true,
                "fail_on_ambiguous": false
            }"#,
        )
        .unwrap();
        assert_eq!(request.matching_strategy, MatchStrategy::Flexible);
        assert!(request.dry_run);
        assert!(!request.fail_on_ambiguous);
        assert_eq!(request.edits[0].expected_occurrences, Some(2));
    }
}
