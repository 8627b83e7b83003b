//! Edit sequencer: applies an ordered list of edits to content.
//!
//! Each edit searches the content produced by the edits before it, never the
//! original text. The first failure aborts the whole request; callers must
//! treat a failed request as a no-op with respect to persistence.

use tracing::debug;

use crate::error::{PatchError, Result};
use crate::strategy;
use crate::text::{line_count, normalize, restore, LineEnding};
use crate::types::{EditOperation, EditRequest, EditResult};

/// Apply every edit in `request` to `content`, in submission order.
///
/// Matching always runs on LF-normalized text; the original line-ending
/// style is detected once up front and restored on the final output only.
/// Whether the result is persisted (and the dry-run distinction) is the
/// caller's concern.
pub fn apply(content: &str, request: &EditRequest) -> Result<EditResult> {
    let ending = LineEnding::detect(content);
    let mut working = normalize(content);

    let mut lines_added = 0usize;
    let mut lines_removed = 0usize;
    let mut summary_entries: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for (idx, edit) in request.edits.iter().enumerate() {
        let edit = normalized_edit(edit)?;
        let outcome = strategy::locate(
            &working,
            &edit,
            request.matching_strategy,
            request.fail_on_ambiguous,
        )?;

        lines_added += line_count(&edit.new_text);
        lines_removed += line_count(&edit.old_text);
        let at_line = outcome.line_range.map(|r| r.start).unwrap_or(0);
        summary_entries.push(format!(
            "edit {}: {} match at line {} ({} occurrence{})",
            idx + 1,
            outcome.strategy,
            at_line,
            outcome.occurrences,
            if outcome.occurrences == 1 { "" } else { "s" },
        ));
        if let Some(warning) = outcome.warning {
            warnings.push(format!("edit {}: {}", idx + 1, warning));
        }
        debug!(edit = idx + 1, strategy = %outcome.strategy, line = at_line, "edit applied");

        working = outcome.modified_content;
    }

    Ok(EditResult {
        new_content: restore(&working, ending),
        diff_summary: summary_entries.join("\n"),
        lines_added,
        lines_removed,
        edits_applied: request.edits.len(),
        warnings,
    })
}

/// Reject malformed operations before matching and normalize their text so
/// every matcher sees LF-only input.
fn normalized_edit(edit: &EditOperation) -> Result<EditOperation> {
    if edit.old_text.is_empty() {
        return Err(PatchError::InvalidEdit(
            "old_text must not be empty; the engine does not create content from nothing"
                .to_string(),
        ));
    }
    if edit.old_text == edit.new_text {
        return Err(PatchError::InvalidEdit(
            "old_text and new_text must be different".to_string(),
        ));
    }
    Ok(EditOperation {
        old_text: normalize(&edit.old_text),
        new_text: normalize(&edit.new_text),
        instruction: edit.instruction.clone(),
        expected_occurrences: edit.expected_occurrences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::MatchStrategy;

    fn op(old: &str, new: &str) -> EditOperation {
        EditOperation {
            old_text: old.to_string(),
            new_text: new.to_string(),
            instruction: None,
            expected_occurrences: None,
        }
    }

    fn request(edits: Vec<EditOperation>) -> EditRequest {
        EditRequest {
            edits,
            matching_strategy: MatchStrategy::Auto,
            dry_run: false,
            fail_on_ambiguous: true,
        }
    }

    #[test]
    fn test_single_edit_summary_and_counts() {
        let content = "function foo() {\n  return 1;\n}\n";
        let result = apply(content, &request(vec![op("return 1;", "return 2;")])).unwrap();
        assert_eq!(result.new_content, "function foo() {\n  return 2;\n}\n");
        assert_eq!(result.edits_applied, 1);
        assert_eq!(result.lines_added, 1);
        assert_eq!(result.lines_removed, 1);
        assert_eq!(result.diff_summary, "edit 1: exact match at line 2 (1 occurrence)");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_crlf_round_trip() {
        let content = "a\r\nx = 1;\r\nb\r\n";
        let result = apply(content, &request(vec![op("x = 1;", "x = 2;\ny = 3;")])).unwrap();
        assert_eq!(result.new_content, "a\r\nx = 2;\r\ny = 3;\r\nb\r\n");
        assert!(!result.new_content.replace("\r\n", "").contains('\r'));
    }

    #[test]
    fn test_crlf_in_old_text_normalized_before_matching() {
        let content = "a\r\nx = 1;\r\ny = 2;\r\n";
        let result = apply(content, &request(vec![op("x = 1;\r\ny = 2;", "z = 3;")])).unwrap();
        assert_eq!(result.new_content, "a\r\nz = 3;\r\n");
    }

    #[test]
    fn test_edits_apply_sequentially() {
        // The second edit's old_text only exists in the output of the first.
        let content = "step_one();\n";
        let result = apply(
            content,
            &request(vec![
                op("step_one();", "step_two();"),
                op("step_two();", "step_three();"),
            ]),
        )
        .unwrap();
        assert_eq!(result.new_content, "step_three();\n");
        assert_eq!(result.edits_applied, 2);

        // Against the original content alone, the second edit cannot match.
        let err = apply(content, &request(vec![op("step_two();", "step_three();")])).unwrap_err();
        assert!(matches!(err, PatchError::NoMatchFound { .. }));
    }

    #[test]
    fn test_edits_are_not_idempotent() {
        // Replaying an edit after it already consumed old_text must fail.
        let content = "old();\n";
        let err = apply(
            content,
            &request(vec![op("old()", "new()"), op("old()", "new()")]),
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::NoMatchFound { .. }));
    }

    #[test]
    fn test_failure_aborts_remaining_edits() {
        let content = "a\nb\n";
        let err = apply(
            content,
            &request(vec![op("missing", "x"), op("a", "c")]),
        )
        .unwrap_err();
        // First edit fails, whole request fails; nothing reports success.
        assert!(matches!(err, PatchError::NoMatchFound { .. }));
    }

    #[test]
    fn test_warnings_collected_per_edit() {
        let content = "if (x > 0) {\n";
        let result = apply(content, &request(vec![op("if(x>0){", "loop {")])).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("edit 1:"));
        assert!(result.diff_summary.contains("fuzzy match at line 1"));
    }

    #[test]
    fn test_empty_old_text_rejected() {
        let err = apply("a\n", &request(vec![op("", "x")])).unwrap_err();
        assert!(matches!(err, PatchError::InvalidEdit(_)));
    }

    #[test]
    fn test_identical_old_and_new_rejected() {
        let err = apply("a\n", &request(vec![op("a", "a")])).unwrap_err();
        assert!(matches!(err, PatchError::InvalidEdit(_)));
    }

    #[test]
    fn test_multi_edit_line_tallies_accumulate() {
        let content = "one\ntwo\nthree\n";
        let result = apply(
            content,
            &request(vec![op("one", "1\n1b"), op("two\nthree", "23")]),
        )
        .unwrap();
        assert_eq!(result.lines_added, 3);
        assert_eq!(result.lines_removed, 3);
        assert_eq!(result.new_content, "1\n1b\n23\n");
        assert_eq!(result.diff_summary.lines().count(), 2);
    }
}
