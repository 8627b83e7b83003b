//! Flexible matcher: line-window search tolerant of per-line leading and
//! trailing whitespace differences.

use crate::text::{indentation_of, reindent};
use crate::types::{EditOperation, LineRange, MatchOutcome};
use crate::StrategyKind;

/// Slide a window of `old_text`'s line count over the content and compare
/// line-by-line after trimming both sides. Internal whitespace must still
/// match exactly. Every matched window is replaced with the re-indented
/// replacement; the new lines take the indentation of each window's first
/// line.
pub(crate) fn find_and_replace(content: &str, edit: &EditOperation) -> Option<MatchOutcome> {
    let content_lines: Vec<&str> = content.split('\n').collect();
    let mut search: Vec<&str> = edit.old_text.split('\n').collect();
    if search.len() > 1 && search.last() == Some(&"") {
        search.pop();
    }
    if search.is_empty() || search.len() > content_lines.len() {
        return None;
    }

    let window = search.len();
    let mut starts = Vec::new();
    for i in 0..=content_lines.len() - window {
        let matched = (0..window).all(|j| content_lines[i + j].trim() == search[j].trim());
        if matched {
            starts.push(i);
        }
    }
    if starts.is_empty() {
        return None;
    }

    // Overlapping windows can only arise from repeated content; keep the
    // earliest and skip any window that intersects an already-kept one.
    let mut applied: Vec<usize> = Vec::new();
    let mut next_free = 0usize;
    for &start in &starts {
        if start >= next_free {
            applied.push(start);
            next_free = start + window;
        }
    }

    // Rebuild the line vector instead of splicing in place.
    let mut result_lines: Vec<String> = Vec::new();
    let mut i = 0;
    while i < content_lines.len() {
        if applied.binary_search(&i).is_ok() {
            let indent = indentation_of(content_lines[i]);
            result_lines.extend(reindent(&edit.new_text, indent));
            i += window;
        } else {
            result_lines.push(content_lines[i].to_string());
            i += 1;
        }
    }

    let occurrences = applied.len();
    let match_lines: Vec<usize> = applied.iter().map(|&i| i + 1).collect();
    let line_range = LineRange {
        start: match_lines[0],
        end: match_lines[0] + window - 1,
    };
    let (ambiguity_locations, warning) = if occurrences > 1 {
        (
            match_lines.clone(),
            Some(format!(
                "flexible matching replaced {} locations (starting at lines {:?})",
                occurrences, match_lines
            )),
        )
    } else {
        (Vec::new(), None)
    };

    Some(MatchOutcome {
        strategy: StrategyKind::Flexible,
        occurrences,
        modified_content: result_lines.join("\n"),
        line_range: Some(line_range),
        ambiguity_locations,
        warning,
    })
}
