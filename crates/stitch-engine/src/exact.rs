//! Exact matcher: literal substring search with occurrence counting.

use crate::text::line_number_at;
use crate::types::{EditOperation, LineRange, MatchOutcome};
use crate::StrategyKind;

/// Locate `old_text` as a literal substring and replace every occurrence.
///
/// Returns `None` when the text does not appear at all. `line_range` covers
/// the first occurrence; when more than one occurrence exists the starting
/// line of each is recorded so the cascade can surface them.
pub(crate) fn find_and_replace(content: &str, edit: &EditOperation) -> Option<MatchOutcome> {
    let old_text = edit.old_text.as_str();
    let starts: Vec<usize> = content.match_indices(old_text).map(|(i, _)| i).collect();
    if starts.is_empty() {
        return None;
    }

    let occurrences = starts.len();
    let modified_content = content.replace(old_text, &edit.new_text);

    let first_line = line_number_at(content, starts[0]);
    let line_range = LineRange {
        start: first_line,
        end: first_line + old_text.matches('\n').count(),
    };

    let ambiguity_locations = if occurrences > 1 {
        starts.iter().map(|&i| line_number_at(content, i)).collect()
    } else {
        Vec::new()
    };

    Some(MatchOutcome {
        strategy: StrategyKind::Exact,
        occurrences,
        modified_content,
        line_range: Some(line_range),
        ambiguity_locations,
        warning: None,
    })
}
