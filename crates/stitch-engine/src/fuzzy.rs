//! Fuzzy matcher: token-oriented search tolerant of whitespace variation
//! around delimiters and operators. Matches the first occurrence only.

use regex::Regex;

use crate::text::{line_number_at, reindent};
use crate::types::{EditOperation, LineRange, MatchOutcome};
use crate::StrategyKind;

/// Split `old_text` into tokens: runs of word characters stay together,
/// every other non-whitespace character becomes its own token. Delimiters
/// (`(){}[];,:=`) and operators therefore tokenize identically however they
/// are spaced, so `if(x>0){` and `if (x > 0) {` produce the same tokens.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            word.push(ch);
        } else {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            if !ch.is_whitespace() {
                tokens.push(ch.to_string());
            }
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

/// Build a pattern that anchors at a line start, captures the line's leading
/// whitespace, and requires the escaped tokens in order with any amount of
/// whitespace between them. Every token passes through `regex::escape`;
/// user-supplied text is never embedded raw.
fn build_pattern(tokens: &[String]) -> String {
    let body = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join(r"\s*");
    format!(r"(?m)^([ \t]*){body}")
}

/// Locate the first fuzzy occurrence of `old_text` and substitute the
/// re-indented replacement. Later occurrences are deliberately left alone,
/// and the outcome always carries a review advisory.
pub(crate) fn find_and_replace(content: &str, edit: &EditOperation) -> Option<MatchOutcome> {
    let tokens = tokenize(&edit.old_text);
    if tokens.is_empty() {
        return None;
    }

    let re = Regex::new(&build_pattern(&tokens)).ok()?;
    let caps = re.captures(content)?;
    let whole = caps.get(0)?;
    let indent = caps.get(1).map(|m| m.as_str()).unwrap_or("");

    let replacement = reindent(&edit.new_text, indent).join("\n");
    let mut modified_content =
        String::with_capacity(content.len() + replacement.len().saturating_sub(whole.len()));
    modified_content.push_str(&content[..whole.start()]);
    modified_content.push_str(&replacement);
    modified_content.push_str(&content[whole.end()..]);

    let start_line = line_number_at(content, whole.start());
    let line_range = LineRange {
        start: start_line,
        end: start_line + whole.as_str().matches('\n').count(),
    };

    Some(MatchOutcome {
        strategy: StrategyKind::Fuzzy,
        occurrences: 1,
        modified_content,
        line_range: Some(line_range),
        ambiguity_locations: Vec::new(),
        warning: Some(
            "fuzzy matching was used to locate old_text; review the replacement manually"
                .to_string(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(old: &str, new: &str) -> EditOperation {
        EditOperation {
            old_text: old.to_string(),
            new_text: new.to_string(),
            instruction: None,
            expected_occurrences: None,
        }
    }

    #[test]
    fn test_tokenize_splits_words_and_symbols() {
        assert_eq!(
            tokenize("if(x>0){"),
            vec!["if", "(", "x", ">", "0", ")", "{"]
        );
        assert_eq!(tokenize("a = b;"), vec!["a", "=", "b", ";"]);
        assert_eq!(tokenize("my_var"), vec!["my_var"]);
    }

    #[test]
    fn test_tokenize_insensitive_to_spacing() {
        assert_eq!(tokenize("if ( x > 0 )  {"), tokenize("if(x>0){"));
    }

    #[test]
    fn test_matches_despite_spacing_differences() {
        let content = "fn f() {\n    if (x > 0) {\n}\n";
        let outcome = find_and_replace(content, &edit("if(x>0){", "if (x >= 0) {")).unwrap();
        assert_eq!(outcome.occurrences, 1);
        assert!(outcome.modified_content.contains("    if (x >= 0) {"));
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let content = "if (x > 0) {\nmiddle\nif (x > 0) {\n";
        let outcome = find_and_replace(content, &edit("if(x>0){", "while (x > 0) {")).unwrap();
        assert_eq!(outcome.occurrences, 1);
        assert_eq!(
            outcome.modified_content,
            "while (x > 0) {\nmiddle\nif (x > 0) {\n"
        );
        assert_eq!(outcome.line_range, Some(LineRange { start: 1, end: 1 }));
    }

    #[test]
    fn test_mandatory_review_warning() {
        let content = "a = 1;\n";
        let outcome = find_and_replace(content, &edit("a=1;", "a = 2;")).unwrap();
        assert!(outcome.warning.unwrap().contains("review"));
    }

    #[test]
    fn test_replacement_takes_captured_indentation() {
        let content = "    value = compute( a , b );\n";
        let outcome =
            find_and_replace(content, &edit("value=compute(a,b);", "value = fallback();"))
                .unwrap();
        assert_eq!(outcome.modified_content, "    value = fallback();\n");
    }

    #[test]
    fn test_no_match_returns_none() {
        assert!(find_and_replace("hello\n", &edit("goodbye()", "x")).is_none());
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        // Tokens like `.` and `*` must be treated literally, not as patterns.
        let content = "keep this line\n";
        assert!(find_and_replace(content, &edit(".*", "boom")).is_none());

        let content = "let re = \".*\";\n";
        let outcome = find_and_replace(content, &edit("let re = \".*\";", "let re = \"a\";"));
        assert!(outcome.is_some());
    }

    #[test]
    fn test_match_anchored_to_line_start() {
        // Tokens appearing mid-line must not match; the pattern anchors at
        // a line start plus indentation.
        let content = "prefix if (x > 0) {\n";
        assert!(find_and_replace(content, &edit("if(x>0){", "y")).is_none());
    }

    #[test]
    fn test_match_spanning_lines() {
        let content = "  open(\n    path,\n  );\n";
        let outcome = find_and_replace(content, &edit("open(path,);", "open(path)?;")).unwrap();
        assert_eq!(outcome.line_range, Some(LineRange { start: 1, end: 3 }));
        assert_eq!(outcome.modified_content, "  open(path)?;\n");
    }
}
