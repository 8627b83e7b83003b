//! Line-ending and indentation helpers shared by all matchers.

/// Line-ending style of a file, detected once from the original content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix-style `\n`
    Lf,
    /// Windows-style `\r\n`
    Crlf,
}

impl LineEnding {
    /// Detect the line-ending style. Any CRLF sequence marks the whole file
    /// as CRLF; mixed files are treated as CRLF and rewritten uniformly.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }
}

/// Collapse CRLF to LF. All matching operates on normalized text.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Re-expand LF to the detected style on the final output.
pub fn restore(text: &str, ending: LineEnding) -> String {
    match ending {
        LineEnding::Lf => text.to_string(),
        LineEnding::Crlf => text.replace('\n', "\r\n"),
    }
}

/// The maximal leading-whitespace run of a line.
pub fn indentation_of(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

/// Re-indent replacement text for a matched location: the caller-supplied
/// indentation is discarded and the matched location's indentation is applied
/// uniformly to every non-blank line; blank lines stay empty.
///
/// Note that this flattens any relative indentation *inside* a multi-line
/// replacement to the matched block's top-level indent. That is the observed
/// contract of the surrounding system, kept on purpose rather than corrected.
pub fn reindent(new_text: &str, indent: &str) -> Vec<String> {
    let mut lines: Vec<&str> = new_text.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
        .iter()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                String::new()
            } else {
                format!("{indent}{trimmed}")
            }
        })
        .collect()
}

/// 1-indexed line number containing the given byte offset.
pub(crate) fn line_number_at(content: &str, byte_idx: usize) -> usize {
    content[..byte_idx].matches('\n').count() + 1
}

/// Coarse line count used for the per-edit added/removed tallies.
pub(crate) fn line_count(text: &str) -> usize {
    text.lines().count()
}
