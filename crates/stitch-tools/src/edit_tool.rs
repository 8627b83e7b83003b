//! The edit_file tool: multi-strategy find/replace edits on one file.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use similar::{ChangeTag, TextDiff};
use tracing::debug;

use stitch_engine::{apply, EditRequest, PatchError};

use crate::store::{FileStore, LocalFileStore};
use crate::traits::Tool;

/// Tool for editing a file with ordered find/replace operations.
///
/// Parses the request shape out of raw JSON args, reads the target through
/// the [`FileStore`] boundary, runs the engine once, and persists the result
/// at most once: only when every edit succeeded and the request is not a
/// dry run. A failed request never writes anything.
pub struct EditFileTool {
    store: Arc<dyn FileStore>,
}

impl EditFileTool {
    pub fn new() -> Self {
        Self {
            store: Arc::new(LocalFileStore),
        }
    }

    /// Use a custom file store (tests, remote-backed workspaces).
    pub fn with_store(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }
}

impl Default for EditFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for EditFileTool {
    fn name(&self) -> &'static str {
        "edit_file"
    }

    fn description(&self) -> &'static str {
        "Edit a file by applying ordered find/replace operations. Matching tolerates \
         whitespace differences via exact/flexible/fuzzy strategies; ambiguous matches \
         fail unless an expected occurrence count is declared."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the file (relative to workspace)"
                },
                "edits": {
                    "type": "array",
                    "description": "Find/replace operations, applied in order; each edit searches the output of the previous one",
                    "items": {
                        "type": "object",
                        "properties": {
                            "old_text": {
                                "type": "string",
                                "description": "Text to find"
                            },
                            "new_text": {
                                "type": "string",
                                "description": "Replacement text"
                            },
                            "instruction": {
                                "type": "string",
                                "description": "Human-readable intent of this edit (diagnostics only)"
                            },
                            "expected_occurrences": {
                                "type": "integer",
                                "description": "Declare how many occurrences the match should have; replaces all of them"
                            }
                        },
                        "required": ["old_text", "new_text"]
                    }
                },
                "matching_strategy": {
                    "type": "string",
                    "enum": ["exact", "flexible", "fuzzy", "auto"],
                    "description": "Tolerance policy (default: auto cascade exact -> flexible -> fuzzy)"
                },
                "dry_run": {
                    "type": "boolean",
                    "description": "Compute the result without writing the file"
                },
                "fail_on_ambiguous": {
                    "type": "boolean",
                    "description": "Fail when a match occurs more than once without a declared count (default true)"
                }
            },
            "required": ["path", "edits"]
        })
    }

    async fn execute(&self, args: Value, workspace: &Path) -> Result<Value> {
        let path = match args.get("path").and_then(|v| v.as_str()) {
            Some(p) => p.to_string(),
            None => return Ok(json!({"error": "Missing required argument: path"})),
        };

        // Request-shape validation happens here, before the engine is invoked.
        let request: EditRequest = match serde_json::from_value(args) {
            Ok(r) => r,
            Err(e) => return Ok(json!({"error": format!("Invalid edit request: {}", e)})),
        };
        if request.edits.is_empty() {
            return Ok(json!({"error": "Edit request contains no edits"}));
        }

        let content = match self.store.read(workspace, &path) {
            Ok(c) => c,
            Err(e) => return Ok(json!({"error": e, "path": path})),
        };

        let result = match apply(&content, &request) {
            Ok(r) => r,
            Err(e) => return Ok(failure_payload(&path, &e)),
        };

        let diff = generate_diff(&content, &result.new_content);

        if request.dry_run {
            debug!(path = %path, edits = result.edits_applied, "dry run, skipping write");
        } else if let Err(e) = self.store.write(workspace, &path, &result.new_content) {
            return Ok(json!({"error": e, "path": path}));
        }

        Ok(json!({
            "success": true,
            "path": path,
            "dry_run": request.dry_run,
            "edits_applied": result.edits_applied,
            "lines_added": result.lines_added,
            "lines_removed": result.lines_removed,
            "diff_summary": result.diff_summary,
            "diff": diff,
            "warnings": result.warnings,
        }))
    }
}

/// Render a classified engine failure as the tool's error payload, keeping
/// the diagnostic fields machine-readable alongside the prose.
fn failure_payload(path: &str, err: &PatchError) -> Value {
    let mut payload = json!({
        "error": err.to_string(),
        "path": path,
    });
    match err {
        PatchError::NoMatchFound { attempted, .. } => {
            payload["kind"] = json!("no_match_found");
            payload["strategies_attempted"] = json!(attempted);
            payload["suggestion"] =
                json!("Verify the exact text, include more surrounding context, or try the flexible strategy");
        }
        PatchError::AmbiguousMatch { locations, .. } => {
            payload["kind"] = json!("ambiguous_match");
            payload["locations"] = json!(locations);
            payload["suggestion"] =
                json!("Add disambiguating context to old_text, or set expected_occurrences");
        }
        PatchError::OccurrenceMismatch { expected, actual, .. } => {
            payload["kind"] = json!("occurrence_mismatch");
            payload["expected"] = json!(expected);
            payload["actual"] = json!(actual);
        }
        PatchError::InvalidEdit(_) => {
            payload["kind"] = json!("invalid_edit");
        }
    }
    payload
}

/// Generate a simple unified diff between old and new content.
fn generate_diff(old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut result = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        result.push_str(sign);
        result.push_str(change.value());
        if !change.value().ends_with('\n') {
            result.push('\n');
        }
    }

    result
}
