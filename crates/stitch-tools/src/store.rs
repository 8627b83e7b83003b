//! File store boundary: reading file content for the engine and persisting
//! the result after a successful, non-dry-run edit.

use std::fs;
use std::path::{Path, PathBuf};

/// Check if a path is likely a binary file by examining the first bytes.
fn is_binary_file(content: &[u8]) -> bool {
    // Check first 8000 bytes for null bytes (common indicator of binary)
    let check_len = content.len().min(8000);
    content[..check_len].contains(&0)
}

/// Resolve a path relative to workspace and ensure it's within the workspace.
fn resolve_path(path_str: &str, workspace: &Path) -> Result<PathBuf, String> {
    let path = Path::new(path_str);
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    };

    let workspace_canonical = workspace
        .canonicalize()
        .map_err(|e| format!("Cannot resolve workspace path: {}", e))?;
    let canonical = resolved
        .canonicalize()
        .map_err(|e| format!("Cannot resolve path '{}': {}", path_str, e))?;

    if !canonical.starts_with(&workspace_canonical) {
        return Err(format!(
            "Path '{}' is outside workspace (workspace: {})",
            path_str,
            workspace.display()
        ));
    }

    Ok(canonical)
}

/// Supplies content before an edit and persists it afterwards. The engine
/// never touches this directly; the tool layer invokes it at most once per
/// request, after every edit succeeded, and never on dry runs.
pub trait FileStore: Send + Sync {
    /// Read the full text of a file under the workspace.
    fn read(&self, workspace: &Path, path: &str) -> Result<String, String>;

    /// Persist new content for an existing file under the workspace.
    fn write(&self, workspace: &Path, path: &str, content: &str) -> Result<(), String>;
}

/// [`FileStore`] over the local filesystem, with workspace containment and
/// binary-file rejection.
#[derive(Debug, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn read(&self, workspace: &Path, path: &str) -> Result<String, String> {
        let resolved = resolve_path(path, workspace)?;
        if resolved.is_dir() {
            return Err(format!("Path is a directory: {}", path));
        }
        let bytes = fs::read(&resolved).map_err(|e| format!("Failed to read file: {}", e))?;
        if is_binary_file(&bytes) {
            return Err(format!("Cannot edit binary file: {}", path));
        }
        String::from_utf8(bytes).map_err(|e| format!("File is not valid UTF-8: {}", e))
    }

    fn write(&self, workspace: &Path, path: &str, content: &str) -> Result<(), String> {
        let resolved = resolve_path(path, workspace)?;
        fs::write(&resolved, content).map_err(|e| format!("Failed to write file: {}", e))
    }
}
