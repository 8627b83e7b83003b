//! Core tool abstraction.

use std::path::Path;

use anyhow::Result;
use serde_json::Value;

/// A tool callable by the agent runtime.
///
/// Tools receive their arguments as raw JSON and report argument or
/// execution problems inside the returned JSON payload (an `"error"` field)
/// rather than as an `Err`; `Err` is reserved for infrastructure failures.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as exposed to the model.
    fn name(&self) -> &'static str;

    /// Human-readable description for the tool listing.
    fn description(&self) -> &'static str;

    /// JSON schema for the tool's parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool against a workspace.
    async fn execute(&self, args: Value, workspace: &Path) -> Result<Value>;
}
