//! File editing tool surface for the Stitch engine.
//!
//! # Architecture
//!
//! This is a **Layer 2 (Infrastructure)** crate:
//! - Depends on: stitch-engine (pure matching engine)
//! - Used by: the agent runtime
//!
//! # Success/Failure Contract
//!
//! Tools follow the standard return format:
//! - Success: JSON without an `"error"` field
//! - Failure: JSON with an `"error"` field, plus a machine-readable `"kind"`
//!   and the engine's diagnostic payload for classified failures
//!
//! # Usage
//!
//! ```rust,ignore
//! use stitch_tools::{EditFileTool, Tool};
//!
//! let tool = EditFileTool::new();
//! let result = tool.execute(args, workspace).await?;
//! ```

mod edit_tool;
mod store;
mod traits;

pub use edit_tool::EditFileTool;
pub use store::{FileStore, LocalFileStore};
pub use traits::Tool;
