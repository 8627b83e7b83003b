//! Multi-strategy find/replace patch engine.
//!
//! Given full file content and an ordered list of edit operations, locates
//! each `old_text` fragment in the progressively mutated content and
//! substitutes `new_text`, tolerating the imprecise or reformatted fragments
//! an LLM-driven caller typically supplies.
//!
//! # Architecture
//!
//! This is a **Layer 2 (Infrastructure)** crate:
//! - Depends on: nothing internal (pure computation, no I/O)
//! - Used by: stitch-tools (tool system)
//!
//! Three matchers run under a strategy cascade:
//! 1. Exact — literal substring match, replaces every occurrence
//! 2. Flexible — line-window match ignoring per-line edge whitespace
//! 3. Fuzzy — token match ignoring whitespace around delimiters, first
//!    occurrence only, always flagged for review
//!
//! # Usage
//!
//! ```rust,ignore
//! use stitch_engine::{apply, EditOperation, EditRequest, MatchStrategy};
//!
//! let request = EditRequest {
//!     edits: vec![EditOperation {
//!         old_text: "return 1;".into(),
//!         new_text: "return 2;".into(),
//!         instruction: None,
//!         expected_occurrences: None,
//!     }],
//!     matching_strategy: MatchStrategy::Auto,
//!     dry_run: false,
//!     fail_on_ambiguous: true,
//! };
//!
//! match apply(&file_content, &request) {
//!     Ok(result) => { /* persist result.new_content unless dry_run */ }
//!     Err(err) => { /* render the classified failure to the caller */ }
//! }
//! ```

mod applier;
mod error;
mod exact;
mod flexible;
mod fuzzy;
mod strategy;
mod text;
mod types;

pub use applier::apply;
pub use error::{PatchError, Result};
pub use strategy::{MatchStrategy, StrategyKind};
pub use text::{indentation_of, normalize, reindent, restore, LineEnding};
pub use types::{EditOperation, EditRequest, EditResult, LineRange, MatchOutcome};
