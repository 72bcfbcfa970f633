//! # Temporal Flow Parser
//!
//! Ingestion of call-relationship records. This crate turns the JSON entity
//! document into an [`EntityStore`] and reports problems as diagnostics with
//! source spans.
//!
//! ## Document format
//!
//! ```json
//! {
//!   "callers":    { "<id>": { "data": ["<id>", ...], "docstring": "...", "path": "..." } },
//!   "workflows":  { ... },
//!   "activities": { ... }
//! }
//! ```
//!
//! Every category is optional. `data` is the invocation chain and defaults
//! to empty; `path` is required.
//!
//! ## Usage
//!
//! ```
//! # use temporal_flow_parser::{parse, lint, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "callers": { "checkout": { "data": ["OrderWorkflow"], "path": "api.py" } },
//!         "workflows": { "OrderWorkflow": { "data": ["charge"], "path": "wf.py" } },
//!         "activities": { "charge": { "path": "activities.py" } }
//!     }"#;
//!
//!     let store = parse(source)?;
//!     assert_eq!(store.len(), 3);
//!     assert!(lint(source, &store).is_empty());
//!     Ok(())
//! }
//! ```

pub mod error;

mod document;
mod lint;
mod span;

pub use span::Span;

use log::{debug, info};

use temporal_flow_core::entity::EntityStore;

use error::{Diagnostic, ParseError};

/// Parse a JSON entity document.
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic for malformed JSON or a
/// malformed document, or one diagnostic per invalid record.
pub fn parse(source: &str) -> Result<EntityStore, ParseError> {
    info!(bytes = source.len(); "Parsing entity document");
    let store = document::parse_document(source)?;
    debug!(records = store.len(); "Entity document parsed");
    Ok(store)
}

/// Run advisory checks over a parsed store.
///
/// Returns warning diagnostics only; an empty list means nothing looked
/// suspicious. See [`error::ErrorCode`] `E3xx` for the checks performed.
pub fn lint(source: &str, store: &EntityStore) -> Vec<Diagnostic> {
    let warnings = lint::lint_store(source, store);
    debug!(warnings = warnings.len(); "Lint finished");
    warnings
}
