//! Error and diagnostic system for record ingestion.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the JSON source
//! - Severity levels, so lint findings can be reported as warnings
//! - A collector for accumulating every bad record in one pass
//!
//! # Example
//!
//! ```
//! # use temporal_flow_parser::error::{Diagnostic, ErrorCode};
//! # use temporal_flow_parser::Span;
//!
//! let diag = Diagnostic::error("invalid workflow record `OrderWorkflow`")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(40..95), "missing field `path`")
//!     .with_help("every record needs a `path` string");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
