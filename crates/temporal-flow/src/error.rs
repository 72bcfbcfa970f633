//! Error types for Temporal Flow operations.
//!
//! This module provides the main error type [`TemporalFlowError`] which wraps
//! the error conditions that can occur while turning an entity document into
//! a handoff document.

use std::{error, io};

use thiserror::Error;

use temporal_flow_parser::error::ParseError;

/// The main error type for Temporal Flow operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the diagnostics so the
/// labeled spans can be rendered against it.
#[derive(Debug, Error)]
pub enum TemporalFlowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn error::Error + Send + Sync>),
}

impl From<crate::export::Error> for TemporalFlowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TemporalFlowError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
