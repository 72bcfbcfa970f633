//! Error codes for the ingestion diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - JSON syntax errors
//! - `E2xx` - Document shape errors
//! - `E3xx` - Lint findings (reported as warnings)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Malformed JSON.
    E100,

    /// Unexpected end of input.
    ///
    /// The document ended before a complete JSON value was read.
    E101,

    // =========================================================================
    // Shape Errors (E2xx)
    // =========================================================================
    /// Invalid document shape.
    ///
    /// A category or record does not have the expected structure: categories
    /// are objects keyed by identifier, records carry a `path` string, an
    /// optional `docstring` and an optional `data` list of identifiers.
    E200,

    // =========================================================================
    // Lint Findings (E3xx)
    // =========================================================================
    /// Identifier contains the edge separator.
    ///
    /// Edge ids are `source-target`; an identifier containing `-` makes the
    /// split ambiguous and may collapse two different hops into one edge.
    E300,

    /// Identifier defined in more than one category.
    ///
    /// Node ids are bare identifiers, so the same name under two categories
    /// yields two nodes with the same id.
    E301,

    /// Downstream reference to an undefined identifier.
    ///
    /// The edge is kept but points at a node that does not exist.
    E302,
}

impl ErrorCode {
    /// Short human-readable description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed JSON",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E200 => "invalid document shape",
            ErrorCode::E300 => "identifier contains the edge separator",
            ErrorCode::E301 => "identifier defined in more than one category",
            ErrorCode::E302 => "reference to an undefined identifier",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
        };
        f.write_str(code)
    }
}
