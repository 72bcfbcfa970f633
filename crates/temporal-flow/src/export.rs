//! Handoff documents for the layout and rendering collaborators.
//!
//! Each [`Exporter`] turns a [`DiagramModel`] into a JSON string. Nothing
//! here positions nodes; the documents only carry what the collaborators
//! need to do so.

pub mod elk;
pub mod flow;

use std::fmt;

use serde::Serialize;

use temporal_flow_core::model::DiagramModel;

/// Serializes a diagram model into a handoff document.
pub trait Exporter {
    fn export(&self, model: &DiagramModel) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Serialize(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

fn to_json<T: Serialize>(document: &T, pretty: bool) -> Result<String, Error> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}
