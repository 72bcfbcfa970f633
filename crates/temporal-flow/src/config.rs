//! Configuration types for graph construction and export.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every section and field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`GraphConfig`] - Controls assembly and the visibility filter.
//! - [`ExportConfig`] - Selects the [`ExportFormat`] and output formatting.
//! - [`LayoutConfig`] - Hints passed to the layout collaborator.
//!
//! # Example
//!
//! ```
//! # use temporal_flow::config::{AppConfig, ExportFormat};
//! let config = AppConfig::default();
//! assert!(!config.graph().show_isolated());
//! assert_eq!(config.export().format(), ExportFormat::Flow);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Graph construction section.
    #[serde(default)]
    graph: GraphConfig,

    /// Export section.
    #[serde(default)]
    export: ExportConfig,

    /// Layout hints section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(graph: GraphConfig, export: ExportConfig, layout: LayoutConfig) -> Self {
        Self {
            graph,
            export,
            layout,
        }
    }

    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns a copy with the graph section replaced.
    pub fn with_graph(mut self, graph: GraphConfig) -> Self {
        self.graph = graph;
        self
    }

    /// Returns a copy with the export section replaced.
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }
}

fn default_true() -> bool {
    true
}

/// Graph construction settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Keep nodes without edges, skipping the visibility filter.
    #[serde(default)]
    show_isolated: bool,

    /// Run the category builders on the rayon thread pool.
    #[serde(default = "default_true")]
    parallel: bool,
}

impl GraphConfig {
    pub fn new(show_isolated: bool, parallel: bool) -> Self {
        Self {
            show_isolated,
            parallel,
        }
    }

    pub fn show_isolated(&self) -> bool {
        self.show_isolated
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            show_isolated: false,
            parallel: true,
        }
    }
}

/// Handoff document produced by [`crate::FlowBuilder::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Node/edge document for the rendering collaborator.
    #[default]
    Flow,
    /// Layered graph document for the layout collaborator.
    Elk,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Flow => f.write_str("flow"),
            ExportFormat::Elk => f.write_str("elk"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flow" => Ok(ExportFormat::Flow),
            "elk" => Ok(ExportFormat::Elk),
            _ => Err(format!("Unknown export format: {s} (expected `flow` or `elk`)")),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    format: ExportFormat,

    /// Pretty-print the JSON output.
    #[serde(default = "default_true")]
    pretty: bool,
}

impl ExportConfig {
    pub fn new(format: ExportFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            pretty: true,
        }
    }
}

/// Hints forwarded to the layout collaborator in the `elk` document.
///
/// Nothing in this crate assigns coordinates; these values only describe
/// how the external layered layout should be run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    algorithm: String,
    direction: String,
    layer_spacing: u32,
    node_spacing: u32,
    node_width: u32,
    node_height: u32,
}

impl LayoutConfig {
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }

    /// Spacing between consecutive layers.
    pub fn layer_spacing(&self) -> u32 {
        self.layer_spacing
    }

    /// Spacing between nodes within a layer.
    pub fn node_spacing(&self) -> u32 {
        self.node_spacing
    }

    pub fn node_width(&self) -> u32 {
        self.node_width
    }

    pub fn node_height(&self) -> u32 {
        self.node_height
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: "layered".to_string(),
            direction: "RIGHT".to_string(),
            layer_spacing: 130,
            node_spacing: 30,
            node_width: 150,
            node_height: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert!(!config.graph().show_isolated());
        assert!(config.graph().parallel());
        assert_eq!(config.export().format(), ExportFormat::Flow);
        assert!(config.export().pretty());
        assert_eq!(config.layout().algorithm(), "layered");
        assert_eq!(config.layout().direction(), "RIGHT");
        assert_eq!(config.layout().layer_spacing(), 130);
        assert_eq!(config.layout().node_spacing(), 30);
        assert_eq!(config.layout().node_width(), 150);
        assert_eq!(config.layout().node_height(), 50);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert!(config.graph().parallel());
        assert!(config.export().pretty());
        assert_eq!(config.layout().node_width(), 150);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [graph]
            show_isolated = true

            [export]
            format = "elk"

            [layout]
            direction = "DOWN"
            "#,
        )
        .unwrap();

        assert!(config.graph().show_isolated());
        assert!(config.graph().parallel());
        assert_eq!(config.export().format(), ExportFormat::Elk);
        assert!(config.export().pretty());
        assert_eq!(config.layout().direction(), "DOWN");
        assert_eq!(config.layout().algorithm(), "layered");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[export]\nformat = \"svg\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("elk".parse::<ExportFormat>(), Ok(ExportFormat::Elk));
        assert_eq!("flow".parse::<ExportFormat>(), Ok(ExportFormat::Flow));
        assert!("dot".parse::<ExportFormat>().is_err());
    }
}
