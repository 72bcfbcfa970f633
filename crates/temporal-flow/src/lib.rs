//! Temporal Flow - Call graphs for Temporal callers, workflows and activities.
//!
//! Turns the recorded call relationships between callers, workflows and
//! activities into a node/edge model, then into a JSON document for a layout
//! or rendering collaborator.

pub mod assembler;
pub mod builder;
pub mod config;
pub mod export;
pub mod filter;

mod error;

pub use temporal_flow_core::{category, entity, identifier, model};
pub use temporal_flow_parser::error::Diagnostic;

pub use error::TemporalFlowError;

use log::{debug, info, trace};

use config::{AppConfig, ExportFormat};
use entity::EntityStore;
use export::{Exporter, elk::ElkExporter, flow::FlowExporter};
use model::DiagramModel;

/// Builder for turning entity documents into handoff documents.
///
/// This provides an API for processing call relationships through parsing,
/// graph construction, filtering and export.
///
/// # Examples
///
/// ```rust
/// use temporal_flow::{FlowBuilder, config::AppConfig};
///
/// let source = r#"{
///     "callers": { "c1": { "data": ["w1"], "path": "api.py" } },
///     "workflows": { "w1": { "data": ["a1", "a2"], "path": "wf.py" } },
///     "activities": { "a1": { "path": "act.py" }, "a2": { "path": "act.py" } }
/// }"#;
///
/// let builder = FlowBuilder::new(AppConfig::default());
///
/// // Parse source to an entity snapshot
/// let store = builder.parse(source).expect("Failed to parse");
///
/// // Build the filtered model and render it
/// let model = builder.build(&store);
/// assert_eq!(model.edge_count(), 3);
/// let json = builder.render(&model).expect("Failed to render");
/// assert!(json.contains("\"c1-w1\""));
///
/// // Or use default config
/// let builder = FlowBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct FlowBuilder {
    config: AppConfig,
}

impl FlowBuilder {
    /// Create a new flow builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including graph, export and layout settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON entity document into an [`EntityStore`].
    ///
    /// # Errors
    ///
    /// Returns `TemporalFlowError::Parse` carrying every diagnostic together
    /// with `source`, so the spans can be rendered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use temporal_flow::{FlowBuilder, TemporalFlowError};
    ///
    /// let builder = FlowBuilder::default();
    /// let err = builder.parse("{ \"callers\": [] }").unwrap_err();
    /// assert!(matches!(err, TemporalFlowError::Parse { .. }));
    /// ```
    pub fn parse(&self, source: &str) -> Result<EntityStore, TemporalFlowError> {
        info!("Parsing entity document");

        let store = temporal_flow_parser::parse(source)
            .map_err(|err| TemporalFlowError::new_parse_error(err, source))?;

        debug!(records = store.len(); "Entity document parsed successfully");
        trace!(store:?; "Parsed store");

        Ok(store)
    }

    /// Check a parsed store for suspicious but legal input.
    ///
    /// Returns warnings only; none of them prevents a build.
    pub fn lint(&self, source: &str, store: &EntityStore) -> Vec<Diagnostic> {
        let warnings = temporal_flow_parser::lint(source, store);
        debug!(warnings = warnings.len(); "Lint finished");
        warnings
    }

    /// Run the category builders and merge their output, without filtering.
    pub fn assemble(&self, store: &EntityStore) -> DiagramModel {
        info!(parallel = self.config.graph().parallel(); "Assembling graph");
        assembler::assemble(store, self.config.graph().parallel())
    }

    /// Build the model handed to layout and rendering.
    ///
    /// Nodes without an incident edge are dropped unless
    /// `graph.show_isolated` is set.
    pub fn build(&self, store: &EntityStore) -> DiagramModel {
        let model = self.assemble(store);
        if self.config.graph().show_isolated() {
            return model;
        }

        let model = filter::visible(&model);
        info!(nodes = model.node_count(), edges = model.edge_count(); "Visible graph built");
        model
    }

    /// Serialize `model` in the configured [`ExportFormat`].
    ///
    /// # Errors
    ///
    /// Returns `TemporalFlowError::Export` if the document cannot be produced.
    pub fn render(&self, model: &DiagramModel) -> Result<String, TemporalFlowError> {
        let export = self.config.export();
        info!(format:% = export.format(); "Rendering handoff document");

        let json = match export.format() {
            ExportFormat::Flow => FlowExporter::new(export.pretty()).export(model)?,
            ExportFormat::Elk => {
                ElkExporter::new(self.config.layout(), export.pretty()).export(model)?
            }
        };

        debug!(bytes = json.len(); "Handoff document rendered");
        Ok(json)
    }
}
