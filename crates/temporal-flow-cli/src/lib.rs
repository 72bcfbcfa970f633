//! Temporal Flow CLI library
//!
//! This module contains the core CLI logic for the Temporal Flow graph tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::{ErrorAdapter, render_report, to_reportables};

use std::fs;

use log::{info, warn};

use temporal_flow::{
    FlowBuilder, TemporalFlowError,
    config::{AppConfig, ExportConfig, GraphConfig},
};

use error_adapter::DiagnosticAdapter;

/// Run the Temporal Flow CLI application
///
/// This function reads the entity document, builds the call graph and
/// writes the handoff document to the output file. Lint warnings are logged
/// and never fail the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TemporalFlowError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), TemporalFlowError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing entity document"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);

    let source = fs::read_to_string(&args.input)?;

    let builder = FlowBuilder::new(app_config);
    let store = builder.parse(&source)?;

    for warning in builder.lint(&source, &store) {
        let report = render_report(&DiagnosticAdapter::new(&warning, &source));
        warn!("{report}");
    }

    let model = builder.build(&store);
    let json = builder.render(&model)?;

    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        format:% = builder.config().export().format();
        "Handoff document exported successfully"
    );

    Ok(())
}

/// Apply command-line flags on top of the loaded configuration.
fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let mut config = config;

    if let Some(format) = args.format {
        let export = ExportConfig::new(format, config.export().pretty());
        config = config.with_export(export);
    }

    if args.show_isolated {
        let graph = GraphConfig::new(true, config.graph().parallel());
        config = config.with_graph(graph);
    }

    config
}
