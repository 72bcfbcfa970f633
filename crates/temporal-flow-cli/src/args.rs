//! Command-line argument definitions for the Temporal Flow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, export overrides and logging verbosity.

use clap::Parser;

use temporal_flow::config::ExportFormat;

/// Command-line arguments for the Temporal Flow graph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input entity document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output handoff document
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Handoff document format (flow, elk); overrides the configuration
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Keep nodes that have no incoming or outgoing edge
    #[arg(long)]
    pub show_isolated: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
