//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::Parser;
use std::path::PathBuf;

/// css-relay: pipe CSS through a vendor-prefixing transform pipeline.
///
/// Reads CSS from stdin (or from files), adds vendor-prefixed fallbacks
/// for the configured browser targets, and writes the result to stdout
/// (or a file). All diagnostics go to stderr; stdout carries only CSS.
#[derive(Parser, Debug)]
#[command(name = "css-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CSS files to process; reads stdin when empty.
    pub inputs: Vec<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Browserslist queries selecting the browsers to prefix for.
    #[arg(
        short,
        long,
        env = "CSS_RELAY_BROWSERS",
        value_delimiter = ',',
        default_value = "defaults"
    )]
    pub browsers: Vec<String>,

    /// Emit compressed (minified) output.
    #[arg(long)]
    pub minify: bool,

    /// Transform each read chunk independently instead of buffering
    /// the whole input stream.
    ///
    /// This reproduces the historical per-readiness-event behavior;
    /// feeding one stylesheet in several chunks yields several
    /// independently-prefixed fragments.
    #[arg(long)]
    pub chunked: bool,

    /// Read window size in bytes for --chunked mode.
    #[arg(long, default_value = "65536")]
    pub read_buffer: usize,

    /// Exit successfully even when the pipeline rejects input
    /// (historical behavior: rejected chunks are silently dropped).
    #[arg(long)]
    pub ignore_errors: bool,

    /// Enable verbose output (relay summary on stderr, debug logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Diagnostic output format (text, json).
    #[arg(long, default_value = "text")]
    pub format: String,
}
