//! CLI layer for css-relay.
//!
//! Provides the command-line interface using clap, wiring the transform
//! pipeline and the relay to the process's streams.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::Cli;
