//! Output formatting for CLI diagnostics.
//!
//! Supports text and JSON formats. Everything produced here is destined
//! for stderr; stdout is reserved for the relayed CSS.

use crate::error::Error;
use crate::relay::RelaySummary;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a relay summary.
#[must_use]
pub fn format_summary(summary: &RelaySummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_summary_text(summary),
        OutputFormat::Json => format_json(summary),
    }
}

fn format_summary_text(summary: &RelaySummary) -> String {
    let mut output = String::new();
    output.push_str("Relay summary\n");
    let _ = writeln!(output, "  Chunks in:   {}", summary.chunks_in);
    let _ = writeln!(output, "  Chunks out:  {}", summary.chunks_out);
    let _ = writeln!(output, "  Bytes out:   {}", summary.bytes_out);
    let _ = writeln!(output, "  Failures:    {}", summary.failures);
    if let Some(ref first) = summary.first_error {
        let _ = writeln!(output, "  First error: {first}");
    }
    output
}

/// Formats an error for display.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
    }
}

/// Formats a value as JSON.
fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
