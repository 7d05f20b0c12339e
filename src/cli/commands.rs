//! CLI command implementation.
//!
//! Wires the parsed arguments to the transform pipeline and the relay:
//! builds the prefixer from the browserslist queries, opens the output
//! stream, and relays stdin or each input file through the pipeline.

use crate::cli::output::{OutputFormat, format_summary};
use crate::cli::parser::Cli;
use crate::error::{CommandError, IoError, Result};
use crate::io::read_file;
use crate::pipeline::{Autoprefixer, Transform};
use crate::relay::{RelayOptions, RelaySummary, relay};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::sync::Mutex;

/// Boxed output stream (stdout or a file).
type Output = Box<dyn AsyncWrite + Send + Unpin>;

/// Executes the relay with the parsed CLI arguments.
///
/// # Returns
///
/// A diagnostic string for stderr: the relay summary when `--verbose`
/// is set, empty otherwise.
///
/// # Errors
///
/// Returns an error when the arguments are invalid, a stream fails, or
/// the pipeline rejected input and `--ignore-errors` is not set.
pub async fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    if cli.read_buffer == 0 {
        return Err(
            CommandError::InvalidArgument("--read-buffer must be non-zero".to_string()).into(),
        );
    }

    let transform = Arc::new(Autoprefixer::new(&cli.browsers, cli.minify)?);
    let options = RelayOptions {
        chunked: cli.chunked,
        read_buffer: cli.read_buffer,
    };

    let writer: Output = match &cli.output {
        Some(path) => Box::new(tokio::fs::File::create(path).await.map_err(|e| {
            IoError::WriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?),
        None => Box::new(tokio::io::stdout()),
    };
    let writer = Arc::new(Mutex::new(writer));

    let summary = if cli.inputs.is_empty() {
        relay(tokio::io::stdin(), writer, transform, &options).await?
    } else {
        relay_files(&cli.inputs, writer, transform, &options).await?
    };

    tracing::debug!(
        chunks_in = summary.chunks_in,
        chunks_out = summary.chunks_out,
        failures = summary.failures,
        "relay finished"
    );

    if summary.failures > 0 && !cli.ignore_errors {
        return Err(CommandError::TransformFailed {
            failures: summary.failures,
            first: summary.first_error.clone().unwrap_or_default(),
        }
        .into());
    }

    Ok(if cli.verbose {
        format_summary(&summary, format)
    } else {
        String::new()
    })
}

/// Relays each input file as one complete document.
async fn relay_files<T>(
    paths: &[PathBuf],
    writer: Arc<Mutex<Output>>,
    transform: Arc<T>,
    options: &RelayOptions,
) -> Result<RelaySummary>
where
    T: Transform + ?Sized + 'static,
{
    // Files are complete stylesheets; chunked reads would split
    // documents arbitrarily, so each file goes through buffered mode.
    let file_options = RelayOptions {
        chunked: false,
        ..options.clone()
    };

    let mut summary = RelaySummary::default();
    for path in paths {
        let css = read_file(path)?;
        let s = relay(
            css.as_bytes(),
            Arc::clone(&writer),
            Arc::clone(&transform),
            &file_options,
        )
        .await?;
        summary.merge(s);
    }

    Ok(summary)
}
