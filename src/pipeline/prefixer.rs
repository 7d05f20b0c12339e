//! Vendor-prefixing transform pipeline backed by `lightningcss`.
//!
//! Parses the input stylesheet, applies transforms for the configured
//! browser targets (this is where vendor-prefixed fallbacks are added),
//! and re-serializes. Browser targets come from browserslist queries,
//! so compatibility data is owned entirely by the pipeline crates.

use crate::error::PipelineError;
use crate::pipeline::Transform;
use async_trait::async_trait;
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

/// CSS transform pipeline with vendor prefixing enabled.
///
/// # Examples
///
/// ```
/// use css_relay::pipeline::Autoprefixer;
///
/// let queries = vec!["defaults".to_string()];
/// let prefixer = Autoprefixer::new(&queries, false).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Autoprefixer {
    /// Browser targets resolved from browserslist queries.
    targets: Targets,
    /// Emit compressed output.
    minify: bool,
}

impl Autoprefixer {
    /// Creates a pipeline targeting the browsers matched by the given
    /// browserslist queries.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::BrowserQuery`] when a query cannot be
    /// resolved.
    pub fn new(browsers: &[String], minify: bool) -> std::result::Result<Self, PipelineError> {
        let browsers = Browsers::from_browserslist(browsers.iter().map(String::as_str)).map_err(
            |e| PipelineError::BrowserQuery {
                message: e.to_string(),
            },
        )?;

        Ok(Self {
            targets: Targets {
                browsers,
                include: Default::default(),
                exclude: Default::default(),
            },
            minify,
        })
    }
}

#[async_trait]
impl Transform for Autoprefixer {
    async fn transform(&self, css: String) -> std::result::Result<String, PipelineError> {
        let targets = self.targets.clone();
        let minify = self.minify;

        // Parsing and printing are CPU-bound; keep them off the event loop
        tokio::task::spawn_blocking(move || run_pipeline(&css, &targets, minify))
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))?
    }
}

/// Runs the parse/transform/print pipeline synchronously.
fn run_pipeline(
    css: &str,
    targets: &Targets,
    minify: bool,
) -> std::result::Result<String, PipelineError> {
    let mut stylesheet =
        StyleSheet::parse(css, ParserOptions::default()).map_err(|e| PipelineError::Parse {
            message: e.to_string(),
        })?;

    stylesheet
        .minify(MinifyOptions {
            targets: targets.clone(),
            ..MinifyOptions::default()
        })
        .map_err(|e| PipelineError::Transform {
            message: e.to_string(),
        })?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify,
            targets: targets.clone(),
            ..PrinterOptions::default()
        })
        .map_err(|e| PipelineError::Print {
            message: e.to_string(),
        })?;

    Ok(result.code)
}
