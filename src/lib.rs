//! # css-relay
//!
//! An asynchronous CSS autoprefixing relay.
//!
//! css-relay reads CSS text from stdin (or files), runs it through a
//! transform pipeline with vendor prefixing enabled, and writes the
//! transformed CSS verbatim to stdout (or a file). All CSS semantics
//! (parsing, browser-compatibility data, re-serialization) belong to
//! the pipeline; the relay owns stream handling, concurrency, and
//! failure reporting.
//!
//! ## Features
//!
//! - **Buffered relay**: whole-document processing (default)
//! - **Chunked relay**: per-read-chunk transforms with completion-order
//!   output, preserving the historical stream semantics
//! - **Browser targets**: browserslist queries select which vendor
//!   prefixes are added
//! - **Explicit failure channel**: rejected input is logged and counted
//!   instead of silently dropped

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod error;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod relay;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export pipeline types
pub use pipeline::{Autoprefixer, Transform};

// Re-export relay types
pub use relay::{DEFAULT_READ_BUFFER, RelayOptions, RelaySummary, relay as run_relay};

// Re-export CLI types
pub use cli::{Cli, OutputFormat};
