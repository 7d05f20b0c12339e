//! I/O utilities for css-relay.
//!
//! Provides stylesheet file reading with memory mapping support, along
//! with the UTF-8 helpers the chunked relay uses to keep read windows
//! aligned to character boundaries.

pub mod reader;
pub mod unicode;

pub use reader::{FileReader, read_file};
pub use unicode::{split_complete_utf8, validate_utf8};
