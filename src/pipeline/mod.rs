//! CSS transform pipeline.
//!
//! The relay delegates all CSS semantics to a [`Transform`]
//! implementation. The production pipeline is [`Autoprefixer`], which
//! adds vendor-prefixed fallbacks for the configured browser targets.

pub mod prefixer;
pub mod traits;

pub use prefixer::Autoprefixer;
pub use traits::Transform;
