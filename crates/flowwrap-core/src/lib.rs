#![forbid(unsafe_code)]

//! Core: geometry shared by the flow passes, plus the logging facade.

pub mod geometry;
pub mod logging;

pub use geometry::{LayoutDirection, Margins, Rect, Sides, Size};

// Re-export tracing macros at crate root so instrumented code reads the same
// with or without the `tracing` feature.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
