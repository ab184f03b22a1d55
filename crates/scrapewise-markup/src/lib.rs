//! Markup analysis for scrapewise
//!
//! Pure functions over an in-memory HTML string. Parsing is permissive:
//! malformed markup is repaired by the HTML5 tree builder, never rejected.
//!
//! - [`analyzer`]: visible text length, meta robots directives, framework
//!   fingerprints

pub mod analyzer;

pub use analyzer::{MarkupAnalyzer, MarkupReport};
