//! Recommendation engine for scrapewise
//!
//! Runs the linear pipeline: permission check, static fetch, markup
//! analysis, rendered fetch, ratio, recommendation. Each step is narrated
//! through a [`Narrator`] so front ends decide how progress is shown.

pub mod engine;
pub mod mock;
pub mod narration;

pub use engine::{AnalysisOutcome, RecommendationEngine};
pub use narration::{
    render_event, AnalysisEvent, ConsoleNarrator, Narrator, NullNarrator, RecordingNarrator,
};
