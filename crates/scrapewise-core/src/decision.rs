//! Text-volume ratio and the threshold that turns it into a recommendation

use crate::Recommendation;

/// Rendered text must exceed raw text by more than this factor before a page
/// is considered JavaScript-rendered.
pub const DEFAULT_RATIO_THRESHOLD: f64 = 1.2;

/// Ratio of rendered to raw visible text length
///
/// A raw length of zero yields `+inf` whatever the rendered length is,
/// including `0 / 0`.
pub fn text_ratio(raw: usize, rendered: usize) -> f64 {
    if raw == 0 {
        return f64::INFINITY;
    }
    rendered as f64 / raw as f64
}

/// Map a ratio onto a recommendation; the comparison is strict
pub fn recommend(ratio: f64, threshold: f64) -> Recommendation {
    if ratio > threshold {
        Recommendation::NeedsBrowser
    } else {
        Recommendation::StaticSufficient
    }
}
