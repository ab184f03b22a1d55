//! # scrapewise-core
//!
//! Shared vocabulary for the scrapewise page analyzer.
//!
//! scrapewise looks at a single web page and recommends whether a plain HTTP
//! fetch is enough to scrape it, or whether the page only fills in its content
//! once a browser has executed its scripts.
//!
//! ## Contents
//!
//! - Data model: fetch results, the framework signature table, verdicts
//! - Collaborator traits for the permission check and both fetchers
//! - Ratio arithmetic and the recommendation threshold
//! - Configuration and the unified error type

pub mod config;
pub mod decision;
mod error;
pub mod fail_open;
mod traits;
mod types;

pub use config::{DecisionSettings, HttpSettings, RenderSettings, ScrapewiseConfig};
pub use decision::{recommend, text_ratio, DEFAULT_RATIO_THRESHOLD};
pub use error::{Result, ScrapewiseError};
pub use traits::{PermissionChecker, RenderedFetcher, StaticFetcher};
pub use types::*;
