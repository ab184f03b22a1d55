//! Network collaborators for scrapewise
//!
//! - [`http`]: shared HTTP client and the single static GET
//! - [`robots`]: robots.txt permission check with the fail-open policy

pub mod http;
pub mod robots;

pub use http::{build_client, HttpFetcher};
pub use robots::{robots_url, RobotsChecker};
