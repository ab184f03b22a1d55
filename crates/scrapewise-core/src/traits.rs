//! Collaborator seams of the analysis pipeline
//!
//! Each implementation catches its own failures and reports them through the
//! returned value, so the engine never has to handle an error from them.

use async_trait::async_trait;

use crate::{PageFetchResult, PermissionDecision, RenderedResult};

/// Decides whether the generic agent `*` may fetch a URL
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn check(&self, url: &str) -> PermissionDecision;
}

/// Performs the single plain HTTP GET of the target page
#[async_trait]
pub trait StaticFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> PageFetchResult;
}

/// Loads the page in a browser and serializes the settled DOM
#[async_trait]
pub trait RenderedFetcher: Send + Sync {
    async fn render(&self, url: &str) -> RenderedResult;
}
