//! Mock collaborators for exercising the engine without network or browser
//!
//! Clones share their call counter, so a test can hand one clone to the
//! engine and keep another to inspect afterwards.

use async_trait::async_trait;
use scrapewise_core::{
    Headers, PageFetchResult, PermissionChecker, PermissionDecision, RenderedFetcher,
    RenderedResult, StaticFetcher,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Permission checker returning a fixed decision
#[derive(Debug, Clone)]
pub struct MockPermissionChecker {
    decision: PermissionDecision,
    calls: Arc<AtomicUsize>,
}

impl MockPermissionChecker {
    pub fn new(decision: PermissionDecision) -> Self {
        Self {
            decision,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn allowing() -> Self {
        Self::new(PermissionDecision::Allowed {
            robots_url: "https://mock.test/robots.txt".to_string(),
        })
    }

    pub fn disallowing() -> Self {
        Self::new(PermissionDecision::Disallowed {
            robots_url: "https://mock.test/robots.txt".to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionChecker for MockPermissionChecker {
    async fn check(&self, _url: &str) -> PermissionDecision {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.decision.clone()
    }
}

/// Static fetcher returning a fixed page
#[derive(Debug, Clone)]
pub struct MockStaticFetcher {
    result: PageFetchResult,
    calls: Arc<AtomicUsize>,
}

impl MockStaticFetcher {
    pub fn new(result: PageFetchResult) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn html(body: &str) -> Self {
        Self::new(PageFetchResult::succeeded(body, Headers::new()))
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(PageFetchResult::failed(reason))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StaticFetcher for MockStaticFetcher {
    async fn fetch(&self, _url: &str) -> PageFetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Rendered fetcher returning a fixed document
#[derive(Debug, Clone)]
pub struct MockRenderedFetcher {
    result: RenderedResult,
    calls: Arc<AtomicUsize>,
}

impl MockRenderedFetcher {
    pub fn new(result: RenderedResult) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn html(html: &str) -> Self {
        Self::new(RenderedResult::available(html))
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(RenderedResult::unavailable(reason))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderedFetcher for MockRenderedFetcher {
    async fn render(&self, _url: &str) -> RenderedResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
