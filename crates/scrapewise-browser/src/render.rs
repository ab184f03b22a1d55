//! Rendered fetch: load a page in Chrome, wait, capture the DOM

use crate::browser::{BrowserConfig, BrowserSession};
use async_trait::async_trait;
use scrapewise_core::fail_open::fail_open;
use scrapewise_core::{RenderedFetcher, RenderedResult, Result, ScrapewiseError};
use tracing::{info, instrument};

/// Rendered fetcher backed by a fresh headless Chrome per call
#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    config: BrowserConfig,
}

impl ChromeRenderer {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Render on a blocking thread; a panic inside the CDP client surfaces as
    /// an error instead of unwinding into the caller
    async fn render_isolated(&self, url: &str) -> Result<String> {
        let config = self.config.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || render_page(&config, &url))
            .await
            .map_err(|e| ScrapewiseError::RenderedFetch(format!("browser task aborted: {}", e)))?
    }
}

/// Launch, navigate, settle, capture. The session is dropped on every return
/// path, which kills the browser process.
fn render_page(config: &BrowserConfig, url: &str) -> Result<String> {
    let session = BrowserSession::launch(config)?;
    session.navigate(url)?;

    info!("Waiting {:?} for the page to settle", config.settle);
    std::thread::sleep(config.settle);

    let html = session.content()?;
    session.close();
    Ok(html)
}

#[async_trait]
impl RenderedFetcher for ChromeRenderer {
    #[instrument(skip(self))]
    async fn render(&self, url: &str) -> RenderedResult {
        fail_open(
            "rendered_fetch",
            || async move {
                let html = self.render_isolated(url).await?;
                info!("Captured {} bytes of rendered HTML", html.len());
                Ok(RenderedResult::available(html))
            },
            |e| RenderedResult::unavailable(e.to_string()),
        )
        .await
    }
}
