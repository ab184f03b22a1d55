//! Plain HTTP fetching

use async_trait::async_trait;
use scrapewise_core::fail_open::fail_open;
use scrapewise_core::{
    Headers, HttpSettings, PageFetchResult, Result, ScrapewiseError, StaticFetcher,
};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Build the HTTP client shared by the robots check and the static fetch
pub fn build_client(settings: &HttpSettings) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(settings.timeout_secs));
    if let Some(ref user_agent) = settings.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    builder
        .build()
        .map_err(|e| ScrapewiseError::Other(format!("Failed to build HTTP client: {}", e)))
}

/// Static fetcher performing exactly one GET per call
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Create a fetcher with its own client
    pub fn from_settings(settings: &HttpSettings) -> Result<Self> {
        Ok(Self::new(build_client(settings)?))
    }

    /// GET `url`, treating any non-2xx status as an error
    pub async fn get(&self, url: &str) -> Result<PageFetchResult> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapewiseError::StaticFetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapewiseError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let headers: Headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| ScrapewiseError::StaticFetch(format!("reading body of {}: {}", url, e)))?;

        info!("Fetched {} ({} bytes, HTTP {})", url, body.len(), status.as_u16());
        Ok(PageFetchResult::succeeded(body, headers))
    }
}

#[async_trait]
impl StaticFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> PageFetchResult {
        fail_open("static_fetch", || self.get(url), |e| {
            PageFetchResult::failed(e.to_string())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_client(&HttpSettings::default()).is_ok());
    }

    #[test]
    fn test_build_client_with_user_agent() {
        let settings = HttpSettings {
            timeout_secs: 2,
            user_agent: Some("scrapewise/0.1".to_string()),
        };
        assert!(HttpFetcher::from_settings(&settings).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_fails_without_panicking() {
        let fetcher = HttpFetcher::from_settings(&HttpSettings::default()).unwrap();
        let page = fetcher.fetch("not a url").await;
        assert!(!page.fetch_succeeded);
        assert!(page.html().is_none());
        assert!(page.failure.is_some());
    }
}
