//! Fail-open utilities for collaborator boundaries
//!
//! Every network or browser step of an analysis converts its error into a
//! value the pipeline can carry on with. These helpers do that conversion in
//! one place and leave a `warn!` behind so the failure stays visible.
//!
//! Use for I/O at the edges (robots.txt, HTTP GET, browser render). Do not
//! use for the markup analysis or the ratio decision.

use std::future::Future;
use tracing::warn;

use crate::{Result, ScrapewiseError};

/// Run `f`, turning an error into `fallback(error)`
///
/// # Usage
///
/// ```no_run
/// use scrapewise_core::fail_open::fail_open;
/// use scrapewise_core::{RenderedResult, Result};
///
/// async fn render() -> Result<RenderedResult> {
///     Ok(RenderedResult::available("<html></html>"))
/// }
///
/// async fn example() {
///     let rendered = fail_open("rendered_fetch", render, |e| {
///         RenderedResult::unavailable(e.to_string())
///     })
///     .await;
/// }
/// ```
pub async fn fail_open<F, Fut, T, G>(operation_name: &str, f: F, fallback: G) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
    G: FnOnce(ScrapewiseError) -> T,
{
    match f().await {
        Ok(val) => val,
        Err(e) => {
            warn!("{} failed (fail-open): {}", operation_name, e);
            fallback(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fail_open_success() {
        let result = fail_open("test_op", || async { Ok::<_, ScrapewiseError>(42) }, |_| 0).await;
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_fail_open_failure_uses_fallback() {
        let result = fail_open(
            "test_op",
            || async { Err::<String, _>(ScrapewiseError::Other("test error".to_string())) },
            |e| format!("fallback: {}", e),
        )
        .await;
        assert_eq!(result, "fallback: test error");
    }
}
