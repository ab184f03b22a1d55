//! robots.txt permission check
//!
//! The check fails open: when the permission file cannot be fetched or
//! parsed, the page is reported as [`PermissionDecision::AllowedByFallback`]
//! together with the reason, rather than blocking the analysis.

use async_trait::async_trait;
use scrapewise_core::fail_open::fail_open;
use scrapewise_core::{PermissionChecker, PermissionDecision, Result, ScrapewiseError};
use texting_robots::Robot;
use tracing::{info, instrument};
use url::Url;

/// Agent name evaluated against the rules
const GENERIC_AGENT: &str = "*";

/// Location of the permission file for `target`
///
/// Keeps the scheme, userinfo, host and port of the target; path, query and
/// fragment are replaced by `/robots.txt`.
pub fn robots_url(target: &str) -> Result<Url> {
    let invalid = |reason: String| ScrapewiseError::InvalidUrl {
        url: target.to_string(),
        reason,
    };

    let parsed = Url::parse(target).map_err(|e| invalid(e.to_string()))?;
    if !parsed.has_host() {
        return Err(invalid("URL has no host".to_string()));
    }
    parsed
        .join("/robots.txt")
        .map_err(|e| invalid(e.to_string()))
}

/// Decide whether the generic agent may fetch `target` given the robots.txt
/// response
///
/// 401 and 403 deny every path and any other 4xx allows every path. Other
/// non-2xx statuses are errors.
pub fn evaluate_robots(status: u16, body: &[u8], target: &str) -> Result<bool> {
    match status {
        401 | 403 => Ok(false),
        400..=499 => Ok(true),
        200..=299 => {
            let robot = Robot::new(GENERIC_AGENT, body).map_err(|e| {
                ScrapewiseError::PermissionCheck(format!("Failed to parse robots.txt: {}", e))
            })?;
            Ok(robot.allowed(target))
        }
        _ => Err(ScrapewiseError::PermissionCheck(format!(
            "robots.txt returned HTTP {}",
            status
        ))),
    }
}

/// Permission checker reading robots.txt over HTTP
#[derive(Debug, Clone)]
pub struct RobotsChecker {
    client: reqwest::Client,
}

impl RobotsChecker {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read_rules(&self, target: &str, robots: &Url) -> Result<PermissionDecision> {
        let response = self.client.get(robots.clone()).send().await.map_err(|e| {
            ScrapewiseError::PermissionCheck(format!("Failed to fetch {}: {}", robots, e))
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            ScrapewiseError::PermissionCheck(format!("Failed to read {}: {}", robots, e))
        })?;

        let robots_url = robots.to_string();
        if evaluate_robots(status, &body, target)? {
            info!("robots.txt allows {}", target);
            Ok(PermissionDecision::Allowed { robots_url })
        } else {
            info!("robots.txt disallows {}", target);
            Ok(PermissionDecision::Disallowed { robots_url })
        }
    }
}

#[async_trait]
impl PermissionChecker for RobotsChecker {
    #[instrument(skip(self))]
    async fn check(&self, url: &str) -> PermissionDecision {
        let robots = robots_url(url);
        let fallback_url = robots.as_ref().ok().map(Url::to_string);

        fail_open(
            "robots_check",
            || async move { self.read_rules(url, &robots?).await },
            |e| PermissionDecision::AllowedByFallback {
                robots_url: fallback_url,
                reason: e.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[u8] = b"User-agent: *\nDisallow: /private/\n\nUser-agent: BadBot\nDisallow: /\n";

    #[test]
    fn test_robots_url_from_target() {
        let url = robots_url("https://example.com/some/page?q=1#top").unwrap();
        assert_eq!(url.as_str(), "https://example.com/robots.txt");
    }

    #[test]
    fn test_robots_url_keeps_port_and_userinfo() {
        let url = robots_url("http://user:pw@example.com:8080/a").unwrap();
        assert_eq!(url.as_str(), "http://user:pw@example.com:8080/robots.txt");
    }

    #[test]
    fn test_robots_url_rejects_relative() {
        let result = robots_url("example.com/page");
        assert!(matches!(result, Err(ScrapewiseError::InvalidUrl { .. })));
    }

    #[test]
    fn test_robots_url_rejects_hostless() {
        let result = robots_url("mailto:someone@example.com");
        assert!(matches!(result, Err(ScrapewiseError::InvalidUrl { .. })));
    }

    #[test]
    fn test_rules_allow_public_path() {
        assert!(evaluate_robots(200, RULES, "https://example.com/public/page").unwrap());
    }

    #[test]
    fn test_rules_disallow_private_path() {
        assert!(!evaluate_robots(200, RULES, "https://example.com/private/page").unwrap());
    }

    #[test]
    fn test_other_agents_rules_ignored() {
        let rules = b"User-agent: BadBot\nDisallow: /\n";
        assert!(evaluate_robots(200, rules, "https://example.com/").unwrap());
    }

    #[test]
    fn test_empty_rules_allow_everything() {
        assert!(evaluate_robots(200, b"", "https://example.com/anything").unwrap());
    }

    #[test]
    fn test_unauthorized_denies_everything() {
        assert!(!evaluate_robots(401, b"", "https://example.com/").unwrap());
        assert!(!evaluate_robots(403, b"", "https://example.com/").unwrap());
    }

    #[test]
    fn test_missing_file_allows_everything() {
        assert!(evaluate_robots(404, b"not found", "https://example.com/private/").unwrap());
        assert!(evaluate_robots(410, b"", "https://example.com/").unwrap());
    }

    #[test]
    fn test_server_error_is_failure() {
        let result = evaluate_robots(503, b"", "https://example.com/");
        assert!(matches!(result, Err(ScrapewiseError::PermissionCheck(_))));
    }

    #[tokio::test]
    async fn test_invalid_target_falls_back_to_allowed() {
        let checker = RobotsChecker::new(reqwest::Client::new());
        let decision = checker.check("not-a-url").await;

        match decision {
            PermissionDecision::AllowedByFallback { robots_url, reason } => {
                assert!(robots_url.is_none());
                assert!(reason.contains("not-a-url"));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }
}
