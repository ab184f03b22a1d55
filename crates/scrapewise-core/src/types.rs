//! Data model shared by every stage of an analysis run
//!
//! All of these are transient: built once per invocation, read, printed and
//! dropped. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Response headers with case-insensitive lookup
///
/// Names are stored lowercased. A header that appears more than once keeps
/// every value, joined with `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: BTreeMap<String, String>,
}

impl Headers {
    /// Create an empty header map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header value, folding repeated names into one entry
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.entries
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    /// Look up a header by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name.as_ref(), value);
        }
        headers
    }
}

/// Outcome of the single static HTTP GET
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFetchResult {
    pub body: Option<String>,
    pub headers: Headers,
    pub fetch_succeeded: bool,
    /// Why the fetch failed, when it did
    pub failure: Option<String>,
}

impl PageFetchResult {
    /// A successful fetch with its body and response headers
    pub fn succeeded(body: impl Into<String>, headers: Headers) -> Self {
        Self {
            body: Some(body.into()),
            headers,
            fetch_succeeded: true,
            failure: None,
        }
    }

    /// A failed fetch carrying the reason
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            body: None,
            headers: Headers::new(),
            fetch_succeeded: false,
            failure: Some(reason.into()),
        }
    }

    /// The HTML to analyze, if the fetch produced a non-empty body
    pub fn html(&self) -> Option<&str> {
        if !self.fetch_succeeded {
            return None;
        }
        self.body.as_deref().filter(|body| !body.is_empty())
    }

    /// Raw `X-Robots-Tag` header value, if the response carried one
    pub fn x_robots_tag(&self) -> Option<&str> {
        self.headers.get("X-Robots-Tag").filter(|v| !v.is_empty())
    }

    /// Reason to report when [`Self::html`] is absent
    pub fn failure_reason(&self) -> String {
        match &self.failure {
            Some(reason) => reason.clone(),
            None => "response body was empty".to_string(),
        }
    }
}

/// Outcome of the browser render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedResult {
    pub html: Option<String>,
    /// Why no HTML was captured, when none was
    pub failure: Option<String>,
}

impl RenderedResult {
    pub fn available(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            failure: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            html: None,
            failure: Some(reason.into()),
        }
    }

    /// The rendered DOM, if the browser produced a non-empty document
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref().filter(|html| !html.is_empty())
    }
}

/// One client-side framework and the substrings that betray it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkSignature {
    pub name: String,
    /// Case-insensitive substrings, checked in order
    pub indicators: Vec<String>,
}

impl FrameworkSignature {
    pub fn new(name: impl Into<String>, indicators: &[&str]) -> Self {
        Self {
            name: name.into(),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether any indicator occurs in `haystack`
    ///
    /// `haystack` must already be lowercased.
    pub fn matches_lowercase(&self, haystack: &str) -> bool {
        self.indicators
            .iter()
            .any(|indicator| haystack.contains(&indicator.to_lowercase()))
    }
}

/// Immutable framework fingerprint table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkSignatures(Vec<FrameworkSignature>);

impl FrameworkSignatures {
    pub fn new(signatures: Vec<FrameworkSignature>) -> Self {
        Self(signatures)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameworkSignature> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FrameworkSignatures {
    fn default() -> Self {
        Self(vec![
            FrameworkSignature::new("React", &["react", "data-reactroot", "data-reactid"]),
            FrameworkSignature::new("Angular", &["angular", "ng-app", "ng-controller"]),
            FrameworkSignature::new("Vue", &["vue", "v-bind", "v-model"]),
            FrameworkSignature::new("Ember", &["ember", "data-ember-action"]),
        ])
    }
}

/// Result of consulting the site's robots.txt
///
/// `AllowedByFallback` is the fail-open policy: the permission file could not
/// be read or parsed, so the page is treated as fetchable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    Allowed {
        robots_url: String,
    },
    Disallowed {
        robots_url: String,
    },
    AllowedByFallback {
        robots_url: Option<String>,
        reason: String,
    },
}

impl PermissionDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, PermissionDecision::Disallowed { .. })
    }

    /// True only when robots.txt was read and explicitly permits the URL
    pub fn is_confirmed(&self) -> bool {
        matches!(self, PermissionDecision::Allowed { .. })
    }

    pub fn robots_url(&self) -> Option<&str> {
        match self {
            PermissionDecision::Allowed { robots_url }
            | PermissionDecision::Disallowed { robots_url } => Some(robots_url),
            PermissionDecision::AllowedByFallback { robots_url, .. } => robots_url.as_deref(),
        }
    }
}

/// Final recommendation for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StaticSufficient,
    NeedsBrowser,
    Inconclusive,
}

impl Recommendation {
    /// One-line summary of what to do
    pub fn summary(&self) -> &'static str {
        match self {
            Recommendation::StaticSufficient => "static scraping sufficient",
            Recommendation::NeedsBrowser => {
                "JavaScript-dependent content; headless browser recommended"
            }
            Recommendation::Inconclusive => "manual inspection required",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::StaticSufficient => "STATIC_SUFFICIENT",
            Recommendation::NeedsBrowser => "NEEDS_BROWSER",
            Recommendation::Inconclusive => "INCONCLUSIVE",
        };
        f.write_str(label)
    }
}

/// Everything learned about a page that made it past the static fetch
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisVerdict {
    pub url: String,
    pub permission: PermissionDecision,
    pub visible_text_length_raw: usize,
    /// Absent when the rendered fetch failed
    pub visible_text_length_rendered: Option<usize>,
    /// `rendered / raw`, `+inf` when raw is zero; absent without a render
    pub ratio: Option<f64>,
    pub detected_frameworks: BTreeSet<String>,
    pub meta_robots_directives: Vec<String>,
    pub x_robots_header: Option<String>,
    pub recommendation: Recommendation,
}
