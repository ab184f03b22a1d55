//! Configuration management for scrapewise
//!
//! Every setting has a built-in default that reproduces the stock behaviour,
//! so a configuration file is only read when one is named explicitly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decision::DEFAULT_RATIO_THRESHOLD;
use crate::{FrameworkSignatures, Result, ScrapewiseError};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapewiseConfig {
    /// Static fetch and robots.txt settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Headless browser settings
    #[serde(default)]
    pub render: RenderSettings,

    /// Recommendation threshold
    #[serde(default)]
    pub decision: DecisionSettings,

    /// Framework fingerprint table
    #[serde(default)]
    pub frameworks: FrameworkSignatures,
}

/// Plain HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Browser render settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Fixed wait after navigation before the DOM is captured
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Run Chrome with its process sandbox enabled
    #[serde(default = "default_true")]
    pub sandbox: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Upper bound on page navigation
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,
}

/// Ratio decision settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSettings {
    /// Rendered/raw ratio above which a browser is recommended
    #[serde(default = "default_ratio_threshold")]
    pub ratio_threshold: f64,
}

// Default value providers
fn default_http_timeout_secs() -> u64 {
    10
}

fn default_settle_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_ratio_threshold() -> f64 {
    DEFAULT_RATIO_THRESHOLD
}

impl ScrapewiseConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ScrapewiseError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the analysis meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.decision.ratio_threshold.is_finite() || self.decision.ratio_threshold < 0.0 {
            return Err(ScrapewiseError::Config(format!(
                "ratio_threshold must be a non-negative number, got {}",
                self.decision.ratio_threshold
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(ScrapewiseError::Config(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScrapewiseConfig {
    fn default() -> Self {
        Self {
            http: HttpSettings::default(),
            render: RenderSettings::default(),
            decision: DecisionSettings::default(),
            frameworks: FrameworkSignatures::default(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout_secs(),
            user_agent: None,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            settle_secs: default_settle_secs(),
            headless: true,
            sandbox: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
        }
    }
}

impl Default for DecisionSettings {
    fn default() -> Self {
        Self {
            ratio_threshold: default_ratio_threshold(),
        }
    }
}
