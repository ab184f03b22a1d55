//! Browser lifecycle management using Chrome DevTools Protocol
//!
//! [`BrowserSession`] owns the Chrome process. Dropping the session kills the
//! process, so every exit path of the code holding it releases the browser.

use headless_chrome::{Browser, LaunchOptions, Tab};
use scrapewise_core::{RenderSettings, Result, ScrapewiseError};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Keep Chrome's process sandbox enabled (default: true)
    pub sandbox: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// User agent string
    pub user_agent: Option<String>,
    /// Navigation timeout in seconds
    pub timeout_seconds: u64,
    /// Fixed wait between navigation and DOM capture
    pub settle: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for BrowserConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            headless: settings.headless,
            sandbox: settings.sandbox,
            window_width: settings.window_width,
            window_height: settings.window_height,
            user_agent: None,
            timeout_seconds: settings.navigation_timeout_secs,
            settle: Duration::from_secs(settings.settle_secs),
        }
    }
}

impl BrowserConfig {
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Active browser session with a single tab
pub struct BrowserSession {
    /// Underlying browser instance; the Chrome process dies with it
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, sandbox: {}, size: {}x{})",
            config.headless, config.sandbox, config.window_width, config.window_height
        );

        let mut launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .window_size(Some((config.window_width, config.window_height)))
            .build()
            .map_err(|e| ScrapewiseError::Browser(format!("Failed to launch browser: {}", e)))?;

        // Chrome's /dev/shm usage breaks in small containers
        launch_options.args.push(OsStr::new("--disable-dev-shm-usage"));

        let user_agent_arg: Option<String> = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));
        if let Some(ref ua_arg) = user_agent_arg {
            launch_options.args.push(OsStr::new(ua_arg));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| ScrapewiseError::Browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapewiseError::Browser(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(Duration::from_secs(config.timeout_seconds));

        info!("Browser launched successfully");

        Ok(Self { browser, tab })
    }

    /// Navigate to a URL and wait for the load to finish
    pub fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        self.tab.navigate_to(url).map_err(|e| {
            ScrapewiseError::Browser(format!("Failed to navigate to {}: {}", url, e))
        })?;

        self.tab.wait_until_navigated().map_err(|e| {
            ScrapewiseError::Browser(format!("Navigation timeout for {}: {}", url, e))
        })?;

        info!("Successfully navigated to {}", url);
        Ok(())
    }

    /// Serialize the current DOM as HTML
    pub fn content(&self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| ScrapewiseError::Browser(format!("Failed to read page content: {}", e)))
    }

    /// Close the tab and shut the browser down
    pub fn close(self) {
        info!("Closing browser session");
        if let Err(e) = self.tab.close(true) {
            debug!("Tab close failed, process will still be killed: {}", e);
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("BrowserSession dropped, browser process released");
    }
}
