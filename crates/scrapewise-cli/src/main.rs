//! scrapewise CLI - should this page be scraped with plain HTTP or a browser?
//!
//! Usage:
//!   scrapewise <url>            Analyze the given page
//!   scrapewise                  Prompt for a URL on stdin
//!   scrapewise --no-sandbox <url>
//!                               Run Chrome without its sandbox (containers)

use anyhow::{Context, Result};
use clap::Parser;
use scrapewise_browser::{BrowserConfig, ChromeRenderer};
use scrapewise_core::ScrapewiseConfig;
use scrapewise_engine::{ConsoleNarrator, RecommendationEngine};
use scrapewise_fetch::{build_client, HttpFetcher, RobotsChecker};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "scrapewise")]
#[command(author, version, about = "Recommend static or browser-based scraping for a web page")]
struct Cli {
    /// Page to analyze (prompted for when omitted)
    url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Read settings from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds to let the rendered page settle before capturing it
    #[arg(long, value_name = "SECS")]
    settle_secs: Option<u64>,

    /// HTTP timeout in seconds for robots.txt and the static fetch
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Rendered/raw text ratio above which a browser is recommended
    #[arg(long, value_name = "RATIO")]
    threshold: Option<f64>,

    /// Disable Chrome's process sandbox
    #[arg(long)]
    no_sandbox: bool,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut ScrapewiseConfig) {
        if let Some(secs) = self.settle_secs {
            config.render.settle_secs = secs;
        }
        if let Some(secs) = self.timeout_secs {
            config.http.timeout_secs = secs;
        }
        if let Some(threshold) = self.threshold {
            config.decision.ratio_threshold = threshold;
        }
        if self.no_sandbox {
            config.render.sandbox = false;
        }
        if self.headed {
            config.render.headless = false;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for the analysis transcript
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = ScrapewiseConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;
    debug!("Effective configuration: {:?}", config);

    let url = match cli.url {
        Some(ref url) => url.trim().to_string(),
        None => prompt_for_url()?,
    };

    let client = build_client(&config.http)?;
    let browser_config =
        BrowserConfig::from(&config.render).with_user_agent(config.http.user_agent.clone());

    let engine = RecommendationEngine::new(
        RobotsChecker::new(client.clone()),
        HttpFetcher::new(client),
        ChromeRenderer::new(browser_config),
    )
    .with_config(&config)
    .with_narrator(ConsoleNarrator);

    let outcome = engine.analyze(&url).await;
    debug!("Analysis outcome: {:?}", outcome);

    Ok(())
}

fn prompt_for_url() -> Result<String> {
    print!("Enter the URL to analyze: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}
