//! Browser rendering for scrapewise
//!
//! Drives a headless Chrome over the Chrome DevTools Protocol (CDP) to obtain
//! the DOM of a page after its scripts have run.
//!
//! # Example
//!
//! ```no_run
//! use scrapewise_browser::{BrowserConfig, ChromeRenderer};
//! use scrapewise_core::RenderedFetcher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let renderer = ChromeRenderer::new(BrowserConfig::default());
//!     let rendered = renderer.render("https://example.com").await;
//!
//!     match rendered.html() {
//!         Some(html) => println!("{} bytes of rendered HTML", html.len()),
//!         None => println!("render failed: {:?}", rendered.failure),
//!     }
//! }
//! ```
//!
//! # Requirements
//!
//! - Chrome or Chromium installed and discoverable
//! - In containers without user namespaces, disable the sandbox
//!   (`sandbox = false`)
//!
//! # Architecture
//!
//! - [`browser`]: browser lifecycle and session management
//! - [`render`]: the [`RenderedFetcher`](scrapewise_core::RenderedFetcher)
//!   implementation

pub mod browser;
pub mod render;

pub use browser::{BrowserConfig, BrowserSession};
pub use render::ChromeRenderer;
