//! Step-by-step narration of an analysis run
//!
//! Narration is the user-facing transcript; diagnostics go through `tracing`.

use scrapewise_core::{PermissionDecision, Recommendation};
use std::collections::BTreeSet;
use std::sync::Mutex;

/// One narrated step, emitted in pipeline order
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    Started { url: String },
    Permission(PermissionDecision),
    FetchingStatic,
    StaticFetchFailed { url: String, reason: String },
    MetaRobots(Vec<String>),
    Frameworks(BTreeSet<String>),
    RawTextLength(usize),
    FetchingRendered,
    RenderedFetchFailed { reason: String },
    RenderedTextLength(usize),
    Ratio(f64),
    Recommendation(Recommendation),
    XRobotsTag(String),
}

/// Sink for narration events
pub trait Narrator: Send + Sync {
    fn narrate(&self, event: &AnalysisEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNarrator;

impl Narrator for NullNarrator {
    fn narrate(&self, _event: &AnalysisEvent) {}
}

/// Prints the transcript to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn narrate(&self, event: &AnalysisEvent) {
        for line in render_event(event) {
            println!("{}", line);
        }
    }
}

/// Keeps every event, for inspection after a run
#[derive(Debug, Default)]
pub struct RecordingNarrator {
    events: Mutex<Vec<AnalysisEvent>>,
}

impl RecordingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalysisEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Narrator for RecordingNarrator {
    fn narrate(&self, event: &AnalysisEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

impl<N: Narrator + ?Sized> Narrator for std::sync::Arc<N> {
    fn narrate(&self, event: &AnalysisEvent) {
        (**self).narrate(event)
    }
}

/// Transcript lines for one event; empty strings are blank separator lines
pub fn render_event(event: &AnalysisEvent) -> Vec<String> {
    match event {
        AnalysisEvent::Started { url } => vec![format!("Analyzing URL: {}", url), String::new()],
        AnalysisEvent::Permission(decision) => vec![match decision {
            PermissionDecision::Allowed { robots_url } => {
                format!("Scraping allowed by robots.txt at {}", robots_url)
            }
            PermissionDecision::Disallowed { robots_url } => {
                format!("Scraping disallowed by robots.txt at {}", robots_url)
            }
            PermissionDecision::AllowedByFallback {
                robots_url: Some(robots_url),
                reason,
            } => format!("Error reading robots.txt from {}: {}", robots_url, reason),
            PermissionDecision::AllowedByFallback {
                robots_url: None,
                reason,
            } => format!("Error locating robots.txt: {}", reason),
        }],
        AnalysisEvent::FetchingStatic => vec![String::new(), "Fetching initial HTML...".to_string()],
        AnalysisEvent::StaticFetchFailed { url, reason } => {
            vec![format!("Error fetching {}: {}", url, reason)]
        }
        AnalysisEvent::MetaRobots(directives) => {
            let mut lines = vec![
                String::new(),
                "Checking for meta robots tags in raw HTML:".to_string(),
            ];
            if directives.is_empty() {
                lines.push("No meta robots tags found in HTML.".to_string());
            } else {
                lines.extend(
                    directives
                        .iter()
                        .map(|content| format!("Meta robots tag found: {}", content)),
                );
            }
            lines
        }
        AnalysisEvent::Frameworks(frameworks) => {
            let summary = if frameworks.is_empty() {
                "No obvious JavaScript frameworks detected.".to_string()
            } else {
                let names: Vec<String> = frameworks.iter().map(|name| format!("'{}'", name)).collect();
                format!("Detected JavaScript frameworks: [{}]", names.join(", "))
            };
            vec![
                String::new(),
                "Analyzing frameworks in raw HTML...".to_string(),
                summary,
            ]
        }
        AnalysisEvent::RawTextLength(len) => vec![format!("Visible text length (raw): {}", len)],
        AnalysisEvent::FetchingRendered => vec![
            String::new(),
            "Fetching rendered HTML using headless Chrome...".to_string(),
        ],
        AnalysisEvent::RenderedFetchFailed { reason } => {
            vec![format!("Error fetching rendered HTML: {}", reason)]
        }
        AnalysisEvent::RenderedTextLength(len) => {
            vec![format!("Visible text length (rendered): {}", len)]
        }
        AnalysisEvent::Ratio(ratio) => {
            vec![format!("Rendered/Raw visible text length ratio: {:.2}", ratio)]
        }
        AnalysisEvent::Recommendation(recommendation) => {
            let (finding, advice) = match recommendation {
                Recommendation::NeedsBrowser => (
                    "Significant difference detected between raw and rendered HTML.",
                    "The site likely relies on JavaScript for loading content. Consider using a headless browser.",
                ),
                Recommendation::StaticSufficient => (
                    "The content difference between raw and rendered HTML is minimal.",
                    "Static scraping (using reqwest + scraper) might be sufficient.",
                ),
                Recommendation::Inconclusive => (
                    "Could not fetch rendered HTML. Relying on raw HTML analysis.",
                    "Further manual inspection may be required.",
                ),
            };
            vec![
                String::new(),
                finding.to_string(),
                format!("Recommendation: {}", advice),
            ]
        }
        AnalysisEvent::XRobotsTag(value) => {
            vec![String::new(), format!("X-Robots-Tag header found: {}", value)]
        }
    }
}
