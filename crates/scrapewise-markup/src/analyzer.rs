//! Visible text, meta robots and framework fingerprints of an HTML document

use scrapewise_core::FrameworkSignatures;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta").expect("Failed to parse meta selector - this is a bug")
});

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script").expect("Failed to parse script selector - this is a bug")
});

/// Findings for one HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupReport {
    /// `content` of every `<meta name="robots">`, in document order
    pub meta_robots: Vec<String>,
    pub frameworks: BTreeSet<String>,
    pub visible_text_length: usize,
}

/// Stateless analyzer owning its framework signature table
#[derive(Debug, Clone, Default)]
pub struct MarkupAnalyzer {
    signatures: FrameworkSignatures,
}

impl MarkupAnalyzer {
    pub fn new(signatures: FrameworkSignatures) -> Self {
        Self { signatures }
    }

    pub fn signatures(&self) -> &FrameworkSignatures {
        &self.signatures
    }

    /// Run every check against a single parse of `html`
    pub fn analyze(&self, html: &str) -> MarkupReport {
        let document = Html::parse_document(html);
        let report = MarkupReport {
            meta_robots: meta_robots_in(&document),
            frameworks: self.frameworks_in(html, &document),
            visible_text_length: visible_text_length_of(&document),
        };
        debug!(
            "Markup analysis: {} chars visible, {} meta robots tag(s), frameworks {:?}",
            report.visible_text_length,
            report.meta_robots.len(),
            report.frameworks
        );
        report
    }

    /// Character count of the visible text nodes, concatenated and trimmed
    ///
    /// Script, style and template content is not visible text.
    pub fn visible_text_length(&self, html: &str) -> usize {
        visible_text_length_of(&Html::parse_document(html))
    }

    /// `content` values of `<meta name="robots">` elements
    ///
    /// A tag without `content` contributes an empty string.
    pub fn meta_robots_directives(&self, html: &str) -> Vec<String> {
        meta_robots_in(&Html::parse_document(html))
    }

    /// Frameworks whose indicators occur in the page or in a script `src`
    pub fn detect_frameworks(&self, html: &str) -> BTreeSet<String> {
        self.frameworks_in(html, &Html::parse_document(html))
    }

    fn frameworks_in(&self, html: &str, document: &Html) -> BTreeSet<String> {
        let lower_html = html.to_lowercase();
        let script_sources: Vec<String> = document
            .select(&SCRIPT_SELECTOR)
            .map(|script| script.value().attr("src").unwrap_or("").to_lowercase())
            .collect();

        self.signatures
            .iter()
            .filter(|signature| {
                signature.matches_lowercase(&lower_html)
                    || script_sources
                        .iter()
                        .any(|src| signature.matches_lowercase(src))
            })
            .map(|signature| signature.name.clone())
            .collect()
    }
}

/// Elements whose text content is never rendered as page text
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style", "template"];

fn visible_text_length_of(document: &Html) -> usize {
    visible_text(document.root_element()).trim().chars().count()
}

/// Concatenated text of `root`, skipping script, style and template content
///
/// `<noscript>` is parsed as raw text when scripting is enabled, so its
/// content is re-parsed as a fragment and only that fragment's text counts.
fn visible_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in root.descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_VISIBLE_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        let in_noscript = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|element| element.name() == "noscript");
        if in_noscript {
            let fragment = Html::parse_fragment(chunk);
            text.push_str(&visible_text(fragment.root_element()));
        } else {
            text.push_str(chunk);
        }
    }
    text
}

fn meta_robots_in(document: &Html) -> Vec<String> {
    document
        .select(&META_SELECTOR)
        .filter(|meta| meta.value().attr("name") == Some("robots"))
        .map(|meta| meta.value().attr("content").unwrap_or("").to_string())
        .collect()
}
