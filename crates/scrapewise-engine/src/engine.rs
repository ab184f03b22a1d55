//! The analysis pipeline

use crate::narration::{AnalysisEvent, Narrator, NullNarrator};
use scrapewise_core::{
    recommend, text_ratio, AnalysisVerdict, PermissionChecker, Recommendation, RenderedFetcher,
    ScrapewiseConfig, StaticFetcher, DEFAULT_RATIO_THRESHOLD,
};
use scrapewise_markup::MarkupAnalyzer;
use tracing::{debug, info, instrument, warn};

/// How a run ended
///
/// Only [`AnalysisOutcome::Completed`] carries a verdict. The two early exits
/// count as [`Recommendation::Inconclusive`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// robots.txt forbids the page; nothing further was fetched
    Disallowed { robots_url: String },
    /// The static GET failed; the browser was never started
    StaticFetchFailed { reason: String },
    Completed(AnalysisVerdict),
}

impl AnalysisOutcome {
    pub fn recommendation(&self) -> Recommendation {
        match self {
            AnalysisOutcome::Completed(verdict) => verdict.recommendation,
            _ => Recommendation::Inconclusive,
        }
    }

    pub fn verdict(&self) -> Option<&AnalysisVerdict> {
        match self {
            AnalysisOutcome::Completed(verdict) => Some(verdict),
            _ => None,
        }
    }
}

/// Orchestrates the collaborators for one URL at a time
pub struct RecommendationEngine {
    permission: Box<dyn PermissionChecker>,
    static_fetcher: Box<dyn StaticFetcher>,
    renderer: Box<dyn RenderedFetcher>,
    analyzer: MarkupAnalyzer,
    ratio_threshold: f64,
    narrator: Box<dyn Narrator>,
}

impl RecommendationEngine {
    /// Engine with the stock framework table, threshold and no narration
    pub fn new(
        permission: impl PermissionChecker + 'static,
        static_fetcher: impl StaticFetcher + 'static,
        renderer: impl RenderedFetcher + 'static,
    ) -> Self {
        Self {
            permission: Box::new(permission),
            static_fetcher: Box::new(static_fetcher),
            renderer: Box::new(renderer),
            analyzer: MarkupAnalyzer::default(),
            ratio_threshold: DEFAULT_RATIO_THRESHOLD,
            narrator: Box::new(NullNarrator),
        }
    }

    /// Apply the framework table and threshold from a configuration
    pub fn with_config(self, config: &ScrapewiseConfig) -> Self {
        self.with_analyzer(MarkupAnalyzer::new(config.frameworks.clone()))
            .with_ratio_threshold(config.decision.ratio_threshold)
    }

    pub fn with_analyzer(mut self, analyzer: MarkupAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_ratio_threshold(mut self, threshold: f64) -> Self {
        self.ratio_threshold = threshold;
        self
    }

    pub fn with_narrator(mut self, narrator: impl Narrator + 'static) -> Self {
        self.narrator = Box::new(narrator);
        self
    }

    pub fn ratio_threshold(&self) -> f64 {
        self.ratio_threshold
    }

    fn narrate(&self, event: AnalysisEvent) {
        self.narrator.narrate(&event);
    }

    /// Analyze one page
    ///
    /// Every collaborator is called at most once, in order, and the run stops
    /// at the first required step that fails.
    #[instrument(skip(self))]
    pub async fn analyze(&self, url: &str) -> AnalysisOutcome {
        self.narrate(AnalysisEvent::Started {
            url: url.to_string(),
        });

        // 1. Permission gate
        let permission = self.permission.check(url).await;
        self.narrate(AnalysisEvent::Permission(permission.clone()));
        if !permission.is_allowed() {
            info!("Analysis of {} stopped by robots.txt", url);
            return AnalysisOutcome::Disallowed {
                robots_url: permission.robots_url().unwrap_or_default().to_string(),
            };
        }

        // 2. Static fetch
        self.narrate(AnalysisEvent::FetchingStatic);
        let page = self.static_fetcher.fetch(url).await;
        let Some(raw_html) = page.html() else {
            let reason = page.failure_reason();
            warn!("Static fetch of {} failed: {}", url, reason);
            self.narrate(AnalysisEvent::StaticFetchFailed {
                url: url.to_string(),
                reason: reason.clone(),
            });
            return AnalysisOutcome::StaticFetchFailed { reason };
        };

        // 3. Static markup
        let raw = self.analyzer.analyze(raw_html);
        self.narrate(AnalysisEvent::MetaRobots(raw.meta_robots.clone()));
        self.narrate(AnalysisEvent::Frameworks(raw.frameworks.clone()));
        self.narrate(AnalysisEvent::RawTextLength(raw.visible_text_length));

        // 4. Rendered fetch
        self.narrate(AnalysisEvent::FetchingRendered);
        let rendered = self.renderer.render(url).await;

        // 5/6. Ratio and recommendation
        let (rendered_length, ratio, recommendation) = match rendered.html() {
            Some(rendered_html) => {
                let length = self.analyzer.visible_text_length(rendered_html);
                self.narrate(AnalysisEvent::RenderedTextLength(length));

                let ratio = text_ratio(raw.visible_text_length, length);
                self.narrate(AnalysisEvent::Ratio(ratio));
                debug!(
                    "ratio {} against threshold {}",
                    ratio, self.ratio_threshold
                );

                (Some(length), Some(ratio), recommend(ratio, self.ratio_threshold))
            }
            None => {
                if let Some(ref reason) = rendered.failure {
                    self.narrate(AnalysisEvent::RenderedFetchFailed {
                        reason: reason.clone(),
                    });
                }
                (None, None, Recommendation::Inconclusive)
            }
        };
        self.narrate(AnalysisEvent::Recommendation(recommendation));

        // 7. Informational header
        let x_robots_header = page.x_robots_tag().map(str::to_string);
        if let Some(ref value) = x_robots_header {
            self.narrate(AnalysisEvent::XRobotsTag(value.clone()));
        }

        info!("Recommendation for {}: {}", url, recommendation);

        AnalysisOutcome::Completed(AnalysisVerdict {
            url: url.to_string(),
            permission,
            visible_text_length_raw: raw.visible_text_length,
            visible_text_length_rendered: rendered_length,
            ratio,
            detected_frameworks: raw.frameworks,
            meta_robots_directives: raw.meta_robots,
            x_robots_header,
            recommendation,
        })
    }
}
