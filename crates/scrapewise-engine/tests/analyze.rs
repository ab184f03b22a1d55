//! End-to-end runs of the recommendation engine over mock collaborators.

use scrapewise_core::{
    FrameworkSignature, FrameworkSignatures, Headers, PageFetchResult, PermissionDecision,
    Recommendation, ScrapewiseConfig,
};
use scrapewise_engine::mock::{MockPermissionChecker, MockRenderedFetcher, MockStaticFetcher};
use scrapewise_engine::{AnalysisEvent, AnalysisOutcome, RecommendationEngine, RecordingNarrator};
use std::sync::Arc;

const URL: &str = "https://mock.test/page";

/// Page body whose visible text is exactly `n` characters
fn page_with_text(n: usize) -> String {
    format!("<html><body><p>{}</p></body></html>", "x".repeat(n))
}

struct Harness {
    permission: MockPermissionChecker,
    static_fetcher: MockStaticFetcher,
    renderer: MockRenderedFetcher,
    narrator: Arc<RecordingNarrator>,
    engine: RecommendationEngine,
}

fn harness(
    permission: MockPermissionChecker,
    static_fetcher: MockStaticFetcher,
    renderer: MockRenderedFetcher,
) -> Harness {
    let narrator = Arc::new(RecordingNarrator::new());
    let engine = RecommendationEngine::new(
        permission.clone(),
        static_fetcher.clone(),
        renderer.clone(),
    )
    .with_narrator(narrator.clone());

    Harness {
        permission,
        static_fetcher,
        renderer,
        narrator,
        engine,
    }
}

#[tokio::test]
async fn test_disallowed_makes_no_further_calls() {
    let h = harness(
        MockPermissionChecker::disallowing(),
        MockStaticFetcher::html(&page_with_text(10)),
        MockRenderedFetcher::html(&page_with_text(10)),
    );

    let outcome = h.engine.analyze(URL).await;

    assert_eq!(
        outcome,
        AnalysisOutcome::Disallowed {
            robots_url: "https://mock.test/robots.txt".to_string()
        }
    );
    assert_eq!(outcome.recommendation(), Recommendation::Inconclusive);
    assert_eq!(h.permission.calls(), 1);
    assert_eq!(h.static_fetcher.calls(), 0);
    assert_eq!(h.renderer.calls(), 0);
}

#[tokio::test]
async fn test_static_failure_skips_render() {
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::failing("HTTP 500 returned for https://mock.test/page"),
        MockRenderedFetcher::html(&page_with_text(10)),
    );

    let outcome = h.engine.analyze(URL).await;

    assert!(matches!(outcome, AnalysisOutcome::StaticFetchFailed { .. }));
    assert_eq!(outcome.recommendation(), Recommendation::Inconclusive);
    assert!(outcome.verdict().is_none());
    assert_eq!(h.static_fetcher.calls(), 1);
    assert_eq!(h.renderer.calls(), 0);
}

#[tokio::test]
async fn test_empty_static_body_counts_as_failure() {
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::html(""),
        MockRenderedFetcher::html(&page_with_text(10)),
    );

    let outcome = h.engine.analyze(URL).await;

    assert_eq!(
        outcome,
        AnalysisOutcome::StaticFetchFailed {
            reason: "response body was empty".to_string()
        }
    );
    assert_eq!(h.renderer.calls(), 0);
}

#[tokio::test]
async fn test_equal_text_is_static_sufficient() {
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::html(&page_with_text(50)),
        MockRenderedFetcher::html(&page_with_text(50)),
    );

    let outcome = h.engine.analyze(URL).await;
    let verdict = outcome.verdict().expect("completed run");

    assert_eq!(verdict.visible_text_length_raw, 50);
    assert_eq!(verdict.visible_text_length_rendered, Some(50));
    assert_eq!(verdict.ratio, Some(1.0));
    assert_eq!(verdict.recommendation, Recommendation::StaticSufficient);
}

#[tokio::test]
async fn test_grown_text_needs_browser() {
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::html(&page_with_text(100)),
        MockRenderedFetcher::html(&page_with_text(150)),
    );

    let outcome = h.engine.analyze(URL).await;
    let verdict = outcome.verdict().expect("completed run");

    assert_eq!(verdict.ratio, Some(1.5));
    assert_eq!(verdict.recommendation, Recommendation::NeedsBrowser);
    assert_eq!(h.renderer.calls(), 1);
}

#[tokio::test]
async fn test_empty_raw_and_rendered_text_is_infinite() {
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::html("<html><body><div id=\"app\"></div></body></html>"),
        MockRenderedFetcher::html("<html><body><div id=\"app\"></div></body></html>"),
    );

    let outcome = h.engine.analyze(URL).await;
    let verdict = outcome.verdict().expect("completed run");

    assert_eq!(verdict.visible_text_length_raw, 0);
    assert_eq!(verdict.visible_text_length_rendered, Some(0));
    assert_eq!(verdict.ratio, Some(f64::INFINITY));
    assert_eq!(verdict.recommendation, Recommendation::NeedsBrowser);
}

#[tokio::test]
async fn test_render_failure_is_inconclusive() {
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::html(&page_with_text(20)),
        MockRenderedFetcher::failing("Browser error: Failed to launch browser"),
    );

    let outcome = h.engine.analyze(URL).await;
    let verdict = outcome.verdict().expect("completed run");

    assert_eq!(verdict.recommendation, Recommendation::Inconclusive);
    assert_eq!(verdict.ratio, None);
    assert_eq!(verdict.visible_text_length_rendered, None);
    assert_eq!(verdict.visible_text_length_raw, 20);

    let events = h.narrator.events();
    assert!(events.contains(&AnalysisEvent::RenderedFetchFailed {
        reason: "Browser error: Failed to launch browser".to_string()
    }));
    assert!(!events.iter().any(|e| matches!(e, AnalysisEvent::Ratio(_))));
}

#[tokio::test]
async fn test_fallback_permission_still_analyzes() {
    let h = harness(
        MockPermissionChecker::new(PermissionDecision::AllowedByFallback {
            robots_url: Some("https://mock.test/robots.txt".to_string()),
            reason: "connection refused".to_string(),
        }),
        MockStaticFetcher::html(&page_with_text(10)),
        MockRenderedFetcher::html(&page_with_text(10)),
    );

    let outcome = h.engine.analyze(URL).await;
    let verdict = outcome.verdict().expect("completed run");

    assert!(verdict.permission.is_allowed());
    assert!(!verdict.permission.is_confirmed());
    assert_eq!(h.renderer.calls(), 1);
}

#[tokio::test]
async fn test_markup_findings_and_x_robots_header() {
    let raw = r#"<html><head><meta name="robots" content="noindex,nofollow"></head>
        <body><div ng-app="shop">Items</div><script src="/js/vue.min.js"></script></body></html>"#;
    let headers: Headers = [("X-Robots-Tag", "noarchive")].into_iter().collect();

    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::new(PageFetchResult::succeeded(raw, headers)),
        MockRenderedFetcher::html(raw),
    );

    let outcome = h.engine.analyze(URL).await;
    let verdict = outcome.verdict().expect("completed run");

    assert_eq!(
        verdict.meta_robots_directives,
        vec!["noindex,nofollow".to_string()]
    );
    let frameworks: Vec<&str> = verdict.detected_frameworks.iter().map(String::as_str).collect();
    assert_eq!(frameworks, vec!["Angular", "Vue"]);
    assert_eq!(verdict.x_robots_header.as_deref(), Some("noarchive"));
    // Header is informational only
    assert_eq!(verdict.recommendation, Recommendation::StaticSufficient);
}

#[tokio::test]
async fn test_narration_order() {
    let headers: Headers = [("x-robots-tag", "none")].into_iter().collect();
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::new(PageFetchResult::succeeded(page_with_text(4), headers)),
        MockRenderedFetcher::html(&page_with_text(8)),
    );

    h.engine.analyze(URL).await;

    let events = h.narrator.events();
    assert_eq!(
        events,
        vec![
            AnalysisEvent::Started {
                url: URL.to_string()
            },
            AnalysisEvent::Permission(PermissionDecision::Allowed {
                robots_url: "https://mock.test/robots.txt".to_string()
            }),
            AnalysisEvent::FetchingStatic,
            AnalysisEvent::MetaRobots(Vec::new()),
            AnalysisEvent::Frameworks(Default::default()),
            AnalysisEvent::RawTextLength(4),
            AnalysisEvent::FetchingRendered,
            AnalysisEvent::RenderedTextLength(8),
            AnalysisEvent::Ratio(2.0),
            AnalysisEvent::Recommendation(Recommendation::NeedsBrowser),
            AnalysisEvent::XRobotsTag("none".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_config_threshold_and_frameworks_apply() {
    let mut config = ScrapewiseConfig::default();
    config.decision.ratio_threshold = 2.0;
    config.frameworks = FrameworkSignatures::new(vec![FrameworkSignature::new(
        "Svelte",
        &["svelte"],
    )]);

    let raw = format!("<html><body><p>{}</p><i>svelte</i></body></html>", "x".repeat(94));
    let h = harness(
        MockPermissionChecker::allowing(),
        MockStaticFetcher::html(&raw),
        MockRenderedFetcher::html(&page_with_text(150)),
    );
    let engine = h.engine.with_config(&config);
    assert_eq!(engine.ratio_threshold(), 2.0);

    let outcome = engine.analyze(URL).await;
    let verdict = outcome.verdict().expect("completed run");

    assert_eq!(verdict.visible_text_length_raw, 100);
    assert_eq!(verdict.ratio, Some(1.5));
    assert_eq!(verdict.recommendation, Recommendation::StaticSufficient);
    assert!(verdict.detected_frameworks.contains("Svelte"));
    assert_eq!(verdict.detected_frameworks.len(), 1);
}
