// tests/pipeline_e2e.rs
// End-to-end runs against stubbed collaborators: mock feed providers, an
// unreachable gauge endpoint (forces the neutral default), and a stub
// generation client. No network, no live services.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::fs;

use retail_sentiment_radar::config::RadarConfig;
use retail_sentiment_radar::gauge::GaugeClient;
use retail_sentiment_radar::generate::GenerationClient;
use retail_sentiment_radar::ingest::types::{CorpusItem, FeedProvider};
use retail_sentiment_radar::notify::discord::DiscordNotifier;
use retail_sentiment_radar::pipeline::run_once_at;
use retail_sentiment_radar::prompt::{SECTION_MACRO, SECTION_THEMES, SECTION_TOP_TICKERS};

struct OkProvider {
    name: String,
    headlines: Vec<String>,
}

#[async_trait]
impl FeedProvider for OkProvider {
    async fn fetch_latest(&self) -> Result<Vec<CorpusItem>> {
        Ok(self
            .headlines
            .iter()
            .map(|h| CorpusItem {
                source_tag: self.name.clone(),
                headline: h.clone(),
                excerpt: None,
            })
            .collect())
    }
    fn name(&self) -> &str {
        &self.name
    }
}

struct FailProvider;

#[async_trait]
impl FeedProvider for FailProvider {
    async fn fetch_latest(&self) -> Result<Vec<CorpusItem>> {
        Err(anyhow!("dns failure"))
    }
    fn name(&self) -> &str {
        "broken"
    }
}

/// Returns a contract-conforming fragment that embeds the received prompt, so
/// tests can assert which corpus lines reached the generation service.
struct EchoGenerator;

#[async_trait]
impl GenerationClient for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(format!(
            "{SECTION_MACRO}<p>mixed mood</p>\
             {SECTION_TOP_TICKERS}<h3>NVDA</h3><p>q1</p><p>q2</p>\
             <h3>TSLA</h3><p>q1</p><p>q2</p><h3>AAPL</h3><p>q1</p><p>q2</p>\
             {SECTION_THEMES}<pre>{prompt}</pre>"
        ))
    }
    fn model_id(&self) -> &str {
        "echo-stub"
    }
}

struct FailingGenerator;

#[async_trait]
impl GenerationClient for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("503 service unavailable"))
    }
    fn model_id(&self) -> &str {
        "failing-stub"
    }
}

fn ok(name: &str, headlines: &[&str]) -> Box<dyn FeedProvider> {
    Box::new(OkProvider {
        name: name.to_string(),
        headlines: headlines.iter().map(|s| s.to_string()).collect(),
    })
}

fn dead_gauge() -> GaugeClient {
    GaugeClient::new("http://127.0.0.1:9/fng".to_string(), 1)
}

fn test_config(dir: &std::path::Path) -> RadarConfig {
    RadarConfig {
        out_path: dir.join("index.html"),
        ..RadarConfig::default()
    }
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn partial_feed_failure_still_produces_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path());
    let providers: Vec<Box<dyn FeedProvider>> = vec![
        ok("WSB", &["NVDA moon"]),
        Box::new(FailProvider),
        ok("Stocks", &["QQQ wobble"]),
        Box::new(FailProvider),
    ];

    let report = run_once_at(
        fixed_now(),
        &cfg,
        &providers,
        &dead_gauge(),
        &EchoGenerator,
        &DiscordNotifier::new(None),
    )
    .await
    .expect("run completes despite 2 of 4 sources failing");

    assert_eq!(report.item_count, 2);
    let html = fs::read_to_string(&cfg.out_path).unwrap();
    assert!(html.contains("[WSB] NVDA moon"));
    assert!(html.contains("[Stocks] QQQ wobble"));
    assert!(!html.contains("[broken]"));
    assert!(html.contains("50 / 100 (Neutral)"));
}

#[tokio::test]
async fn gauge_timeout_renders_neutral_default() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path());
    let providers: Vec<Box<dyn FeedProvider>> = vec![ok("WSB", &["hold the line"])];

    let report = run_once_at(
        fixed_now(),
        &cfg,
        &providers,
        &dead_gauge(),
        &EchoGenerator,
        &DiscordNotifier::new(None),
    )
    .await
    .unwrap();

    assert_eq!(report.gauge.score, 50);
    assert_eq!(report.gauge.label, "Neutral");
    let html = fs::read_to_string(&cfg.out_path).unwrap();
    assert!(html.contains("50 / 100 (Neutral)"));
}

#[tokio::test]
async fn generation_failure_leaves_prior_artifact_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path());
    fs::write(&cfg.out_path, "previous run output").unwrap();

    let providers: Vec<Box<dyn FeedProvider>> = vec![ok("WSB", &["x"])];
    let res = run_once_at(
        fixed_now(),
        &cfg,
        &providers,
        &dead_gauge(),
        &FailingGenerator,
        &DiscordNotifier::new(None),
    )
    .await;

    assert!(res.is_err());
    assert_eq!(
        fs::read_to_string(&cfg.out_path).unwrap(),
        "previous run output"
    );
}

#[tokio::test]
async fn malformed_fragment_is_fatal_when_validation_enabled() {
    struct BadGenerator;
    #[async_trait]
    impl GenerationClient for BadGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("<p>just some prose, no sections</p>".to_string())
        }
        fn model_id(&self) -> &str {
            "bad-stub"
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path());
    let providers: Vec<Box<dyn FeedProvider>> = vec![ok("WSB", &["x"])];
    let res = run_once_at(
        fixed_now(),
        &cfg,
        &providers,
        &dead_gauge(),
        &BadGenerator,
        &DiscordNotifier::new(None),
    )
    .await;

    assert!(res.is_err());
    assert!(!cfg.out_path.exists());
}

#[tokio::test]
async fn identical_inputs_and_clock_yield_identical_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path());
    let providers: Vec<Box<dyn FeedProvider>> = vec![ok("WSB", &["same corpus"])];
    let notifier = DiscordNotifier::new(None);

    run_once_at(fixed_now(), &cfg, &providers, &dead_gauge(), &EchoGenerator, &notifier)
        .await
        .unwrap();
    let first = fs::read_to_string(&cfg.out_path).unwrap();

    run_once_at(fixed_now(), &cfg, &providers, &dead_gauge(), &EchoGenerator, &notifier)
        .await
        .unwrap();
    let second = fs::read_to_string(&cfg.out_path).unwrap();

    assert_eq!(first, second);
}
