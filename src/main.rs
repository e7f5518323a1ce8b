//! Retail Sentiment Radar — Binary Entrypoint
//! One-shot run: collect feeds, fetch the gauge, generate the digest, write
//! the report. Scheduling (cron, CI workflow) lives outside this process.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use retail_sentiment_radar::config::RadarConfig;
use retail_sentiment_radar::gauge::GaugeClient;
use retail_sentiment_radar::generate::GeminiClient;
use retail_sentiment_radar::ingest::providers::reddit_atom::RedditAtomProvider;
use retail_sentiment_radar::ingest::types::FeedProvider;
use retail_sentiment_radar::notify::discord::DiscordNotifier;
use retail_sentiment_radar::pipeline::run_once;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("retail_sentiment_radar=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op where variables come from the host.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = RadarConfig::from_env()?;

    let providers: Vec<Box<dyn FeedProvider>> = cfg
        .feeds
        .iter()
        .map(|f| {
            Box::new(RedditAtomProvider::new(f.clone(), cfg.excerpt_budget))
                as Box<dyn FeedProvider>
        })
        .collect();
    let gauge = GaugeClient::new(cfg.gauge_url.clone(), cfg.gauge_timeout_secs);
    let generator = GeminiClient::new(cfg.gemini_api_key.clone(), cfg.gemini_model.clone());
    let notifier =
        DiscordNotifier::new(cfg.webhook_url.clone()).with_timeout(cfg.notify_timeout_secs);

    let report = run_once(&cfg, &providers, &gauge, &generator, &notifier).await?;
    tracing::info!(
        items = report.item_count,
        score = report.gauge.score,
        path = %report.artifact_path.display(),
        "run complete"
    );
    Ok(())
}
