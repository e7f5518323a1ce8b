// src/pipeline.rs
//! One full run: gauge fetch, corpus collection, prompt build, generation,
//! validation, assembly, artifact write, notification. Fully sequential; no
//! retries. Collector failures degrade to empty/default contributions, a
//! generation or write failure aborts the run before the artifact is touched.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

use crate::config::RadarConfig;
use crate::gauge::{GaugeClient, GaugeReading};
use crate::generate::{strip_fences, GenerationClient};
use crate::ingest::types::FeedProvider;
use crate::ingest::{collect_items, flatten_corpus};
use crate::notify::discord::DiscordNotifier;
use crate::notify::RunSummary;
use crate::prompt::build_prompt;
use crate::report::{assemble, RunMeta};
use crate::validate::validate_fragment;

#[derive(Debug)]
pub struct RunReport {
    pub gauge: GaugeReading,
    pub item_count: usize,
    pub artifact_path: PathBuf,
}

/// Run the pipeline with the current wall clock.
pub async fn run_once(
    cfg: &RadarConfig,
    providers: &[Box<dyn FeedProvider>],
    gauge: &GaugeClient,
    generator: &dyn GenerationClient,
    notifier: &DiscordNotifier,
) -> Result<RunReport> {
    run_once_at(Utc::now(), cfg, providers, gauge, generator, notifier).await
}

/// Run the pipeline with an injected clock, for deterministic tests.
pub async fn run_once_at(
    now: DateTime<Utc>,
    cfg: &RadarConfig,
    providers: &[Box<dyn FeedProvider>],
    gauge: &GaugeClient,
    generator: &dyn GenerationClient,
    notifier: &DiscordNotifier,
) -> Result<RunReport> {
    // Independent of the corpus; degrades to the neutral default on failure.
    let reading = gauge.fetch().await;
    tracing::info!(score = reading.score, label = %reading.label, "gauge reading");

    let items = collect_items(providers, cfg.per_feed_cap).await;
    tracing::info!(items = items.len(), feeds = providers.len(), "corpus collected");
    let corpus = flatten_corpus(&items);

    let prompt = build_prompt(now.date_naive(), &corpus);
    let raw = generator
        .generate(&prompt)
        .await
        .with_context(|| format!("generation failed (model {})", generator.model_id()))?;
    let fragment = strip_fences(&raw);

    if cfg.validate_fragment {
        validate_fragment(&fragment).context("generated fragment violates section contract")?;
    }

    let meta = RunMeta {
        generated_at: now,
        source_count: providers.len(),
        item_count: items.len(),
    };
    let artifact = assemble(&fragment, &reading, &meta);
    write_artifact(&cfg.out_path, &artifact)
        .with_context(|| format!("writing artifact to {}", cfg.out_path.display()))?;
    tracing::info!(path = %cfg.out_path.display(), bytes = artifact.len(), "artifact written");

    notifier
        .send_summary(&RunSummary {
            sentiment_score: reading.score,
            sentiment_label: reading.label.clone(),
            artifact_url: cfg.artifact_url.clone(),
        })
        .await;

    Ok(RunReport {
        gauge: reading,
        item_count: items.len(),
        artifact_path: cfg.out_path.clone(),
    })
}

/// Temp file + rename, so a failed run never leaves a partial artifact and a
/// prior artifact survives any fatal error upstream of this point.
fn write_artifact(path: &std::path::Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("html.tmp");
    fs::write(&tmp, content)?;
    fs::rename(tmp, path)?;
    Ok(())
}
