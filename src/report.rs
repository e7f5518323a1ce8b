// src/report.rs
//! Final document assembly. The fragment is inserted verbatim as opaque
//! markup: its producer is constrained by the prompt contract, so no
//! escaping happens on this side. Revisit if lower-trust input ever reaches
//! the generation service.

use chrono::{DateTime, Utc};

use crate::gauge::GaugeReading;

/// Run metadata rendered into the artifact header.
#[derive(Debug, Clone)]
pub struct RunMeta {
    pub generated_at: DateTime<Utc>,
    pub source_count: usize,
    pub item_count: usize,
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Retail Sentiment Radar</title>
    <style>
        body { background: #0f172a; color: #e2e8f0; font-family: sans-serif; padding: 20px; }
        .container { max-width: 800px; margin: auto; background: #1e293b; padding: 30px; border-radius: 12px; border: 1px solid #334155; }
        h1 { color: #38bdf8; border-bottom: 2px solid #334155; padding-bottom: 10px; }
        h2 { color: #38bdf8; margin-top: 28px; }
        h3 { color: #fbbf24; margin-bottom: 4px; }
        .time { color: #94a3b8; font-size: 0.8rem; margin-bottom: 20px; }
        .gauge { background: #0f172a; border: 1px solid #334155; border-radius: 8px; padding: 16px; margin-bottom: 24px; }
        .gauge-track { background: #334155; border-radius: 4px; height: 10px; overflow: hidden; }
        .gauge-fill { background: linear-gradient(90deg, #ef4444, #fbbf24, #22c55e); height: 10px; width: {{GAUGE_SCORE}}%; }
        .gauge-caption { color: #94a3b8; font-size: 0.85rem; margin-top: 8px; }
        li { margin-bottom: 12px; }
        strong { color: #fbbf24; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Retail Sentiment Radar</h1>
        <p class="time">Updated {{UPDATED_UTC}} UTC &middot; {{SOURCE_SUMMARY}}</p>
        <div class="gauge">
            <div class="gauge-track"><div class="gauge-fill"></div></div>
            <p class="gauge-caption">Fear &amp; Greed: {{GAUGE_SCORE}} / 100 ({{GAUGE_LABEL}})</p>
        </div>
        <div>{{FRAGMENT}}</div>
    </div>
</body>
</html>
"#;

/// Substitute the fragment, gauge reading, and run metadata into the fixed
/// skeleton. Plain string replacement; the fragment lands as a contiguous
/// substring, the score in decimal, the label literally.
pub fn assemble(fragment: &str, gauge: &GaugeReading, meta: &RunMeta) -> String {
    let summary = format!(
        "{} posts across {} feeds",
        meta.item_count, meta.source_count
    );
    TEMPLATE
        .replace("{{GAUGE_SCORE}}", &gauge.score.to_string())
        .replace("{{GAUGE_LABEL}}", &gauge.label)
        .replace(
            "{{UPDATED_UTC}}",
            &meta.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
        .replace("{{SOURCE_SUMMARY}}", &summary)
        .replace("{{FRAGMENT}}", fragment)
}
