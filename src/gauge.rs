// src/gauge.rs
//! Fear/greed gauge client. Every failure mode degrades to the neutral
//! default reading; this component never blocks pipeline completion.

use serde::Deserialize;
use std::time::Duration;

/// Aggregate market-mood reading, independent of the feed corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaugeReading {
    pub score: u8, // 0..=100
    pub label: String,
}

impl Default for GaugeReading {
    fn default() -> Self {
        Self {
            score: 50,
            label: "Neutral".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GaugeEnvelope {
    fear_and_greed: GaugePoint,
}

#[derive(Debug, Deserialize)]
struct GaugePoint {
    score: f64,
    rating: String,
}

/// Map the upstream categorical rating onto the closed label set. Unknown
/// ratings pass through unchanged.
pub fn rating_label(rating: &str) -> String {
    match rating.trim().to_ascii_lowercase().as_str() {
        "extreme fear" => "Extreme Fear".to_string(),
        "fear" => "Fear".to_string(),
        "neutral" => "Neutral".to_string(),
        "greed" => "Greed".to_string(),
        "extreme greed" => "Extreme Greed".to_string(),
        _ => rating.trim().to_string(),
    }
}

pub struct GaugeClient {
    url: String,
    http: reqwest::Client,
}

impl GaugeClient {
    pub fn new(url: String, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self { url, http }
    }

    /// One bounded-timeout GET. Network, timeout, and parse failures all
    /// return the default reading, which is a valid value and not a sentinel.
    pub async fn fetch(&self) -> GaugeReading {
        match self.try_fetch().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = ?e, "gauge fetch failed; using neutral default");
                GaugeReading::default()
            }
        }
    }

    async fn try_fetch(&self) -> anyhow::Result<GaugeReading> {
        let env: GaugeEnvelope = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(GaugeReading {
            score: env.fear_and_greed.score.clamp(0.0, 100.0).round() as u8,
            label: rating_label(&env.fear_and_greed.rating),
        })
    }
}
