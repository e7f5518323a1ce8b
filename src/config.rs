// src/config.rs
//! Run configuration. Built once at process start and passed into component
//! constructors; no component reads ambient environment state directly.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::FeedSource;

const ENV_FEEDS_PATH: &str = "RADAR_FEEDS_PATH";
const DEFAULT_FEEDS_TOML: &str = "config/feeds.toml";
const DEFAULT_FEEDS_JSON: &str = "config/feeds.json";

pub const DEFAULT_GAUGE_URL: &str =
    "https://production.dataviz.cnn.io/index/fearandgreed/graphdata";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct RadarConfig {
    pub feeds: Vec<FeedSource>,
    pub per_feed_cap: usize,
    pub excerpt_budget: usize,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gauge_url: String,
    pub gauge_timeout_secs: u64,
    pub webhook_url: Option<String>,
    pub notify_timeout_secs: u64,
    pub artifact_url: Option<String>,
    pub out_path: PathBuf,
    pub validate_fragment: bool,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            per_feed_cap: 12,
            excerpt_budget: 800,
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.to_string(),
            gauge_url: DEFAULT_GAUGE_URL.to_string(),
            gauge_timeout_secs: 10,
            webhook_url: None,
            notify_timeout_secs: 5,
            artifact_url: None,
            out_path: PathBuf::from("index.html"),
            validate_fragment: true,
        }
    }
}

fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource {
            name: "WSB".to_string(),
            url: "https://www.reddit.com/r/wallstreetbets/.rss".to_string(),
        },
        FeedSource {
            name: "Stocks".to_string(),
            url: "https://www.reddit.com/r/stocks/.rss".to_string(),
        },
    ]
}

impl RadarConfig {
    /// Build configuration from the process environment. This is the only
    /// place environment state is consulted.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();

        cfg.feeds = load_feeds_default()?;
        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if let Ok(m) = std::env::var("GEMINI_MODEL") {
            if !m.trim().is_empty() {
                cfg.gemini_model = m;
            }
        }
        if let Ok(u) = std::env::var("GAUGE_URL") {
            if !u.trim().is_empty() {
                cfg.gauge_url = u;
            }
        }
        cfg.webhook_url = std::env::var("DISCORD_WEBHOOK_URL").ok().filter(|s| !s.is_empty());
        if let Ok(t) = std::env::var("RADAR_NOTIFY_TIMEOUT_SECS") {
            cfg.notify_timeout_secs = t
                .parse()
                .context("RADAR_NOTIFY_TIMEOUT_SECS must be an integer")?;
        }
        cfg.artifact_url = std::env::var("RADAR_ARTIFACT_URL").ok().filter(|s| !s.is_empty());
        if let Ok(p) = std::env::var("RADAR_OUT_PATH") {
            if !p.trim().is_empty() {
                cfg.out_path = PathBuf::from(p);
            }
        }
        if let Ok(cap) = std::env::var("RADAR_PER_FEED_CAP") {
            cfg.per_feed_cap = cap
                .parse()
                .context("RADAR_PER_FEED_CAP must be an integer")?;
        }
        if let Ok(v) = std::env::var("RADAR_VALIDATE_FRAGMENT") {
            cfg.validate_fragment = v != "0";
        }
        Ok(cfg)
    }
}

#[derive(serde::Deserialize)]
struct FeedsFile {
    feeds: Vec<FeedSource>,
}

/// Load the feed list from an explicit path. Supports TOML or JSON formats.
pub fn load_feeds_from(path: &Path) -> Result<Vec<FeedSource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feeds from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
        .with_context(|| format!("parsing feeds at {}", path.display()))
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<FeedSource>> {
    if hint_ext == "json" {
        return parse_json(s);
    }
    parse_toml(s)
}

fn parse_toml(s: &str) -> Result<Vec<FeedSource>> {
    let parsed: FeedsFile = toml::from_str(s)?;
    Ok(clean_list(parsed.feeds))
}

// JSON form: a bare array of {name, url} objects.
fn parse_json(s: &str) -> Result<Vec<FeedSource>> {
    let parsed: Vec<FeedSource> = serde_json::from_str(s)?;
    Ok(clean_list(parsed))
}

fn clean_list(feeds: Vec<FeedSource>) -> Vec<FeedSource> {
    feeds
        .into_iter()
        .filter(|f| !f.name.trim().is_empty() && !f.url.trim().is_empty())
        .collect()
}

/// Load feeds using env var + fallbacks:
/// 1) $RADAR_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
/// 4) built-in default list
pub fn load_feeds_default() -> Result<Vec<FeedSource>> {
    if let Ok(p) = std::env::var(ENV_FEEDS_PATH) {
        let pb = PathBuf::from(p);
        return load_feeds_from(&pb);
    }
    let toml_p = PathBuf::from(DEFAULT_FEEDS_TOML);
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_FEEDS_JSON);
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(default_feeds())
}
