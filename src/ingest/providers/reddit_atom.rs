// src/ingest/providers/reddit_atom.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::types::{CorpusItem, FeedProvider, FeedSource};
use crate::ingest::{normalize_text, truncate_excerpt};

// Reddit rejects default library user agents with 429s.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: Option<String>,
    content: Option<Content>,
}

// <content type="html">...</content>; the attribute forces a wrapper struct.
#[derive(Debug, Deserialize)]
struct Content {
    #[serde(rename = "$text")]
    body: Option<String>,
}

/// Subreddit Atom feed provider. Fetches over HTTP, or parses a fixed XML
/// fixture in tests.
pub struct RedditAtomProvider {
    source: FeedSource,
    excerpt_budget: usize,
    fixture: Option<String>,
    http: reqwest::Client,
}

impl RedditAtomProvider {
    pub fn new(source: FeedSource, excerpt_budget: usize) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            source,
            excerpt_budget,
            fixture: None,
            http,
        }
    }

    pub fn from_fixture(name: &str, content: &str, excerpt_budget: usize) -> Self {
        let mut p = Self::new(
            FeedSource {
                name: name.to_string(),
                url: String::new(),
            },
            excerpt_budget,
        );
        p.fixture = Some(content.to_string());
        p
    }

    async fn fetch_body(&self) -> Result<String> {
        if let Some(xml) = &self.fixture {
            return Ok(xml.clone());
        }
        let resp = self
            .http
            .get(&self.source.url)
            .send()
            .await
            .with_context(|| format!("fetching feed {}", self.source.url))?
            .error_for_status()
            .with_context(|| format!("feed {} returned error status", self.source.name))?;
        resp.text()
            .await
            .with_context(|| format!("reading feed body for {}", self.source.name))
    }

    fn parse(&self, xml: &str) -> Result<Vec<CorpusItem>> {
        let feed: Feed =
            from_str(xml).with_context(|| format!("parsing atom xml for {}", self.source.name))?;
        let mut out = Vec::with_capacity(feed.entry.len());
        for entry in feed.entry {
            let headline = normalize_text(entry.title.as_deref().unwrap_or_default());
            if headline.is_empty() {
                continue;
            }
            let excerpt = entry
                .content
                .and_then(|c| c.body)
                .map(|b| truncate_excerpt(&normalize_text(&b), self.excerpt_budget))
                .filter(|e| !e.is_empty());
            out.push(CorpusItem {
                source_tag: self.source.name.clone(),
                headline,
                excerpt,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl FeedProvider for RedditAtomProvider {
    async fn fetch_latest(&self) -> Result<Vec<CorpusItem>> {
        let body = self.fetch_body().await?;
        self.parse(&body)
    }

    fn name(&self) -> &str {
        &self.source.name
    }
}
