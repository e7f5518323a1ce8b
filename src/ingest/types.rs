// src/ingest/types.rs
use anyhow::Result;

/// One feed endpoint, immutable for the run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String, // e.g., "WSB", "Stocks"
    pub url: String,
}

/// One normalized feed entry. Never mutated after creation; ordering within
/// a source follows feed order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CorpusItem {
    pub source_tag: String,
    pub headline: String,
    pub excerpt: Option<String>, // HTML-stripped, budget-truncated
}

impl CorpusItem {
    /// Render the single corpus line the rest of the pipeline consumes.
    pub fn to_line(&self) -> String {
        match &self.excerpt {
            Some(ex) if !ex.is_empty() => {
                format!("[{}] {} | supplement: {}", self.source_tag, self.headline, ex)
            }
            _ => format!("[{}] {}", self.source_tag, self.headline),
        }
    }
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<CorpusItem>>;
    fn name(&self) -> &str;
}
