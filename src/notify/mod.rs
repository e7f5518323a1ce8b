pub mod discord;

/// Outbound summary handed to the notifier after a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sentiment_score: u8,
    pub sentiment_label: String,
    pub artifact_url: Option<String>,
}
