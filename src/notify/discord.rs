use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::RunSummary;

/// Fire-and-forget Discord webhook. One attempt, short timeout, failures are
/// logged and never reach the pipeline. A missing webhook URL disables the
/// notifier without error.
#[derive(Clone)]
pub struct DiscordNotifier {
    webhook: Option<String>,
    client: Client,
    timeout: Duration,
}

impl DiscordNotifier {
    pub fn new(webhook: Option<String>) -> Self {
        Self {
            webhook,
            client: Client::new(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub async fn send_summary(&self, summary: &RunSummary) {
        let Some(url) = &self.webhook else {
            tracing::debug!("notification disabled (no webhook configured)");
            return;
        };

        let location = summary.artifact_url.as_deref().unwrap_or("(not published)");
        let description = format!(
            "**Fear & Greed:** {} / 100 ({})\n**Report:** {}",
            summary.sentiment_score, summary.sentiment_label, location
        );
        let payload = DiscordWebhookPayload::embed("Sentiment digest updated", &description);

        let res = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .and_then(|rsp| rsp.error_for_status());
        if let Err(e) = res {
            tracing::warn!(error = ?e, "notification delivery failed");
        }
    }
}

#[derive(Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
}

#[derive(Serialize)]
struct DiscordWebhookPayload {
    content: Option<String>,
    embeds: Vec<DiscordEmbed>,
}

impl DiscordWebhookPayload {
    fn embed(title: &str, description: &str) -> Self {
        Self {
            content: None,
            embeds: vec![DiscordEmbed {
                title: title.to_string(),
                description: description.to_string(),
            }],
        }
    }
}
