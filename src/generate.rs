// src/generate.rs
//! Generation-service invoker. Unlike the feed and gauge clients, a failure
//! here is fatal: there is no fallback content for a missing analysis.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Trait seam so the pipeline and tests can run against a stub service.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
    fn model_id(&self) -> &str;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[async_trait::async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            bail!("GEMINI_API_KEY is not set");
        }
        let url = format!(
            "{GEMINI_ENDPOINT}/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let req = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![Part { text: prompt }],
            }],
        };
        let resp = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .context("generation service request failed")?
            .error_for_status()
            .context("generation service returned error status")?;
        let body: GenerateResponse = resp
            .json()
            .await
            .context("decoding generation service response")?;
        let candidate = body
            .candidates
            .into_iter()
            .next()
            .context("generation service returned no candidates")?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        Ok(text)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Strip one leading code-fence marker (with optional format hint) and one
/// trailing marker, plus surrounding whitespace. Otherwise verbatim.
pub fn strip_fences(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop the format hint (e.g. "html") up to the first newline.
        s = match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => rest,
        };
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_with_format_hint() {
        assert_eq!(strip_fences("```html\n<body/>\n```"), "<body/>");
    }

    #[test]
    fn strips_bare_fences_and_whitespace() {
        assert_eq!(strip_fences("  ```\n<div>x</div>\n```  "), "<div>x</div>");
    }

    #[test]
    fn unfenced_text_is_untouched_except_trim() {
        assert_eq!(strip_fences("  <p>hi</p>\n"), "<p>hi</p>");
    }

    #[test]
    fn interior_fences_survive() {
        let s = "<p>use ``` in code</p>";
        assert_eq!(strip_fences(s), s);
    }
}
