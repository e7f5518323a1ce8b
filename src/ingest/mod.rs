// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::ingest::types::{CorpusItem, FeedProvider};

/// Normalize feed text: decode entities, strip tags, fold smart quotes,
/// collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Truncate to a character budget. Cuts mid-string; the budget is a hard cap,
/// not a sentence boundary.
pub fn truncate_excerpt(s: &str, budget: usize) -> String {
    if s.chars().count() > budget {
        s.chars().take(budget).collect()
    } else {
        s.to_string()
    }
}

/// Run all providers sequentially, in declaration order, keeping at most
/// `per_feed_cap` items per source. A provider failure contributes nothing
/// from that source and never aborts the run.
pub async fn collect_items(
    providers: &[Box<dyn FeedProvider>],
    per_feed_cap: usize,
) -> Vec<CorpusItem> {
    let mut items = Vec::new();
    for p in providers {
        match p.fetch_latest().await {
            Ok(v) => {
                let kept = v.len().min(per_feed_cap);
                tracing::debug!(provider = p.name(), total = v.len(), kept, "feed fetched");
                items.extend(v.into_iter().take(per_feed_cap));
            }
            Err(e) => {
                tracing::warn!(error = ?e, provider = p.name(), "feed provider error");
            }
        }
    }
    items
}

/// Flatten items into the corpus block: one line per item, source tag prefixed.
pub fn flatten_corpus(items: &[CorpusItem]) -> String {
    let mut out = String::new();
    for it in items {
        out.push_str(&it.to_line());
        out.push('\n');
    }
    out
}

/// Convenience wrapper: fetch and flatten in one call.
pub async fn collect_corpus(providers: &[Box<dyn FeedProvider>], per_feed_cap: usize) -> String {
    let items = collect_items(providers, per_feed_cap).await;
    flatten_corpus(&items)
}
