//! Gemini `generateContent` fallback categorizer.
//!
//! Consulted only when keyword matching fails. Every failure mode (network
//! error, timeout, non-2xx status, malformed body, off-list answer) is logged
//! and swallowed; the caller treats it as "no answer" and the task stays
//! `Personal`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::FallbackCategorizer;
use crate::config::GeminiConfig;
use crate::tasks::Category;

pub struct GeminiCategorizer {
    client: reqwest::Client,
    url: String,
}

impl GeminiCategorizer {
    pub fn new(api_key: &str, cfg: &GeminiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        let url = format!(
            "{}/{}:generateContent?key={}",
            cfg.endpoint.trim_end_matches('/'),
            cfg.model,
            api_key
        );
        Ok(Self { client, url })
    }

    async fn request(&self, title: &str) -> anyhow::Result<String> {
        let prompt = format!(
            "Categorize this task into exactly ONE of: Work, Learning, Health, Ideas, Personal\n\n\
             Task: \"{title}\"\n\n\
             Answer with ONE word only:"
        );

        let resp = self
            .client
            .post(&self.url)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateContentResponse = resp.json().await?;
        body.first_text()
            .ok_or_else(|| anyhow::anyhow!("response contained no text part"))
    }
}

#[async_trait]
impl FallbackCategorizer for GeminiCategorizer {
    async fn categorize(&self, title: &str) -> Option<Category> {
        match self.request(title).await {
            Ok(reply) => {
                let parsed = parse_category_reply(&reply);
                if parsed.is_none() {
                    debug!(reply = %reply, "gemini reply named no known category");
                }
                parsed
            }
            Err(e) => {
                warn!(err = %e, "gemini categorization failed");
                None
            }
        }
    }
}

// ─── Response schema ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        let text = &self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text;
        if text.is_empty() {
            None
        } else {
            Some(text.clone())
        }
    }
}

// ─── Reply parsing ────────────────────────────────────────────────────────────

/// Map a model reply onto the fixed category set.
///
/// The reply is trimmed, stripped of `.` `,` `:` characters, matched exactly
/// against the category names first, then by case-insensitive containment:
/// "Work.", "  WORK" and "Category: work" all resolve to `Work`. Anything
/// else is rejected.
pub(crate) fn parse_category_reply(reply: &str) -> Option<Category> {
    let cleaned: String = reply
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ':'))
        .collect();

    if let Some(category) = Category::ALL.into_iter().find(|c| cleaned == c.name()) {
        return Some(category);
    }

    let lowered = cleaned.to_lowercase();
    Category::ALL
        .into_iter()
        .find(|c| lowered.contains(&c.name().to_lowercase()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
