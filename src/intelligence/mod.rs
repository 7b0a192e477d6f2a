//! Task categorization: keyword matching with an optional AI fallback.
//!
//! The keyword pass is pure and always wins when it matches. The fallback is
//! consulted only for titles no keyword covers, and any failure there is
//! swallowed; categorization itself can never fail.

pub mod classifier;
pub mod gemini;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::tasks::Category;

/// Provider consulted when keyword matching comes up empty.
///
/// One implementation calls Gemini; tests inject deterministic stubs. `None`
/// means "no usable answer" and the caller defaults to `Category::Personal`.
#[async_trait]
pub trait FallbackCategorizer: Send + Sync {
    async fn categorize(&self, title: &str) -> Option<Category>;
}

/// Keyword pass first, fallback second, `Personal` last.
pub struct Categorizer {
    fallback: Option<Arc<dyn FallbackCategorizer>>,
}

impl Categorizer {
    pub fn new(fallback: Option<Arc<dyn FallbackCategorizer>>) -> Self {
        Self { fallback }
    }

    pub async fn categorize(&self, title: &str) -> Category {
        if let Some(category) = classifier::keyword_category(title) {
            return category;
        }
        if let Some(fallback) = &self.fallback {
            if let Some(category) = fallback.categorize(title).await {
                debug!(%category, title = %title, "fallback categorizer answered");
                return category;
            }
        }
        Category::Personal
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
