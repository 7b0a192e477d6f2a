//! Keyword-based task categorization — pure, < 1µs, no network.
//!
//! Categories are scanned in a fixed priority order and the first category
//! with any keyword appearing in the lowercased title wins: first match, not
//! longest or best match. Keywords are plain substrings, so they also match
//! inside words ("brunch" fires the Health keyword "run"); that looseness is
//! part of the contract.

use crate::tasks::Category;

/// Keyword dictionary, scanned top to bottom. `Personal` has no keywords; it
/// is the default when nothing here fires.
const KEYWORDS: [(Category, &[&str]); 4] = [
    (
        Category::Health,
        &[
            "gym", "exercise", "run", "jog", "yoga", "workout", "doctor", "dentist", "medicine",
            "meditation", "walk", "swim", "bike", "health", "fitness", "sleep", "diet", "water",
            "stretch", "sports",
        ],
    ),
    (
        Category::Learning,
        &[
            "study", "learn", "course", "read", "book", "tutorial", "documentation", "python",
            "javascript", "coding", "programming", "class", "lecture", "exam", "certificate",
            "training", "skill", "chapter", "lesson", "practice",
        ],
    ),
    (
        Category::Ideas,
        &[
            "brainstorm", "idea", "creative", "startup", "invention", "side project", "experiment",
            "prototype", "design", "concept", "innovation",
        ],
    ),
    (
        Category::Work,
        &[
            "meeting", "presentation", "deadline", "project", "report", "client", "office",
            "email", "call", "team", "manager", "boss", "quarterly", "sales", "job", "interview",
            "proposal", "budget", "stakeholder", "review", "sprint",
        ],
    ),
];

/// First category whose keyword list contains a substring of the lowercased
/// title; `None` when nothing matches.
pub fn keyword_category(title: &str) -> Option<Category> {
    let title = title.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| title.contains(kw)))
        .map(|(category, _)| *category)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
