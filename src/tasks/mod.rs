//! Task records and the in-memory task store.

pub mod store;

pub use store::TaskStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ─── Category ─────────────────────────────────────────────────────────────────

/// Fixed category set. A task's category is decided once at creation time and
/// never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Personal,
    Work,
    Learning,
    Health,
    Ideas,
}

impl Category {
    /// Every valid category, in the order fallback replies are matched against.
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Learning,
        Category::Health,
        Category::Ideas,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Learning => "Learning",
            Category::Health => "Health",
            Category::Ideas => "Ideas",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

/// A single task record, as stored and as served over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: Category,
    pub pomodoro_minutes: u32,
    /// 0-100. Reaching 100 marks the task completed.
    pub progress: u8,
    /// ISO calendar date ("2025-12-25") the task is due. Defaults to a week out.
    pub due_date: Option<String>,
    /// Time-of-day string ("10:00") for scheduled tasks.
    pub start_time: Option<String>,
    /// RFC 3339 timestamp recorded when the task was completed.
    pub completed_at: Option<String>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub pomodoro_minutes: Option<u32>,
    pub due_date: Option<String>,
    pub start_time: Option<String>,
}

/// Body of `PATCH /tasks/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub completed: Option<bool>,
    pub progress: Option<i64>,
    pub due_date: Option<String>,
    pub start_time: Option<String>,
}

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Store operation failures. Validation runs before any mutation, so a failed
/// operation never leaves a partial record behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task not found")]
    NotFound,
}
