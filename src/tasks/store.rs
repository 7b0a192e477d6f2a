//! In-memory task store.
//!
//! One ordered collection behind a single `RwLock`. `list` takes the read
//! lock, every mutation takes the write lock, and the categorizer runs before
//! any lock is held so fallback network I/O never blocks readers.

use chrono::{Duration, Local, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{NewTask, Task, TaskPatch, TaskStoreError};
use crate::intelligence::Categorizer;

const DEFAULT_POMODORO_MINUTES: u32 = 25;
const DEFAULT_DUE_DAYS: i64 = 7;

pub struct TaskStore {
    categorizer: Categorizer,
    /// Insertion-order task list. Lookups are linear; the board is a
    /// single-user working set, not a database.
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new(categorizer: Categorizer) -> Self {
        Self {
            categorizer,
            tasks: RwLock::new(Vec::new()),
        }
    }

    // ─── Operations ──────────────────────────────────────────────────────────

    /// Create a task with auto-categorization.
    ///
    /// Rejects whitespace-only titles before anything else runs, so a failed
    /// create never triggers a fallback call and never touches the list.
    pub async fn create(&self, req: NewTask) -> Result<Task, TaskStoreError> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(TaskStoreError::EmptyTitle);
        }

        let category = self.categorizer.categorize(title).await;

        // Zero minutes from the client means "use the default", same as absent.
        let pomodoro_minutes = req
            .pomodoro_minutes
            .filter(|&m| m > 0)
            .unwrap_or(DEFAULT_POMODORO_MINUTES);

        let due_date = req
            .due_date
            .filter(|d| !d.is_empty())
            .unwrap_or_else(default_due_date);

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            completed: false,
            category,
            pomodoro_minutes,
            progress: 0,
            due_date: Some(due_date),
            start_time: req.start_time,
            completed_at: None,
        };

        self.tasks.write().await.push(task.clone());
        info!(id = %task.id, category = %task.category, "task created");
        Ok(task)
    }

    /// All tasks in creation order.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Flip completion. Completing sets progress to 100 and stamps
    /// `completed_at`; un-completing clears the stamp and leaves progress
    /// where it was.
    pub async fn toggle_complete(&self, id: &str) -> Result<Task, TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskStoreError::NotFound)?;

        task.completed = !task.completed;
        if task.completed {
            task.progress = 100;
            task.completed_at = Some(now_timestamp());
        } else {
            task.completed_at = None;
        }
        Ok(task.clone())
    }

    /// Apply a partial update.
    ///
    /// Fields apply in a fixed order: progress, due_date, start_time,
    /// completed. `completed` comes last, so an explicit `completed: false` in
    /// the same request overrides the completion implied by `progress: 100`
    /// while the progress value itself stays at 100. Long-standing
    /// client-visible behavior; do not reorder.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskStoreError::NotFound)?;

        if let Some(progress) = patch.progress {
            task.progress = progress.clamp(0, 100) as u8;
            if task.progress == 100 {
                task.completed = true;
                task.completed_at = Some(now_timestamp());
            }
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(start_time) = patch.start_time {
            task.start_time = Some(start_time);
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
            if completed {
                task.progress = 100;
                task.completed_at = Some(now_timestamp());
            } else {
                task.completed_at = None;
            }
        }
        Ok(task.clone())
    }

    /// Remove a task.
    pub async fn delete(&self, id: &str) -> Result<(), TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskStoreError::NotFound)?;
        tasks.remove(idx);
        info!(id = %id, "task deleted");
        Ok(())
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Default due date: a week from today, local calendar.
fn default_due_date() -> String {
    (Local::now().date_naive() + Duration::days(DEFAULT_DUE_DAYS))
        .format("%Y-%m-%d")
        .to_string()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TaskStore {
        TaskStore::new(Categorizer::new(None))
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let store = store();
        let task = store.create(new_task("Buy milk")).await.unwrap();

        assert_eq!(task.progress, 0);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
        assert_eq!(task.pomodoro_minutes, 25);
        let expected_due = (Local::now().date_naive() + Duration::days(7))
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(task.due_date.as_deref(), Some(expected_due.as_str()));
    }

    #[tokio::test]
    async fn create_trims_title_and_rejects_blank() {
        let store = store();
        let task = store.create(new_task("  Buy milk  ")).await.unwrap();
        assert_eq!(task.title, "Buy milk");

        assert_eq!(
            store.create(new_task("")).await.unwrap_err(),
            TaskStoreError::EmptyTitle
        );
        assert_eq!(
            store.create(new_task("   ")).await.unwrap_err(),
            TaskStoreError::EmptyTitle
        );
        // failed creates left nothing behind
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn create_keeps_supplied_fields() {
        let store = store();
        let task = store
            .create(NewTask {
                title: "Buy milk".to_string(),
                pomodoro_minutes: Some(50),
                due_date: Some("2026-12-25".to_string()),
                start_time: Some("10:00".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(task.pomodoro_minutes, 50);
        assert_eq!(task.due_date.as_deref(), Some("2026-12-25"));
        assert_eq!(task.start_time.as_deref(), Some("10:00"));
    }

    #[tokio::test]
    async fn zero_pomodoro_minutes_means_default() {
        let store = store();
        let task = store
            .create(NewTask {
                title: "Buy milk".to_string(),
                pomodoro_minutes: Some(0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(task.pomodoro_minutes, 25);
    }

    #[tokio::test]
    async fn toggle_twice_round_trips() {
        let store = store();
        let id = store.create(new_task("Buy milk")).await.unwrap().id;

        let on = store.toggle_complete(&id).await.unwrap();
        assert!(on.completed);
        assert_eq!(on.progress, 100);
        assert!(on.completed_at.is_some());

        let off = store.toggle_complete(&id).await.unwrap();
        assert!(!off.completed);
        assert!(off.completed_at.is_none());
        // the flip rule leaves progress where completion put it
        assert_eq!(off.progress, 100);
    }

    #[tokio::test]
    async fn progress_clamps_and_completes_at_100() {
        let store = store();
        let id = store.create(new_task("Buy milk")).await.unwrap().id;

        let task = store
            .update(
                &id,
                TaskPatch {
                    progress: Some(150),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.progress, 100);
        assert!(task.completed);
        assert!(task.completed_at.is_some());

        let task = store
            .update(
                &id,
                TaskPatch {
                    progress: Some(-5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.progress, 0);
        // lowering progress does not un-complete
        assert!(task.completed);
    }

    #[tokio::test]
    async fn update_overwrites_due_date_and_start_time() {
        let store = store();
        let id = store.create(new_task("Buy milk")).await.unwrap().id;

        let task = store
            .update(
                &id,
                TaskPatch {
                    due_date: Some("2027-01-01".to_string()),
                    start_time: Some("14:30".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.due_date.as_deref(), Some("2027-01-01"));
        assert_eq!(task.start_time.as_deref(), Some("14:30"));
    }

    #[tokio::test]
    async fn explicit_completed_false_wins_over_progress_100() {
        // `completed` applies after `progress`, so one request can complete via
        // progress and immediately un-complete, leaving progress at 100 with no
        // completion stamp. Pinned on purpose: clients depend on apply order.
        let store = store();
        let id = store.create(new_task("Buy milk")).await.unwrap().id;

        let task = store
            .update(
                &id,
                TaskPatch {
                    progress: Some(150),
                    completed: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.progress, 100);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[tokio::test]
    async fn explicit_completed_true_forces_progress_100() {
        let store = store();
        let id = store.create(new_task("Buy milk")).await.unwrap().id;

        let task = store
            .update(
                &id,
                TaskPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(task.completed);
        assert_eq!(task.progress, 100);
        assert!(task.completed_at.is_some());
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_and_mutate_nothing() {
        let store = store();
        let id = store.create(new_task("Buy milk")).await.unwrap().id;
        store.delete(&id).await.unwrap();

        assert_eq!(
            store.toggle_complete(&id).await.unwrap_err(),
            TaskStoreError::NotFound
        );
        assert_eq!(
            store.update(&id, TaskPatch::default()).await.unwrap_err(),
            TaskStoreError::NotFound
        );
        assert_eq!(store.delete(&id).await.unwrap_err(), TaskStoreError::NotFound);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn list_preserves_creation_order() {
        let store = store();
        let a = store.create(new_task("task a")).await.unwrap().id;
        let b = store.create(new_task("task b")).await.unwrap().id;
        let c = store.create(new_task("task c")).await.unwrap().id;

        store.delete(&b).await.unwrap();
        let d = store.create(new_task("task d")).await.unwrap().id;
        store.toggle_complete(&a).await.unwrap();

        let ids: Vec<String> = store.list().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c, d]);
    }
}
