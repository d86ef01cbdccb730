//! Store port for durable task, dedup-ledger, and activity-log state.

use crate::queue::domain::{
    ActivityRecord, MessageKey, NewTask, QueueStats, Task, TaskId, TaskStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Persistence contract for the queue.
///
/// Implementations own all persisted state; callers hold no cached copies
/// across calls. Every mutating operation is atomic with respect to its own
/// invariant: task creation writes the row and its `created` activity record
/// as one unit, status updates write the row change and its activity record
/// as one unit, and [`TaskStore::claim_message`] performs its check and
/// insert as one unit.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task, assigning the next identifier, and records a
    /// `created` activity entry.
    async fn insert_task(&self, new_task: NewTask, now: DateTime<Utc>) -> TaskStoreResult<Task>;

    /// Applies a status transition: stamps `updated_at`, sets
    /// `completed_at` iff the new status is completed (clears it
    /// otherwise), and records a `status_changed_to_<status>` activity
    /// entry.
    ///
    /// Returns `None` when no task with the given id exists.
    async fn update_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        actor: Option<String>,
        now: DateTime<Utc>,
    ) -> TaskStoreResult<Option<Task>>;

    /// Finds a task by identifier; `None` when absent.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns every task, newest creation first.
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>>;

    /// Returns tasks with the given status, optionally filtered by
    /// assignee, in queue order (priority rank, due date with absent dates
    /// last, id).
    async fn list_by_status(
        &self,
        status: TaskStatus,
        assignee: Option<String>,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Returns open tasks whose due date is strictly before `today`,
    /// ordered by due date ascending.
    async fn list_overdue(&self, today: NaiveDate) -> TaskStoreResult<Vec<Task>>;

    /// Computes aggregate counts from a single consistent snapshot.
    ///
    /// `day_start` bounds the completed-today count.
    async fn stats(&self, day_start: DateTime<Utc>) -> TaskStoreResult<QueueStats>;

    /// Atomically claims the dedup marker for an inbound message.
    ///
    /// Returns `true` when the marker was newly inserted and the caller
    /// owns processing of the message; `false` when the message was
    /// already handled. A duplicate claim is not an error.
    async fn claim_message(&self, key: MessageKey, now: DateTime<Utc>) -> TaskStoreResult<bool>;

    /// Deletes dedup markers recorded before `cutoff`, returning how many
    /// were removed. Markers at or after the cutoff are never touched.
    async fn purge_processed_before(&self, cutoff: DateTime<Utc>) -> TaskStoreResult<usize>;

    /// Returns the activity history for a task, newest first.
    async fn history(&self, id: TaskId) -> TaskStoreResult<Vec<ActivityRecord>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
