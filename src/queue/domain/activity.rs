//! Append-only audit trail records for task mutations.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action label recorded when a task is created.
pub const CREATED_ACTION: &str = "created";

/// Returns the action label recorded for a status transition.
#[must_use]
pub fn status_change_action(status: TaskStatus) -> String {
    format!("status_changed_to_{}", status.as_str())
}

/// One entry in the append-only activity log.
///
/// The task id is optional so that non-task actions can be audited too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Task the action applies to, if any.
    pub task_id: Option<TaskId>,
    /// Action label, e.g. `created` or `status_changed_to_completed`.
    pub action: String,
    /// Identity that performed the action, if known.
    pub actor: Option<String>,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Optional free-text detail.
    pub detail: Option<String>,
}

impl ActivityRecord {
    /// Creates a record for a task mutation.
    #[must_use]
    pub fn for_task(
        task_id: TaskId,
        action: impl Into<String>,
        actor: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id: Some(task_id),
            action: action.into(),
            actor,
            timestamp,
            detail: None,
        }
    }
}
