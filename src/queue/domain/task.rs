//! Task aggregate root and related lifecycle types.

use super::{ChannelName, ParsePriorityError, ParseStatusError, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    #[default]
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been finished.
    Completed,
    /// Task has been abandoned without completion.
    Cancelled,
}

impl TaskStatus {
    /// All statuses, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the status still counts towards open work.
    ///
    /// Only open tasks can become overdue.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// Task urgency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Drop everything.
    Critical,
    /// Urgent.
    High,
    /// Normal workload.
    #[default]
    Medium,
    /// Whenever there is time.
    Low,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Returns the ordering rank; lower means more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Payload for creating a task record; the store assigns the identifier
/// and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title; the chat command path permits an empty value.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Urgency level.
    pub priority: Priority,
    /// Optional assignee identity.
    pub assignee: Option<String>,
    /// Optional date-only deadline.
    pub due_date: Option<NaiveDate>,
    /// Identity of the chat user that created the task, if any.
    pub origin_user: Option<String>,
    /// Channel the creating chat message arrived on, if any.
    pub origin_channel: Option<ChannelName>,
}

impl NewTask {
    /// Creates a payload with defaults for everything but the title.
    #[must_use]
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::default(),
            assignee: None,
            due_date: None,
            origin_user: None,
            origin_channel: None,
        }
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted urgency level.
    pub priority: Priority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub assignee: Option<String>,
    /// Persisted deadline, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp; set iff status is completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creating chat user, if any.
    pub origin_user: Option<String>,
    /// Persisted originating channel, if any.
    pub origin_channel: Option<ChannelName>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    priority: Priority,
    status: TaskStatus,
    assignee: Option<String>,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    origin_user: Option<String>,
    origin_channel: Option<ChannelName>,
}

impl Task {
    /// Materializes a freshly created task from its insert payload.
    #[must_use]
    pub fn from_new(id: TaskId, new_task: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            status: TaskStatus::Pending,
            assignee: new_task.assignee,
            due_date: new_task.due_date,
            created_at: now,
            updated_at: now,
            completed_at: None,
            origin_user: new_task.origin_user,
            origin_channel: new_task.origin_channel,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            assignee: data.assignee,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            origin_user: data.origin_user,
            origin_channel: data.origin_channel,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the urgency level.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp; present iff the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creating chat user, if any.
    #[must_use]
    pub fn origin_user(&self) -> Option<&str> {
        self.origin_user.as_deref()
    }

    /// Returns the originating channel, if any.
    #[must_use]
    pub const fn origin_channel(&self) -> Option<&ChannelName> {
        self.origin_channel.as_ref()
    }

    /// Applies a status transition, stamping `updated_at` and maintaining
    /// the invariant that `completed_at` is set iff the status is
    /// [`TaskStatus::Completed`].
    pub fn apply_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
        self.completed_at = (status == TaskStatus::Completed).then_some(now);
    }

    /// Returns whether the task is overdue relative to the given calendar
    /// date.
    ///
    /// A task due today is not overdue; completed and cancelled tasks are
    /// never overdue.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.due_date.is_some_and(|due| due < today)
    }
}

/// Total ordering used by queue listings: priority rank ascending, then
/// due date ascending with absent due dates last, then task id ascending.
#[must_use]
pub fn queue_order(a: &Task, b: &Task) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}
