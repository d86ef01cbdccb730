//! Diesel row models for queue persistence.

use super::schema::{activity_log, processed_messages, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Urgency level.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional assignee identity.
    pub assignee: Option<String>,
    /// Optional date-only deadline.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, set iff status is completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Chat user that created the task, if any.
    pub origin_user: Option<String>,
    /// Channel the creating message arrived on, if any.
    pub origin_channel: Option<String>,
}

/// Insert model for task records; the store assigns the identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Urgency level.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional assignee identity.
    pub assignee: Option<String>,
    /// Optional date-only deadline.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Chat user that created the task, if any.
    pub origin_user: Option<String>,
    /// Channel the creating message arrived on, if any.
    pub origin_channel: Option<String>,
}

/// Insert model for dedup markers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = processed_messages)]
pub struct NewProcessedMessageRow {
    /// Platform message timestamp.
    pub message_ts: String,
    /// Channel the message arrived on.
    pub channel: String,
    /// Claim timestamp.
    pub processed_at: DateTime<Utc>,
}

/// Query result row for activity records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = activity_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ActivityRow {
    /// Row identifier.
    pub id: i64,
    /// Task the action applies to, if any.
    pub task_id: Option<i64>,
    /// Action label.
    pub action: String,
    /// Acting identity, if known.
    pub actor: Option<String>,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Optional free-text detail.
    pub details: Option<String>,
}

/// Insert model for activity records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_log)]
pub struct NewActivityRow {
    /// Task the action applies to, if any.
    pub task_id: Option<i64>,
    /// Action label.
    pub action: String,
    /// Acting identity, if known.
    pub actor: Option<String>,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Optional free-text detail.
    pub details: Option<String>,
}
