//! SQLite store implementation for queue persistence.

use super::{
    models::{ActivityRow, NewActivityRow, NewProcessedMessageRow, NewTaskRow, TaskRow},
    schema::{activity_log, processed_messages, tasks},
};
use crate::queue::domain::{
    ActivityRecord, CREATED_ACTION, ChannelName, MessageKey, NewTask, PersistedTaskData, Priority,
    QueueStats, Task, TaskId, TaskStatus, queue_order, status_change_action,
};
use crate::queue::ports::{TaskStore, TaskStoreError, TaskStoreResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;

/// SQLite connection pool type used by queue adapters.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Idempotent DDL applied at startup.
const SCHEMA_DDL: &str = "\
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    priority TEXT NOT NULL DEFAULT 'medium',
    status TEXT NOT NULL DEFAULT 'pending',
    assignee TEXT,
    due_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    completed_at TEXT,
    origin_user TEXT,
    origin_channel TEXT
);
CREATE TABLE IF NOT EXISTS processed_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message_ts TEXT NOT NULL,
    channel TEXT NOT NULL,
    processed_at TEXT NOT NULL,
    UNIQUE (message_ts, channel)
);
CREATE TABLE IF NOT EXISTS activity_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER REFERENCES tasks (id),
    action TEXT NOT NULL,
    actor TEXT,
    timestamp TEXT NOT NULL,
    details TEXT
);
CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks (status);
CREATE INDEX IF NOT EXISTS idx_tasks_assignee ON tasks (assignee);
CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks (due_date);
";

/// SQLite-backed task store.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl From<DieselError> for TaskStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl SqliteTaskStore {
    /// Creates a new store from a SQLite connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Applies the schema DDL; safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the DDL cannot be
    /// applied.
    pub async fn initialize(&self) -> TaskStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_DDL)
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert_task(&self, new_task: NewTask, now: DateTime<Utc>) -> TaskStoreResult<Task> {
        let new_row = to_new_row(&new_task, now);
        let actor = new_task.origin_user;

        self.run_blocking(move |connection| {
            connection.immediate_transaction::<_, TaskStoreError, _>(|tx| {
                let row = diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)?;

                diesel::insert_into(activity_log::table)
                    .values(&NewActivityRow {
                        task_id: Some(row.id),
                        action: CREATED_ACTION.to_owned(),
                        actor,
                        timestamp: now,
                        details: None,
                    })
                    .execute(tx)?;

                row_to_task(row)
            })
        })
        .await
    }

    async fn update_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        actor: Option<String>,
        now: DateTime<Utc>,
    ) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            connection.immediate_transaction::<_, TaskStoreError, _>(|tx| {
                let completed_at = (status == TaskStatus::Completed).then_some(now);
                let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                    .set((
                        tasks::status.eq(status.as_str()),
                        tasks::updated_at.eq(now),
                        tasks::completed_at.eq(completed_at),
                    ))
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .optional()?;

                let Some(row) = updated else {
                    return Ok(None);
                };

                diesel::insert_into(activity_log::table)
                    .values(&NewActivityRow {
                        task_id: Some(row.id),
                        action: status_change_action(status),
                        actor,
                        timestamp: now,
                        details: None,
                    })
                    .execute(tx)?;

                row_to_task(row).map(Some)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_status(
        &self,
        status: TaskStatus,
        assignee: Option<String>,
    ) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .into_boxed();
            if let Some(wanted) = assignee {
                query = query.filter(tasks::assignee.eq(wanted));
            }

            let rows = query
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            let mut listed = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskStoreResult<Vec<Task>>>()?;
            // Priority/due-date ordering lives in the domain comparator so
            // every adapter produces the same total order.
            listed.sort_by(queue_order);
            Ok(listed)
        })
        .await
    }

    async fn list_overdue(&self, today: NaiveDate) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let open = [TaskStatus::Pending.as_str(), TaskStatus::InProgress.as_str()];
            let rows = tasks::table
                .filter(tasks::status.eq_any(open))
                .filter(tasks::due_date.is_not_null())
                .filter(tasks::due_date.lt(Some(today)))
                .order((tasks::due_date.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn stats(&self, day_start: DateTime<Utc>) -> TaskStoreResult<QueueStats> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|tx| {
                let mut stats = QueueStats::default();
                let by_status = tasks::table
                    .group_by(tasks::status)
                    .select((tasks::status, diesel::dsl::count_star()))
                    .load::<(String, i64)>(tx)?;
                for (status_value, count) in by_status {
                    let status = TaskStatus::try_from(status_value.as_str())
                        .map_err(TaskStoreError::persistence)?;
                    stats.set_status_count(status, to_count(count));
                }

                let completed_today = tasks::table
                    .filter(tasks::status.eq(TaskStatus::Completed.as_str()))
                    .filter(tasks::completed_at.ge(Some(day_start)))
                    .count()
                    .get_result::<i64>(tx)?;
                stats.completed_today = to_count(completed_today);

                let total = tasks::table.count().get_result::<i64>(tx)?;
                stats.total = to_count(total);
                Ok(stats)
            })
        })
        .await
    }

    async fn claim_message(&self, key: MessageKey, now: DateTime<Utc>) -> TaskStoreResult<bool> {
        let new_row = NewProcessedMessageRow {
            message_ts: key.timestamp().to_owned(),
            channel: key.channel().as_str().to_owned(),
            processed_at: now,
        };

        self.run_blocking(move |connection| {
            // The unique (message_ts, channel) index makes the check and
            // insert one atomic statement; a conflict means another caller
            // already claimed the message.
            let inserted = diesel::insert_into(processed_messages::table)
                .values(&new_row)
                .on_conflict_do_nothing()
                .execute(connection)?;
            Ok(inserted > 0)
        })
        .await
    }

    async fn purge_processed_before(&self, cutoff: DateTime<Utc>) -> TaskStoreResult<usize> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                processed_messages::table.filter(processed_messages::processed_at.lt(cutoff)),
            )
            .execute(connection)?;
            Ok(deleted)
        })
        .await
    }

    async fn history(&self, id: TaskId) -> TaskStoreResult<Vec<ActivityRecord>> {
        self.run_blocking(move |connection| {
            let rows = activity_log::table
                .filter(activity_log::task_id.eq(Some(id.value())))
                .order((activity_log::timestamp.desc(), activity_log::id.desc()))
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)?;
            Ok(rows.into_iter().map(row_to_activity).collect())
        })
        .await
    }
}

fn to_new_row(new_task: &NewTask, now: DateTime<Utc>) -> NewTaskRow {
    NewTaskRow {
        title: new_task.title.clone(),
        description: new_task.description.clone(),
        priority: new_task.priority.as_str().to_owned(),
        status: TaskStatus::Pending.as_str().to_owned(),
        assignee: new_task.assignee.clone(),
        due_date: new_task.due_date,
        created_at: now,
        updated_at: now,
        origin_user: new_task.origin_user.clone(),
        origin_channel: new_task
            .origin_channel
            .as_ref()
            .map(|channel| channel.as_str().to_owned()),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        priority: persisted_priority,
        status: persisted_status,
        assignee,
        due_date,
        created_at,
        updated_at,
        completed_at,
        origin_user,
        origin_channel,
    } = row;

    let priority =
        Priority::try_from(persisted_priority.as_str()).map_err(TaskStoreError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskStoreError::persistence)?;
    let origin_channel = origin_channel
        .map(ChannelName::new)
        .transpose()
        .map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_i64(id),
        title,
        description,
        priority,
        status,
        assignee,
        due_date,
        created_at,
        updated_at,
        completed_at,
        origin_user,
        origin_channel,
    }))
}

fn row_to_activity(row: ActivityRow) -> ActivityRecord {
    ActivityRecord {
        task_id: row.task_id.map(TaskId::from_i64),
        action: row.action,
        actor: row.actor,
        timestamp: row.timestamp,
        detail: row.details,
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
