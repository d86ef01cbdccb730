//! Task lifecycle and ingestion orchestration.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{digest, replies};
use crate::queue::domain::{
    ChannelName, Command, MessageKey, NewTask, Priority, QueueDomainError, QueueStats, Task,
    TaskId, TaskStatus,
};
use crate::queue::ports::{InboundMessage, Notifier, TaskStore, TaskStoreError};

/// Request payload for creating a task through the API surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Priority,
    assignee: Option<String>,
    due_date: Option<NaiveDate>,
    origin_user: Option<String>,
    origin_channel: Option<ChannelName>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
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

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the urgency level.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the creating chat user.
    #[must_use]
    pub fn with_origin_user(mut self, user: impl Into<String>) -> Self {
        self.origin_user = Some(user.into());
        self
    }

    /// Sets the originating channel.
    #[must_use]
    pub fn with_origin_channel(mut self, channel: ChannelName) -> Self {
        self.origin_channel = Some(channel);
        self
    }
}

/// Service-level errors for queue operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] QueueDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// Reply or digest rendering failed.
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Queue orchestration service.
///
/// Owns no task state: every read re-queries the store, so multiple
/// engine instances can run against the same store without observing
/// stale data.
#[derive(Clone)]
pub struct TaskEngine<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<S, N, C> TaskEngine<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a new engine.
    #[must_use]
    pub const fn new(store: Arc<S>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    /// Creates a task through the validated API path.
    ///
    /// # Errors
    ///
    /// Returns [`QueueDomainError::EmptyTitle`] when the title is empty
    /// after trimming, or a store error when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> EngineResult<Task> {
        if request.title.trim().is_empty() {
            return Err(QueueDomainError::EmptyTitle.into());
        }

        let new_task = NewTask {
            title: request.title,
            description: request.description,
            priority: request.priority,
            assignee: request.assignee,
            due_date: request.due_date,
            origin_user: request.origin_user,
            origin_channel: request.origin_channel,
        };
        let task = self.store.insert_task(new_task, self.clock.utc()).await?;
        info!(task_id = %task.id(), title = task.title(), "task created");
        Ok(task)
    }

    /// Applies a status transition.
    ///
    /// Returns `None` when the task does not exist; this is a reportable
    /// condition, not an error. When the new status is completed or
    /// cancelled and the task has an origin channel, a best-effort
    /// notification is sent there; send failure never unwinds the
    /// committed transition.
    ///
    /// # Errors
    ///
    /// Returns a store error when persistence fails.
    pub async fn transition_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        actor: Option<&str>,
    ) -> EngineResult<Option<Task>> {
        let updated = self
            .store
            .update_status(id, status, actor.map(str::to_owned), self.clock.utc())
            .await?;
        let Some(task) = updated else {
            debug!(task_id = %id, "status update targeted unknown task");
            return Ok(None);
        };

        info!(task_id = %id, status = status.as_str(), "task status updated");
        if matches!(status, TaskStatus::Completed | TaskStatus::Cancelled)
            && let Some(channel) = task.origin_channel()
            && !self.notifier.send(channel, &replies::outcome_notice(&task)).await
        {
            warn!(task_id = %id, channel = %channel, "outcome notification failed");
        }
        Ok(Some(task))
    }

    /// Finds a task by id.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> EngineResult<Option<Task>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the listing fails.
    pub async fn list_all(&self) -> EngineResult<Vec<Task>> {
        Ok(self.store.list_all().await?)
    }

    /// Returns tasks with the given status in queue order.
    ///
    /// # Errors
    ///
    /// Returns a store error when the listing fails.
    pub async fn list_by_status(
        &self,
        status: TaskStatus,
        assignee: Option<String>,
    ) -> EngineResult<Vec<Task>> {
        Ok(self.store.list_by_status(status, assignee).await?)
    }

    /// Returns open tasks due strictly before today, earliest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the listing fails.
    pub async fn list_overdue(&self) -> EngineResult<Vec<Task>> {
        let today = self.clock.local().date_naive();
        Ok(self.store.list_overdue(today).await?)
    }

    /// Computes aggregate statistics from one storage snapshot.
    ///
    /// # Errors
    ///
    /// Returns a store error when the snapshot fails.
    pub async fn stats(&self) -> EngineResult<QueueStats> {
        let day_start = start_of_local_day(self.clock.local());
        Ok(self.store.stats(day_start).await?)
    }

    /// Returns a task's activity history, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    pub async fn history(&self, id: TaskId) -> EngineResult<Vec<crate::queue::domain::ActivityRecord>> {
        Ok(self.store.history(id).await?)
    }

    /// Processes one inbound chat message, idempotently.
    ///
    /// The dedup marker is claimed atomically before anything else, so a
    /// replayed or concurrently redelivered message produces at most one
    /// side-effecting attempt. Unrecognized text claims its marker and is
    /// otherwise ignored.
    ///
    /// Returns whether this call newly claimed the message; `false` means
    /// it was already handled and nothing happened.
    ///
    /// # Errors
    ///
    /// Returns a store error when claiming or command execution hits
    /// persistence failure.
    pub async fn process_inbound_message(
        &self,
        message: &InboundMessage,
        channel: &ChannelName,
    ) -> EngineResult<bool> {
        let key = MessageKey::new(message.timestamp.clone(), channel.clone());
        if !self.store.claim_message(key, self.clock.utc()).await? {
            debug!(ts = message.timestamp, channel = %channel, "message already processed");
            return Ok(false);
        }

        let Some(command) = Command::parse(&message.text) else {
            return Ok(true);
        };

        let reply = self
            .execute_command(command, &message.sender, channel)
            .await?;
        if !self.notifier.send(channel, &reply).await {
            warn!(channel = %channel, "command reply delivery failed");
        }
        Ok(true)
    }

    /// Fetches recent messages from a channel and processes each one.
    ///
    /// Returns the number of newly claimed messages; replays of messages
    /// already in the dedup ledger are fetched but not counted.
    ///
    /// # Errors
    ///
    /// Returns a store error when message processing fails.
    pub async fn ingest_channel(
        &self,
        channel: &ChannelName,
        window: Duration,
    ) -> EngineResult<usize> {
        let messages = self.notifier.fetch_recent(channel, window).await;
        let mut processed = 0;
        for message in &messages {
            if self.process_inbound_message(message, channel).await? {
                processed += 1;
            }
        }
        Ok(processed)
    }

    /// Renders the daily digest.
    ///
    /// # Errors
    ///
    /// Returns a store error when the snapshot fails, or a render error.
    pub async fn daily_summary(&self) -> EngineResult<String> {
        let stats = self.stats().await?;
        let overdue = self.list_overdue().await?;
        Ok(digest::render_daily_summary(&stats, &overdue)?)
    }

    /// Broadcasts the daily digest to every given channel, best-effort
    /// per channel.
    ///
    /// # Errors
    ///
    /// Returns a store error when the snapshot fails, or a render error.
    pub async fn send_daily_summary(&self, channels: &[ChannelName]) -> EngineResult<()> {
        let summary = self.daily_summary().await?;
        self.broadcast(channels, &summary).await;
        Ok(())
    }

    /// Broadcasts an overdue alert when any task is overdue.
    ///
    /// Returns whether an alert was sent.
    ///
    /// # Errors
    ///
    /// Returns a store error when the listing fails, or a render error.
    pub async fn send_overdue_alert(&self, channels: &[ChannelName]) -> EngineResult<bool> {
        let overdue = self.list_overdue().await?;
        let Some(alert) = digest::render_overdue_alert(&overdue)? else {
            return Ok(false);
        };

        info!(count = overdue.len(), "broadcasting overdue alert");
        self.broadcast(channels, &alert).await;
        Ok(true)
    }

    /// Deletes dedup markers older than the retention window, returning
    /// how many were removed.
    ///
    /// Invoked from an external schedule, not by the engine itself.
    ///
    /// # Errors
    ///
    /// Returns a store error when the purge fails.
    pub async fn purge_processed_markers(&self, retention: Duration) -> EngineResult<usize> {
        let cutoff = self.clock.utc() - retention;
        let deleted = self.store.purge_processed_before(cutoff).await?;
        if deleted > 0 {
            info!(deleted, "purged old processed-message markers");
        }
        Ok(deleted)
    }

    async fn execute_command(
        &self,
        command: Command,
        sender: &str,
        channel: &ChannelName,
    ) -> EngineResult<String> {
        match command {
            Command::AddTask { title } => {
                // The chat path performs no title validation; only
                // `create_task` guards the API surface.
                let mut new_task = NewTask::with_title(title);
                new_task.origin_user = Some(sender.to_owned());
                new_task.origin_channel = Some(channel.clone());
                let task = self.store.insert_task(new_task, self.clock.utc()).await?;
                info!(task_id = %task.id(), channel = %channel, "task created from chat");
                Ok(replies::task_added(task.id(), task.title()))
            }
            Command::ListPending => {
                let pending = self
                    .store
                    .list_by_status(TaskStatus::Pending, None)
                    .await?;
                Ok(replies::pending_list(&pending)?)
            }
            Command::Complete { id } => {
                let updated = self
                    .transition_status(id, TaskStatus::Completed, Some(sender))
                    .await?;
                Ok(updated.map_or_else(|| replies::task_not_found(id), |task| {
                    replies::task_completed(task.id())
                }))
            }
            Command::ShowStatus => {
                let stats = self.stats().await?;
                Ok(replies::status_report(&stats)?)
            }
            Command::ShowHelp => Ok(replies::help_text().to_owned()),
        }
    }

    async fn broadcast(&self, channels: &[ChannelName], text: &str) {
        for channel in channels {
            if !self.notifier.send(channel, text).await {
                warn!(channel = %channel, "broadcast delivery failed");
            }
        }
    }
}

/// Converts a local wall-clock instant to the UTC instant of that day's
/// local midnight.
fn start_of_local_day(now_local: DateTime<Local>) -> DateTime<Utc> {
    now_local
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map_or_else(|| now_local.with_timezone(&Utc), |dt| dt.with_timezone(&Utc))
}
