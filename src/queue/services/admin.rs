//! Administrative API facade.
//!
//! The HTTP layer itself is an external adapter; this service is the
//! surface it delegates to, with errors pre-classified into conventional
//! bad-request / not-found / server-error responses.

use chrono::NaiveDate;
use mockable::Clock;
use serde::Deserialize;
use thiserror::Error;

use super::engine::{CreateTaskRequest, EngineError, TaskEngine};
use crate::queue::domain::{
    ActivityRecord, Priority, QueueDomainError, QueueStats, Task, TaskId, TaskStatus,
};
use crate::queue::ports::{Notifier, TaskStore};

/// Result type for administrative operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the administrative facade.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request was malformed or failed validation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The referenced resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage or rendering failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Conventional HTTP status code for this error class.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Domain(QueueDomainError::EmptyTitle) => {
                Self::BadRequest("title is required".to_owned())
            }
            EngineError::Domain(domain) => Self::BadRequest(domain.to_string()),
            EngineError::Store(store) => Self::Internal(store.to_string()),
            EngineError::Render(render) => Self::Internal(render.to_string()),
        }
    }
}

/// JSON body accepted by task creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskPayload {
    /// Required task title.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Optional priority name; defaults to medium.
    pub priority: Option<String>,
    /// Optional assignee identity.
    pub assignee: Option<String>,
    /// Optional `YYYY-MM-DD` deadline.
    pub due_date: Option<String>,
    /// Identity creating the task; defaults to `api`.
    pub user: Option<String>,
}

/// Administrative service over the task engine.
#[derive(Clone)]
pub struct AdminService<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    engine: TaskEngine<S, N, C>,
}

impl<S, N, C> AdminService<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates the facade over an engine.
    #[must_use]
    pub const fn new(engine: TaskEngine<S, N, C>) -> Self {
        Self { engine }
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for a missing title, unknown
    /// priority, or malformed due date; [`ApiError::Internal`] on storage
    /// failure.
    pub async fn create_task(&self, payload: CreateTaskPayload) -> ApiResult<Task> {
        let title = payload
            .title
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("title is required".to_owned()))?;

        let mut request = CreateTaskRequest::new(title)
            .with_origin_user(payload.user.unwrap_or_else(|| "api".to_owned()));
        if let Some(description) = payload.description {
            request = request.with_description(description);
        }
        if let Some(priority) = payload.priority {
            let parsed = Priority::try_from(priority.as_str())
                .map_err(|err| ApiError::BadRequest(err.to_string()))?;
            request = request.with_priority(parsed);
        }
        if let Some(assignee) = payload.assignee {
            request = request.with_assignee(assignee);
        }
        if let Some(due_date) = payload.due_date {
            let parsed = NaiveDate::parse_from_str(&due_date, "%Y-%m-%d")
                .map_err(|_| ApiError::BadRequest(format!("invalid due date '{due_date}'")))?;
            request = request.with_due_date(parsed);
        }

        Ok(self.engine.create_task(request).await?)
    }

    /// Lists tasks, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for an unknown status value.
    pub async fn list_tasks(&self, status: Option<&str>) -> ApiResult<Vec<Task>> {
        match status {
            Some(value) => {
                let parsed = TaskStatus::try_from(value)
                    .map_err(|err| ApiError::BadRequest(err.to_string()))?;
                Ok(self.engine.list_by_status(parsed, None).await?)
            }
            None => Ok(self.engine.list_all().await?),
        }
    }

    /// Fetches a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the task does not exist.
    pub async fn get_task(&self, id: TaskId) -> ApiResult<Task> {
        self.engine
            .find_task(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("task #{id} not found")))
    }

    /// Updates a task's status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for an unknown status value and
    /// [`ApiError::NotFound`] for an unknown task.
    pub async fn update_status(&self, id: TaskId, status: &str) -> ApiResult<Task> {
        let parsed =
            TaskStatus::try_from(status).map_err(|err| ApiError::BadRequest(err.to_string()))?;
        self.engine
            .transition_status(id, parsed, Some("api"))
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("task #{id} not found")))
    }

    /// Returns aggregate queue statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] on storage failure.
    pub async fn stats(&self) -> ApiResult<QueueStats> {
        Ok(self.engine.stats().await?)
    }

    /// Returns the activity history for a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the task does not exist.
    pub async fn history(&self, id: TaskId) -> ApiResult<Vec<ActivityRecord>> {
        let _ = self.get_task(id).await?;
        Ok(self.engine.history(id).await?)
    }
}
