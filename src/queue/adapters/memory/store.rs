//! Thread-safe in-memory store for queue tests and embedded use.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::queue::domain::{
    ActivityRecord, CREATED_ACTION, MessageKey, NewTask, QueueStats, Task, TaskId, TaskStatus,
    queue_order, status_change_action,
};
use crate::queue::ports::{TaskStore, TaskStoreError, TaskStoreResult};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_task_id: i64,
    tasks: BTreeMap<TaskId, Task>,
    processed: HashMap<MessageKey, DateTime<Utc>>,
    activity: Vec<ActivityRecord>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn count_by_status(state: &InMemoryState, status: TaskStatus) -> u64 {
    let count = state
        .tasks
        .values()
        .filter(|task| task.status() == status)
        .count();
    u64::try_from(count).unwrap_or(u64::MAX)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert_task(&self, new_task: NewTask, now: DateTime<Utc>) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        state.next_task_id += 1;
        let id = TaskId::from_i64(state.next_task_id);
        let task = Task::from_new(id, new_task, now);

        state.activity.push(ActivityRecord::for_task(
            id,
            CREATED_ACTION,
            task.origin_user().map(str::to_owned),
            now,
        ));
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        actor: Option<String>,
        now: DateTime<Utc>,
    ) -> TaskStoreResult<Option<Task>> {
        let mut state = self.write_state()?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };

        task.apply_status(status, now);
        let updated = task.clone();
        state.activity.push(ActivityRecord::for_task(
            id,
            status_change_action(status),
            actor,
            now,
        ));
        Ok(Some(updated))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at()).then(b.id().cmp(&a.id())));
        Ok(tasks)
    }

    async fn list_by_status(
        &self,
        status: TaskStatus,
        assignee: Option<String>,
    ) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.status() == status)
            .filter(|task| {
                assignee
                    .as_deref()
                    .is_none_or(|wanted| task.assignee() == Some(wanted))
            })
            .cloned()
            .collect();
        tasks.sort_by(queue_order);
        Ok(tasks)
    }

    async fn list_overdue(&self, today: NaiveDate) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.is_overdue(today))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.due_date().cmp(&b.due_date()).then(a.id().cmp(&b.id())));
        Ok(tasks)
    }

    async fn stats(&self, day_start: DateTime<Utc>) -> TaskStoreResult<QueueStats> {
        let state = self.read_state()?;
        let mut stats = QueueStats::default();
        for status in TaskStatus::ALL {
            stats.set_status_count(status, count_by_status(&state, status));
        }

        let completed_today = state
            .tasks
            .values()
            .filter(|task| task.status() == TaskStatus::Completed)
            .filter(|task| task.completed_at().is_some_and(|at| at >= day_start))
            .count();
        stats.completed_today = u64::try_from(completed_today).unwrap_or(u64::MAX);
        stats.total = u64::try_from(state.tasks.len()).unwrap_or(u64::MAX);
        Ok(stats)
    }

    async fn claim_message(&self, key: MessageKey, now: DateTime<Utc>) -> TaskStoreResult<bool> {
        let mut state = self.write_state()?;
        if state.processed.contains_key(&key) {
            return Ok(false);
        }
        state.processed.insert(key, now);
        Ok(true)
    }

    async fn purge_processed_before(&self, cutoff: DateTime<Utc>) -> TaskStoreResult<usize> {
        let mut state = self.write_state()?;
        let before = state.processed.len();
        state.processed.retain(|_, processed_at| *processed_at >= cutoff);
        Ok(before - state.processed.len())
    }

    async fn history(&self, id: TaskId) -> TaskStoreResult<Vec<ActivityRecord>> {
        let state = self.read_state()?;
        let records: Vec<ActivityRecord> = state
            .activity
            .iter()
            .rev()
            .filter(|record| record.task_id == Some(id))
            .cloned()
            .collect();
        Ok(records)
    }
}
