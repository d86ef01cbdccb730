//! Aggregate queue statistics.

use super::TaskStatus;
use serde::{Deserialize, Serialize};

/// Counts describing the queue at a single storage snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Tasks currently pending.
    pub pending: u64,
    /// Tasks currently in progress.
    pub in_progress: u64,
    /// Tasks completed, all time.
    pub completed: u64,
    /// Tasks cancelled, all time.
    pub cancelled: u64,
    /// Tasks completed since the start of the current local calendar day.
    pub completed_today: u64,
    /// Total number of tasks ever created.
    pub total: u64,
}

impl QueueStats {
    /// Returns the count for a single status.
    #[must_use]
    pub const fn by_status(&self, status: TaskStatus) -> u64 {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
            TaskStatus::Cancelled => self.cancelled,
        }
    }

    /// Sets the count for a single status.
    pub const fn set_status_count(&mut self, status: TaskStatus, count: u64) {
        match status {
            TaskStatus::Pending => self.pending = count,
            TaskStatus::InProgress => self.in_progress = count,
            TaskStatus::Completed => self.completed = count,
            TaskStatus::Cancelled => self.cancelled = count,
        }
    }

    /// Sum of the four per-status counts; equals `total` for a consistent
    /// snapshot.
    #[must_use]
    pub const fn status_sum(&self) -> u64 {
        self.pending + self.in_progress + self.completed + self.cancelled
    }
}
