//! Pure domain types for the task queue.
//!
//! No infrastructure dependencies live here; adapters map these types to
//! and from storage rows at the boundary.

mod activity;
mod command;
mod error;
mod ids;
mod stats;
mod task;

pub use activity::{ActivityRecord, CREATED_ACTION, status_change_action};
pub use command::Command;
pub use error::{ParsePriorityError, ParseStatusError, QueueDomainError};
pub use ids::{ChannelName, MessageKey, TaskId};
pub use stats::QueueStats;
pub use task::{NewTask, PersistedTaskData, Priority, Task, TaskStatus, queue_order};
