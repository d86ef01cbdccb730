//! Port contracts for the task queue.
//!
//! Ports define infrastructure-agnostic interfaces used by queue services.

pub mod notifier;
pub mod store;

pub use notifier::{InboundMessage, Notifier};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
