//! Error types for queue domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain queue values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueueDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The channel name is empty after trimming.
    #[error("channel name must not be empty")]
    EmptyChannelName,
}

/// Error returned while parsing task statuses from untrusted input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing priorities from untrusted input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
