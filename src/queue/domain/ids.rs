//! Identifier and validated scalar types for the queue domain.

use super::QueueDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a task record.
///
/// Assigned by the store on creation, monotonically increasing, never
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a task identifier from a store-assigned value.
    #[must_use]
    pub const fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated chat channel name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelName(String);

impl ChannelName {
    /// Creates a validated channel name.
    ///
    /// # Errors
    ///
    /// Returns [`QueueDomainError::EmptyChannelName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, QueueDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(QueueDomainError::EmptyChannelName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the channel name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChannelName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite dedup-ledger key for an inbound chat message.
///
/// The timestamp is the chat platform's opaque message identifier (for
/// example `"1726531200.000100"`); combined with the channel it is globally
/// unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageKey {
    timestamp: String,
    channel: ChannelName,
}

impl MessageKey {
    /// Creates a dedup key from a message timestamp and its channel.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, channel: ChannelName) -> Self {
        Self {
            timestamp: timestamp.into(),
            channel,
        }
    }

    /// Returns the message timestamp component.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the channel component.
    #[must_use]
    pub const fn channel(&self) -> &ChannelName {
        &self.channel
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.timestamp, self.channel)
    }
}
