//! Notifier port for channel-scoped chat messaging.
//!
//! The chat transport itself (authentication, message layout, network) is
//! an integrator concern; the queue only depends on this capability
//! surface and never assumes a call succeeded.

use crate::queue::domain::ChannelName;
use async_trait::async_trait;
use chrono::Duration;

/// An inbound chat message as surfaced by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Platform message timestamp; opaque, unique within a channel.
    pub timestamp: String,
    /// Identity of the sender.
    pub sender: String,
    /// Raw message text.
    pub text: String,
}

/// External chat capability the queue depends on.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends plain text to a channel, best-effort.
    ///
    /// Returns `false` on failure; failures never propagate to the caller
    /// as errors.
    async fn send(&self, channel: &ChannelName, text: &str) -> bool;

    /// Fetches recent messages from a channel, oldest first.
    ///
    /// Returns an empty list on transient transport failure.
    async fn fetch_recent(&self, channel: &ChannelName, window: Duration) -> Vec<InboundMessage>;
}
