//! Tracing-backed notifier stand-in.
//!
//! Deployments wire a real chat transport behind the
//! [`Notifier`](crate::queue::ports::Notifier) port; this adapter records
//! outbound traffic in the log and surfaces no inbound messages, which
//! keeps scheduled runs observable without a transport.

use async_trait::async_trait;
use chrono::Duration;
use tracing::{debug, info};

use crate::queue::domain::ChannelName;
use crate::queue::ports::{InboundMessage, Notifier};

/// Notifier that logs outbound messages and fetches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Creates the stand-in notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, channel: &ChannelName, text: &str) -> bool {
        info!(channel = %channel, %text, "outbound notification");
        true
    }

    async fn fetch_recent(&self, channel: &ChannelName, window: Duration) -> Vec<InboundMessage> {
        debug!(channel = %channel, window_minutes = window.num_minutes(), "no transport configured; nothing fetched");
        Vec::new()
    }
}
