//! Recording notifier fake for tests and dry runs.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::queue::domain::ChannelName;
use crate::queue::ports::{InboundMessage, Notifier};

/// Notifier that records outbound messages and replays queued inbound
/// messages.
///
/// With [`RecordingNotifier::failing`] every send reports failure, for
/// exercising best-effort delivery paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(ChannelName, String)>>>,
    inbound: Arc<Mutex<HashMap<ChannelName, Vec<InboundMessage>>>>,
    fail_sends: bool,
}

impl RecordingNotifier {
    /// Creates a notifier whose sends succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier whose sends all report failure.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Queues an inbound message for the next fetch on `channel`.
    pub fn push_inbound(&self, channel: &ChannelName, message: InboundMessage) {
        if let Ok(mut inbound) = self.inbound.lock() {
            inbound.entry(channel.clone()).or_default().push(message);
        }
    }

    /// Returns a snapshot of everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<(ChannelName, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, channel: &ChannelName, text: &str) -> bool {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((channel.clone(), text.to_owned()));
        }
        !self.fail_sends
    }

    async fn fetch_recent(&self, channel: &ChannelName, _window: Duration) -> Vec<InboundMessage> {
        self.inbound
            .lock()
            .ok()
            .and_then(|inbound| inbound.get(channel).cloned())
            .unwrap_or_default()
    }
}
