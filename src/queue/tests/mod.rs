//! Queue test suite and shared fixtures.

#![expect(clippy::expect_used, reason = "tests abort loudly on broken setup")]

mod admin_tests;
mod digest_tests;
mod domain_tests;
mod ordering_tests;

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::queue::adapters::memory::{InMemoryTaskStore, RecordingNotifier};
use crate::queue::domain::ChannelName;
use crate::queue::ports::InboundMessage;
use crate::queue::services::TaskEngine;

/// Clock pinned to a chosen instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub(crate) const fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

pub(crate) type TestEngine = TaskEngine<InMemoryTaskStore, RecordingNotifier, FixedClock>;

/// Noon UTC on an arbitrary reference day.
pub(crate) fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 17, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub(crate) fn channel(name: &str) -> ChannelName {
    ChannelName::new(name).expect("valid channel name")
}

pub(crate) fn inbound(timestamp: &str, sender: &str, text: &str) -> InboundMessage {
    InboundMessage {
        timestamp: timestamp.to_owned(),
        sender: sender.to_owned(),
        text: text.to_owned(),
    }
}

pub(crate) fn engine_with(
    store: Arc<InMemoryTaskStore>,
    notifier: Arc<RecordingNotifier>,
    now: DateTime<Utc>,
) -> TestEngine {
    TaskEngine::new(store, notifier, Arc::new(FixedClock::at(now)))
}
