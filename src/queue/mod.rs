//! Chat-driven task queue.
//!
//! The queue accepts commands parsed from channel messages, tracks each
//! task through a small lifecycle state machine, and answers with
//! formatted replies, status digests, and overdue alerts. Message
//! processing is idempotent: every `(timestamp, channel)` pair is claimed
//! exactly once before a command executes.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
