//! Rota: chat-driven task queue engine.
//!
//! This crate provides the core functionality for running a shared task
//! queue from chat channels: parsing commands, tracking task lifecycle,
//! and producing summaries and alerts on a schedule.
//!
//! # Architecture
//!
//! Rota follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, chat, etc.)
//!
//! # Modules
//!
//! - [`queue`]: Task lifecycle, command processing, and digests
//! - [`config`]: Environment-driven runtime settings

pub mod config;
pub mod queue;
