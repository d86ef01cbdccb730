//! Adapter implementations of the queue ports.

pub mod logging;
pub mod memory;
pub mod sqlite;
