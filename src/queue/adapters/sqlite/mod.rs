//! SQLite persistence adapter for the queue.

mod models;
mod schema;
mod store;

pub use store::{SqlitePool, SqliteTaskStore};
