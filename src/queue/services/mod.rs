//! Application services orchestrating the queue domain through its ports.

pub mod admin;
pub mod digest;
pub mod engine;
pub mod replies;

pub use admin::{AdminService, ApiError, ApiResult, CreateTaskPayload};
pub use engine::{CreateTaskRequest, EngineError, TaskEngine};
