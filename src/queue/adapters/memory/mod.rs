//! In-memory adapters backing queue tests and embedded deployments.

mod notifier;
mod store;

pub use notifier::RecordingNotifier;
pub use store::InMemoryTaskStore;
