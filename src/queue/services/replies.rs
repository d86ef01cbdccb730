//! Outbound reply text for chat commands.
//!
//! Wording mirrors what channel users already expect; multi-line replies
//! are rendered through `minijinja` templates.

use minijinja::Environment;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::queue::domain::{QueueStats, Task, TaskId};

/// Upper bound on entries shown in a pending-list reply.
const LIST_LIMIT: usize = 10;

const PENDING_LIST_TEMPLATE: &str = "📋 *Pending Tasks:*\n{% for item in items %}• #{{ item.id }}: {{ item.title }} ({{ item.priority }})\n{% endfor %}";

const STATUS_TEMPLATE: &str = "📊 *Queue Status:*\n• Pending: {{ pending }}\n• In Progress: {{ in_progress }}\n• Completed Today: {{ completed_today }}\n• Total Items: {{ total }}";

const HELP_TEXT: &str = "*Available Commands:*\n• `!add task [description]` - Add a new task\n• `!list` - Show pending tasks\n• `!complete [task_id]` - Mark task as complete\n• `!status` - Show queue statistics\n• `!help` - Show this help message";

/// Renders a template against a serializable context.
pub(crate) fn render<S>(template: &str, context: S) -> Result<String, minijinja::Error>
where
    S: Serialize,
{
    let environment = Environment::new();
    environment.render_str(template, context)
}

/// Reply for a task created through chat.
#[must_use]
pub fn task_added(id: TaskId, title: &str) -> String {
    format!("✅ Added task #{id}: {title}")
}

/// Reply for a successful `!complete`.
#[must_use]
pub fn task_completed(id: TaskId) -> String {
    format!("✅ Marked task #{id} as completed!")
}

/// Reply when the targeted task does not exist.
#[must_use]
pub fn task_not_found(id: TaskId) -> String {
    format!("❌ Could not find task #{id}")
}

/// Notification sent to a task's origin channel on completion or
/// cancellation.
#[must_use]
pub fn outcome_notice(task: &Task) -> String {
    format!(
        "✅ Task #{} '{}' has been {}",
        task.id(),
        task.title(),
        task.status().as_str()
    )
}

/// Reply for `!list`, capped at ten entries.
///
/// # Errors
///
/// Returns a template error when rendering fails.
pub fn pending_list(tasks: &[Task]) -> Result<String, minijinja::Error> {
    if tasks.is_empty() {
        return Ok("No pending tasks!".to_owned());
    }

    let items: Vec<Value> = tasks.iter().take(LIST_LIMIT).map(list_entry).collect();
    let mut context = Map::new();
    context.insert("items".to_owned(), Value::Array(items));
    render(PENDING_LIST_TEMPLATE, &context)
}

/// Reply for `!status`.
///
/// # Errors
///
/// Returns a template error when rendering fails.
pub fn status_report(stats: &QueueStats) -> Result<String, minijinja::Error> {
    render(STATUS_TEMPLATE, stats)
}

/// Reply for `!help`.
#[must_use]
pub const fn help_text() -> &'static str {
    HELP_TEXT
}

fn list_entry(task: &Task) -> Value {
    let mut entry = Map::new();
    entry.insert("id".to_owned(), Value::from(task.id().value()));
    entry.insert("title".to_owned(), Value::from(task.title()));
    entry.insert("priority".to_owned(), Value::from(task.priority().as_str()));
    Value::Object(entry)
}
