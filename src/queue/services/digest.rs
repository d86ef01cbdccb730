//! Daily summary and overdue alert composition.
//!
//! Pure aggregation and formatting; broadcasting is orchestrated by the
//! engine.

use serde_json::{Map, Value};

use super::replies::render;
use crate::queue::domain::{QueueStats, Task};

/// Upper bound on overdue entries listed in a digest.
const DIGEST_LIMIT: usize = 5;

const DAILY_SUMMARY_TEMPLATE: &str = "📅 *Daily Queue Summary*\n\n*Statistics:*\n• Pending Tasks: {{ pending }}\n• In Progress: {{ in_progress }}\n• Completed Today: {{ completed_today }}\n\n*Overdue Tasks:* {{ overdue_count }}{% if overdue %}\n{% endif %}{% for item in overdue %}\n• #{{ item.id }}: {{ item.title }} (Due: {{ item.due_date }}){% endfor %}";

const OVERDUE_ALERT_TEMPLATE: &str = "⚠️ *Overdue Tasks Alert*\nThere are {{ count }} overdue tasks:\n{% for item in items %}• #{{ item.id }}: {{ item.title }} (Due: {{ item.due_date }})\n{% endfor %}{% if remainder > 0 %}... and {{ remainder }} more{% endif %}";

/// Renders the daily digest from a stats snapshot and the overdue list.
///
/// # Errors
///
/// Returns a template error when rendering fails.
pub fn render_daily_summary(
    stats: &QueueStats,
    overdue: &[Task],
) -> Result<String, minijinja::Error> {
    let mut context = Map::new();
    context.insert("pending".to_owned(), Value::from(stats.pending));
    context.insert("in_progress".to_owned(), Value::from(stats.in_progress));
    context.insert(
        "completed_today".to_owned(),
        Value::from(stats.completed_today),
    );
    context.insert("overdue_count".to_owned(), Value::from(overdue.len()));
    context.insert(
        "overdue".to_owned(),
        Value::Array(overdue.iter().take(DIGEST_LIMIT).map(overdue_entry).collect()),
    );
    render(DAILY_SUMMARY_TEMPLATE, &context)
}

/// Renders the overdue alert; `None` when nothing is overdue.
///
/// # Errors
///
/// Returns a template error when rendering fails.
pub fn render_overdue_alert(overdue: &[Task]) -> Result<Option<String>, minijinja::Error> {
    if overdue.is_empty() {
        return Ok(None);
    }

    let remainder = overdue.len().saturating_sub(DIGEST_LIMIT);
    let mut context = Map::new();
    context.insert("count".to_owned(), Value::from(overdue.len()));
    context.insert(
        "items".to_owned(),
        Value::Array(overdue.iter().take(DIGEST_LIMIT).map(overdue_entry).collect()),
    );
    context.insert("remainder".to_owned(), Value::from(remainder));
    render(OVERDUE_ALERT_TEMPLATE, &context).map(Some)
}

fn overdue_entry(task: &Task) -> Value {
    let due = task
        .due_date()
        .map_or_else(|| "-".to_owned(), |date| date.format("%Y-%m-%d").to_string());
    let mut entry = Map::new();
    entry.insert("id".to_owned(), Value::from(task.id().value()));
    entry.insert("title".to_owned(), Value::from(task.title()));
    entry.insert("due_date".to_owned(), Value::from(due));
    Value::Object(entry)
}
