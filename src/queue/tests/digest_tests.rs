//! Daily summary, overdue alert, and reply formatting tests.

use std::sync::Arc;

use chrono::Duration;
use rstest::rstest;

use super::{channel, engine_with, reference_instant};
use crate::queue::adapters::memory::{InMemoryTaskStore, RecordingNotifier};
use crate::queue::domain::{NewTask, Priority, QueueStats, Task, TaskId};
use crate::queue::services::CreateTaskRequest;
use crate::queue::services::digest::{render_daily_summary, render_overdue_alert};
use crate::queue::services::replies;

fn overdue_task(id: i64, title: &str, days_late: i64) -> Task {
    let now = reference_instant();
    let mut new_task = NewTask::with_title(title);
    new_task.due_date = Some(now.date_naive() - Duration::days(days_late));
    Task::from_new(TaskId::from_i64(id), new_task, now)
}

#[rstest]
fn daily_summary_reports_stats_and_overdue_entries() {
    let stats = QueueStats {
        pending: 3,
        in_progress: 1,
        completed: 5,
        cancelled: 0,
        completed_today: 2,
        total: 9,
    };
    let overdue = vec![overdue_task(4, "renew certificates", 2)];

    let summary = render_daily_summary(&stats, &overdue).expect("summary renders");
    assert!(summary.contains("Daily Queue Summary"));
    assert!(summary.contains("Pending Tasks: 3"));
    assert!(summary.contains("In Progress: 1"));
    assert!(summary.contains("Completed Today: 2"));
    assert!(summary.contains("*Overdue Tasks:* 1"));
    assert!(summary.contains("#4: renew certificates"));
}

#[rstest]
fn overdue_alert_is_suppressed_when_nothing_is_overdue() {
    let alert = render_overdue_alert(&[]).expect("render succeeds");
    assert_eq!(alert, None);
}

#[rstest]
fn overdue_alert_caps_entries_and_counts_the_remainder() {
    let overdue: Vec<Task> = (1..=7)
        .map(|id| overdue_task(id, &format!("task {id}"), 1))
        .collect();

    let alert = render_overdue_alert(&overdue)
        .expect("render succeeds")
        .expect("alert is present");
    assert!(alert.contains("There are 7 overdue tasks"));
    assert_eq!(alert.matches("• #").count(), 5);
    assert!(alert.contains("... and 2 more"));
}

#[rstest]
fn pending_list_reply_handles_the_empty_queue() {
    let reply = replies::pending_list(&[]).expect("render succeeds");
    assert_eq!(reply, "No pending tasks!");
}

#[rstest]
fn status_reply_includes_every_headline_count() {
    let stats = QueueStats {
        pending: 2,
        in_progress: 1,
        completed: 4,
        cancelled: 1,
        completed_today: 3,
        total: 8,
    };

    let reply = replies::status_report(&stats).expect("render succeeds");
    assert!(reply.contains("Pending: 2"));
    assert!(reply.contains("In Progress: 1"));
    assert!(reply.contains("Completed Today: 3"));
    assert!(reply.contains("Total Items: 8"));
}

#[rstest]
fn help_reply_documents_every_command() {
    let help = replies::help_text();
    for keyword in ["!add task", "!list", "!complete", "!status", "!help"] {
        assert!(help.contains(keyword), "help must mention {keyword}");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_broadcast_reaches_every_channel() {
    let now = reference_instant();
    let notifier = Arc::new(RecordingNotifier::new());
    let engine = engine_with(Arc::new(InMemoryTaskStore::new()), Arc::clone(&notifier), now);
    let channels = [channel("ops"), channel("support")];

    engine
        .send_daily_summary(&channels)
        .await
        .expect("broadcast should succeed");

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|(_, text)| text.contains("Daily Queue Summary")));
    let targets: Vec<&str> = sent.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(targets, vec!["ops", "support"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_alert_broadcast_reports_whether_it_fired() {
    let now = reference_instant();
    let notifier = Arc::new(RecordingNotifier::new());
    let engine = engine_with(Arc::new(InMemoryTaskStore::new()), Arc::clone(&notifier), now);
    let channels = [channel("ops")];

    let fired = engine
        .send_overdue_alert(&channels)
        .await
        .expect("broadcast should succeed");
    assert!(!fired);
    assert!(notifier.sent().is_empty());

    engine
        .create_task(
            CreateTaskRequest::new("escalate incident")
                .with_priority(Priority::Critical)
                .with_due_date(now.date_naive() - Duration::days(1)),
        )
        .await
        .expect("task creation should succeed");

    let fired = engine
        .send_overdue_alert(&channels)
        .await
        .expect("broadcast should succeed");
    assert!(fired);
    assert!(notifier
        .sent()
        .iter()
        .any(|(_, text)| text.contains("Overdue Tasks Alert")));
}
