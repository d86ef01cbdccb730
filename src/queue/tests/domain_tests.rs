//! Domain-level tests for lifecycle, parsing, and overdue rules.

use chrono::{Duration, NaiveDate};
use rstest::rstest;

use super::reference_instant;
use crate::queue::domain::{
    ChannelName, NewTask, Priority, QueueDomainError, Task, TaskId, TaskStatus,
    status_change_action,
};

fn task_with_due(due: Option<NaiveDate>, status: TaskStatus) -> Task {
    let now = reference_instant();
    let mut new_task = NewTask::with_title("write minutes");
    new_task.due_date = due;
    let mut task = Task::from_new(TaskId::from_i64(1), new_task, now);
    task.apply_status(status, now);
    task
}

#[rstest]
#[case("pending", TaskStatus::Pending)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("Completed", TaskStatus::Completed)]
#[case("  cancelled  ", TaskStatus::Cancelled)]
fn status_parses_case_insensitively(#[case] input: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(input), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_value() {
    assert!(TaskStatus::try_from("done").is_err());
}

#[rstest]
#[case(Priority::Critical, 1)]
#[case(Priority::High, 2)]
#[case(Priority::Medium, 3)]
#[case(Priority::Low, 4)]
fn priority_rank_orders_urgent_first(#[case] priority: Priority, #[case] rank: u8) {
    assert_eq!(priority.rank(), rank);
    assert_eq!(Priority::try_from(priority.as_str()), Ok(priority));
}

#[rstest]
fn new_task_starts_pending_with_equal_timestamps() {
    let now = reference_instant();
    let task = Task::from_new(TaskId::from_i64(7), NewTask::with_title("triage inbox"), now);

    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.priority(), Priority::Medium);
    assert_eq!(task.created_at(), task.updated_at());
    assert_eq!(task.completed_at(), None);
}

#[rstest]
fn completing_sets_completed_at_and_reopening_clears_it() {
    let created = reference_instant();
    let later = created + Duration::hours(3);
    let mut task = Task::from_new(TaskId::from_i64(3), NewTask::with_title("ship report"), created);

    task.apply_status(TaskStatus::Completed, later);
    assert_eq!(task.completed_at(), Some(later));
    assert_eq!(task.updated_at(), later);
    assert!(task.updated_at() >= task.created_at());

    task.apply_status(TaskStatus::InProgress, later + Duration::hours(1));
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.status(), TaskStatus::InProgress);
}

#[rstest]
#[case(TaskStatus::Pending, true)]
#[case(TaskStatus::InProgress, true)]
#[case(TaskStatus::Completed, false)]
#[case(TaskStatus::Cancelled, false)]
fn only_open_tasks_can_be_overdue(#[case] status: TaskStatus, #[case] expected: bool) {
    let today = reference_instant().date_naive();
    let yesterday = today - Duration::days(1);
    let task = task_with_due(Some(yesterday), status);

    assert_eq!(task.is_overdue(today), expected);
}

#[rstest]
fn task_due_today_or_without_deadline_is_not_overdue() {
    let today = reference_instant().date_naive();

    assert!(!task_with_due(Some(today), TaskStatus::Pending).is_overdue(today));
    assert!(!task_with_due(None, TaskStatus::Pending).is_overdue(today));
}

#[rstest]
fn status_change_action_embeds_canonical_status() {
    assert_eq!(
        status_change_action(TaskStatus::Completed),
        "status_changed_to_completed"
    );
    assert_eq!(
        status_change_action(TaskStatus::InProgress),
        "status_changed_to_in_progress"
    );
}

#[rstest]
fn channel_name_rejects_blank_values() {
    assert_eq!(
        ChannelName::new("   "),
        Err(QueueDomainError::EmptyChannelName)
    );
    let name = ChannelName::new("  ops  ").expect("trimmed name is valid");
    assert_eq!(name.as_str(), "ops");
}
