//! Queue-ordering comparator tests.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use rstest::rstest;

use super::reference_instant;
use crate::queue::domain::{NewTask, Priority, Task, TaskId, queue_order};

fn task(id: i64, priority: Priority, due: Option<NaiveDate>) -> Task {
    let mut new_task = NewTask::with_title(format!("task {id}"));
    new_task.priority = priority;
    new_task.due_date = due;
    Task::from_new(TaskId::from_i64(id), new_task, reference_instant())
}

#[rstest]
fn higher_urgency_sorts_first_regardless_of_due_date() {
    let soon = reference_instant().date_naive();
    let critical = task(9, Priority::Critical, None);
    let low = task(1, Priority::Low, Some(soon));

    assert_eq!(queue_order(&critical, &low), Ordering::Less);
}

#[rstest]
fn within_a_priority_earlier_due_date_sorts_first() {
    let today = reference_instant().date_naive();
    let earlier = task(2, Priority::Medium, Some(today - Duration::days(2)));
    let later = task(1, Priority::Medium, Some(today));

    assert_eq!(queue_order(&earlier, &later), Ordering::Less);
}

#[rstest]
fn absent_due_date_sorts_after_any_deadline() {
    let today = reference_instant().date_naive();
    let dated = task(5, Priority::Medium, Some(today + Duration::days(30)));
    let undated = task(1, Priority::Medium, None);

    assert_eq!(queue_order(&dated, &undated), Ordering::Less);
}

#[rstest]
fn id_breaks_remaining_ties_making_the_order_total() {
    let a = task(1, Priority::High, None);
    let b = task(2, Priority::High, None);

    assert_eq!(queue_order(&a, &b), Ordering::Less);
    assert_eq!(queue_order(&b, &a), Ordering::Greater);
    assert_eq!(queue_order(&a, &a), Ordering::Equal);
}

#[rstest]
fn sorting_is_deterministic_for_any_input_permutation() {
    let today = reference_instant().date_naive();
    let tasks = [
        task(4, Priority::Low, None),
        task(3, Priority::Critical, Some(today)),
        task(2, Priority::Medium, Some(today - Duration::days(1))),
        task(1, Priority::Medium, None),
        task(5, Priority::Critical, Some(today)),
    ];

    let mut forward = tasks.to_vec();
    forward.sort_by(queue_order);
    let mut reversed: Vec<_> = tasks.iter().rev().cloned().collect();
    reversed.sort_by(queue_order);

    assert_eq!(forward, reversed);
    let ids: Vec<i64> = forward.iter().map(|t| t.id().value()).collect();
    assert_eq!(ids, vec![3, 5, 2, 1, 4]);

    // Re-sorting an already sorted list must not shuffle equal-priority
    // neighbours.
    let mut again = forward.clone();
    again.sort_by(queue_order);
    assert_eq!(again, forward);
}
