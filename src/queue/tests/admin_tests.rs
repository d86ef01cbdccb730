//! Administrative facade tests: validation and error classification.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{engine_with, reference_instant};
use crate::queue::adapters::memory::{InMemoryTaskStore, RecordingNotifier};
use crate::queue::domain::{Priority, TaskId, TaskStatus};
use crate::queue::services::{AdminService, ApiError, CreateTaskPayload};

type TestAdmin = AdminService<InMemoryTaskStore, RecordingNotifier, super::FixedClock>;

#[fixture]
fn admin() -> TestAdmin {
    AdminService::new(engine_with(
        Arc::new(InMemoryTaskStore::new()),
        Arc::new(RecordingNotifier::new()),
        reference_instant(),
    ))
}

fn payload(title: &str) -> CreateTaskPayload {
    CreateTaskPayload {
        title: Some(title.to_owned()),
        ..CreateTaskPayload::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_full_payload_persists_every_field(admin: TestAdmin) {
    let request = CreateTaskPayload {
        title: Some("Quarterly audit".to_owned()),
        description: Some("Review access grants".to_owned()),
        priority: Some("high".to_owned()),
        assignee: Some("alice".to_owned()),
        due_date: Some("2024-10-01".to_owned()),
        user: Some("frank".to_owned()),
    };

    let task = admin.create_task(request).await.expect("creation succeeds");
    assert_eq!(task.title(), "Quarterly audit");
    assert_eq!(task.priority(), Priority::High);
    assert_eq!(task.assignee(), Some("alice"));
    assert_eq!(task.origin_user(), Some("frank"));
    assert_eq!(
        task.due_date().map(|d| d.to_string()),
        Some("2024-10-01".to_owned())
    );
}

#[rstest]
#[case(CreateTaskPayload::default())]
#[case(payload("   "))]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_title_is_a_bad_request(
    admin: TestAdmin,
    #[case] request: CreateTaskPayload,
) {
    let result = admin.create_task(request).await;
    let Err(err) = result else {
        panic!("missing title must be rejected");
    };
    assert_eq!(err, ApiError::BadRequest("title is required".to_owned()));
    assert_eq!(err.status_code(), 400);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_unknown_priority_is_a_bad_request(admin: TestAdmin) {
    let mut request = payload("tidy backlog");
    request.priority = Some("urgent".to_owned());

    let result = admin.create_task(request).await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_malformed_due_date_is_a_bad_request(admin: TestAdmin) {
    let mut request = payload("tidy backlog");
    request.due_date = Some("01/10/2024".to_owned());

    let result = admin.create_task(request).await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_maps_to_not_found(admin: TestAdmin) {
    let result = admin.get_task(TaskId::from_i64(404)).await;
    let Err(err) = result else {
        panic!("unknown id must be rejected");
    };
    assert_eq!(err.status_code(), 404);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_with_unknown_status_filter_is_a_bad_request(admin: TestAdmin) {
    let result = admin.list_tasks(Some("archived")).await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_round_trips_through_the_facade(admin: TestAdmin) {
    let created = admin
        .create_task(payload("cycle secrets"))
        .await
        .expect("creation succeeds");

    let updated = admin
        .update_status(created.id(), "in_progress")
        .await
        .expect("update succeeds");
    assert_eq!(updated.status(), TaskStatus::InProgress);

    let filtered = admin
        .list_tasks(Some("in_progress"))
        .await
        .expect("listing succeeds");
    assert_eq!(filtered.len(), 1);

    let missing = admin
        .update_status(TaskId::from_i64(999), "completed")
        .await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_requires_an_existing_task(admin: TestAdmin) {
    let missing = admin.history(TaskId::from_i64(12)).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));

    let created = admin
        .create_task(payload("publish changelog"))
        .await
        .expect("creation succeeds");
    admin
        .update_status(created.id(), "completed")
        .await
        .expect("update succeeds");

    let history = admin.history(created.id()).await.expect("history succeeds");
    let actions: Vec<&str> = history.iter().map(|record| record.action.as_str()).collect();
    assert_eq!(actions, vec!["status_changed_to_completed", "created"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_reflect_facade_activity(admin: TestAdmin) {
    admin
        .create_task(payload("one"))
        .await
        .expect("creation succeeds");
    admin
        .create_task(payload("two"))
        .await
        .expect("creation succeeds");

    let stats = admin.stats().await.expect("stats succeed");
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.total, 2);
}
