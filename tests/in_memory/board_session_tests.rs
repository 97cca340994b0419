//! In-memory integration tests for board session operations.

use super::helpers::{column, ids_in, open_session, project_id, seeded_gateway, task_id};
use chrono::{Duration, Utc};
use rstest::rstest;
use taskforge::board::{
    domain::{Priority, ProjectId, TaskDraft},
    services::BoardSessionError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_backend_status_lands_in_first_column(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "blocked"), ("T2", "review")]);

    let session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");

    assert_eq!(ids_in(session.store(), "todo"), vec!["T1"]);
    assert_eq!(ids_in(session.store(), "review"), vec!["T2"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_rendered_with_its_details(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "todo")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");
    let yesterday = Utc::now() - Duration::days(1);

    let draft = TaskDraft::new("Renew certificates")
        .expect("valid draft")
        .with_priority(Priority::High)
        .with_due_date(yesterday);
    let created = session.create_task(draft).await.expect("task created");

    let view = session.view();
    let todo = view.column(&column("todo")).expect("todo column");
    assert_eq!(todo.len(), 2);
    assert_eq!(todo.cards().last().map(|card| card.id()), Some(created.id()));
    assert_eq!(todo.count_with_priority(Priority::High), 1);
    assert_eq!(todo.overdue_count(Utc::now()), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_then_delete_round_trip(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "todo"), ("T2", "done")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");

    session
        .change_status(&task_id("T1"), &column("done"))
        .await
        .expect("status persists");
    session
        .delete_task(&task_id("T2"))
        .await
        .expect("delete succeeds");
    session.refresh().await.expect("refresh succeeds");

    assert!(ids_in(session.store(), "todo").is_empty());
    assert_eq!(ids_in(session.store(), "done"), vec!["T1"]);
    assert_eq!(session.store().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_reach_backend_and_board(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "review")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");

    session
        .add_comment(&task_id("T1"), "grace", "Approved")
        .await
        .expect("comment added");
    session.refresh().await.expect("refresh succeeds");

    let task = session.store().task(&task_id("T1")).expect("task stored");
    let texts: Vec<&str> = task.comments().iter().map(|c| c.text()).collect();
    assert_eq!(texts, vec!["Approved"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offline_status_change_is_rolled_back(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "todo"), ("T2", "todo")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");
    gateway.set_offline(true).expect("toggle succeeds");

    let result = session
        .change_status(&task_id("T1"), &column("in-progress"))
        .await;

    assert!(matches!(
        result,
        Err(BoardSessionError::StatusSyncFailed { .. })
    ));
    assert_eq!(ids_in(session.store(), "todo"), vec!["T1", "T2"]);
    assert!(ids_in(session.store(), "in-progress").is_empty());
}
