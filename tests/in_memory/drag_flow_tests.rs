//! End-to-end drag-and-drop flows against the in-memory backend.

use super::helpers::{column, ids_in, open_session, project_id, seeded_gateway, task_id};
use rstest::rstest;
use taskforge::board::{
    domain::ProjectId,
    ports::SyncGatewayError,
    services::{BoardSessionError, DragError, DragGesture, DragState, DropOutcome, DropTarget},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn persisted_move_survives_refresh(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "todo"), ("T2", "todo")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");

    session
        .begin_drag(DragGesture::new(task_id("T1"), column("todo"), 0))
        .expect("drag starts");
    let outcome = session
        .drop_task(&DropTarget::Position {
            column: column("done"),
            index: 0,
        })
        .await
        .expect("drop persists");
    assert!(matches!(outcome, DropOutcome::PendingSync(_)));

    session.refresh().await.expect("refresh succeeds");

    assert_eq!(ids_in(session.store(), "todo"), vec!["T2"]);
    assert_eq!(ids_in(session.store(), "done"), vec!["T1"]);
    session
        .store()
        .verify_partition()
        .expect("partition holds");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_is_reverted_and_observed(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "todo"), ("T2", "review")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");
    let before = session.board().clone();
    let mut changes = session.subscribe();
    gateway
        .fail_next_write(SyncGatewayError::Rejected {
            status: 409,
            message: "task is locked".to_owned(),
        })
        .expect("queue succeeds");

    session
        .begin_drag(DragGesture::new(task_id("T2"), column("review"), 0))
        .expect("drag starts");
    let result = session
        .drop_task(&DropTarget::OnTask(task_id("T1")))
        .await;

    assert!(matches!(
        result,
        Err(BoardSessionError::Drag(DragError::SyncFailed { .. }))
    ));
    assert_eq!(session.board(), &before);
    assert_eq!(&*changes.borrow_and_update(), &before);
    assert_eq!(session.drag_state(), DragState::Idle);
    assert!(gateway.status_updates().expect("read succeeds").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_column_order_is_local_only(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "todo"), ("T2", "todo"), ("T3", "todo")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");

    session
        .begin_drag(DragGesture::new(task_id("T3"), column("todo"), 2))
        .expect("drag starts");
    let outcome = session
        .drop_task(&DropTarget::OnTask(task_id("T1")))
        .await
        .expect("drop applies");

    assert_eq!(outcome, DropOutcome::Reordered);
    assert_eq!(ids_in(session.store(), "todo"), vec!["T3", "T1", "T2"]);
    assert!(gateway.status_updates().expect("read succeeds").is_empty());

    session.refresh().await.expect("refresh succeeds");
    assert_eq!(ids_in(session.store(), "todo"), vec!["T1", "T2", "T3"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn gesture_after_revert_starts_cleanly(project_id: ProjectId) {
    let gateway = seeded_gateway(&project_id, &[("T1", "todo")]);
    let mut session = open_session(&project_id, &gateway)
        .await
        .expect("session opens");
    gateway.set_offline(true).expect("toggle succeeds");

    session
        .begin_drag(DragGesture::new(task_id("T1"), column("todo"), 0))
        .expect("drag starts");
    session
        .drop_task(&DropTarget::ColumnEnd(column("done")))
        .await
        .expect_err("offline backend rejects the move");

    gateway.set_offline(false).expect("toggle succeeds");
    session
        .begin_drag(DragGesture::new(task_id("T1"), column("todo"), 0))
        .expect("drag starts after revert");
    session
        .drop_task(&DropTarget::ColumnEnd(column("done")))
        .await
        .expect("drop persists");

    assert_eq!(ids_in(session.store(), "done"), vec!["T1"]);
    assert_eq!(
        gateway.status_updates().expect("read succeeds"),
        vec![(task_id("T1"), column("done"))]
    );
}
