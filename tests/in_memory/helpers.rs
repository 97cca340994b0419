//! Shared helpers for in-memory board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskforge::board::{
    adapters::memory::InMemorySyncGateway,
    domain::{BoardLayout, ColumnId, ProjectId, Task, TaskId, TaskStore},
    services::{BoardSession, BoardSessionResult},
};

/// Session type used by the in-memory tests.
pub type TestSession = BoardSession<InMemorySyncGateway, DefaultClock>;

/// Provides the project identifier shared by every test.
#[fixture]
pub fn project_id() -> ProjectId {
    ProjectId::new("launch-plan").expect("valid project id")
}

/// Parses a column identifier.
pub fn column(value: &str) -> ColumnId {
    ColumnId::new(value).expect("valid column id")
}

/// Parses a task identifier.
pub fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

/// Builds a task titled after its id.
pub fn task(id: &str, status: &str) -> Task {
    Task::new(task_id(id), format!("Task {id}"), column(status))
}

/// Creates a gateway holding `(id, status)` tasks for `project_id`.
pub fn seeded_gateway(
    project_id: &ProjectId,
    tasks: &[(&str, &str)],
) -> Arc<InMemorySyncGateway> {
    let gateway = InMemorySyncGateway::new();
    gateway
        .seed(project_id, tasks.iter().map(|(id, status)| task(id, status)))
        .expect("seed succeeds");
    Arc::new(gateway)
}

/// Opens a session on the standard layout.
///
/// # Errors
///
/// Returns the session error when the initial fetch fails.
pub async fn open_session(
    project_id: &ProjectId,
    gateway: &Arc<InMemorySyncGateway>,
) -> BoardSessionResult<TestSession> {
    BoardSession::open(
        project_id.clone(),
        BoardLayout::standard(),
        Arc::clone(gateway),
        Arc::new(DefaultClock),
    )
    .await
}

/// Lists the ids in a column, top to bottom.
pub fn ids_in(store: &TaskStore, column_id: &str) -> Vec<String> {
    store
        .board()
        .column(&column(column_id))
        .map(|col| {
            col.task_ids()
                .iter()
                .map(|id| id.as_str().to_owned())
                .collect()
        })
        .unwrap_or_default()
}
