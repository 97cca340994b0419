//! Given steps for kanban drag-and-drop BDD scenarios.

use std::sync::Arc;

use super::world::{KanbanWorld, parse_column, parse_task_id, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskforge::board::{
    domain::{BoardLayout, Task, TaskStore},
    ports::{SyncGateway, SyncGatewayError},
    services::{BoardSession, DragGesture, DragReorderController, DropOutcome, DropTarget},
};

#[given(r#"the backend holds tasks "{ids}" in column "{status}""#)]
fn backend_holds_tasks(
    world: &mut KanbanWorld,
    ids: String,
    status: String,
) -> Result<(), eyre::Report> {
    let column = parse_column(&status)?;
    let tasks = ids
        .split(',')
        .map(|raw| -> Result<Task, eyre::Report> {
            let id = parse_task_id(raw)?;
            Ok(Task::new(id, format!("Task {raw}"), column.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    world
        .gateway
        .seed(&world.project_id, tasks)
        .wrap_err("seed backend tasks")?;
    Ok(())
}

#[given("the board is opened")]
fn board_is_opened(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    let session = run_async(BoardSession::open(
        world.project_id.clone(),
        BoardLayout::standard(),
        Arc::clone(&world.gateway),
        Arc::new(DefaultClock),
    ))
    .wrap_err("open board session")?;
    world.session = Some(session);
    Ok(())
}

#[given("the board is loaded for local drag handling")]
fn board_is_loaded_locally(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.gateway.fetch_tasks(&world.project_id))
        .wrap_err("fetch backend tasks")?;
    let mut store = TaskStore::new(BoardLayout::standard());
    store.load(tasks);
    world.controller = Some(DragReorderController::new(store));
    Ok(())
}

#[given(
    r#"task "{task}" was dropped from "{from}" position {from_index:usize} onto "{to}" position {to_index:usize} without settling"#
)]
fn task_was_dropped_without_settling(
    world: &mut KanbanWorld,
    task: String,
    from: String,
    from_index: usize,
    to: String,
    to_index: usize,
) -> Result<(), eyre::Report> {
    let gesture = DragGesture::new(parse_task_id(&task)?, parse_column(&from)?, from_index);
    let target = DropTarget::Position {
        column: parse_column(&to)?,
        index: to_index,
    };
    let controller = world.controller_mut()?;
    controller.begin_drag(gesture).wrap_err("start first drag")?;
    let outcome = controller.drop_on(&target).wrap_err("drop first task")?;
    eyre::ensure!(
        matches!(outcome, DropOutcome::PendingSync(_)),
        "expected the drop to await the backend, got {outcome:?}"
    );
    let committed = controller.store().board().clone();
    world.board_before_drag = Some(committed);
    Ok(())
}

#[given("the backend rejects the next write")]
fn backend_rejects_next_write(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    world
        .gateway
        .fail_next_write(SyncGatewayError::Rejected {
            status: 409,
            message: "conflicting update".to_owned(),
        })
        .wrap_err("queue backend failure")?;
    Ok(())
}

#[given(r#"task "{task}" is being dragged from "{from}" position {index:usize}"#)]
fn task_is_being_dragged(
    world: &mut KanbanWorld,
    task: String,
    from: String,
    index: usize,
) -> Result<(), eyre::Report> {
    let gesture = DragGesture::new(parse_task_id(&task)?, parse_column(&from)?, index);
    let session = world.session_mut()?;
    let before = session.board().clone();
    session.begin_drag(gesture).wrap_err("start scenario drag")?;
    world.board_before_drag = Some(before);
    Ok(())
}
