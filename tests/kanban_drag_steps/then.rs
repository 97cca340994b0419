//! Then steps for kanban drag-and-drop BDD scenarios.

use super::world::{KanbanWorld, parse_column, parse_task_id};
use rstest_bdd_macros::then;
use taskforge::board::services::{BoardSessionError, DragError, DragState};

#[then(r#"column "{column}" lists "{ids}""#)]
fn column_lists(world: &KanbanWorld, column: String, ids: String) -> Result<(), eyre::Report> {
    let column_id = parse_column(&column)?;
    let board = world.board()?;
    let actual: Vec<&str> = board
        .column(&column_id)
        .ok_or_else(|| eyre::eyre!("column {column} is not on the board"))?
        .task_ids()
        .iter()
        .map(|id| id.as_str())
        .collect();
    let expected: Vec<&str> = ids.split(',').collect();
    eyre::ensure!(
        actual == expected,
        "expected column {column} to list {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the backend recorded status "{status}" for task "{task}""#)]
fn backend_recorded_status(
    world: &KanbanWorld,
    status: String,
    task: String,
) -> Result<(), eyre::Report> {
    let expected = (parse_task_id(&task)?, parse_column(&status)?);
    let updates = world
        .gateway
        .status_updates()
        .map_err(|err| eyre::eyre!("read backend updates: {err}"))?;
    eyre::ensure!(
        updates.contains(&expected),
        "expected backend update {expected:?}, found {updates:?}"
    );
    Ok(())
}

#[then("the backend recorded no status updates")]
fn backend_recorded_nothing(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let updates = world
        .gateway
        .status_updates()
        .map_err(|err| eyre::eyre!("read backend updates: {err}"))?;
    eyre::ensure!(updates.is_empty(), "expected no updates, found {updates:?}");
    Ok(())
}

#[then("the drop fails with a sync error")]
fn drop_fails_with_sync_error(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_drop
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drop result"))?;
    if !matches!(
        result,
        Err(BoardSessionError::Drag(DragError::SyncFailed { .. }))
    ) {
        return Err(eyre::eyre!("expected SyncFailed error, got {result:?}"));
    }
    Ok(())
}

#[then("the drag is rejected as concurrent")]
fn drag_is_rejected(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_begin
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drag result"))?;
    if !matches!(
        result,
        Err(BoardSessionError::Drag(DragError::ConcurrentDragRejected { .. }))
    ) {
        return Err(eyre::eyre!(
            "expected ConcurrentDragRejected error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the board matches its state before the drag")]
fn board_matches_pre_drag_state(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let before = world
        .board_before_drag
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing pre-drag board"))?;
    eyre::ensure!(
        world.board()? == before,
        "board changed after the drag"
    );
    Ok(())
}

#[then("the first drop still awaits the backend")]
fn first_drop_awaits_backend(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let controller = world
        .controller
        .as_ref()
        .ok_or_else(|| eyre::eyre!("board has not been loaded for local drag handling"))?;
    eyre::ensure!(
        controller.state() == DragState::Committing && controller.pending_sync().is_some(),
        "expected a pending sync, controller is {}",
        controller.state()
    );
    Ok(())
}
