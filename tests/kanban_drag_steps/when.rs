//! When steps for kanban drag-and-drop BDD scenarios.

use super::world::{KanbanWorld, parse_column, parse_task_id, run_async};
use rstest_bdd_macros::when;
use taskforge::board::services::{BoardSessionError, DragGesture, DropTarget};

#[when(
    r#"task "{task}" is dragged from "{from}" position {from_index:usize} to "{to}" position {to_index:usize}"#
)]
fn task_is_dragged(
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
    let session = world.session_mut()?;
    let before = session.board().clone();
    let result = match session.begin_drag(gesture) {
        Ok(()) => run_async(session.drop_task(&target)),
        Err(err) => Err(err),
    };
    world.board_before_drag = Some(before);
    world.last_drop = Some(result);
    Ok(())
}

#[when(r#"a drag of task "{task}" from "{from}" position {index:usize} begins"#)]
fn drag_begins(
    world: &mut KanbanWorld,
    task: String,
    from: String,
    index: usize,
) -> Result<(), eyre::Report> {
    let gesture = DragGesture::new(parse_task_id(&task)?, parse_column(&from)?, index);
    let result = match world.controller.as_mut() {
        Some(controller) => controller
            .begin_drag(gesture)
            .map_err(BoardSessionError::from),
        None => world.session_mut()?.begin_drag(gesture),
    };
    world.last_begin = Some(result);
    Ok(())
}

#[when(r#"the status of task "{task}" is changed to "{status}""#)]
fn status_is_changed(
    world: &mut KanbanWorld,
    task: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(&task)?;
    let status_id = parse_column(&status)?;
    let session = world.session_mut()?;
    run_async(session.change_status(&task_id, &status_id))
        .map_err(|err| eyre::eyre!("status change failed: {err}"))?;
    Ok(())
}
