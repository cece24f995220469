//! Reorder Engine
//!
//! Pure drag-end handling: `(board, gesture) -> (board, payload)`. Nothing
//! here touches the network or the store, so every move can be checked
//! without a rendering harness.

use board_dragdrop::{DropEvent, DropTarget};

use crate::models::{BoardState, ColumnId, ReorderPayload, TaskId};

/// Where a task was released: on a task, or on a column body
pub type BoardDropTarget = DropTarget<TaskId, ColumnId>;

/// A finished drag as reported by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    pub active: TaskId,
    /// `None` when released outside any droppable area
    pub over: Option<BoardDropTarget>,
}

impl DragGesture {
    pub fn new(active: impl Into<TaskId>, over: Option<BoardDropTarget>) -> Self {
        Self {
            active: active.into(),
            over,
        }
    }

    pub fn onto_task(active: impl Into<TaskId>, over: impl Into<TaskId>) -> Self {
        Self::new(active, Some(DropTarget::Item(over.into())))
    }

    pub fn onto_column(active: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self::new(active, Some(DropTarget::Container(column.into())))
    }
}

impl From<DropEvent<TaskId, ColumnId>> for DragGesture {
    fn from(drop: DropEvent<TaskId, ColumnId>) -> Self {
        Self {
            active: drop.dragged,
            over: Some(drop.target),
        }
    }
}

/// New board plus the wire message describing it
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan {
    pub state: BoardState,
    pub payload: ReorderPayload,
    pub source: ColumnId,
    pub target: ColumnId,
}

impl ReorderPlan {
    pub fn is_cross_column(&self) -> bool {
        self.source != self.target
    }
}

/// Insertion point in the target column
enum Slot {
    /// Index of the task the drag was released on
    OnTask(usize),
    End,
}

/// Compute the board after a drag. Returns `None` when the drop changes
/// nothing: no target, unknown task or column, or the task released on
/// its own position.
pub fn plan_reorder(state: &BoardState, gesture: &DragGesture) -> Option<ReorderPlan> {
    let over = gesture.over.as_ref()?;
    let (source, source_idx) = state.locate_task(&gesture.active)?;
    let (target, slot) = match over {
        DropTarget::Item(over_id) => {
            let (column_id, idx) = state.locate_task(over_id)?;
            (column_id, Slot::OnTask(idx))
        }
        DropTarget::Container(column_id) => {
            state.column(column_id)?;
            (column_id.clone(), Slot::End)
        }
    };

    let mut next = state.clone();
    if source == target {
        let tasks = &mut next.column_mut(&source)?.tasks;
        let dest = match slot {
            Slot::OnTask(idx) => idx,
            Slot::End => tasks.len() - 1,
        };
        if dest == source_idx {
            return None;
        }
        array_move(tasks, source_idx, dest);
    } else {
        let dragged = next.column_mut(&source)?.tasks.remove(source_idx);
        let tasks = &mut next.column_mut(&target)?.tasks;
        let at = match slot {
            Slot::OnTask(idx) => idx + 1,
            Slot::End => tasks.len(),
        };
        let mut dragged = dragged;
        dragged.column_id = target.clone();
        tasks.insert(at, dragged);
    }

    let payload = next.to_payload();
    Some(ReorderPlan {
        state: next,
        payload,
        source,
        target,
    })
}

/// Move the element at `from` so it ends up at index `to`
fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}
