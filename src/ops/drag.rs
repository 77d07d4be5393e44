use crate::model::task::Status;
use crate::store::BoardStore;

/// Drag-and-drop state machine: either nothing is in flight, or one
/// task is being dragged. Hovering a drop target never mutates
/// anything; only a drop commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(String),
}

impl DragState {
    /// Begin dragging a task. Always allowed; an in-flight drag is
    /// simply overwritten.
    pub fn drag_start(&mut self, task_id: &str) {
        *self = DragState::Dragging(task_id.to_string());
    }

    /// Hover query for drop targets. Read-only.
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn dragging(&self) -> Option<&str> {
        match self {
            DragState::Dragging(id) => Some(id),
            DragState::Idle => None,
        }
    }

    /// Drop onto the column with the given status: commits the move on
    /// the store and returns to idle. A drop with no drag in flight is
    /// a no-op.
    pub fn drop_on(&mut self, store: &mut BoardStore, status: Status) {
        if let DragState::Dragging(task_id) = std::mem::take(self) {
            store.move_task(&task_id, status);
        }
    }

    /// Abandon the drag (pointer released outside any target) so the
    /// reducer never sticks in `Dragging`.
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }
}
