//! DragDrop State Machine
//!
//! Framework-free drag-and-drop for reordering a flat, rendered list.
//! Uses a movement threshold to distinguish click from drag.
//!
//! The controller only tracks display indices. Whoever renders the list
//! feeds it pointer events and applies the resulting [`DropAction`].

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Interaction state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// An entry is being dragged but no drop zone is under the pointer
    Dragging { source: usize },
    /// Pointer is over the drop zone of `target`
    DraggingOver { source: usize, target: usize },
}

/// Computed drop action: move the element at `from` so it ends up at `to`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropAction {
    pub from: usize,
    pub to: usize,
}

impl DropAction {
    /// Remove at `from`, reinsert at `to` (clamped to the end).
    /// Returns false and leaves the list alone if `from` is out of range.
    pub fn apply<T>(&self, list: &mut Vec<T>) -> bool {
        if self.from >= list.len() {
            return false;
        }
        let item = list.remove(self.from);
        let to = self.to.min(list.len());
        list.insert(to, item);
        true
    }
}

/// Press recorded on mousedown, before the threshold is crossed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingPress {
    index: usize,
    x: i32,
    y: i32,
}

/// Drag-and-drop controller
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    pending: Option<PendingPress>,
    drag_just_ended: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Begin dragging the entry at `index` of a list of `len` entries
    pub fn start_drag(&mut self, index: usize, len: usize) -> bool {
        if self.state != DragState::Idle || index >= len {
            return false;
        }
        self.pending = None;
        self.state = DragState::Dragging { source: index };
        tracing::debug!(source = index, "drag started");
        true
    }

    /// Pointer entered the drop zone of `target`. Visual only.
    pub fn hover(&mut self, target: usize) -> bool {
        match self.state {
            DragState::Dragging { source } | DragState::DraggingOver { source, .. } => {
                self.state = DragState::DraggingOver { source, target };
                true
            }
            DragState::Idle => false,
        }
    }

    /// Pointer left every drop zone
    pub fn leave(&mut self) -> bool {
        match self.state {
            DragState::DraggingOver { source, .. } => {
                self.state = DragState::Dragging { source };
                true
            }
            _ => false,
        }
    }

    /// Abort the drag (escape, or release outside any drop zone). Nothing
    /// moves, and the next click is not suppressed.
    pub fn cancel(&mut self) -> bool {
        self.pending = None;
        if self.state == DragState::Idle {
            return false;
        }
        tracing::debug!(state = ?self.state, "drag cancelled");
        self.state = DragState::Idle;
        true
    }

    /// Release over the current target of a list of `len` entries.
    ///
    /// Always returns to `Idle`. Yields an action only when the entry
    /// actually moves; dropping onto itself, or with no target, yields none.
    /// Targets past the end clamp to the last position.
    pub fn drop(&mut self, len: usize) -> Option<DropAction> {
        let state = self.state;
        if state == DragState::Idle {
            return None;
        }
        self.end_drag();

        let DragState::DraggingOver { source, target } = state else {
            return None;
        };
        if len == 0 || source >= len {
            return None;
        }

        let to = target.min(len - 1);
        if to == source {
            return None;
        }
        tracing::debug!(from = source, to, "drop");
        Some(DropAction { from: source, to })
    }

    /// Whether `index` is the entry being dragged
    pub fn is_source(&self, index: usize) -> bool {
        match self.state {
            DragState::Dragging { source } | DragState::DraggingOver { source, .. } => source == index,
            DragState::Idle => false,
        }
    }

    /// Whether `index` is the highlighted drop target
    pub fn is_target(&self, index: usize) -> bool {
        matches!(self.state, DragState::DraggingOver { target, .. } if target == index)
    }

    // ========================
    // Pointer gesture
    // ========================

    /// Mousedown on the entry at `index`: records a pending drag with position
    pub fn press(&mut self, index: usize, x: i32, y: i32) {
        if self.state == DragState::Idle {
            self.pending = Some(PendingPress { index, x, y });
        }
    }

    /// Mousemove: starts the pending drag once moved beyond the threshold
    pub fn pointer_moved(&mut self, x: i32, y: i32, len: usize) -> bool {
        let Some(press) = self.pending else {
            return false;
        };
        if self.state != DragState::Idle {
            return false;
        }

        let threshold = DRAG_THRESHOLD_PX.unsigned_abs();
        if x.abs_diff(press.x) > threshold || y.abs_diff(press.y) > threshold {
            return self.start_drag(press.index, len);
        }
        false
    }

    /// Mouseup: drops if a drag is active, otherwise just clears the press
    pub fn release(&mut self, len: usize) -> Option<DropAction> {
        self.pending = None;
        self.drop(len)
    }

    /// True once after a drag ended, so the click that follows can be ignored
    pub fn take_drag_just_ended(&mut self) -> bool {
        std::mem::take(&mut self.drag_just_ended)
    }

    fn end_drag(&mut self) {
        self.state = DragState::Idle;
        self.pending = None;
        self.drag_just_ended = true;
    }
}
