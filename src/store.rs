//! Editor Store
//!
//! Ties the drag-and-drop controller to the ordering model of one template.
//! Pointer events come in by display index; a completed drop becomes one
//! reorder of the model.

use checklist_backend::domain::{DomainError, DomainResult};
use checklist_dragdrop::{DragController, DragState, DropAction};

use crate::commands::ChecklistBackend;
use crate::display::{project, DisplayRow};
use crate::ordering::OrderingModel;

/// What a drop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag, no target, or dropped in place. Nothing was written.
    NoChange,
    /// The entry moved and the backing store accepted the new order
    Reordered(DropAction),
    /// The backing store rejected the new order; the list shows the authoritative order again
    Reverted(DomainError),
}

pub struct EditorStore<B> {
    model: OrderingModel<B>,
    drag: DragController,
    last_error: Option<DomainError>,
}

impl<B: ChecklistBackend> EditorStore<B> {
    /// Open the editor for a template
    pub async fn load(backend: B, template_id: u32) -> DomainResult<Self> {
        let model = OrderingModel::load(backend, template_id).await?;
        Ok(Self::new(model))
    }

    pub fn new(model: OrderingModel<B>) -> Self {
        Self {
            model,
            drag: DragController::new(),
            last_error: None,
        }
    }

    pub fn model(&self) -> &OrderingModel<B> {
        &self.model
    }

    /// Direct access for add, edit and delete
    pub fn model_mut(&mut self) -> &mut OrderingModel<B> {
        &mut self.model
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    // ========================
    // Drag transitions
    // ========================

    pub fn start_drag(&mut self, index: usize) -> bool {
        self.drag.start_drag(index, self.model.len())
    }

    pub fn hover(&mut self, target: usize) -> bool {
        self.drag.hover(target)
    }

    pub fn leave(&mut self) -> bool {
        self.drag.leave()
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    /// Finish the drag over the current target
    pub async fn drop(&mut self) -> DropOutcome {
        let action = self.drag.drop(self.model.len());
        self.apply(action).await
    }

    pub fn is_source(&self, index: usize) -> bool {
        self.drag.is_source(index)
    }

    pub fn is_target(&self, index: usize) -> bool {
        self.drag.is_target(index)
    }

    // ========================
    // Pointer gesture
    // ========================

    pub fn press(&mut self, index: usize, x: i32, y: i32) {
        self.drag.press(index, x, y);
    }

    pub fn pointer_moved(&mut self, x: i32, y: i32) -> bool {
        self.drag.pointer_moved(x, y, self.model.len())
    }

    pub async fn release(&mut self) -> DropOutcome {
        let action = self.drag.release(self.model.len());
        self.apply(action).await
    }

    /// True once right after a drag, so the trailing click can be ignored
    pub fn take_click_suppressed(&mut self) -> bool {
        self.drag.take_drag_just_ended()
    }

    // ========================
    // View
    // ========================

    /// Numbered rows with drag highlighting
    pub fn rows(&self) -> Vec<DisplayRow> {
        let mut rows = project(self.model.list_ordered());
        for (index, row) in rows.iter_mut().enumerate() {
            row.is_source = self.drag.is_source(index);
            row.is_target = self.drag.is_target(index);
        }
        rows
    }

    pub fn last_error(&self) -> Option<&DomainError> {
        self.last_error.as_ref()
    }

    /// Hand the pending error to the caller and clear it
    pub fn take_error(&mut self) -> Option<DomainError> {
        self.last_error.take()
    }

    async fn apply(&mut self, action: Option<DropAction>) -> DropOutcome {
        let Some(action) = action else {
            return DropOutcome::NoChange;
        };

        let mut ids = self.model.ids();
        if !action.apply(&mut ids) {
            return DropOutcome::NoChange;
        }

        match self.model.reorder(&ids).await {
            Ok(()) => {
                self.last_error = None;
                DropOutcome::Reordered(action)
            }
            Err(err) => {
                tracing::warn!(from = action.from, to = action.to, error = %err, "drop reverted");
                self.last_error = Some(err.clone());
                DropOutcome::Reverted(err)
            }
        }
    }
}
