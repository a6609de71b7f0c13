use tracing::{debug, info};

use crate::error::BoardError;
use crate::kanban_board::{BoardStore, CardSlot, MoveOutcome};

/// The gesture side of drag-and-drop. Whatever senses the gesture (keys
/// here) calls these; the card mover only runs on drop.
pub trait DragAndDrop {
    fn on_drag_start(&mut self, store: &BoardStore, source: CardSlot) -> Result<(), BoardError>;

    fn on_hover_over_target(&mut self, target: CardSlot);

    fn on_drop(&mut self, store: &mut BoardStore) -> Result<Option<MoveOutcome>, BoardError>;

    fn on_cancel(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub task_id: u32,
    pub source: CardSlot,
    pub target: CardSlot,
}

/// Holds at most one in-flight drag.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}

impl DragAndDrop for DragController {
    fn on_drag_start(&mut self, store: &BoardStore, source: CardSlot) -> Result<(), BoardError> {
        let tasks = store.column(&source.category, &source.column)?;
        let task = tasks
            .get(source.index)
            .ok_or_else(|| BoardError::IndexOutOfRange {
                category: source.category.clone(),
                column: source.column.clone(),
                index: source.index,
                len: tasks.len(),
            })?;
        debug!(task_id = task.id, ?source, "drag started");
        self.session = Some(DragSession {
            task_id: task.id,
            target: source.clone(),
            source,
        });
        Ok(())
    }

    fn on_hover_over_target(&mut self, target: CardSlot) {
        if let Some(session) = self.session.as_mut() {
            session.target = target;
        }
    }

    /// Ends the session whether or not the move succeeds.
    fn on_drop(&mut self, store: &mut BoardStore) -> Result<Option<MoveOutcome>, BoardError> {
        let session = self.session.take().ok_or(BoardError::NoDragInProgress)?;
        let DragSession { source, target, .. } = session;
        let outcome = store.move_card(
            source.index,
            target.index,
            &source.category,
            &source.column,
            &target.category,
            &target.column,
        )?;
        if outcome.changed {
            info!(task_id = outcome.task_id, to = ?outcome.to, "card dropped");
            Ok(Some(outcome))
        } else {
            Ok(None)
        }
    }

    fn on_cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(task_id = session.task_id, "drag cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kanban_board::tests::roadmap;

    const PR: &str = "Product Roadmap";

    #[test]
    fn drop_moves_the_card_to_the_hovered_slot() {
        let mut store = roadmap();
        let mut dnd = DragController::default();

        dnd.on_drag_start(&store, CardSlot::new(PR, "backlog", 1)).unwrap();
        assert_eq!(dnd.session().unwrap().task_id, 2);
        dnd.on_hover_over_target(CardSlot::new(PR, "done", 0));
        let outcome = dnd.on_drop(&mut store).unwrap().unwrap();

        assert_eq!(outcome.task_id, 2);
        assert_eq!(store.locate(2), Some(CardSlot::new(PR, "done", 0)));
        assert_eq!(store.task(2).unwrap().status, "done");
        assert!(!dnd.is_dragging());
    }

    #[test]
    fn dropping_where_it_started_reports_nothing() {
        let mut store = roadmap();
        let mut dnd = DragController::default();
        dnd.on_drag_start(&store, CardSlot::new(PR, "backlog", 0)).unwrap();
        assert_eq!(dnd.on_drop(&mut store).unwrap(), None);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn start_on_missing_card_is_refused() {
        let store = roadmap();
        let mut dnd = DragController::default();
        let err = dnd
            .on_drag_start(&store, CardSlot::new(PR, "inProgress", 0))
            .unwrap_err();
        assert!(matches!(err, BoardError::IndexOutOfRange { len: 0, .. }));
        assert!(!dnd.is_dragging());
    }

    #[test]
    fn cancel_leaves_the_store_alone() {
        let mut store = roadmap();
        let before = store.clone();
        let mut dnd = DragController::default();
        dnd.on_drag_start(&store, CardSlot::new(PR, "todo", 0)).unwrap();
        dnd.on_hover_over_target(CardSlot::new("Design Sprint", "done", 0));
        dnd.on_cancel();

        assert!(!dnd.is_dragging());
        assert_eq!(dnd.on_drop(&mut store), Err(BoardError::NoDragInProgress));
        assert_eq!(store.categories(), before.categories());
    }

    #[test]
    fn hover_without_a_drag_is_ignored() {
        let mut dnd = DragController::default();
        dnd.on_hover_over_target(CardSlot::new(PR, "todo", 0));
        assert!(dnd.session().is_none());
    }
}
