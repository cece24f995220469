//! Board DragDrop Utilities
//!
//! Pointer-driven drag-and-drop tracking with no dependency on a UI toolkit.
//! The view layer forwards raw pointer events; the tracker decides when a
//! press becomes a drag and reports the final drop.
//! Uses movement threshold to distinguish click from drag.

/// Drop target types
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropTarget<I, C = I> {
    /// Drop on an item
    Item(I),
    /// Drop on a container (placed at its end)
    Container(C),
}

/// A completed drag: what was dragged and where it was released
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropEvent<I, C = I> {
    pub dragged: I,
    pub target: DropTarget<I, C>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Primary (left) mouse button index
const PRIMARY_BUTTON: i16 = 0;

/// DnD tracking state
#[derive(Clone, Debug)]
pub struct DragTracker<I, C = I> {
    dragging: Option<I>,
    drop_target: Option<DropTarget<I, C>>,
    drag_just_ended: bool,
    /// Pending item id (pressed but not yet dragging)
    pending: Option<I>,
    /// Start position for movement detection
    start: (i32, i32),
    threshold: i32,
}

impl<I, C> Default for DragTracker<I, C> {
    fn default() -> Self {
        Self {
            dragging: None,
            drop_target: None,
            drag_just_ended: false,
            pending: None,
            start: (0, 0),
            threshold: DRAG_THRESHOLD_PX,
        }
    }
}

impl<I: Clone + PartialEq, C: Clone> DragTracker<I, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with a custom movement threshold
    pub fn with_threshold(threshold: i32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Item currently being dragged, if any
    pub fn dragging(&self) -> Option<&I> {
        self.dragging.as_ref()
    }

    /// Current hover target, if any
    pub fn drop_target(&self) -> Option<&DropTarget<I, C>> {
        self.drop_target.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Record a pending drag with its start position.
    /// Only the primary button arms a drag.
    pub fn press(&mut self, item: I, button: i16, x: i32, y: i32) {
        if button != PRIMARY_BUTTON {
            return;
        }
        self.pending = Some(item);
        self.start = (x, y);
    }

    /// Starts the drag once the pointer moved past the threshold.
    /// Returns true when this call started the drag.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        if self.pending.is_none() || self.dragging.is_some() {
            return false;
        }
        let dx = (x - self.start.0).abs();
        let dy = (y - self.start.1).abs();
        if dx > self.threshold || dy > self.threshold {
            self.dragging = self.pending.clone();
            return true;
        }
        false
    }

    /// Pointer entered an item
    pub fn enter_item(&mut self, item: I) {
        match &self.dragging {
            // Don't allow dropping on self
            Some(dragging) if *dragging != item => {
                self.drop_target = Some(DropTarget::Item(item));
            }
            _ => {}
        }
    }

    /// Pointer entered a container (column body or empty column)
    pub fn enter_container(&mut self, container: C) {
        if self.dragging.is_some() {
            self.drop_target = Some(DropTarget::Container(container));
        }
    }

    /// Pointer left the current target
    pub fn leave(&mut self) {
        if self.dragging.is_some() {
            self.drop_target = None;
        }
    }

    /// Pointer released. Returns the drop when a drag was active and a
    /// target was set; any other release just clears the pending state.
    pub fn release(&mut self) -> Option<DropEvent<I, C>> {
        self.pending = None;
        let dragged = self.dragging.take();
        let target = self.drop_target.take();
        self.end_drag(dragged.is_some());
        match (dragged, target) {
            (Some(dragged), Some(target)) => Some(DropEvent { dragged, target }),
            _ => None,
        }
    }

    /// Abort without dropping (e.g. Escape or pointer left the window)
    pub fn cancel(&mut self) {
        self.pending = None;
        let was_dragging = self.dragging.take().is_some();
        self.drop_target = None;
        self.end_drag(was_dragging);
    }

    /// Whether the click event following a release must be ignored.
    /// Reading the flag clears it.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.drag_just_ended)
    }

    fn end_drag(&mut self, was_dragging: bool) {
        self.drag_just_ended = was_dragging;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> DragTracker<&'static str> {
        DragTracker::new()
    }

    #[test]
    fn test_click_without_movement_is_not_a_drag() {
        let mut dnd = tracker();
        dnd.press("t1", 0, 10, 10);
        assert!(!dnd.pointer_move(12, 13));
        dnd.enter_item("t2");
        assert!(dnd.release().is_none());
        assert!(!dnd.take_click_suppression());
    }

    #[test]
    fn test_drag_past_threshold_drops_on_item() {
        let mut dnd = tracker();
        dnd.press("t1", 0, 10, 10);
        assert!(dnd.pointer_move(10, 30));
        assert_eq!(dnd.dragging(), Some(&"t1"));

        dnd.enter_item("t4");
        let drop = dnd.release().expect("drop");
        assert_eq!(drop.dragged, "t1");
        assert_eq!(drop.target, DropTarget::Item("t4"));
        assert!(!dnd.is_dragging());
        assert!(dnd.take_click_suppression());
        assert!(!dnd.take_click_suppression());
    }

    #[test]
    fn test_cannot_target_dragged_item() {
        let mut dnd = tracker();
        dnd.press("t1", 0, 0, 0);
        dnd.pointer_move(20, 0);
        dnd.enter_item("t1");
        assert!(dnd.drop_target().is_none());
        assert!(dnd.release().is_none());
    }

    #[test]
    fn test_container_target_and_leave() {
        let mut dnd: DragTracker<&str> = DragTracker::new();
        dnd.press("t1", 0, 0, 0);
        dnd.pointer_move(0, 20);
        dnd.enter_container("col-b");
        assert_eq!(dnd.drop_target(), Some(&DropTarget::Container("col-b")));
        dnd.leave();
        assert!(dnd.release().is_none());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut dnd = tracker();
        dnd.press("t1", 2, 0, 0);
        assert!(!dnd.pointer_move(50, 50));
        assert!(!dnd.is_dragging());
    }

    #[test]
    fn test_cancel_clears_state() {
        let mut dnd: DragTracker<&str> = DragTracker::with_threshold(1);
        dnd.press("t1", 0, 0, 0);
        dnd.pointer_move(2, 0);
        dnd.enter_item("t2");
        dnd.cancel();
        assert!(dnd.dragging().is_none());
        assert!(dnd.drop_target().is_none());
        assert!(dnd.release().is_none());
    }
}
