//! Pointer gesture state machine: canvas panning and item repositioning.
//!
//! One generic press-move-release recognizer serves both drag targets. A
//! press records the screen origin and a snapshot of the pre-drag value
//! (the camera pan, or the item's committed world position); moves report
//! values derived from the cumulative screen delta; release decides
//! between a click and a position commit. Only one gesture can be active
//! at a time, and cancellation is indistinguishable from release so the
//! machine can never be left stuck in `Dragging`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::DRAG_THRESHOLD_PX;
use crate::item::ItemId;

/// What a drag gesture is acting on, with its pre-drag snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    /// The viewport itself; `start_pan` is the camera pan at press time.
    Canvas { start_pan: Point },
    /// A single item; `start_x` / `start_y` are its committed world
    /// position at press time.
    Item { id: ItemId, start_x: f64, start_y: f64 },
}

/// Gesture state. `Dragging` carries the press origin and the last seen
/// pointer position so cancellation can settle at the final known point.
#[derive(Debug, Clone, Copy, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next press.
    #[default]
    Idle,
    /// A press is being tracked until release or cancel.
    Dragging {
        origin: Point,
        last: Point,
        target: DragTarget,
    },
}

/// Continuous output of a move event while a gesture is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMotion {
    /// New absolute pan for the camera.
    Pan { pan: Point },
    /// Live world-space preview position for the dragged item.
    Item { id: ItemId, x: f64, y: f64 },
}

/// Terminal output of a release (or any cancel-equivalent event).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEnd {
    /// No gesture was in progress.
    None,
    /// A canvas pan finished; the camera already tracked every move.
    PanEnded,
    /// An item press never left the drag threshold: a click, which should
    /// open the item's detail view rather than move it.
    ItemClicked(ItemId),
    /// An item drag exceeded the threshold; commit this world position
    /// exactly once.
    ItemCommitted { id: ItemId, x: f64, y: f64 },
}

/// Press-move-release recognizer producing pan values, drag previews, and
/// position commits.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is currently active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The active drag target, if any.
    #[must_use]
    pub fn target(&self) -> Option<DragTarget> {
        match self.state {
            DragState::Dragging { target, .. } => Some(target),
            DragState::Idle => None,
        }
    }

    /// Begin a gesture at `origin`. Ignored while another gesture is
    /// active: only one drag target may be live at a time.
    pub fn press(&mut self, origin: Point, target: DragTarget) {
        if self.is_dragging() {
            return;
        }
        self.state = DragState::Dragging { origin, last: origin, target };
    }

    /// Track pointer movement, returning the value derived from the
    /// cumulative screen delta, or `None` while idle. Item deltas are
    /// divided by `scale` exactly once — the screen-to-world conversion —
    /// so pan and zoom are never reflected twice in the item's position.
    pub fn pointer_move(&mut self, point: Point, scale: f64) -> Option<DragMotion> {
        let DragState::Dragging { origin, last, target } = &mut self.state else {
            return None;
        };
        *last = point;
        let dx = point.x - origin.x;
        let dy = point.y - origin.y;
        Some(match *target {
            DragTarget::Canvas { start_pan } => DragMotion::Pan {
                pan: Point::new(start_pan.x + dx, start_pan.y + dy),
            },
            DragTarget::Item { id, start_x, start_y } => DragMotion::Item {
                id,
                x: start_x + dx / scale,
                y: start_y + dy / scale,
            },
        })
    }

    /// End the gesture at `point`. Item drags commit iff either axis of
    /// the screen delta exceeds [`DRAG_THRESHOLD_PX`]; smaller movements
    /// are clicks. Always transitions back to `Idle`.
    pub fn release(&mut self, point: Point, scale: f64) -> DragEnd {
        let DragState::Dragging { origin, target, .. } = self.state else {
            return DragEnd::None;
        };
        self.state = DragState::Idle;
        let dx = point.x - origin.x;
        let dy = point.y - origin.y;
        match target {
            DragTarget::Canvas { .. } => DragEnd::PanEnded,
            DragTarget::Item { id, start_x, start_y } => {
                if dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX {
                    DragEnd::ItemCommitted {
                        id,
                        x: start_x + dx / scale,
                        y: start_y + dy / scale,
                    }
                } else {
                    DragEnd::ItemClicked(id)
                }
            }
        }
    }

    /// Cancel-equivalent event (pointer leave, capture loss). Behaves
    /// exactly like a release at the last observed pointer position.
    pub fn cancel(&mut self, scale: f64) -> DragEnd {
        match self.state {
            DragState::Idle => DragEnd::None,
            DragState::Dragging { last, .. } => self.release(last, scale),
        }
    }
}
