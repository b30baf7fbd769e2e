//! Scene composition: camera, gesture recognition, and grid geometry.
//!
//! The scene interprets raw pointer/wheel events against the item store:
//! background presses pan the camera, item presses drag a single card,
//! wheel ticks zoom. It owns the camera and the live drag preview; the
//! item collection itself belongs to the session, which receives position
//! commits through [`SceneAction`] and is the only writer to the store.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::camera::{Camera, Point};
use crate::consts::{GRID_PITCH_PX, ZOOM_STEP};
use crate::hit::{self, Hit, ScreenRect};
use crate::input::{DragController, DragEnd, DragMotion, DragTarget};
use crate::item::{Item, ItemId, ItemStore};

/// Host-visible outcome of a pointer or wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneAction {
    /// Nothing changed.
    None,
    /// Camera or preview state changed; redraw.
    RenderNeeded,
    /// A drag finished past the threshold: persist this world position.
    CommitPosition { id: ItemId, x: f64, y: f64 },
    /// A sub-threshold press-release on an item: open its detail view.
    OpenItem(ItemId),
}

/// Background grid parameters for the current transform. The pitch scales
/// with zoom and the offset follows pan, so the surface reads as one
/// continuous infinite sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub pitch: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// The canvas scene: viewport transform plus gesture state.
#[derive(Debug, Default)]
pub struct CanvasScene {
    pub camera: Camera,
    drag: DragController,
    preview: Option<(ItemId, f64, f64)>,
}

impl CanvasScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pointer pressed at a screen point. Presses on interactive controls
    /// are absorbed without starting anything; background presses start a
    /// pan; item presses start an item drag. While a gesture is active
    /// further presses are ignored.
    pub fn on_pointer_down(&mut self, screen: Point, items: &ItemStore) -> SceneAction {
        match hit::hit_test(items, &self.camera, screen) {
            Hit::ItemControl(_) => SceneAction::None,
            Hit::Background => {
                let start_pan = Point::new(self.camera.pan_x, self.camera.pan_y);
                self.drag.press(screen, DragTarget::Canvas { start_pan });
                SceneAction::None
            }
            Hit::Item(id) => {
                if let Some(item) = items.get(&id) {
                    self.drag.press(
                        screen,
                        DragTarget::Item {
                            id,
                            start_x: item.position_x,
                            start_y: item.position_y,
                        },
                    );
                }
                SceneAction::None
            }
        }
    }

    /// Pointer moved. Pans apply directly to the camera; item drags only
    /// update the preview — the store is never mutated here.
    pub fn on_pointer_move(&mut self, screen: Point) -> SceneAction {
        match self.drag.pointer_move(screen, self.camera.scale) {
            None => SceneAction::None,
            Some(DragMotion::Pan { pan }) => {
                self.camera.pan_x = pan.x;
                self.camera.pan_y = pan.y;
                SceneAction::RenderNeeded
            }
            Some(DragMotion::Item { id, x, y }) => {
                self.preview = Some((id, x, y));
                SceneAction::RenderNeeded
            }
        }
    }

    /// Pointer released at a screen point.
    pub fn on_pointer_up(&mut self, screen: Point) -> SceneAction {
        let end = self.drag.release(screen, self.camera.scale);
        self.finish(end)
    }

    /// Cancel-equivalent event (pointer leave, capture loss). Same
    /// handling as a release at the last observed position.
    pub fn on_pointer_leave(&mut self) -> SceneAction {
        let end = self.drag.cancel(self.camera.scale);
        self.finish(end)
    }

    fn finish(&mut self, end: DragEnd) -> SceneAction {
        self.preview = None;
        match end {
            DragEnd::None | DragEnd::PanEnded => SceneAction::None,
            DragEnd::ItemClicked(id) => SceneAction::OpenItem(id),
            DragEnd::ItemCommitted { id, x, y } => SceneAction::CommitPosition { id, x, y },
        }
    }

    /// Wheel tick: positive `dy` (scroll down) zooms out by `1/1.1`,
    /// negative zooms in by `1.1`, clamped by the camera. The zoom is not
    /// anchored to the pointer; it scales from the coordinate origin.
    pub fn on_wheel(&mut self, dy: f64) -> SceneAction {
        if dy > 0.0 {
            self.camera.apply_zoom(1.0 / ZOOM_STEP);
        } else if dy < 0.0 {
            self.camera.apply_zoom(ZOOM_STEP);
        } else {
            return SceneAction::None;
        }
        SceneAction::RenderNeeded
    }

    /// Restore the identity transform on explicit user request.
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// Screen rectangle for a card, honoring the live drag preview for
    /// the card currently being dragged.
    #[must_use]
    pub fn item_rect(&self, item: &Item) -> ScreenRect {
        if let Some((id, x, y)) = self.preview {
            if id == item.id {
                let top_left = self.camera.to_screen(Point::new(x, y));
                return ScreenRect {
                    x: top_left.x,
                    y: top_left.y,
                    width: item.width,
                    height: item.height,
                };
            }
        }
        hit::item_screen_rect(&self.camera, item)
    }

    /// Grid pitch and wrap offset for the current transform.
    #[must_use]
    pub fn grid(&self) -> GridParams {
        let pitch = GRID_PITCH_PX * self.camera.scale;
        GridParams {
            pitch,
            offset_x: self.camera.pan_x % pitch,
            offset_y: self.camera.pan_y % pitch,
        }
    }
}
