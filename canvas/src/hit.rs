//! Screen-space hit-testing against item cards.
//!
//! Cards are laid out with transformed positions but constant pixel
//! dimensions (see [`item_screen_rect`]), so hit tests run in screen
//! space against exactly the geometry the renderer draws. The topmost
//! card wins; each card's menu-trigger corner is reported separately so
//! interactive controls never start a gesture.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::CONTROL_HIT_SIZE_PX;
use crate::item::{Item, ItemId, ItemStore};

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The canvas background; pressing here starts a pan.
    Background,
    /// An item card body; pressing here starts an item drag.
    Item(ItemId),
    /// An interactive control inside an item (the menu trigger); presses
    /// here must not start any gesture.
    ItemControl(ItemId),
}

/// An axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    /// Whether `point` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Screen-space rectangle of a card under `camera`. The position follows
/// the affine transform; width and height stay in constant screen pixels
/// regardless of zoom, so cards read at a fixed size while the surface
/// scales under them.
#[must_use]
pub fn item_screen_rect(camera: &Camera, item: &Item) -> ScreenRect {
    let top_left = camera.to_screen(Point::new(item.position_x, item.position_y));
    ScreenRect {
        x: top_left.x,
        y: top_left.y,
        width: item.width,
        height: item.height,
    }
}

/// Hit-test a screen point against the store. Draw order is store order,
/// so iterate it in reverse to find the topmost card first.
#[must_use]
pub fn hit_test(store: &ItemStore, camera: &Camera, point: Point) -> Hit {
    for item in store.sorted_items().into_iter().rev() {
        let rect = item_screen_rect(camera, item);
        if rect.contains(point) {
            if control_rect(&rect).contains(point) {
                return Hit::ItemControl(item.id);
            }
            return Hit::Item(item.id);
        }
    }
    Hit::Background
}

/// The menu-trigger region in a card's top-right corner.
fn control_rect(card: &ScreenRect) -> ScreenRect {
    ScreenRect {
        x: card.x + card.width - CONTROL_HIT_SIZE_PX,
        y: card.y,
        width: CONTROL_HIT_SIZE_PX,
        height: CONTROL_HIT_SIZE_PX,
    }
}
