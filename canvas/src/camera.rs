//! Viewport transform: pan/zoom camera and coordinate conversions.
//!
//! The camera owns the affine map from world (item) coordinates to screen
//! coordinates, `screen = world * scale + pan`, and its inverse. All
//! operations are pure arithmetic and total; the scale clamp keeps zoom
//! inside [`SCALE_MIN`]..[`SCALE_MAX`] so the inverse always exists.
//!
//! Zoom scales from the coordinate origin rather than the pointer
//! position; the pan is left untouched by zoom.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{SCALE_MAX, SCALE_MIN};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in screen pixels. `scale` is a zoom factor
/// (1.0 = no zoom) held within [`SCALE_MIN`]..[`SCALE_MAX`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, scale: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.scale,
            y: (screen.y - self.pan_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.pan_x,
            y: world.y * self.scale + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Multiply the scale by `factor`, clamped to the valid range. Pan is
    /// untouched, so the zoom pivots on the coordinate origin.
    pub fn apply_zoom(&mut self, factor: f64) {
        self.scale = (self.scale * factor).clamp(SCALE_MIN, SCALE_MAX);
    }

    /// Translate the pan offset by a screen-space delta.
    pub fn apply_pan(&mut self, delta: Point) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Restore the identity transform: pan at the origin, scale 1.0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
