#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.scale, 1.0);
}

// --- to_world ---

#[test]
fn to_world_identity() {
    let cam = Camera::default();
    let world = cam.to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn to_world_with_scale() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, scale: 2.0 };
    let world = cam.to_world(Point::new(40.0, 80.0));
    assert!(approx_eq(world.x, 20.0));
    assert!(approx_eq(world.y, 40.0));
}

#[test]
fn to_world_with_pan() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, scale: 1.0 };
    let world = cam.to_world(Point::new(100.0, 50.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

#[test]
fn to_world_with_pan_and_scale() {
    let cam = Camera { pan_x: 50.0, pan_y: 30.0, scale: 2.0 };
    let world = cam.to_world(Point::new(0.0, 0.0));
    assert!(approx_eq(world.x, -25.0));
    assert!(approx_eq(world.y, -15.0));
}

// --- to_screen ---

#[test]
fn to_screen_with_scale() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, scale: 2.0 };
    let screen = cam.to_screen(Point::new(10.0, 20.0));
    assert!(approx_eq(screen.x, 20.0));
    assert!(approx_eq(screen.y, 40.0));
}

#[test]
fn to_screen_with_pan_and_scale() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, scale: 3.0 };
    let screen = cam.to_screen(Point::new(5.0, 5.0));
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(approx_eq(screen.x, 35.0));
    assert!(approx_eq(screen.y, 25.0));
}

#[test]
fn to_screen_negative_world() {
    let cam = Camera::default();
    let screen = cam.to_screen(Point::new(-10.0, -20.0));
    assert!(point_approx_eq(screen, Point::new(-10.0, -20.0)));
}

// --- Inverse law ---

#[test]
fn round_trip_identity() {
    let cam = Camera::default();
    let world = Point::new(100.0, 200.0);
    assert!(point_approx_eq(world, cam.to_world(cam.to_screen(world))));
}

#[test]
fn round_trip_with_pan_and_scale() {
    let cam = Camera { pan_x: 50.0, pan_y: -30.0, scale: 2.0 };
    let world = Point::new(100.0, 200.0);
    assert!(point_approx_eq(world, cam.to_world(cam.to_screen(world))));
}

#[test]
fn round_trip_fractional_scale() {
    let cam = Camera { pan_x: 13.7, pan_y: -42.3, scale: 0.75 };
    let world = Point::new(333.3, -999.9);
    assert!(point_approx_eq(world, cam.to_world(cam.to_screen(world))));
}

#[test]
fn round_trip_screen_first() {
    let cam = Camera { pan_x: 10.0, pan_y: 20.0, scale: 1.5 };
    let screen = Point::new(400.0, 300.0);
    assert!(point_approx_eq(screen, cam.to_screen(cam.to_world(screen))));
}

#[test]
fn round_trip_across_scale_bounds() {
    for scale in [SCALE_MIN, 0.5, 1.0, 2.0, SCALE_MAX] {
        let cam = Camera { pan_x: -77.0, pan_y: 31.0, scale };
        let world = Point::new(12.5, -87.25);
        assert!(point_approx_eq(world, cam.to_world(cam.to_screen(world))));
    }
}

// --- screen_dist_to_world ---

#[test]
fn screen_dist_to_world_with_scale() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, scale: 2.0 };
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 5.0));
}

// --- apply_zoom ---

#[test]
fn apply_zoom_multiplies_scale() {
    let mut cam = Camera::default();
    cam.apply_zoom(1.1);
    assert!(approx_eq(cam.scale, 1.1));
}

#[test]
fn apply_zoom_leaves_pan_untouched() {
    let mut cam = Camera { pan_x: 40.0, pan_y: -20.0, scale: 1.0 };
    cam.apply_zoom(1.1);
    assert_eq!(cam.pan_x, 40.0);
    assert_eq!(cam.pan_y, -20.0);
}

#[test]
fn apply_zoom_clamps_upper_bound() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.apply_zoom(1.1);
    }
    assert_eq!(cam.scale, SCALE_MAX);
}

#[test]
fn apply_zoom_clamps_lower_bound() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.apply_zoom(1.0 / 1.1);
    }
    assert_eq!(cam.scale, SCALE_MIN);
}

#[test]
fn apply_zoom_recovers_after_clamp() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.apply_zoom(1.1);
    }
    cam.apply_zoom(1.0 / 1.1);
    assert!(cam.scale < SCALE_MAX);
    assert!(cam.scale >= SCALE_MIN);
}

#[test]
fn zoom_is_not_pointer_anchored() {
    // The world origin projects to the pan offset regardless of scale.
    let mut cam = Camera { pan_x: 120.0, pan_y: 60.0, scale: 1.0 };
    cam.apply_zoom(1.1);
    let origin = cam.to_screen(Point::new(0.0, 0.0));
    assert!(point_approx_eq(origin, Point::new(120.0, 60.0)));
}

// --- apply_pan / reset ---

#[test]
fn apply_pan_accumulates() {
    let mut cam = Camera::default();
    cam.apply_pan(Point::new(10.0, -5.0));
    cam.apply_pan(Point::new(2.5, 1.0));
    assert!(approx_eq(cam.pan_x, 12.5));
    assert!(approx_eq(cam.pan_y, -4.0));
}

#[test]
fn reset_restores_identity() {
    let mut cam = Camera { pan_x: 123.0, pan_y: -456.0, scale: 2.5 };
    cam.reset();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.scale, 1.0);
}
