//! Shared numeric constants for the canvas crate.

// ── Viewport ────────────────────────────────────────────────────

/// Lower bound for the camera scale factor.
pub const SCALE_MIN: f64 = 0.1;

/// Upper bound for the camera scale factor.
pub const SCALE_MAX: f64 = 3.0;

/// Multiplicative zoom step applied per discrete wheel tick.
pub const ZOOM_STEP: f64 = 1.1;

/// Background grid pitch in screen pixels at scale 1.0.
pub const GRID_PITCH_PX: f64 = 20.0;

// ── Gestures ────────────────────────────────────────────────────

/// Per-axis screen-space delta separating an item drag from a click.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Side length in screen pixels of the menu-trigger square in an item's
/// top-right corner. Presses there never start a gesture.
pub const CONTROL_HIT_SIZE_PX: f64 = 24.0;

// ── Item defaults ───────────────────────────────────────────────

/// Card width applied by the persistence layer when the caller omits one.
pub const DEFAULT_ITEM_WIDTH: f64 = 200.0;

/// Card height applied by the persistence layer when the caller omits one.
pub const DEFAULT_ITEM_HEIGHT: f64 = 150.0;

/// Horizontal extent of the random spawn scatter for new items.
pub const SPAWN_SPREAD_X: f64 = 400.0;

/// Vertical extent of the random spawn scatter for new items.
pub const SPAWN_SPREAD_Y: f64 = 300.0;
