//! Fixed drawing constants.
//!
//! All pixel values are in output canvas pixels. World-space values are grid
//! units as authored in the layout.

// ---------------------------------------------------------------------------
// Canvas transform
// ---------------------------------------------------------------------------

/// Pixels per world-space grid unit.
pub const SCALE: f64 = 40.0;

/// Empty margin around the world extent, in pixels, on every side.
pub const PADDING: f64 = 40.0;

/// World extent used when the room extents produce no finite bound.
/// `(min_x, min_y, max_x, max_y)`.
pub const FALLBACK_EXTENT: (f64, f64, f64, f64) = (0.0, 0.0, 10.0, 10.0);

// ---------------------------------------------------------------------------
// Background and grid
// ---------------------------------------------------------------------------

pub const BACKGROUND_COLOR: &str = "#020617";

pub const GRID_COLOR: &str = "#1f2933";
pub const GRID_STROKE_WIDTH: f64 = 1.0;
/// Group opacity applied to the whole grid layer.
pub const GRID_OPACITY: f64 = 0.2;
/// Most grid lines drawn along one axis. Wider maps get a coarser grid whose
/// spacing is a whole multiple of [`SCALE`].
pub const MAX_GRID_LINES: usize = 512;

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

pub const CONNECTION_COLOR: &str = "#e5e7eb";
pub const CONNECTION_STROKE_WIDTH: f64 = 2.0;
pub const MAIN_PATH_COLOR: &str = "#facc15";
pub const MAIN_PATH_STROKE_WIDTH: f64 = 3.5;
pub const CORRIDOR_DASH: &str = "4 4";

/// Length of each arrowhead stroke.
pub const ARROW_LENGTH: f64 = 8.0;
/// Distance the arrowhead sits back from the target endpoint.
pub const ARROW_INSET: f64 = 6.0;
/// Sideways reach of each arrowhead stroke, as a fraction of its length.
pub const ARROW_SPREAD: f64 = 0.5;

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

pub const ROOM_FILL_OPACITY: f64 = 0.25;
pub const ROOM_STROKE_WIDTH: f64 = 2.0;
pub const ROOM_CORNER_RADIUS: f64 = 8.0;
pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const LABEL_COLOR: &str = "#e5e7eb";

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

pub const DOOR_MARK_LENGTH: f64 = 14.0;
pub const DOOR_STROKE_WIDTH: f64 = 4.0;

pub const WINDOW_MARK_LENGTH: f64 = 10.0;
pub const WINDOW_STROKE_WIDTH: f64 = 3.0;
pub const WINDOW_DASH: &str = "2 2";

pub const PROP_FILL_OPACITY: f64 = 0.8;
pub const PROP_STROKE_WIDTH: f64 = 1.0;
pub const PROP_CORNER_RADIUS: f64 = 2.0;

pub const ENEMY_RADIUS: f64 = 7.0;
pub const ENEMY_FILL_OPACITY: f64 = 0.9;
pub const ENEMY_STROKE_WIDTH: f64 = 1.5;
pub const CROSSHAIR_COLOR: &str = "#ffffff";
pub const CROSSHAIR_STROKE_WIDTH: f64 = 1.5;
