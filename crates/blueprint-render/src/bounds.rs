//! Bounds & scale resolution.
//!
//! Scans the rooms for the union of their world-space extents and derives the
//! pixel canvas from the fixed [`SCALE`] and [`PADDING`]:
//!
//! ```text
//! canvas_width  = (max_x - min_x) * SCALE + 2 * PADDING
//! canvas_height = (max_y - min_y) * SCALE + 2 * PADDING
//! ```
//!
//! The resulting [`Frame`] is the world-to-pixel transform every later stage
//! uses.

use blueprint_layout::model::Room;
use serde::Serialize;

use crate::constants::{FALLBACK_EXTENT, PADDING, SCALE};
use crate::geometry::Point;
use crate::RenderError;

// ---------------------------------------------------------------------------
// WorldBounds
// ---------------------------------------------------------------------------

/// Axis-aligned world-space extent, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl WorldBounds {
    pub const FALLBACK: WorldBounds = WorldBounds {
        min_x: FALLBACK_EXTENT.0,
        min_y: FALLBACK_EXTENT.1,
        max_x: FALLBACK_EXTENT.2,
        max_y: FALLBACK_EXTENT.3,
    };

    /// Union of `[x, x + w] x [y, y + h]` over all rooms.
    ///
    /// Returns `None` for an empty iterator.
    pub fn of_rooms<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Option<Self> {
        rooms.into_iter().fold(None, |acc, room| {
            let (x1, y1) = (room.x, room.y);
            let (x2, y2) = (room.x + room.w, room.y + room.h);
            Some(match acc {
                None => WorldBounds {
                    min_x: x1,
                    min_y: y1,
                    max_x: x2,
                    max_y: y2,
                },
                Some(b) => WorldBounds {
                    min_x: b.min_x.min(x1),
                    min_y: b.min_y.min(y1),
                    max_x: b.max_x.max(x2),
                    max_y: b.max_y.max(y2),
                },
            })
        })
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// World bounds plus the derived pixel canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub bounds: WorldBounds,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Resolve the frame for a set of rooms.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoRooms`] if `rooms` is empty.
    pub fn resolve<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Result<Self, RenderError> {
        let bounds = WorldBounds::of_rooms(rooms).ok_or(RenderError::NoRooms)?;
        let bounds = if bounds.is_finite() {
            bounds
        } else {
            tracing::warn!(?bounds, "room extents are not finite -- using fallback extent");
            WorldBounds::FALLBACK
        };
        Ok(Self::for_bounds(bounds))
    }

    pub fn for_bounds(bounds: WorldBounds) -> Self {
        Self {
            bounds,
            width: bounds.width() * SCALE + 2.0 * PADDING,
            height: bounds.height() * SCALE + 2.0 * PADDING,
        }
    }

    /// Map a world-space point to pixel space.
    pub fn to_pixel(&self, x: f64, y: f64) -> Point {
        Point::new(
            (x - self.bounds.min_x) * SCALE + PADDING,
            (y - self.bounds.min_y) * SCALE + PADDING,
        )
    }
}
