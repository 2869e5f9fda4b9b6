//! Geometry builder: world-space layout elements to pixel-space geometry.
//!
//! Every room is visited once to produce its pixel rectangle and center,
//! indexed by room id in a [`GeometryIndex`]. Features are then resolved
//! against that index:
//!
//! - Doors and windows get an anchor point on the owning room's edge
//!   ([`anchor_on_side`]) and a short mark perpendicular to that edge.
//!   Door anchors are also registered on the room so connections can end at
//!   them.
//! - Props and enemy spawns get a pixel position from room-local grid
//!   coordinates ([`local_to_pixel`]), defaulting to the room's center.
//!
//! A feature whose `roomId` does not resolve is dropped and reported as a
//! [`Diagnostic::DanglingFeature`]; it never aborts the render.

use std::collections::HashMap;
use std::fmt;

use blueprint_layout::model::{Opening, Room, Side};
use serde::Serialize;

use crate::bounds::Frame;
use crate::constants::SCALE;
use crate::report::{Diagnostic, Diagnostics};

// ---------------------------------------------------------------------------
// Point / PixelRect
// ---------------------------------------------------------------------------

/// A pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A pixel-space rectangle (top-left origin, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PixelRect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w x h` centered on `center`.
    pub fn centered(center: Point, w: f64, h: f64) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// The edge segment for `side`, running left-to-right for north/south
    /// and top-to-bottom for east/west.
    pub fn edge(&self, side: Side) -> (Point, Point) {
        match side {
            Side::North => (Point::new(self.x, self.y), Point::new(self.right(), self.y)),
            Side::South => (
                Point::new(self.x, self.bottom()),
                Point::new(self.right(), self.bottom()),
            ),
            Side::East => (
                Point::new(self.right(), self.y),
                Point::new(self.right(), self.bottom()),
            ),
            Side::West => (Point::new(self.x, self.y), Point::new(self.x, self.bottom())),
        }
    }
}

// ---------------------------------------------------------------------------
// Pure geometry helpers
// ---------------------------------------------------------------------------

/// Anchor point for a door or window: `offset` (0..=1) of the way along the
/// edge of `rect` on `side`, measured from the edge's start.
pub fn anchor_on_side(rect: &PixelRect, side: Side, offset: f64) -> Point {
    let (start, end) = rect.edge(side);
    start.lerp(end, offset)
}

/// A mark of `length` pixels centered on `anchor`, perpendicular to the edge
/// on `side`.
pub fn perpendicular_mark(anchor: Point, side: Side, length: f64) -> (Point, Point) {
    let half = length / 2.0;
    if side.is_vertical_edge() {
        (
            Point::new(anchor.x - half, anchor.y),
            Point::new(anchor.x + half, anchor.y),
        )
    } else {
        (
            Point::new(anchor.x, anchor.y - half),
            Point::new(anchor.x, anchor.y + half),
        )
    }
}

/// Room-local grid coordinates to pixel space.
pub fn local_to_pixel(rect: &PixelRect, local_x: f64, local_y: f64) -> Point {
    Point::new(rect.x + local_x * SCALE, rect.y + local_y * SCALE)
}

/// The side of a room at `from` that faces `toward`.
///
/// The larger of `|dx|` and `|dy|` picks the axis (ties go east/west); the
/// sign picks the side.
pub fn facing_side(from: Point, toward: Point) -> Side {
    let dx = toward.x - from.x;
    let dy = toward.y - from.y;
    if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            Side::East
        } else {
            Side::West
        }
    } else if dy >= 0.0 {
        Side::South
    } else {
        Side::North
    }
}

// ---------------------------------------------------------------------------
// FeatureKind
// ---------------------------------------------------------------------------

/// The four kinds of room-owned detail features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Door,
    Window,
    Prop,
    Enemy,
}

impl FeatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::Door => "door",
            FeatureKind::Window => "window",
            FeatureKind::Prop => "prop",
            FeatureKind::Enemy => "enemy",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RoomGeometry
// ---------------------------------------------------------------------------

/// A door anchor registered on its owning room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorAnchor {
    pub side: Side,
    pub point: Point,
}

/// Pixel-space geometry for one room. Immutable once the index is built,
/// apart from door registration.
#[derive(Debug, Clone)]
pub struct RoomGeometry<'a> {
    pub room: &'a Room,
    pub rect: PixelRect,
    pub center: Point,
    doors: Vec<DoorAnchor>,
}

impl<'a> RoomGeometry<'a> {
    pub fn new(room: &'a Room, frame: &Frame) -> Self {
        let origin = frame.to_pixel(room.x, room.y);
        let rect = PixelRect::new(origin.x, origin.y, room.w * SCALE, room.h * SCALE);
        Self {
            room,
            rect,
            center: rect.center(),
            doors: Vec::new(),
        }
    }

    /// Doors on this room, in layout order.
    pub fn doors(&self) -> &[DoorAnchor] {
        &self.doors
    }

    /// Where a connection leaving this room toward `other` should start.
    ///
    /// Prefers the first door on the side facing `other`'s center, then the
    /// room's first door, then the room center.
    pub fn connection_anchor(&self, other: Point) -> Point {
        let preferred = facing_side(self.center, other);
        self.doors
            .iter()
            .find(|d| d.side == preferred)
            .or_else(|| self.doors.first())
            .map_or(self.center, |d| d.point)
    }

    /// Default room-local position: the geometric center, in grid units.
    pub fn local_center(&self) -> (f64, f64) {
        (self.room.w / 2.0, self.room.h / 2.0)
    }
}

// ---------------------------------------------------------------------------
// Resolved features
// ---------------------------------------------------------------------------

/// A door or window resolved onto its room's edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOpening {
    pub index: usize,
    pub room_id: String,
    pub side: Side,
    pub anchor: Point,
}

/// A prop or enemy spawn resolved to pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub room_id: String,
    /// Room-local grid coordinates after defaults were applied.
    pub local: (f64, f64),
    pub point: Point,
}

// ---------------------------------------------------------------------------
// GeometryIndex
// ---------------------------------------------------------------------------

/// Room geometry keyed by room id, built once per render pass.
///
/// Rooms keep their layout order for drawing. If an id repeats, the first
/// occurrence wins and later ones are ignored.
#[derive(Debug, Clone, Default)]
pub struct GeometryIndex<'a> {
    rooms: Vec<RoomGeometry<'a>>,
    by_id: HashMap<&'a str, usize>,
}

impl<'a> GeometryIndex<'a> {
    pub fn build(rooms: &[&'a Room], frame: &Frame) -> Self {
        let mut index = Self {
            rooms: Vec::with_capacity(rooms.len()),
            by_id: HashMap::with_capacity(rooms.len()),
        };
        for &room in rooms {
            if index.by_id.contains_key(room.id.as_str()) {
                continue;
            }
            index.by_id.insert(room.id.as_str(), index.rooms.len());
            index.rooms.push(RoomGeometry::new(room, frame));
        }
        index
    }

    pub fn get(&self, id: &str) -> Option<&RoomGeometry<'a>> {
        self.by_id.get(id).map(|&i| &self.rooms[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomGeometry<'a>> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Resolve doors and register their anchors on the owning rooms.
    pub(crate) fn resolve_doors(
        &mut self,
        doors: &[Opening],
        diagnostics: &mut Diagnostics,
    ) -> Vec<ResolvedOpening> {
        let resolved = self.resolve_openings(FeatureKind::Door, doors, diagnostics);
        for door in &resolved {
            if let Some(&i) = self.by_id.get(door.room_id.as_str()) {
                self.rooms[i].doors.push(DoorAnchor {
                    side: door.side,
                    point: door.anchor,
                });
            }
        }
        resolved
    }

    /// Resolve doors or windows onto their rooms' edges without registering
    /// them as connection anchors.
    pub(crate) fn resolve_openings(
        &self,
        kind: FeatureKind,
        openings: &[Opening],
        diagnostics: &mut Diagnostics,
    ) -> Vec<ResolvedOpening> {
        openings
            .iter()
            .enumerate()
            .filter_map(|(index, opening)| {
                let Some(geom) = self.get(&opening.room_id) else {
                    diagnostics.push(Diagnostic::DanglingFeature {
                        feature: kind,
                        index,
                        room_id: opening.room_id.clone(),
                    });
                    return None;
                };
                let side = opening.parsed_side().unwrap_or_else(|e| {
                    diagnostics.push(Diagnostic::UnknownSide {
                        feature: kind,
                        index,
                        side: e.0,
                    });
                    Side::North
                });
                Some(ResolvedOpening {
                    index,
                    room_id: opening.room_id.clone(),
                    side,
                    anchor: anchor_on_side(&geom.rect, side, opening.clamped_offset()),
                })
            })
            .collect()
    }

    /// Resolve one prop or enemy spawn. Missing local coordinates default to
    /// the room center.
    pub(crate) fn place(
        &self,
        kind: FeatureKind,
        index: usize,
        room_id: &str,
        local_x: Option<f64>,
        local_y: Option<f64>,
        diagnostics: &mut Diagnostics,
    ) -> Option<Placement> {
        let Some(geom) = self.get(room_id) else {
            diagnostics.push(Diagnostic::DanglingFeature {
                feature: kind,
                index,
                room_id: room_id.to_owned(),
            });
            return None;
        };
        let (cx, cy) = geom.local_center();
        let local = (local_x.unwrap_or(cx), local_y.unwrap_or(cy));
        Some(Placement {
            index,
            room_id: room_id.to_owned(),
            local,
            point: local_to_pixel(&geom.rect, local.0, local.1),
        })
    }
}
