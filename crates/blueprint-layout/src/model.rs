//! Level layout data model.
//!
//! A [`LevelLayout`] is a set of rectangular [`Room`]s in world-space grid
//! units, the [`Connection`]s between them, and the detail features each room
//! owns: doors and windows on its boundary ([`Opening`]), props and enemy
//! spawns inside it ([`Prop`], [`EnemySpawn`]).
//!
//! # Wire Format
//!
//! The model deserializes from the camelCase JSON produced by level authoring
//! tools. Every array is optional and defaults to empty; unknown fields are
//! ignored.
//!
//! ```json
//! {
//!   "rooms": [{"id": "start", "label": "Gate", "x": 0, "y": 0, "w": 4, "h": 3, "type": "spawn"}],
//!   "connections": [{"from": "start", "to": "hall", "type": "corridor", "mainPath": true}],
//!   "doors": [{"roomId": "start", "side": "east", "offset": 0.5}],
//!   "windows": [{"roomId": "start", "side": "north"}],
//!   "props": [{"roomId": "start", "x": 1, "y": 1, "category": "crate"}],
//!   "enemySpawns": [{"roomId": "hall", "role": "archer"}]
//! }
//! ```
//!
//! References between elements are by room id. The model does not validate
//! them: dangling references are resolved (and dropped) by the renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LayoutError;

// ---------------------------------------------------------------------------
// LevelLayout
// ---------------------------------------------------------------------------

/// The full structured description of a level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelLayout {
    /// Rectangular areas of the level. Ids are expected to be unique.
    pub rooms: Vec<Room>,
    /// Directed links between rooms.
    pub connections: Vec<Connection>,
    /// Door marks on room boundaries.
    pub doors: Vec<Door>,
    /// Window marks on room boundaries.
    pub windows: Vec<Window>,
    /// Decorative props placed in room-local coordinates.
    pub props: Vec<Prop>,
    /// Enemy spawn points placed in room-local coordinates.
    pub enemy_spawns: Vec<EnemySpawn>,
}

impl LevelLayout {
    /// Parse a layout from bare JSON (no surrounding fence).
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(json).map_err(|source| LayoutError::InvalidJson { source })
    }

    /// Look up the first room with the given id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// True when the layout has no detail features of any kind.
    pub fn has_no_details(&self) -> bool {
        self.doors.is_empty()
            && self.windows.is_empty()
            && self.props.is_empty()
            && self.enemy_spawns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// A rectangular area in world-space grid units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique key used by every other element to reference this room.
    pub id: String,
    /// Display text. Falls back to `id` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// World-space left edge.
    pub x: f64,
    /// World-space top edge.
    pub y: f64,
    /// Width in grid units. Expected to be positive.
    pub w: f64,
    /// Height in grid units. Expected to be positive.
    pub h: f64,
    /// Category key into the room style table (case-insensitive).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Room {
    /// Build a room with no label and no category.
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            label: None,
            x,
            y,
            w,
            h,
            kind: None,
        }
    }

    /// Builder-style setter for the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder-style setter for the category key.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Text shown on the room: the label if non-empty, else the id if
    /// non-empty, else nothing.
    pub fn display_name(&self) -> Option<&str> {
        self.label
            .as_deref()
            .filter(|l| !l.is_empty())
            .or_else(|| Some(self.id.as_str()).filter(|id| !id.is_empty()))
    }

    /// Whether the size is usable for drawing (finite and strictly positive).
    pub fn has_valid_size(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// A directed link between two rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Source room id.
    pub from: String,
    /// Target room id.
    pub to: String,
    /// Link style. `"corridor"` draws dashed; anything else draws solid.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Emphasize this link as part of the main path.
    #[serde(default)]
    pub main_path: bool,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: None,
            main_path: false,
        }
    }

    /// Corridor links are drawn with a dashed stroke.
    pub fn is_corridor(&self) -> bool {
        self.kind.as_deref() == Some("corridor")
    }
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// One of the four edges of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    North,
    South,
    East,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::North => "north",
            Side::South => "south",
            Side::East => "east",
            Side::West => "west",
        }
    }

    /// East and west edges run vertically.
    pub fn is_vertical_edge(self) -> bool {
        matches!(self, Side::East | Side::West)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A side name that is not one of `north`, `south`, `east`, `west`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown side '{0}' (expected north, south, east or west)")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Side::ALL
            .into_iter()
            .find(|side| side.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSideError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Opening (doors and windows)
// ---------------------------------------------------------------------------

/// A mark on a room's boundary: a door or a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    /// Owning room id.
    pub room_id: String,
    /// Raw side name. Absent means north.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Fraction `0..=1` along the side. Absent means `0.5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

/// A door on a room boundary. Doors also anchor connection endpoints.
pub type Door = Opening;

/// A window on a room boundary.
pub type Window = Opening;

impl Opening {
    pub const DEFAULT_OFFSET: f64 = 0.5;

    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            side: None,
            offset: None,
        }
    }

    pub fn on(mut self, side: Side) -> Self {
        self.side = Some(side.as_str().to_owned());
        self
    }

    pub fn at(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Parsed side. `Ok(North)` when absent, `Err` when present but unknown.
    pub fn parsed_side(&self) -> Result<Side, ParseSideError> {
        match self.side.as_deref() {
            None => Ok(Side::North),
            Some(raw) => raw.parse(),
        }
    }

    /// Offset clamped to `0..=1`; absent or non-finite values become `0.5`.
    pub fn clamped_offset(&self) -> f64 {
        match self.offset {
            Some(o) if o.is_finite() => o.clamp(0.0, 1.0),
            _ => Self::DEFAULT_OFFSET,
        }
    }
}

// ---------------------------------------------------------------------------
// Prop / EnemySpawn
// ---------------------------------------------------------------------------

/// A decorative object positioned in room-local grid units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prop {
    pub room_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Key into the prop size table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Prop {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            x: None,
            y: None,
            category: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// An enemy spawn point positioned in room-local grid units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemySpawn {
    pub room_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Free-text role, shown on hover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl EnemySpawn {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            x: None,
            y: None,
            role: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_arrays_default_to_empty() {
        let layout = LevelLayout::from_json_str(r#"{"rooms": []}"#).unwrap();
        assert!(layout.connections.is_empty());
        assert!(layout.has_no_details());

        let layout = LevelLayout::from_json_str("{}").unwrap();
        assert!(layout.rooms.is_empty());
    }

    #[test]
    fn camel_case_wire_names() {
        let json = r#"{
            "rooms": [{"id": "a", "x": 0, "y": 0, "w": 2, "h": 2, "type": "Boss"}],
            "connections": [{"from": "a", "to": "b", "type": "corridor", "mainPath": true}],
            "doors": [{"roomId": "a", "side": "east", "offset": 0.25}],
            "enemySpawns": [{"roomId": "a", "role": "brute"}],
            "somethingElse": 42
        }"#;
        let layout = LevelLayout::from_json_str(json).unwrap();
        assert_eq!(layout.rooms[0].kind.as_deref(), Some("Boss"));
        assert!(layout.connections[0].is_corridor());
        assert!(layout.connections[0].main_path);
        assert_eq!(layout.doors[0].parsed_side(), Ok(Side::East));
        assert_eq!(layout.doors[0].clamped_offset(), 0.25);
        assert_eq!(layout.enemy_spawns[0].role.as_deref(), Some("brute"));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = LevelLayout::from_json_str("{rooms: ").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidJson { .. }));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let room = Room::new("vault", 0.0, 0.0, 1.0, 1.0);
        assert_eq!(room.display_name(), Some("vault"));
        assert_eq!(room.clone().with_label("Vault").display_name(), Some("Vault"));
        assert_eq!(room.clone().with_label("").display_name(), Some("vault"));
        assert_eq!(Room::new("", 0.0, 0.0, 1.0, 1.0).display_name(), None);
    }

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!("WEST".parse::<Side>(), Ok(Side::West));
        assert_eq!(" south ".parse::<Side>(), Ok(Side::South));
        assert!("up".parse::<Side>().is_err());
        assert_eq!(Opening::new("a").parsed_side(), Ok(Side::North));
    }

    #[test]
    fn offset_defaults_and_clamps() {
        assert_eq!(Opening::new("a").clamped_offset(), 0.5);
        assert_eq!(Opening::new("a").at(-1.0).clamped_offset(), 0.0);
        assert_eq!(Opening::new("a").at(3.0).clamped_offset(), 1.0);
        assert_eq!(Opening::new("a").at(f64::NAN).clamped_offset(), 0.5);
    }

    #[test]
    fn only_literal_corridor_is_dashed() {
        let mut conn = Connection::new("a", "b");
        assert!(!conn.is_corridor());
        conn.kind = Some("door".to_owned());
        assert!(!conn.is_corridor());
        conn.kind = Some("corridor".to_owned());
        assert!(conn.is_corridor());
    }

    #[test]
    fn room_size_validation() {
        assert!(Room::new("a", 0.0, 0.0, 1.0, 1.0).has_valid_size());
        assert!(!Room::new("a", 0.0, 0.0, 0.0, 1.0).has_valid_size());
        assert!(!Room::new("a", 0.0, 0.0, 1.0, -2.0).has_valid_size());
    }
}
