//! Category style tables.
//!
//! Room colors, feature colors and prop sizes are static lookup tables with an
//! explicit default entry. Lookups are case-insensitive and ignore
//! surrounding whitespace; unknown or missing keys get the default.
//!
//! | Room type | Color |
//! |-----------|-------|
//! | spawn | green (#22c55e) |
//! | combat | orange (#f97316) |
//! | puzzle | blue (#3b82f6) |
//! | boss | pink (#ec4899) |
//! | hub, safe | purple (#a855f7) |
//! | treasure | yellow (#eab308) |
//! | corridor | slate (#64748b) |
//! | *other* | gray (#9ca3af) |

use serde::Serialize;

use crate::geometry::FeatureKind;

// ---------------------------------------------------------------------------
// Room colors
// ---------------------------------------------------------------------------

const ROOM_COLORS: &[(&str, &str)] = &[
    ("spawn", "#22c55e"),
    ("combat", "#f97316"),
    ("puzzle", "#3b82f6"),
    ("boss", "#ec4899"),
    ("hub", "#a855f7"),
    ("safe", "#a855f7"),
    ("treasure", "#eab308"),
    ("corridor", "#64748b"),
];

pub const DEFAULT_ROOM_COLOR: &str = "#9ca3af";

/// Fill/stroke color for a room category.
pub fn room_color(kind: Option<&str>) -> &'static str {
    lookup(ROOM_COLORS, kind).unwrap_or(DEFAULT_ROOM_COLOR)
}

// ---------------------------------------------------------------------------
// Feature colors
// ---------------------------------------------------------------------------

pub const DOOR_COLOR: &str = "#f59e0b";
pub const WINDOW_COLOR: &str = "#38bdf8";
pub const PROP_COLOR: &str = "#a8a29e";
pub const ENEMY_COLOR: &str = "#ef4444";

pub fn feature_color(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::Door => DOOR_COLOR,
        FeatureKind::Window => WINDOW_COLOR,
        FeatureKind::Prop => PROP_COLOR,
        FeatureKind::Enemy => ENEMY_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Prop sizes
// ---------------------------------------------------------------------------

/// Pixel size of a prop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropSize {
    pub w: f64,
    pub h: f64,
}

impl PropSize {
    const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

const PROP_SIZES: &[(&str, PropSize)] = &[
    ("crate", PropSize::new(14.0, 14.0)),
    ("barrel", PropSize::new(12.0, 12.0)),
    ("chest", PropSize::new(18.0, 12.0)),
    ("table", PropSize::new(28.0, 16.0)),
    ("pillar", PropSize::new(16.0, 16.0)),
    ("statue", PropSize::new(18.0, 18.0)),
    ("altar", PropSize::new(24.0, 14.0)),
    ("torch", PropSize::new(8.0, 8.0)),
    ("bookshelf", PropSize::new(28.0, 10.0)),
    ("trap", PropSize::new(16.0, 16.0)),
];

pub const DEFAULT_PROP_SIZE: PropSize = PropSize::new(12.0, 12.0);

pub fn prop_size(category: Option<&str>) -> PropSize {
    lookup(PROP_SIZES, category).unwrap_or(DEFAULT_PROP_SIZE)
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

fn lookup<T: Copy>(table: &[(&str, T)], key: Option<&str>) -> Option<T> {
    let key = key?.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|&(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_colors_are_case_insensitive() {
        assert_eq!(room_color(Some("BOSS")), "#ec4899");
        assert_eq!(room_color(Some(" Spawn ")), "#22c55e");
        assert_eq!(room_color(Some("hub")), room_color(Some("safe")));
    }

    #[test]
    fn unknown_room_type_gets_default() {
        assert_eq!(room_color(Some("kitchen")), DEFAULT_ROOM_COLOR);
        assert_eq!(room_color(Some("")), DEFAULT_ROOM_COLOR);
        assert_eq!(room_color(None), DEFAULT_ROOM_COLOR);
    }

    #[test]
    fn prop_sizes_fall_back() {
        assert_eq!(prop_size(Some("Table")), PropSize::new(28.0, 16.0));
        assert_eq!(prop_size(Some("spaceship")), DEFAULT_PROP_SIZE);
        assert_eq!(prop_size(None), DEFAULT_PROP_SIZE);
    }

    #[test]
    fn every_feature_has_a_distinct_color() {
        let colors = [
            feature_color(FeatureKind::Door),
            feature_color(FeatureKind::Window),
            feature_color(FeatureKind::Prop),
            feature_color(FeatureKind::Enemy),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
