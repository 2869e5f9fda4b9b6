//! Render summary and non-fatal diagnostics.
//!
//! A render either fails outright ([`RenderError`](crate::RenderError)) or
//! completes with every anomaly absorbed: the offending element is omitted
//! and a [`Diagnostic`] is recorded on the scene and logged at `warn` level.

use std::fmt;

use serde::Serialize;

use crate::geometry::FeatureKind;

// ---------------------------------------------------------------------------
// RenderSummary
// ---------------------------------------------------------------------------

/// Counts of the elements actually drawn in a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub rooms: usize,
    pub connections: usize,
    pub doors: usize,
    pub windows: usize,
    pub props: usize,
    pub enemies: usize,
}

impl fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rendered {} rooms, {} connections, {} doors, {} windows, {} props, {} enemies.",
            self.rooms, self.connections, self.doors, self.windows, self.props, self.enemies
        )
    }
}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A non-fatal anomaly found while rendering. The element it names was
/// skipped (or, for [`Diagnostic::UnknownSide`], placed on the north side).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A connection names a room id that does not exist.
    DanglingConnection {
        index: usize,
        from: String,
        to: String,
    },
    /// A door, window, prop or enemy spawn names a room id that does not exist.
    DanglingFeature {
        feature: FeatureKind,
        index: usize,
        room_id: String,
    },
    /// A room id seen earlier in the layout. The first occurrence is kept.
    DuplicateRoomId { id: String },
    /// A room whose width or height is not a positive finite number.
    InvalidRoomSize { id: String, w: f64, h: f64 },
    /// A door or window side that is not one of the four compass names.
    UnknownSide {
        feature: FeatureKind,
        index: usize,
        side: String,
    },
    /// The map is too wide for one grid line per unit; lines are drawn
    /// every `spacing` pixels instead.
    CoarseGrid { spacing: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingConnection { index, from, to } => write!(
                f,
                "connection #{index} ({from} -> {to}) references an unknown room; skipped"
            ),
            Diagnostic::DanglingFeature {
                feature,
                index,
                room_id,
            } => write!(
                f,
                "{feature} #{index} references unknown room '{room_id}'; skipped"
            ),
            Diagnostic::DuplicateRoomId { id } => {
                write!(f, "duplicate room id '{id}'; keeping the first occurrence")
            }
            Diagnostic::InvalidRoomSize { id, w, h } => {
                write!(f, "room '{id}' has invalid size {w} x {h}; skipped")
            }
            Diagnostic::UnknownSide {
                feature,
                index,
                side,
            } => write!(
                f,
                "{feature} #{index} has unknown side '{side}'; using north"
            ),
            Diagnostic::CoarseGrid { spacing } => {
                write!(f, "grid too dense; drawing a line every {spacing} px")
            }
        }
    }
}

/// Ordered collection of diagnostics for one render pass.
#[derive(Debug, Clone, Default)]
pub(crate) struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "render anomaly");
        self.0.push(diagnostic);
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_display_lists_every_count() {
        let summary = RenderSummary {
            rooms: 3,
            connections: 2,
            doors: 1,
            windows: 0,
            props: 4,
            enemies: 5,
        };
        assert_eq!(
            summary.to_string(),
            "Rendered 3 rooms, 2 connections, 1 doors, 0 windows, 4 props, 5 enemies."
        );
    }

    #[test]
    fn diagnostics_serialize_with_kind_tag() {
        let d = Diagnostic::DanglingFeature {
            feature: FeatureKind::Prop,
            index: 2,
            room_id: "nowhere".to_owned(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "dangling_feature");
        assert_eq!(json["feature"], "prop");
        assert_eq!(d.to_string(), "prop #2 references unknown room 'nowhere'; skipped");
    }
}
