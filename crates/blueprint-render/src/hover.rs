//! Hover interaction: descriptive text for shapes and pointer tracking.
//!
//! The renderer does not own a window or an event loop. A presentation layer
//! forwards pointer positions (in canvas pixels) to a [`HoverTracker`], which
//! hit-tests the scene and reports enter/move/leave events to a
//! [`HoverObserver`]. Only rooms, props and enemy spawns carry hover text, and
//! shapes on hidden layers are never hit.

use blueprint_layout::model::Room;

use crate::geometry::Point;
use crate::scene::{Scene, Shape};

// ---------------------------------------------------------------------------
// Hover text
// ---------------------------------------------------------------------------

/// Hover text for a room: name, category and size in grid units.
pub fn describe_room(room: &Room) -> String {
    format!(
        "{}\nType: {}\nSize: {} x {}",
        room.display_name().unwrap_or("(unnamed room)"),
        room.kind.as_deref().unwrap_or("default"),
        room.w,
        room.h
    )
}

/// Hover text for a prop: category and room-local position.
pub fn describe_prop(category: Option<&str>, local: (f64, f64)) -> String {
    format!(
        "Prop: {}\nLocal: ({:.1}, {:.1})",
        category.unwrap_or("unknown"),
        local.0,
        local.1
    )
}

/// Hover text for an enemy spawn: role and room-local position.
pub fn describe_enemy(role: Option<&str>, local: (f64, f64)) -> String {
    format!(
        "Enemy: {}\nLocal: ({:.1}, {:.1})",
        role.unwrap_or("unknown"),
        local.0,
        local.1
    )
}

// ---------------------------------------------------------------------------
// Observer contract
// ---------------------------------------------------------------------------

/// Receives hover events from a [`HoverTracker`].
pub trait HoverObserver {
    /// The pointer entered `shape_id`; show `text` near `pointer`.
    fn on_enter(&mut self, shape_id: &str, text: &str, pointer: Point);
    /// The pointer moved within the hovered shape.
    fn on_move(&mut self, pointer: Point);
    /// Nothing is hovered any more.
    fn on_leave(&mut self);
}

/// A recorded hover event.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    Enter {
        shape_id: String,
        text: String,
        pointer: Point,
    },
    Move {
        pointer: Point,
    },
    Leave,
}

/// Records events in order. Handy for tests and for UIs that drain events
/// once per frame.
impl HoverObserver for Vec<HoverEvent> {
    fn on_enter(&mut self, shape_id: &str, text: &str, pointer: Point) {
        self.push(HoverEvent::Enter {
            shape_id: shape_id.to_owned(),
            text: text.to_owned(),
            pointer,
        });
    }

    fn on_move(&mut self, pointer: Point) {
        self.push(HoverEvent::Move { pointer });
    }

    fn on_leave(&mut self) {
        self.push(HoverEvent::Leave);
    }
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

/// The front-most hoverable shape under `pointer` on a visible layer.
pub fn hit_test(scene: &Scene, pointer: Point) -> Option<&Shape> {
    scene
        .layers()
        .iter()
        .rev()
        .filter(|layer| layer.visible)
        .flat_map(|layer| layer.shapes.iter().rev())
        .find(|shape| {
            shape.hover.is_some() && shape.hit.is_some_and(|hit| hit.contains(pointer))
        })
}

// ---------------------------------------------------------------------------
// HoverTracker
// ---------------------------------------------------------------------------

/// Tracks which shape is hovered and turns raw pointer positions into
/// enter/move/leave events.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    current: Option<String>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the currently hovered shape.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Feed a pointer position inside the canvas.
    pub fn pointer_moved(
        &mut self,
        scene: &Scene,
        pointer: Point,
        observer: &mut impl HoverObserver,
    ) {
        let hit = hit_test(scene, pointer);
        let same = matches!(
            (hit, self.current.as_deref()),
            (Some(shape), Some(current)) if shape.id == current
        );
        if same {
            observer.on_move(pointer);
            return;
        }

        if self.current.take().is_some() {
            observer.on_leave();
        }
        if let Some(shape) = hit {
            let text = shape.hover.as_deref().unwrap_or_default();
            observer.on_enter(&shape.id, text, pointer);
            self.current = Some(shape.id.clone());
        }
    }

    /// The pointer left the canvas.
    pub fn pointer_left(&mut self, observer: &mut impl HoverObserver) {
        if self.current.take().is_some() {
            observer.on_leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_text_falls_back_to_defaults() {
        let room = Room::new("cellar", 0.0, 0.0, 3.0, 2.5);
        assert_eq!(describe_room(&room), "cellar\nType: default\nSize: 3 x 2.5");

        let room = room.with_label("Wine Cellar").with_kind("treasure");
        assert_eq!(describe_room(&room), "Wine Cellar\nType: treasure\nSize: 3 x 2.5");
    }

    #[test]
    fn feature_text_rounds_to_one_decimal() {
        assert_eq!(
            describe_prop(Some("barrel"), (1.26, 0.04)),
            "Prop: barrel\nLocal: (1.3, 0.0)"
        );
        assert_eq!(
            describe_enemy(None, (2.0, 3.0)),
            "Enemy: unknown\nLocal: (2.0, 3.0)"
        );
    }

    #[test]
    fn recording_observer_keeps_order() {
        let mut events: Vec<HoverEvent> = Vec::new();
        events.on_enter("room-a", "a", Point::new(1.0, 1.0));
        events.on_move(Point::new(2.0, 2.0));
        events.on_leave();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], HoverEvent::Leave);
    }
}
