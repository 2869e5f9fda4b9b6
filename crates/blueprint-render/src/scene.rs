//! The composed scene graph.
//!
//! A [`Scene`] is an ordered stack of [`Layer`]s, back to front:
//!
//! ```text
//! background -> grid -> connections -> rooms -> doors -> windows -> props -> enemies
//! ```
//!
//! Each layer is a tagged entity with its own `visible` flag, so toggling a
//! layer never touches geometry: [`Scene::apply_visibility`] only rewrites
//! the flags. Layers hold [`Shape`]s; a shape is a small group of drawing
//! [`Primitive`]s with an id and, for rooms, props and enemies, hover text and
//! a hit area.

use serde::Serialize;

use crate::bounds::WorldBounds;
use crate::config::RenderConfig;
use crate::geometry::{PixelRect, Point};
use crate::report::{Diagnostic, RenderSummary};

// ---------------------------------------------------------------------------
// Paint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    pub color: &'static str,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    /// SVG dash pattern, e.g. `"4 4"`. `None` draws solid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
    pub round_cap: bool,
}

impl Stroke {
    pub fn solid(color: &'static str, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
            round_cap: false,
        }
    }

    pub fn dashed(mut self, pattern: &'static str) -> Self {
        self.dash = Some(pattern);
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round_cap = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

/// A single drawable element in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Rect {
        rect: PixelRect,
        corner_radius: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<Fill>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<Fill>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<Stroke>,
    },
    /// Text centered on `at`.
    Text {
        at: Point,
        content: String,
        font_size: f64,
        color: &'static str,
    },
}

// ---------------------------------------------------------------------------
// HitArea / Shape
// ---------------------------------------------------------------------------

/// Region that reacts to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HitArea {
    Rect { rect: PixelRect },
    Circle { center: Point, radius: f64 },
}

impl HitArea {
    pub fn contains(&self, p: Point) -> bool {
        match self {
            HitArea::Rect { rect } => rect.contains(p),
            HitArea::Circle { center, radius } => center.distance(p) <= *radius,
        }
    }
}

/// A logical drawable: one room, one connection, one door, ...
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    /// Unique within the scene, e.g. `"room-hall"` or `"door-3"`.
    pub id: String,
    pub parts: Vec<Primitive>,
    /// Multi-line descriptive text shown while hovered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit: Option<HitArea>,
}

impl Shape {
    pub fn new(id: impl Into<String>, parts: Vec<Primitive>) -> Self {
        Self {
            id: id.into(),
            parts,
            hover: None,
            hit: None,
        }
    }

    pub fn with_hover(mut self, text: String, hit: HitArea) -> Self {
        self.hover = Some(text);
        self.hit = Some(hit);
        self
    }

    pub fn is_hoverable(&self) -> bool {
        self.hover.is_some() && self.hit.is_some()
    }
}

// ---------------------------------------------------------------------------
// Layer
// ---------------------------------------------------------------------------

/// Identity of a scene layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Background,
    Grid,
    Connections,
    Rooms,
    Doors,
    Windows,
    Props,
    Enemies,
}

impl LayerKind {
    /// Back-to-front drawing order.
    pub const ORDER: [LayerKind; 8] = [
        LayerKind::Background,
        LayerKind::Grid,
        LayerKind::Connections,
        LayerKind::Rooms,
        LayerKind::Doors,
        LayerKind::Windows,
        LayerKind::Props,
        LayerKind::Enemies,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Background => "background",
            LayerKind::Grid => "grid",
            LayerKind::Connections => "connections",
            LayerKind::Rooms => "rooms",
            LayerKind::Doors => "doors",
            LayerKind::Windows => "windows",
            LayerKind::Props => "props",
            LayerKind::Enemies => "enemies",
        }
    }

    /// Whether a [`RenderConfig`] flag controls this layer.
    pub fn is_toggleable(self) -> bool {
        !matches!(
            self,
            LayerKind::Background | LayerKind::Connections | LayerKind::Rooms
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub visible: bool,
    /// Group opacity, if the layer is drawn translucent as a whole.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    pub shapes: Vec<Shape>,
}

impl Layer {
    pub fn new(kind: LayerKind, shapes: Vec<Shape>) -> Self {
        Self {
            kind,
            visible: true,
            opacity: None,
            shapes,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// A fully composed drawing, sized `width x height` pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub bounds: WorldBounds,
    layers: Vec<Layer>,
    summary: RenderSummary,
    diagnostics: Vec<Diagnostic>,
}

impl Scene {
    pub(crate) fn new(
        width: f64,
        height: f64,
        bounds: WorldBounds,
        layers: Vec<Layer>,
        summary: RenderSummary,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            width,
            height,
            bounds,
            layers,
            summary,
            diagnostics,
        }
    }

    /// Layers in back-to-front order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn summary(&self) -> &RenderSummary {
        &self.summary
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Find a shape by id in any layer.
    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.layers
            .iter()
            .flat_map(|l| l.shapes.iter())
            .find(|s| s.id == id)
    }

    pub fn is_visible(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some_and(|l| l.visible)
    }

    /// Re-apply visibility flags to the existing layers. Geometry is not
    /// touched.
    pub fn apply_visibility(&mut self, config: &RenderConfig) {
        for layer in &mut self.layers {
            layer.visible = config.is_visible(layer.kind);
        }
    }

    /// Show or hide one togglable layer. Returns `false` for fixed layers.
    pub fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) -> bool {
        if !kind.is_toggleable() {
            return false;
        }
        for layer in self.layers.iter_mut().filter(|l| l.kind == kind) {
            layer.visible = visible;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_puts_enemies_on_top() {
        assert_eq!(LayerKind::ORDER.first(), Some(&LayerKind::Background));
        assert_eq!(LayerKind::ORDER.last(), Some(&LayerKind::Enemies));
        let toggleable: Vec<_> = LayerKind::ORDER
            .iter()
            .filter(|k| k.is_toggleable())
            .map(|k| k.name())
            .collect();
        assert_eq!(toggleable, ["grid", "doors", "windows", "props", "enemies"]);
    }

    #[test]
    fn hit_areas() {
        let rect = HitArea::Rect {
            rect: PixelRect::new(0.0, 0.0, 10.0, 10.0),
        };
        assert!(rect.contains(Point::new(10.0, 0.0)));
        assert!(!rect.contains(Point::new(10.1, 5.0)));

        let circle = HitArea::Circle {
            center: Point::new(0.0, 0.0),
            radius: 5.0,
        };
        assert!(circle.contains(Point::new(3.0, 4.0)));
        assert!(!circle.contains(Point::new(4.0, 4.0)));
    }

    #[test]
    fn fixed_layers_cannot_be_hidden() {
        let mut scene = Scene::new(
            100.0,
            100.0,
            WorldBounds::FALLBACK,
            LayerKind::ORDER
                .iter()
                .map(|&k| Layer::new(k, Vec::new()))
                .collect(),
            RenderSummary::default(),
            Vec::new(),
        );
        assert!(!scene.set_layer_visible(LayerKind::Rooms, false));
        assert!(scene.is_visible(LayerKind::Rooms));
        assert!(scene.set_layer_visible(LayerKind::Grid, false));
        assert!(!scene.is_visible(LayerKind::Grid));

        scene.apply_visibility(&RenderConfig::default());
        assert!(scene.is_visible(LayerKind::Grid));
    }
}
