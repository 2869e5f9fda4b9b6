//! SVG emission for a composed [`Scene`].
//!
//! Each layer becomes a `<g id="layer-{name}" data-layer="{name}">` group, in
//! drawing order. Hidden layers stay in the document with `display="none"`
//! so a viewer can toggle them without re-rendering. Every shape becomes a
//! nested group carrying its id; hoverable shapes also get
//! `class="hoverable"` and a `<title>` with the hover text.

use std::fmt::Write as _;

use svg::node::element::{Circle, Group, Line, Rectangle, Text, Title};
use svg::node::Value;
use svg::Document;

use crate::scene::{Fill, Layer, Primitive, Scene, Shape, Stroke};

const FONT_FAMILY: &str = "sans-serif";

impl Scene {
    /// Build the SVG document for this scene.
    pub fn to_svg(&self) -> Document {
        let document = Document::new()
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .set("preserveAspectRatio", "xMidYMid meet");
        self.layers()
            .iter()
            .fold(document, |doc, layer| doc.add(layer_group(layer)))
    }

    /// The SVG document serialized as a string.
    pub fn to_svg_string(&self) -> String {
        self.to_svg().to_string()
    }
}

fn layer_group(layer: &Layer) -> Group {
    let name = layer.kind.name();
    let mut group = Group::new()
        .set("id", format!("layer-{name}"))
        .set("data-layer", name);
    if !layer.visible {
        group = group.set("display", "none");
    }
    if let Some(opacity) = layer.opacity {
        group = group.set("opacity", opacity);
    }
    layer
        .shapes
        .iter()
        .fold(group, |g, shape| g.add(shape_group(shape)))
}

fn shape_group(shape: &Shape) -> Group {
    let mut group = Group::new().set("id", svg_id(&shape.id));
    if let Some(text) = shape.hover.as_deref().filter(|_| shape.is_hoverable()) {
        group = group.set("class", "hoverable").add(Title::new(text));
    }
    shape.parts.iter().fold(group, |g, part| match part {
        Primitive::Rect {
            rect,
            corner_radius,
            fill,
            stroke,
        } => {
            let el = Rectangle::new()
                .set("x", rect.x)
                .set("y", rect.y)
                .set("width", rect.w)
                .set("height", rect.h);
            let el = if *corner_radius > 0.0 {
                el.set("rx", *corner_radius)
            } else {
                el
            };
            g.add(paint(el, *fill, *stroke))
        }
        Primitive::Line { from, to, stroke } => {
            let el = Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y);
            g.add(paint(el, None, Some(*stroke)))
        }
        Primitive::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let el = Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", *radius);
            g.add(paint(el, *fill, *stroke))
        }
        Primitive::Text {
            at,
            content,
            font_size,
            color,
        } => g.add(
            Text::new(content.as_str())
                .set("x", at.x)
                .set("y", at.y)
                .set("fill", *color)
                .set("font-size", *font_size)
                .set("font-family", FONT_FAMILY)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle"),
        ),
    })
}

// ---------------------------------------------------------------------------
// Paint attributes
// ---------------------------------------------------------------------------

/// Elements that take fill and stroke attributes.
trait Paintable: Sized {
    fn attr(self, name: &str, value: impl Into<Value>) -> Self;
}

macro_rules! paintable {
    ($($element:ty),*) => {
        $(impl Paintable for $element {
            fn attr(self, name: &str, value: impl Into<Value>) -> Self {
                self.set(name, value)
            }
        })*
    };
}

paintable!(Rectangle, Line, Circle);

fn paint<E: Paintable>(element: E, fill: Option<Fill>, stroke: Option<Stroke>) -> E {
    let element = match fill {
        Some(fill) => element
            .attr("fill", fill.color)
            .attr("fill-opacity", fill.opacity),
        None => element.attr("fill", "none"),
    };
    let Some(stroke) = stroke else {
        return element;
    };
    let mut element = element
        .attr("stroke", stroke.color)
        .attr("stroke-width", stroke.width);
    if let Some(dash) = stroke.dash {
        element = element.attr("stroke-dasharray", dash);
    }
    if stroke.round_cap {
        element = element.attr("stroke-linecap", "round");
    }
    element
}

/// Shape ids come from user-authored room ids; keep them valid as XML ids.
///
/// The escape is reversible so distinct ids stay distinct: `_` becomes `__`
/// and any other character outside `[A-Za-z0-9-]` becomes `_{hex}_`.
fn svg_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        match c {
            c if c.is_ascii_alphanumeric() || c == '-' => out.push(c),
            '_' => out.push_str("__"),
            c => {
                let _ = write!(out, "_{:x}_", u32::from(c));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use blueprint_layout::model::{LevelLayout, Prop, Room};

    use super::*;
    use crate::compose::compose;
    use crate::config::RenderConfig;
    use crate::scene::LayerKind;

    fn layout() -> LevelLayout {
        LevelLayout {
            rooms: vec![Room::new("great hall", 0.0, 0.0, 2.0, 2.0).with_kind("hub")],
            props: vec![Prop::new("great hall").with_category("table")],
            ..LevelLayout::default()
        }
    }

    #[test]
    fn root_declares_viewport() {
        let svg = compose(&layout(), &RenderConfig::default())
            .unwrap()
            .to_svg_string();
        assert!(svg.contains(r#"viewBox="0 0 160 160""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid meet""#));
    }

    #[test]
    fn layers_are_groups_in_order() {
        let svg = compose(&layout(), &RenderConfig::default())
            .unwrap()
            .to_svg_string();
        let positions: Vec<usize> = LayerKind::ORDER
            .iter()
            .map(|k| svg.find(&format!(r#"id="layer-{}""#, k.name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(svg.contains(r#"opacity="0.2""#));
    }

    #[test]
    fn hidden_layers_are_kept_but_not_displayed() {
        let mut scene = compose(&layout(), &RenderConfig::default()).unwrap();
        assert!(!scene.to_svg_string().contains(r#"display="none""#));

        scene.set_layer_visible(LayerKind::Props, false);
        let svg = scene.to_svg_string();
        assert!(svg.contains(r#"display="none""#));
        assert!(svg.contains(r#"id="prop-0""#));
    }

    #[test]
    fn hoverable_shapes_get_a_title() {
        let svg = compose(&layout(), &RenderConfig::default())
            .unwrap()
            .to_svg_string();
        assert!(svg.contains(r#"id="room-great_20_hall""#));
        assert!(svg.contains(r#"class="hoverable""#));
        assert_eq!(svg.matches("<title>").count(), 2);
    }

    #[test]
    fn ids_are_escaped() {
        assert_eq!(svg_id("room-a b/c"), "room-a_20_b_2f_c");
        assert_eq!(svg_id("door-3"), "door-3");
        assert_eq!(svg_id("room-é"), "room-_e9_");
    }

    #[test]
    fn escaped_ids_stay_distinct() {
        let layout = LevelLayout {
            rooms: vec![
                Room::new("a b", 0.0, 0.0, 1.0, 1.0),
                Room::new("a_b", 2.0, 0.0, 1.0, 1.0),
                Room::new("a_20_b", 4.0, 0.0, 1.0, 1.0),
            ],
            ..LevelLayout::default()
        };
        let svg = compose(&layout, &RenderConfig::default())
            .unwrap()
            .to_svg_string();
        assert_eq!(svg.matches(r#"id="room-a_20_b""#).count(), 1);
        assert_eq!(svg.matches(r#"id="room-a__b""#).count(), 1);
        assert_eq!(svg.matches(r#"id="room-a__20__b""#).count(), 1);
    }
}
