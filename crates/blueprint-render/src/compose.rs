//! Scene composer: one deterministic pass from a [`LevelLayout`] to a
//! [`Scene`].
//!
//! The pass runs in a fixed order:
//!
//! 1. Select drawable rooms (valid size, first occurrence of each id).
//! 2. Resolve the [`Frame`] (bounds and canvas size).
//! 3. Build the [`GeometryIndex`] and resolve doors, windows, props and enemy
//!    spawns against it. Doors are resolved first because connections anchor
//!    on them.
//! 4. Emit one [`Layer`] per [`LayerKind`] in back-to-front order.
//! 5. Apply the visibility flags from the [`RenderConfig`].
//!
//! Only an empty room set is fatal. Every other anomaly becomes a
//! [`Diagnostic`] and the offending element is left out.

use std::collections::HashSet;

use blueprint_layout::model::{Connection, LevelLayout, Room};

use crate::bounds::Frame;
use crate::config::RenderConfig;
use crate::constants::*;
use crate::geometry::{
    perpendicular_mark, FeatureKind, GeometryIndex, PixelRect, Placement, Point, ResolvedOpening,
};
use crate::hover::{describe_enemy, describe_prop, describe_room};
use crate::report::{Diagnostic, Diagnostics, RenderSummary};
use crate::scene::{Fill, HitArea, Layer, LayerKind, Primitive, Scene, Shape, Stroke};
use crate::style::{feature_color, prop_size, room_color};
use crate::RenderError;

/// Compose the full scene for `layout`.
///
/// # Errors
///
/// Returns [`RenderError::NoRooms`] if the layout has no drawable room.
pub fn compose(layout: &LevelLayout, config: &RenderConfig) -> Result<Scene, RenderError> {
    let mut diagnostics = Diagnostics::default();

    let rooms = select_rooms(&layout.rooms, &mut diagnostics);
    let frame = Frame::resolve(rooms.iter().copied())?;
    tracing::debug!(
        rooms = rooms.len(),
        width = frame.width,
        height = frame.height,
        "resolved frame"
    );
    log_missing_details(layout);

    let mut index = GeometryIndex::build(&rooms, &frame);
    let doors = index.resolve_doors(&layout.doors, &mut diagnostics);
    let windows = index.resolve_openings(FeatureKind::Window, &layout.windows, &mut diagnostics);

    let props: Vec<_> = layout
        .props
        .iter()
        .enumerate()
        .filter_map(|(i, prop)| {
            index
                .place(FeatureKind::Prop, i, &prop.room_id, prop.x, prop.y, &mut diagnostics)
                .map(|placement| (placement, prop.category.as_deref()))
        })
        .collect();

    let enemies: Vec<_> = layout
        .enemy_spawns
        .iter()
        .enumerate()
        .filter_map(|(i, spawn)| {
            index
                .place(FeatureKind::Enemy, i, &spawn.room_id, spawn.x, spawn.y, &mut diagnostics)
                .map(|placement| (placement, spawn.role.as_deref()))
        })
        .collect();

    let connections = connection_shapes(&layout.connections, &index, &mut diagnostics);
    let grid = grid_shape(&frame, &mut diagnostics);

    let summary = RenderSummary {
        rooms: index.len(),
        connections: connections.len(),
        doors: doors.len(),
        windows: windows.len(),
        props: props.len(),
        enemies: enemies.len(),
    };

    let layers = vec![
        Layer::new(LayerKind::Background, vec![background_shape(&frame)]),
        Layer::new(LayerKind::Grid, vec![grid]).with_opacity(GRID_OPACITY),
        Layer::new(LayerKind::Connections, connections),
        Layer::new(LayerKind::Rooms, index.iter().map(|g| room_shape(g.room, g.rect)).collect()),
        Layer::new(LayerKind::Doors, doors.iter().map(door_shape).collect()),
        Layer::new(LayerKind::Windows, windows.iter().map(window_shape).collect()),
        Layer::new(
            LayerKind::Props,
            props.iter().map(|(p, category)| prop_shape(p, *category)).collect(),
        ),
        Layer::new(
            LayerKind::Enemies,
            enemies.iter().map(|(p, role)| enemy_shape(p, *role)).collect(),
        ),
    ];

    let mut scene = Scene::new(
        frame.width,
        frame.height,
        frame.bounds,
        layers,
        summary,
        diagnostics.into_vec(),
    );
    scene.apply_visibility(config);
    tracing::debug!(%summary, "scene composed");
    Ok(scene)
}

// ---------------------------------------------------------------------------
// Room selection
// ---------------------------------------------------------------------------

/// Rooms that take part in the render, in layout order.
fn select_rooms<'a>(rooms: &'a [Room], diagnostics: &mut Diagnostics) -> Vec<&'a Room> {
    let mut seen = HashSet::with_capacity(rooms.len());
    let mut selected = Vec::with_capacity(rooms.len());
    for room in rooms {
        if !room.has_valid_size() {
            diagnostics.push(Diagnostic::InvalidRoomSize {
                id: room.id.clone(),
                w: room.w,
                h: room.h,
            });
            continue;
        }
        if !seen.insert(room.id.as_str()) {
            diagnostics.push(Diagnostic::DuplicateRoomId { id: room.id.clone() });
            continue;
        }
        selected.push(room);
    }
    selected
}

fn log_missing_details(layout: &LevelLayout) {
    if layout.has_no_details() {
        tracing::debug!("layout has rooms and connections only");
        return;
    }
    let details = [
        ("doors", layout.doors.is_empty()),
        ("windows", layout.windows.is_empty()),
        ("props", layout.props.is_empty()),
        ("enemySpawns", layout.enemy_spawns.is_empty()),
    ];
    for (name, empty) in details {
        if empty {
            tracing::debug!(array = name, "detail array missing or empty");
        }
    }
}

// ---------------------------------------------------------------------------
// Background / grid
// ---------------------------------------------------------------------------

fn background_shape(frame: &Frame) -> Shape {
    Shape::new(
        "background",
        vec![Primitive::Rect {
            rect: PixelRect::new(0.0, 0.0, frame.width, frame.height),
            corner_radius: 0.0,
            fill: Some(Fill {
                color: BACKGROUND_COLOR,
                opacity: 1.0,
            }),
            stroke: None,
        }],
    )
}

/// Grid lines every [`SCALE`] pixels across the padded interior, coarsened
/// so neither axis exceeds [`MAX_GRID_LINES`].
fn grid_shape(frame: &Frame, diagnostics: &mut Diagnostics) -> Shape {
    let stroke = Stroke::solid(GRID_COLOR, GRID_STROKE_WIDTH);
    let (left, top) = (PADDING, PADDING);
    let right = frame.width - PADDING;
    let bottom = frame.height - PADDING;

    let (columns, column_spacing) = grid_axis(right - left);
    let (rows, row_spacing) = grid_axis(bottom - top);
    let spacing = column_spacing.max(row_spacing);
    if spacing > SCALE {
        diagnostics.push(Diagnostic::CoarseGrid { spacing });
    }

    let mut parts = Vec::new();
    for i in 0..=columns {
        let x = left + i as f64 * column_spacing;
        parts.push(Primitive::Line {
            from: Point::new(x, top),
            to: Point::new(x, bottom),
            stroke,
        });
    }
    for i in 0..=rows {
        let y = top + i as f64 * row_spacing;
        parts.push(Primitive::Line {
            from: Point::new(left, y),
            to: Point::new(right, y),
            stroke,
        });
    }
    Shape::new("grid", parts)
}

/// Whole grid cells in `span` pixels and the pixel spacing between lines.
///
/// The cell count never exceeds `MAX_GRID_LINES - 1`.
fn grid_axis(span: f64) -> (usize, f64) {
    if !(span.is_finite() && span > 0.0) {
        return (0, SCALE);
    }
    let cells = (span / SCALE + 1e-9).floor();
    let limit = (MAX_GRID_LINES - 1) as f64;
    let stride = if cells > limit { (cells / limit).ceil() } else { 1.0 };
    ((cells / stride + 1e-9).floor() as usize, stride * SCALE)
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

fn connection_shapes(
    connections: &[Connection],
    index: &GeometryIndex<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<Shape> {
    connections
        .iter()
        .enumerate()
        .filter_map(|(i, connection)| {
            let (Some(from), Some(to)) = (index.get(&connection.from), index.get(&connection.to))
            else {
                diagnostics.push(Diagnostic::DanglingConnection {
                    index: i,
                    from: connection.from.clone(),
                    to: connection.to.clone(),
                });
                return None;
            };
            let start = from.connection_anchor(to.center);
            let end = to.connection_anchor(from.center);
            Some(connection_shape(i, connection, start, end))
        })
        .collect()
}

fn connection_shape(index: usize, connection: &Connection, start: Point, end: Point) -> Shape {
    let base = if connection.main_path {
        Stroke::solid(MAIN_PATH_COLOR, MAIN_PATH_STROKE_WIDTH)
    } else {
        Stroke::solid(CONNECTION_COLOR, CONNECTION_STROKE_WIDTH)
    }
    .rounded();
    let line = if connection.is_corridor() {
        base.dashed(CORRIDOR_DASH)
    } else {
        base
    };

    let mut parts = vec![Primitive::Line {
        from: start,
        to: end,
        stroke: line,
    }];
    let (tip, left, right) = arrowhead(start, end);
    parts.push(Primitive::Line {
        from: tip,
        to: left,
        stroke: base,
    });
    parts.push(Primitive::Line {
        from: tip,
        to: right,
        stroke: base,
    });
    Shape::new(format!("connection-{index}"), parts)
}

/// Tip and wing ends of the arrowhead near `end`, pointing from `start`
/// toward `end`.
pub(crate) fn arrowhead(start: Point, end: Point) -> (Point, Point, Point) {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let len = dx.hypot(dy);
    let len = if len > 0.0 { len } else { 1.0 };
    let (ux, uy) = (dx / len, dy / len);
    // Perpendicular to the direction of travel.
    let (px, py) = (-uy, ux);

    let tip = Point::new(end.x - ux * ARROW_INSET, end.y - uy * ARROW_INSET);
    let back = Point::new(tip.x - ux * ARROW_LENGTH, tip.y - uy * ARROW_LENGTH);
    let spread = ARROW_LENGTH * ARROW_SPREAD;
    (
        tip,
        Point::new(back.x + px * spread, back.y + py * spread),
        Point::new(back.x - px * spread, back.y - py * spread),
    )
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

fn room_shape(room: &Room, rect: PixelRect) -> Shape {
    let color = room_color(room.kind.as_deref());
    let mut parts = vec![Primitive::Rect {
        rect,
        corner_radius: ROOM_CORNER_RADIUS,
        fill: Some(Fill {
            color,
            opacity: ROOM_FILL_OPACITY,
        }),
        stroke: Some(Stroke::solid(color, ROOM_STROKE_WIDTH)),
    }];
    if let Some(name) = room.display_name() {
        parts.push(Primitive::Text {
            at: rect.center(),
            content: name.to_owned(),
            font_size: LABEL_FONT_SIZE,
            color: LABEL_COLOR,
        });
    }
    Shape::new(format!("room-{}", room.id), parts)
        .with_hover(describe_room(room), HitArea::Rect { rect })
}

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

fn door_shape(door: &ResolvedOpening) -> Shape {
    let (from, to) = perpendicular_mark(door.anchor, door.side, DOOR_MARK_LENGTH);
    Shape::new(
        format!("door-{}", door.index),
        vec![Primitive::Line {
            from,
            to,
            stroke: Stroke::solid(feature_color(FeatureKind::Door), DOOR_STROKE_WIDTH),
        }],
    )
}

fn window_shape(window: &ResolvedOpening) -> Shape {
    let (from, to) = perpendicular_mark(window.anchor, window.side, WINDOW_MARK_LENGTH);
    Shape::new(
        format!("window-{}", window.index),
        vec![Primitive::Line {
            from,
            to,
            stroke: Stroke::solid(feature_color(FeatureKind::Window), WINDOW_STROKE_WIDTH)
                .dashed(WINDOW_DASH),
        }],
    )
}

fn prop_shape(placement: &Placement, category: Option<&str>) -> Shape {
    let size = prop_size(category);
    let rect = PixelRect::centered(placement.point, size.w, size.h);
    let color = feature_color(FeatureKind::Prop);
    Shape::new(
        format!("prop-{}", placement.index),
        vec![Primitive::Rect {
            rect,
            corner_radius: PROP_CORNER_RADIUS,
            fill: Some(Fill {
                color,
                opacity: PROP_FILL_OPACITY,
            }),
            stroke: Some(Stroke::solid(color, PROP_STROKE_WIDTH)),
        }],
    )
    .with_hover(describe_prop(category, placement.local), HitArea::Rect { rect })
}

fn enemy_shape(placement: &Placement, role: Option<&str>) -> Shape {
    let center = placement.point;
    let color = feature_color(FeatureKind::Enemy);
    let crosshair = Stroke::solid(CROSSHAIR_COLOR, CROSSHAIR_STROKE_WIDTH);
    Shape::new(
        format!("enemy-{}", placement.index),
        vec![
            Primitive::Circle {
                center,
                radius: ENEMY_RADIUS,
                fill: Some(Fill {
                    color,
                    opacity: ENEMY_FILL_OPACITY,
                }),
                stroke: Some(Stroke::solid(color, ENEMY_STROKE_WIDTH)),
            },
            Primitive::Line {
                from: Point::new(center.x - ENEMY_RADIUS, center.y),
                to: Point::new(center.x + ENEMY_RADIUS, center.y),
                stroke: crosshair,
            },
            Primitive::Line {
                from: Point::new(center.x, center.y - ENEMY_RADIUS),
                to: Point::new(center.x, center.y + ENEMY_RADIUS),
                stroke: crosshair,
            },
        ],
    )
    .with_hover(
        describe_enemy(role, placement.local),
        HitArea::Circle {
            center,
            radius: ENEMY_RADIUS,
        },
    )
}
