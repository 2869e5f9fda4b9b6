//! Property tests for the render pipeline.
//!
//! Random layouts (valid rooms plus connections and features that may point
//! at unknown room ids) are rendered and the scene is checked against the
//! canvas formula, containment and count invariants.

use blueprint_render::constants::{PADDING, SCALE};
use blueprint_render::prelude::*;
use proptest::prelude::*;

const ROOM_IDS: [&str; 6] = ["r0", "r1", "r2", "r3", "r4", "r5"];

/// Room ids in use plus one that never resolves.
fn ref_id() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::sample::select(ROOM_IDS.to_vec()).prop_map(str::to_owned),
        1 => Just("missing".to_owned()),
    ]
}

/// Grid coordinates on a half-unit lattice so the arithmetic stays exact.
fn coord() -> impl Strategy<Value = f64> {
    (-40i32..40).prop_map(|v| v as f64 * 0.5)
}

fn extent() -> impl Strategy<Value = f64> {
    (1i32..16).prop_map(|v| v as f64 * 0.5)
}

fn layout_strategy() -> impl Strategy<Value = LevelLayout> {
    let rooms = (1..=ROOM_IDS.len()).prop_flat_map(|n| {
        prop::collection::vec((coord(), coord(), extent(), extent()), n).prop_map(|dims| {
            dims.into_iter()
                .enumerate()
                .map(|(i, (x, y, w, h))| Room::new(ROOM_IDS[i], x, y, w, h))
                .collect::<Vec<_>>()
        })
    });
    let connections = prop::collection::vec(
        (ref_id(), ref_id(), any::<bool>()).prop_map(|(from, to, main)| {
            let mut c = Connection::new(from, to);
            c.main_path = main;
            c
        }),
        0..8,
    );
    let openings = || {
        prop::collection::vec(
            (ref_id(), prop::sample::select(Side::ALL.to_vec()), 0.0f64..=1.0)
                .prop_map(|(room, side, offset)| Opening::new(room).on(side).at(offset)),
            0..6,
        )
    };
    let props = prop::collection::vec(ref_id().prop_map(Prop::new), 0..6);
    let enemies = prop::collection::vec(ref_id().prop_map(EnemySpawn::new), 0..6);

    (rooms, connections, openings(), openings(), props, enemies).prop_map(
        |(rooms, connections, doors, windows, props, enemy_spawns)| LevelLayout {
            rooms,
            connections,
            doors,
            windows,
            props,
            enemy_spawns,
        },
    )
}

fn resolvable(layout: &LevelLayout, id: &str) -> bool {
    layout.room(id).is_some()
}

fn config_strategy() -> impl Strategy<Value = RenderConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(show_grid, show_doors, show_windows, show_props, show_enemies)| RenderConfig {
            show_grid,
            show_doors,
            show_windows,
            show_props,
            show_enemies,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn canvas_matches_room_extent(layout in layout_strategy()) {
        let scene = render(&layout, &RenderConfig::default()).unwrap();

        let min_x = layout.rooms.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
        let min_y = layout.rooms.iter().map(|r| r.y).fold(f64::INFINITY, f64::min);
        let max_x = layout.rooms.iter().map(|r| r.x + r.w).fold(f64::NEG_INFINITY, f64::max);
        let max_y = layout.rooms.iter().map(|r| r.y + r.h).fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(scene.width > 0.0 && scene.height > 0.0);
        prop_assert_eq!(scene.width, (max_x - min_x) * SCALE + 2.0 * PADDING);
        prop_assert_eq!(scene.height, (max_y - min_y) * SCALE + 2.0 * PADDING);
    }

    #[test]
    fn rooms_stay_inside_the_padded_canvas(layout in layout_strategy()) {
        let scene = render(&layout, &RenderConfig::default()).unwrap();
        for room in &scene.layer(LayerKind::Rooms).unwrap().shapes {
            let Some(Primitive::Rect { rect, .. }) = room.parts.first() else {
                return Err(TestCaseError::fail("room shape without a rect"));
            };
            prop_assert!(rect.x >= PADDING && rect.y >= PADDING);
            prop_assert!(rect.right() <= scene.width - PADDING);
            prop_assert!(rect.bottom() <= scene.height - PADDING);
        }
    }

    #[test]
    fn drawn_counts_equal_resolvable_counts(layout in layout_strategy()) {
        let scene = render(&layout, &RenderConfig::default()).unwrap();
        let summary = scene.summary();

        let connections = layout
            .connections
            .iter()
            .filter(|c| resolvable(&layout, &c.from) && resolvable(&layout, &c.to))
            .count();
        prop_assert_eq!(summary.connections, connections);
        prop_assert_eq!(summary.rooms, layout.rooms.len());
        prop_assert_eq!(
            summary.doors,
            layout.doors.iter().filter(|d| resolvable(&layout, &d.room_id)).count()
        );
        prop_assert_eq!(
            summary.windows,
            layout.windows.iter().filter(|w| resolvable(&layout, &w.room_id)).count()
        );
        prop_assert_eq!(
            summary.props,
            layout.props.iter().filter(|p| resolvable(&layout, &p.room_id)).count()
        );
        prop_assert_eq!(
            summary.enemies,
            layout.enemy_spawns.iter().filter(|e| resolvable(&layout, &e.room_id)).count()
        );
        prop_assert_eq!(
            scene.layer(LayerKind::Connections).unwrap().shapes.len(),
            connections
        );
    }

    #[test]
    fn visibility_round_trip_is_idempotent(
        layout in layout_strategy(),
        config in config_strategy(),
    ) {
        let original = render(&layout, &RenderConfig::default()).unwrap();
        let mut scene = original.clone();

        scene.apply_visibility(&config);
        for kind in LayerKind::ORDER {
            prop_assert_eq!(scene.is_visible(kind), config.is_visible(kind));
            prop_assert_eq!(
                &scene.layer(kind).unwrap().shapes,
                &original.layer(kind).unwrap().shapes
            );
        }

        scene.apply_visibility(&RenderConfig::default());
        prop_assert_eq!(&scene, &original);

        // Rendering with the config directly matches the fast path.
        let direct = render(&layout, &config).unwrap();
        let mut fast = original.clone();
        fast.apply_visibility(&config);
        prop_assert_eq!(direct, fast);
    }
}
