//! Blueprint Render -- compiles a level layout into a layered scene.
//!
//! A render is a single deterministic pass over a
//! [`LevelLayout`](blueprint_layout::model::LevelLayout):
//!
//! 1. **Bounds & scale** ([`bounds`]) -- the union of all room extents, and
//!    from it the pixel canvas (`SCALE` pixels per grid unit plus a fixed
//!    padding).
//! 2. **Geometry** ([`geometry`]) -- pixel rectangles and centers per room,
//!    door and window anchors on room edges, prop and enemy positions from
//!    room-local coordinates.
//! 3. **Composition** ([`compose`]) -- eight layers, back to front, each with
//!    its own visibility flag, plus hover text on rooms, props and enemies.
//!
//! The resulting [`Scene`](scene::Scene) can be written out as SVG
//! ([`svg`]), dumped as JSON, or driven interactively through a
//! [`Session`](session::Session) and a [`HoverTracker`](hover::HoverTracker).
//!
//! # Quick Start
//!
//! ```
//! use blueprint_render::prelude::*;
//!
//! let layout = LevelLayout {
//!     rooms: vec![
//!         Room::new("a", 0.0, 0.0, 2.0, 2.0).with_kind("spawn"),
//!         Room::new("b", 4.0, 0.0, 2.0, 2.0).with_kind("boss"),
//!     ],
//!     connections: vec![Connection::new("a", "b")],
//!     ..LevelLayout::default()
//! };
//!
//! let scene = render(&layout, &RenderConfig::default()).unwrap();
//! assert_eq!((scene.width, scene.height), (320.0, 160.0));
//! assert_eq!(scene.summary().connections, 1);
//! assert!(scene.to_svg_string().contains("<svg"));
//! ```

#![deny(unsafe_code)]

pub mod bounds;
pub mod compose;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod hover;
pub mod report;
pub mod scene;
pub mod session;
pub mod style;
pub mod svg;

use blueprint_layout::model::LevelLayout;
use blueprint_layout::LayoutError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort a render. Everything else is a
/// [`Diagnostic`](report::Diagnostic).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The layout has no drawable room.
    #[error("No rooms found in level-json.")]
    NoRooms,

    /// The layout could not be extracted from text.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Render `layout` into a scene with `config`'s layer visibility.
///
/// # Errors
///
/// Returns [`RenderError::NoRooms`] if the layout has no drawable room.
pub fn render(
    layout: &LevelLayout,
    config: &config::RenderConfig,
) -> Result<scene::Scene, RenderError> {
    compose::compose(layout, config)
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use blueprint_layout::prelude::*;

    pub use crate::bounds::{Frame, WorldBounds};
    pub use crate::config::RenderConfig;
    pub use crate::geometry::{FeatureKind, PixelRect, Point};
    pub use crate::hover::{HoverEvent, HoverObserver, HoverTracker};
    pub use crate::render;
    pub use crate::report::{Diagnostic, RenderSummary};
    pub use crate::scene::{HitArea, Layer, LayerKind, Primitive, Scene, Shape};
    pub use crate::session::{Session, Status};
    pub use crate::RenderError;
}
