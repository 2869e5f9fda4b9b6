//! Render session: the generate / toggle / clear cycle.
//!
//! A [`Session`] holds at most one mounted [`Scene`] and the last layout that
//! rendered successfully. A new render replaces both wholesale; a failed
//! render leaves neither behind. Visibility changes take the fast path and
//! only rewrite the mounted scene's layer flags.

use std::fmt;

use blueprint_layout::extract::extract_level_json;
use blueprint_layout::model::LevelLayout;
use blueprint_layout::LayoutError;

use crate::compose::compose;
use crate::config::RenderConfig;
use crate::report::RenderSummary;
use crate::scene::{LayerKind, Scene};
use crate::RenderError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// User-facing outcome of the last session action.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    /// `generate` was called with blank text.
    EmptyInput,
    Rendered(RenderSummary),
    Failed(String),
    Cleared,
}

impl Status {
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::EmptyInput | Status::Failed(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::EmptyInput => f.write_str("Please paste the full level blueprint text first."),
            Status::Rendered(summary) => write!(f, "Done. {summary}"),
            Status::Failed(message) => write!(f, "Error: {message}"),
            Status::Cleared => f.write_str("Cleared."),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: RenderConfig,
    last_layout: Option<LevelLayout>,
    scene: Option<Scene>,
    status: Status,
}

impl Session {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Extract a layout from free-form `text` and render it.
    pub fn generate(&mut self, text: &str) -> &Status {
        self.generate_with(text, extract_level_json)
    }

    /// Like [`generate`](Self::generate), for bare layout JSON without a
    /// fenced block.
    pub fn generate_json(&mut self, json: &str) -> &Status {
        self.generate_with(json, LevelLayout::from_json_str)
    }

    fn generate_with(
        &mut self,
        input: &str,
        parse: impl FnOnce(&str) -> Result<LevelLayout, LayoutError>,
    ) -> &Status {
        if input.trim().is_empty() {
            self.unmount();
            self.status = Status::EmptyInput;
            return &self.status;
        }

        match parse(input) {
            Ok(layout) => {
                // Failure is recorded in `status` by `render_layout`.
                let _ = self.render_layout(layout);
            }
            Err(error) => self.fail(&error.into()),
        }
        &self.status
    }

    /// Render an already parsed layout, replacing the mounted scene.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoRooms`] if the layout has no drawable room.
    /// The previous scene and layout are dropped either way.
    pub fn render_layout(&mut self, layout: LevelLayout) -> Result<&Scene, RenderError> {
        match compose(&layout, &self.config) {
            Ok(scene) => {
                self.status = Status::Rendered(*scene.summary());
                self.last_layout = Some(layout);
                Ok(self.scene.insert(scene))
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Recompose the scene from the last successful layout, if any.
    ///
    /// # Errors
    ///
    /// Propagates the render error; cannot fail for a layout that rendered
    /// before.
    pub fn rerender(&mut self) -> Result<Option<&Scene>, RenderError> {
        let Some(layout) = self.last_layout.take() else {
            return Ok(None);
        };
        self.render_layout(layout).map(Some)
    }

    /// Replace the configuration and re-apply it to the mounted scene.
    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
        if let Some(scene) = &mut self.scene {
            scene.apply_visibility(&self.config);
        }
    }

    /// Show or hide one togglable layer. Returns `false` for fixed layers.
    pub fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) -> bool {
        if !self.config.set_visible(kind, visible) {
            return false;
        }
        if let Some(scene) = &mut self.scene {
            scene.set_layer_visible(kind, visible);
        }
        true
    }

    /// Drop the scene and the last layout.
    pub fn clear(&mut self) {
        self.unmount();
        self.status = Status::Cleared;
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn last_layout(&self) -> Option<&LevelLayout> {
        self.last_layout.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    fn fail(&mut self, error: &RenderError) {
        tracing::warn!(%error, "render failed");
        self.unmount();
        self.status = Status::Failed(error.to_string());
    }

    fn unmount(&mut self) {
        self.scene = None;
        self.last_layout = None;
    }
}
