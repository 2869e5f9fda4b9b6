//! Layer visibility configuration.

use serde::{Deserialize, Serialize};

use crate::scene::LayerKind;

/// Which togglable layers are shown.
///
/// Background, connections and rooms are always shown and have no flag.
/// Deserializes from camelCase JSON; missing keys keep their default, so
/// `{"showGrid": false}` is a complete config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub show_grid: bool,
    pub show_doors: bool,
    pub show_windows: bool,
    pub show_props: bool,
    pub show_enemies: bool,
}

impl Default for RenderConfig {
    /// Every layer visible.
    fn default() -> Self {
        Self {
            show_grid: true,
            show_doors: true,
            show_windows: true,
            show_props: true,
            show_enemies: true,
        }
    }
}

impl RenderConfig {
    /// Everything hidden except the always-on layers.
    pub fn minimal() -> Self {
        Self {
            show_grid: false,
            show_doors: false,
            show_windows: false,
            show_props: false,
            show_enemies: false,
        }
    }

    pub fn is_visible(&self, kind: LayerKind) -> bool {
        match kind {
            LayerKind::Background | LayerKind::Connections | LayerKind::Rooms => true,
            LayerKind::Grid => self.show_grid,
            LayerKind::Doors => self.show_doors,
            LayerKind::Windows => self.show_windows,
            LayerKind::Props => self.show_props,
            LayerKind::Enemies => self.show_enemies,
        }
    }

    /// Set the flag for a togglable layer. Returns `false` (and changes
    /// nothing) for layers that cannot be toggled.
    pub fn set_visible(&mut self, kind: LayerKind, visible: bool) -> bool {
        let flag = match kind {
            LayerKind::Grid => &mut self.show_grid,
            LayerKind::Doors => &mut self.show_doors,
            LayerKind::Windows => &mut self.show_windows,
            LayerKind::Props => &mut self.show_props,
            LayerKind::Enemies => &mut self.show_enemies,
            LayerKind::Background | LayerKind::Connections | LayerKind::Rooms => return false,
        };
        *flag = visible;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_everything() {
        let config = RenderConfig::default();
        assert!(LayerKind::ORDER.iter().all(|&k| config.is_visible(k)));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"showGrid": false}"#).unwrap();
        assert!(!config.show_grid);
        assert!(config.show_doors && config.show_windows && config.show_props && config.show_enemies);
    }

    #[test]
    fn fixed_layers_ignore_toggles() {
        let mut config = RenderConfig::minimal();
        assert!(!config.set_visible(LayerKind::Rooms, false));
        assert!(config.is_visible(LayerKind::Rooms));
        assert!(config.is_visible(LayerKind::Connections));
        assert!(config.is_visible(LayerKind::Background));

        assert!(config.set_visible(LayerKind::Props, true));
        assert!(config.show_props);
    }
}
