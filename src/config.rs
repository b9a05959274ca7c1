//! Workspace configuration persistence
//!
//! Stores tunables in `~/.config/shopdesk/config.yaml`. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::drag::DRAG_THRESHOLD_PX;
use crate::model::drop::EDGE_THRESHOLD_PX;
use crate::model::geometry::TabMetrics;
use crate::model::indicator::INDICATOR_DEBOUNCE_MS;
use crate::persistence::LAYOUT_STORAGE_KEY;

/// Workspace configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Distance from a group edge that arms a split, in pixels
    pub edge_threshold_px: f32,
    /// Delay before split indicator changes are shown
    pub indicator_debounce_ms: u64,
    /// Pointer travel before a pressed tab starts dragging
    pub drag_threshold_px: f32,
    pub header_height: f32,
    pub splitter_width: f32,
    pub tab_char_width: f32,
    pub tab_padding: f32,
    pub min_tab_width: f32,
    /// Key the layout is stored under
    pub storage_key: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        let metrics = TabMetrics::default();
        Self {
            edge_threshold_px: EDGE_THRESHOLD_PX,
            indicator_debounce_ms: INDICATOR_DEBOUNCE_MS,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            header_height: metrics.header_height,
            splitter_width: metrics.splitter_width,
            tab_char_width: metrics.char_width,
            tab_padding: metrics.tab_padding,
            min_tab_width: metrics.min_tab_width,
            storage_key: LAYOUT_STORAGE_KEY.to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Tab strip and splitter sizes
    pub fn metrics(&self) -> TabMetrics {
        TabMetrics {
            header_height: self.header_height,
            splitter_width: self.splitter_width,
            char_width: self.tab_char_width,
            tab_padding: self.tab_padding,
            min_tab_width: self.min_tab_width,
        }
    }

    pub fn indicator_delay(&self) -> Duration {
        Duration::from_millis(self.indicator_debounce_ms)
    }
}
