//! Layout persistence through a key/value store
//!
//! The whole layout is stored as one JSON blob under a single key:
//!
//! ```json
//! { "groups": [[{"type": "inventory", "key": "inventory"}]], "widths": ["100%"] }
//! ```
//!
//! Restoring is forgiving about unknown panel types (those tabs are dropped,
//! and groups left empty go with them) but anything structurally wrong
//! discards the blob and yields the default layout.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::layout::{rescale, Layout, LayoutError, Width, FULL_WIDTH};
use crate::model::panel::{Panel, PanelKind};

/// Key the layout blob is stored under
pub const LAYOUT_STORAGE_KEY: &str = "workspace-layout";

// ============================================================================
// Storage
// ============================================================================

/// Minimal key/value store the layout is persisted through
pub trait LayoutStorage {
    /// Stored value for `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used by tests and as a fallback when no config dir exists
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `~/.config/shopdesk/state/`
    pub fn open_default() -> Option<Self> {
        crate::config_paths::storage_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            bail!("invalid storage key '{}'", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl LayoutStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        // Write-then-rename so a crash never leaves half a layout behind
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// Envelope
// ============================================================================

/// One tab as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
}

/// Stored shape of a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEnvelope {
    pub groups: Vec<Vec<TabEntry>>,
    pub widths: Vec<String>,
}

impl From<&Layout> for LayoutEnvelope {
    fn from(layout: &Layout) -> Self {
        Self {
            groups: layout
                .groups()
                .iter()
                .map(|group| {
                    group
                        .panels()
                        .iter()
                        .map(|panel| TabEntry {
                            kind: panel.kind.tag().to_string(),
                            key: panel.key.to_string(),
                        })
                        .collect()
                })
                .collect(),
            widths: layout.widths().iter().map(Width::to_string).collect(),
        }
    }
}

/// Why a stored layout was discarded
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("stored layout is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored layout has {groups} groups but {widths} widths")]
    ShapeMismatch { groups: usize, widths: usize },
    #[error("stored width '{0}' is not a percentage")]
    InvalidWidth(String),
    #[error("stored layout has no known panels")]
    NoPanels,
    #[error("stored layout is inconsistent: {0}")]
    Invalid(#[from] LayoutError),
}

pub fn serialize(layout: &Layout) -> Result<String> {
    serde_json::to_string(&LayoutEnvelope::from(layout)).context("Failed to serialize layout")
}

/// Rebuild a layout from its stored JSON
pub fn deserialize(json: &str) -> Result<Layout, RestoreError> {
    let envelope: LayoutEnvelope = serde_json::from_str(json)?;
    if envelope.groups.len() != envelope.widths.len() {
        return Err(RestoreError::ShapeMismatch {
            groups: envelope.groups.len(),
            widths: envelope.widths.len(),
        });
    }

    let mut groups = Vec::with_capacity(envelope.groups.len());
    let mut widths = Vec::with_capacity(envelope.widths.len());

    for (entries, width) in envelope.groups.into_iter().zip(envelope.widths) {
        let width = Width::parse(&width).ok_or_else(|| RestoreError::InvalidWidth(width))?;

        let panels: Vec<Panel> = entries
            .into_iter()
            .filter_map(|entry| match PanelKind::from_tag(&entry.kind) {
                Some(kind) => Some(Panel::new(entry.key, kind)),
                None => {
                    tracing::warn!(
                        "Dropping stored tab '{}' with unknown type '{}'",
                        entry.key,
                        entry.kind
                    );
                    None
                }
            })
            .collect();

        if panels.is_empty() {
            tracing::debug!("Dropping stored group with no known panels");
            continue;
        }
        groups.push(panels);
        widths.push(width);
    }

    if groups.is_empty() {
        return Err(RestoreError::NoPanels);
    }

    rescale(&mut widths, FULL_WIDTH);
    Ok(Layout::new(groups, widths)?)
}

/// Load the layout stored under `key`, or the default layout
pub fn load_layout(storage: &dyn LayoutStorage, key: &str) -> Layout {
    let json = match storage.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => {
            tracing::info!("No stored layout under '{}', using default", key);
            return Layout::default();
        }
        Err(e) => {
            tracing::warn!("Failed to read stored layout: {:#}", e);
            return Layout::default();
        }
    };

    match deserialize(&json) {
        Ok(layout) => {
            tracing::info!(
                "Restored layout with {} groups, {} panels",
                layout.group_count(),
                layout.panel_count()
            );
            layout
        }
        Err(e) => {
            tracing::warn!("Discarding stored layout: {}", e);
            Layout::default()
        }
    }
}

/// Write the layout under `key`
pub fn save_layout(storage: &mut dyn LayoutStorage, key: &str, layout: &Layout) -> Result<()> {
    let json = serialize(layout)?;
    storage.set(key, &json)?;
    tracing::debug!("Saved layout under '{}'", key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_serializes_to_envelope() {
        let json = serialize(&Layout::default()).unwrap();
        let envelope: LayoutEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope.widths, vec!["100%".to_string()]);
        assert_eq!(envelope.groups.len(), 1);
        assert_eq!(envelope.groups[0].len(), PanelKind::ALL.len());
        assert_eq!(envelope.groups[0][0].kind, "shopParameters");
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let json = r#"{"groups":[[{"type":"details","key":"d"}]],"widths":["50%","50%"]}"#;
        assert!(matches!(
            deserialize(json),
            Err(RestoreError::ShapeMismatch {
                groups: 1,
                widths: 2
            })
        ));
    }

    #[test]
    fn test_non_string_key_is_rejected() {
        let json = r#"{"groups":[[{"type":"details","key":7}]],"widths":["100%"]}"#;
        assert!(matches!(deserialize(json), Err(RestoreError::Malformed(_))));
    }

    #[test]
    fn test_bad_width_is_rejected() {
        let json = r#"{"groups":[[{"type":"details","key":"d"}]],"widths":["wide"]}"#;
        assert!(matches!(deserialize(json), Err(RestoreError::InvalidWidth(_))));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let json = r#"{"groups":[[{"type":"details","key":"d"}],[{"type":"inventory","key":"d"}]],"widths":["50%","50%"]}"#;
        assert!(matches!(
            deserialize(json),
            Err(RestoreError::Invalid(LayoutError::DuplicatePanel(_)))
        ));
    }

    #[test]
    fn test_widths_are_renormalized() {
        let json = r#"{"groups":[[{"type":"details","key":"d"}],[{"type":"inventory","key":"i"}]],"widths":["30%","30%"]}"#;
        let layout = deserialize(json).unwrap();
        assert_eq!(
            layout.widths(),
            &[Width::from_basis_points(5000), Width::from_basis_points(5000)]
        );
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(storage.set("../escape", "{}").is_err());
        assert!(storage.get("").is_err());
    }
}
