//! Drag state machine data
//!
//! A tab drag goes Idle -> Armed (pressed, not yet moved far enough) ->
//! Dragging -> Idle. At most one pointer gesture is active, so the state is a
//! single enum owned by the workspace model. Splitter resizes share it.

use std::collections::BTreeMap;

use super::drop::{resolve_index, tab_offsets};
use super::geometry::Point;
use super::panel::{PanelKey, PanelKind};
use super::resize::ResizeDrag;
use super::snapshot::GeometrySnapshot;

/// Minimum pointer travel, in pixels, before a press becomes a drag
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

// ============================================================================
// Transfer payload
// ============================================================================

pub const TRANSFER_PANEL_KEY: &str = "panel-key";
pub const TRANSFER_PANEL_TYPE: &str = "panel-type";
pub const TRANSFER_SOURCE_GROUP: &str = "source-group";
pub const TRANSFER_SOURCE_INDEX: &str = "source-index";

/// String key/value data carried with a drag, like a toolkit's data transfer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferData(BTreeMap<String, String>);

impl TransferData {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }
}

/// Why a transfer payload could not be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("drag payload is missing '{0}'")]
    MissingField(&'static str),
    #[error("drag payload field '{field}' is not an index: '{value}'")]
    InvalidIndex { field: &'static str, value: String },
    #[error("drag payload names unknown panel type '{0}'")]
    UnknownPanelType(String),
}

/// What is being dragged and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub key: PanelKey,
    pub kind: PanelKind,
    pub source_group: usize,
    pub source_index: usize,
}

impl DragPayload {
    pub fn to_transfer(&self) -> TransferData {
        let mut data = TransferData::default();
        data.set(TRANSFER_PANEL_KEY, self.key.as_str());
        data.set(TRANSFER_PANEL_TYPE, self.kind.tag());
        data.set(TRANSFER_SOURCE_GROUP, self.source_group.to_string());
        data.set(TRANSFER_SOURCE_INDEX, self.source_index.to_string());
        data
    }

    pub fn parse(data: &TransferData) -> Result<Self, PayloadError> {
        let key = require(data, TRANSFER_PANEL_KEY)?;
        let tag = require(data, TRANSFER_PANEL_TYPE)?;
        let source_group = require_index(data, TRANSFER_SOURCE_GROUP)?;
        let source_index = require_index(data, TRANSFER_SOURCE_INDEX)?;
        let kind =
            PanelKind::from_tag(tag).ok_or_else(|| PayloadError::UnknownPanelType(tag.into()))?;

        Ok(Self {
            key: PanelKey::new(key),
            kind,
            source_group,
            source_index,
        })
    }
}

fn require<'a>(data: &'a TransferData, field: &'static str) -> Result<&'a str, PayloadError> {
    data.get(field).ok_or(PayloadError::MissingField(field))
}

fn require_index(data: &TransferData, field: &'static str) -> Result<usize, PayloadError> {
    let value = require(data, field)?;
    value.parse().map_err(|_| PayloadError::InvalidIndex {
        field,
        value: value.to_string(),
    })
}

// ============================================================================
// Sessions
// ============================================================================

/// A tab pressed but not yet dragged past the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmedTab {
    pub group: usize,
    pub index: usize,
    pub origin: Point,
}

/// An in-progress tab relocation
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub panel: PanelKey,
    pub source_group: usize,
    pub source_index: usize,
    /// Tab geometry frozen at drag start
    pub snapshot: GeometrySnapshot,
    /// Data handed to the drop handler
    pub transfer: TransferData,
    /// Group under the pointer, if it resolved to one
    pub target_group: Option<usize>,
    /// Insertion slot in `target_group`
    pub slot: Option<usize>,
    pub pointer: Point,
}

impl DragSession {
    pub fn new(payload: &DragPayload, snapshot: GeometrySnapshot, pointer: Point) -> Self {
        Self {
            panel: payload.key.clone(),
            source_group: payload.source_group,
            source_index: payload.source_index,
            snapshot,
            transfer: payload.to_transfer(),
            target_group: None,
            slot: None,
            pointer,
        }
    }

    /// Cached width of the dragged tab
    pub fn dragged_width(&self) -> f32 {
        self.snapshot
            .tab(self.source_group, self.source_index)
            .map(|t| t.width)
            .unwrap_or(0.0)
    }

    /// Index the tab would land on if released in its own group now
    pub fn resolved_index(&self) -> Option<usize> {
        self.slot.map(|slot| resolve_index(self.source_index, slot))
    }

    /// Render offsets for a group's tabs while this drag is running
    pub fn tab_offsets(&self, group: usize, tab_count: usize) -> Vec<f32> {
        let dragged = (group == self.source_group).then_some(self.source_index);
        let slot = if self.target_group == Some(group) {
            self.slot
        } else {
            None
        };
        tab_offsets(tab_count, dragged, slot, self.dragged_width())
    }

    /// Whether a tab is the one being dragged (drawn invisible)
    pub fn is_dragged(&self, group: usize, index: usize) -> bool {
        group == self.source_group && index == self.source_index
    }
}

/// The single pointer gesture in progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Armed(ArmedTab),
    Dragging(Box<DragSession>),
    Resizing(ResizeDrag),
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> DragPayload {
        DragPayload {
            key: PanelKey::from("inventory"),
            kind: PanelKind::Inventory,
            source_group: 1,
            source_index: 2,
        }
    }

    #[test]
    fn test_transfer_round_trip() {
        let data = payload().to_transfer();
        assert_eq!(data.get(TRANSFER_PANEL_TYPE), Some("inventory"));
        assert_eq!(DragPayload::parse(&data), Ok(payload()));
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut data = payload().to_transfer();
        data.remove(TRANSFER_SOURCE_INDEX);
        assert_eq!(
            DragPayload::parse(&data),
            Err(PayloadError::MissingField(TRANSFER_SOURCE_INDEX))
        );
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let mut data = payload().to_transfer();
        data.set(TRANSFER_PANEL_TYPE, "chatThread");
        assert_eq!(
            DragPayload::parse(&data),
            Err(PayloadError::UnknownPanelType("chatThread".into()))
        );
    }

    #[test]
    fn test_bad_index_is_reported() {
        let mut data = payload().to_transfer();
        data.set(TRANSFER_SOURCE_GROUP, "-1");
        assert!(matches!(
            DragPayload::parse(&data),
            Err(PayloadError::InvalidIndex { field: TRANSFER_SOURCE_GROUP, .. })
        ));
    }
}
