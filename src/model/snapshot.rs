//! Tab geometry captured once at drag start
//!
//! While a drag is in progress the tabs visibly slide around to make room
//! for the dragged one. Index math reads this frozen copy instead of the
//! live frames so those animations never feed back into the drop index.

use super::geometry::GroupFrame;

/// Horizontal extent of one tab, relative to its header's left edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabBounds {
    pub left: f32,
    pub right: f32,
    pub width: f32,
    pub center: f32,
}

impl TabBounds {
    pub fn new(left: f32, width: f32) -> Self {
        Self {
            left,
            right: left + width,
            width,
            center: left + width / 2.0,
        }
    }
}

/// Per-group tab bounds, in header-local coordinates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometrySnapshot {
    groups: Vec<Vec<TabBounds>>,
}

impl GeometrySnapshot {
    /// Freeze the tab strips of every group
    pub fn capture(frames: &[GroupFrame]) -> Self {
        let groups = frames
            .iter()
            .map(|frame| {
                frame
                    .tabs
                    .iter()
                    .map(|tab| TabBounds::new(tab.x - frame.header.x, tab.width))
                    .collect()
            })
            .collect();
        Self { groups }
    }

    /// Cached tabs of a group; empty if the group did not exist at capture
    pub fn tabs(&self, group: usize) -> &[TabBounds] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tab(&self, group: usize, index: usize) -> Option<&TabBounds> {
        self.groups.get(group)?.get(index)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
