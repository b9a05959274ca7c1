//! Drop resolution - pointer position to drop intent
//!
//! Everything here is pure: the caller supplies the pointer, the target
//! group's rectangles and the cached tab bounds, and gets back what a
//! release at that spot would do.

use super::geometry::{Point, Rect};
use super::layout::SplitSide;
use super::snapshot::TabBounds;

/// Distance from a group edge, in pixels, within which a split is armed
pub const EDGE_THRESHOLD_PX: f32 = 40.0;

/// Which group boundary is armed to create a split on release.
///
/// Only one boundary can be armed at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropIndicator {
    #[default]
    None,
    /// Left edge of the first group
    LeftEdge(usize),
    /// Right edge of the last group
    RightEdge(usize),
    /// Edge of a middle group. `boundary` is the index the new group takes.
    Between { group: usize, boundary: usize },
}

impl DropIndicator {
    pub fn is_armed(&self) -> bool {
        !matches!(self, DropIndicator::None)
    }

    /// Group showing the indicator
    pub fn group(&self) -> Option<usize> {
        match *self {
            DropIndicator::None => None,
            DropIndicator::LeftEdge(group) | DropIndicator::RightEdge(group) => Some(group),
            DropIndicator::Between { group, .. } => Some(group),
        }
    }

    /// Where a split at this indicator would place the new group
    pub fn split_side(&self) -> Option<SplitSide> {
        match *self {
            DropIndicator::None => None,
            DropIndicator::LeftEdge(_) => Some(SplitSide::Left),
            DropIndicator::RightEdge(_) => Some(SplitSide::Right),
            DropIndicator::Between { boundary, .. } => Some(SplitSide::Between(boundary)),
        }
    }
}

/// Inputs for resolving one pointer position against one target group
#[derive(Debug, Clone, Copy)]
pub struct DropProbe<'a> {
    pub pointer: Point,
    /// Whole target group
    pub container: Rect,
    /// Target group's tab strip band
    pub header: Rect,
    pub group: usize,
    pub group_count: usize,
    /// Cached tab bounds of the target group
    pub tabs: &'a [TabBounds],
    pub edge_threshold: f32,
}

/// What the pointer is over right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerResolution {
    /// Split candidate for this frame, before debouncing
    pub indicator: DropIndicator,
    /// Insertion slot among the target's cached tabs
    pub slot: usize,
    pub over_header: bool,
}

/// Resolve a pointer position against a target group.
///
/// Returns `None` when the pointer is outside the group vertically.
pub fn resolve_pointer(probe: &DropProbe<'_>) -> Option<PointerResolution> {
    let Point { x, y } = probe.pointer;
    if !probe.container.contains_y(y) {
        return None;
    }

    let over_header = probe.header.contains_y(y);
    let indicator = if over_header {
        DropIndicator::None
    } else {
        edge_indicator(probe)
    };

    let slot = if indicator.is_armed() {
        0
    } else {
        insertion_slot(probe.tabs, x - probe.header.x)
    };

    Some(PointerResolution {
        indicator,
        slot,
        over_header,
    })
}

fn edge_indicator(probe: &DropProbe<'_>) -> DropIndicator {
    let x = probe.pointer.x;
    let from_left = x - probe.container.x;
    let from_right = probe.container.right() - x;
    let threshold = probe.edge_threshold;
    let group = probe.group;
    let is_first = group == 0;
    let is_last = group + 1 == probe.group_count;

    if is_first && from_left < threshold {
        DropIndicator::LeftEdge(group)
    } else if is_last && from_right < threshold {
        DropIndicator::RightEdge(group)
    } else if !is_first && !is_last && from_left < threshold {
        DropIndicator::Between {
            group,
            boundary: group,
        }
    } else if !is_first && !is_last && from_right < threshold {
        DropIndicator::Between {
            group,
            boundary: group + 1,
        }
    } else {
        DropIndicator::None
    }
}

/// First slot whose cached center lies at or right of `local_x`
pub fn insertion_slot(tabs: &[TabBounds], local_x: f32) -> usize {
    tabs.iter()
        .position(|tab| tab.center >= local_x)
        .unwrap_or(tabs.len())
}

/// Final index of a tab dropped into its own group at `slot`.
///
/// The slot counts the dragged tab itself, so slots after it shift left by one.
pub fn resolve_index(source_index: usize, slot: usize) -> usize {
    if slot > source_index {
        slot - 1
    } else {
        slot
    }
}

/// The layout change a release would make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    Reorder {
        group: usize,
        from: usize,
        to: usize,
    },
    MoveToGroup {
        source: usize,
        target: usize,
        /// `None` appends
        index: Option<usize>,
    },
    Split {
        source: usize,
        side: SplitSide,
    },
    None,
}

/// Decide what a release does. First match wins:
/// between-groups split, edge split, cross-group move, reorder, nothing.
pub fn resolve_drop(
    source_group: usize,
    source_index: usize,
    target_group: usize,
    slot: Option<usize>,
    indicator: DropIndicator,
) -> DropIntent {
    if indicator.group() == Some(target_group) {
        if let DropIndicator::Between { boundary, .. } = indicator {
            return DropIntent::Split {
                source: source_group,
                side: SplitSide::Between(boundary),
            };
        }
        if let Some(side) = indicator.split_side() {
            return DropIntent::Split {
                source: source_group,
                side,
            };
        }
    }

    if source_group != target_group {
        return DropIntent::MoveToGroup {
            source: source_group,
            target: target_group,
            index: slot,
        };
    }

    match slot.map(|s| resolve_index(source_index, s)) {
        Some(to) if to != source_index => DropIntent::Reorder {
            group: source_group,
            from: source_index,
            to,
        },
        _ => DropIntent::None,
    }
}

/// Horizontal offsets that open a gap at the drop slot.
///
/// `dragged` is the dragged tab's index when this strip is its source group;
/// that tab stays in place (it is drawn invisible) so indices elsewhere are
/// stable.
pub fn tab_offsets(
    tab_count: usize,
    dragged: Option<usize>,
    slot: Option<usize>,
    dragged_width: f32,
) -> Vec<f32> {
    let mut offsets = vec![0.0; tab_count];
    let Some(slot) = slot else {
        return offsets;
    };

    match dragged {
        Some(source) => {
            let to = resolve_index(source, slot);
            for (i, offset) in offsets.iter_mut().enumerate() {
                if to > source && i > source && i <= to {
                    *offset = -dragged_width;
                } else if to < source && i >= to && i < source {
                    *offset = dragged_width;
                }
            }
        }
        None => {
            for offset in offsets.iter_mut().skip(slot) {
                *offset = dragged_width;
            }
        }
    }
    offsets
}
