//! Layout store - groups of tabbed panels arranged left-to-right
//!
//! The layout is an ordered list of groups plus a parallel list of widths.
//! Every mutation validates its arguments against the current state first
//! and either applies completely or returns a [`LayoutError`] without
//! touching anything.
//!
//! Widths are kept in basis points (10000 = 100%) so the sum invariant is
//! exact. The last group absorbs any rounding remainder.

use std::collections::HashSet;
use std::fmt;

use super::panel::{Panel, PanelKey, PanelKind};

// ============================================================================
// Widths
// ============================================================================

/// Basis points making up the full workspace width
pub const FULL_WIDTH: u32 = 10_000;

/// Width of a group as a fraction of the workspace, in basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Width(u32);

impl Width {
    pub const FULL: Width = Width(FULL_WIDTH);

    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// Width from a percentage, rounded to the nearest basis point
    pub fn from_percent(percent: f64) -> Self {
        Self((percent * 100.0).round().max(0.0) as u32)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Fraction of the workspace in `0.0..=1.0`
    pub fn fraction(self) -> f32 {
        self.0 as f32 / FULL_WIDTH as f32
    }

    /// Parse a percentage string such as `"33%"` or `"33.33%"`
    pub fn parse(s: &str) -> Option<Width> {
        let number = s.trim().strip_suffix('%')?.trim();
        let percent: f64 = number.parse().ok()?;
        if !percent.is_finite() || percent < 0.0 {
            return None;
        }
        Some(Self::from_percent(percent))
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

/// Total of `widths` in basis points, wide enough that no input overflows
fn width_sum(widths: &[Width]) -> u64 {
    widths.iter().map(|w| u64::from(w.0)).sum()
}

/// Scale widths proportionally so they sum to `total`.
///
/// The last entry absorbs the rounding remainder. All-zero input is split
/// evenly.
pub(crate) fn rescale(widths: &mut [Width], total: u32) {
    let Some(last) = widths.len().checked_sub(1) else {
        return;
    };
    let current: u64 = widths.iter().map(|w| w.0 as u64).sum();

    if current == 0 {
        let share = total / widths.len() as u32;
        for w in widths.iter_mut() {
            w.0 = share;
        }
    } else {
        for w in widths.iter_mut() {
            w.0 = (w.0 as u64 * total as u64 / current) as u32;
        }
    }

    let assigned: u32 = widths[..last].iter().map(|w| w.0).sum();
    widths[last].0 = total.saturating_sub(assigned);
}

// ============================================================================
// Errors
// ============================================================================

/// A rejected layout operation. The layout is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("panel '{0}' is not in the layout")]
    UnknownPanel(PanelKey),
    #[error("panel '{key}' is not in group {group}")]
    PanelNotInGroup { key: PanelKey, group: usize },
    #[error("group index {index} out of range ({count} groups)")]
    GroupOutOfRange { index: usize, count: usize },
    #[error("tab index {index} out of range for group {group} ({count} tabs)")]
    TabOutOfRange {
        group: usize,
        index: usize,
        count: usize,
    },
    #[error("source and target are the same group ({0})")]
    SameGroup(usize),
    #[error("expected {expected} widths, got {actual}")]
    WidthCountMismatch { expected: usize, actual: usize },
    #[error("widths sum to {0} basis points, expected 10000")]
    WidthSumMismatch(u64),
    #[error("boundary {index} out of range ({count} groups)")]
    BoundaryOutOfRange { index: usize, count: usize },
    #[error("groups need {required}px but only {available}px are available")]
    TooNarrow { required: f32, available: f32 },
    #[error("a group must contain at least one panel")]
    EmptyGroup,
    #[error("a layout must contain at least one group")]
    NoGroups,
    #[error("panel '{0}' appears more than once")]
    DuplicatePanel(PanelKey),
}

// ============================================================================
// Groups
// ============================================================================

/// Where a split places the new group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSide {
    /// Leftmost position of the layout
    Left,
    /// Rightmost position of the layout
    Right,
    /// At a boundary between groups: the new group takes this index
    /// (indexed against the layout before the split)
    Between(usize),
}

/// An ordered set of panels sharing one tab strip and one content viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    panels: Vec<Panel>,
    active: usize,
}

impl Group {
    fn new(panels: Vec<Panel>) -> Self {
        Self { panels, active: 0 }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    /// Index of the visible panel
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_panel(&self) -> Option<&Panel> {
        self.panels.get(self.active)
    }

    pub fn position(&self, key: &PanelKey) -> Option<usize> {
        self.panels.iter().position(|p| &p.key == key)
    }

    pub fn contains(&self, key: &PanelKey) -> bool {
        self.position(key).is_some()
    }

    /// Aggregate minimum width: the widest requirement among its panels
    pub fn min_width(&self) -> f32 {
        self.panels
            .iter()
            .map(|p| p.min_width)
            .fold(0.0, f32::max)
    }

    fn active_key(&self) -> Option<PanelKey> {
        self.active_panel().map(|p| p.key.clone())
    }

    /// Point `active` back at `key`, or clamp it if that panel left
    fn restore_active(&mut self, key: Option<&PanelKey>) {
        if let Some(index) = key.and_then(|k| self.position(k)) {
            self.active = index;
        } else if self.active >= self.panels.len() {
            self.active = self.panels.len().saturating_sub(1);
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// The full ordered collection of groups plus their widths
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    groups: Vec<Group>,
    widths: Vec<Width>,
}

impl Default for Layout {
    /// A single group holding every known panel, full width
    fn default() -> Self {
        let panels = PanelKind::ALL.into_iter().map(Panel::default_for).collect();
        Self {
            groups: vec![Group::new(panels)],
            widths: vec![Width::FULL],
        }
    }
}

impl Layout {
    /// Build a layout from panel lists and widths, validating every invariant
    pub fn new(groups: Vec<Vec<Panel>>, widths: Vec<Width>) -> Result<Self, LayoutError> {
        if groups.is_empty() {
            return Err(LayoutError::NoGroups);
        }
        if groups.iter().any(|g| g.is_empty()) {
            return Err(LayoutError::EmptyGroup);
        }
        if groups.len() != widths.len() {
            return Err(LayoutError::WidthCountMismatch {
                expected: groups.len(),
                actual: widths.len(),
            });
        }
        let sum = width_sum(&widths);
        if sum != u64::from(FULL_WIDTH) {
            return Err(LayoutError::WidthSumMismatch(sum));
        }

        let mut seen = HashSet::new();
        for panel in groups.iter().flatten() {
            if !seen.insert(&panel.key) {
                return Err(LayoutError::DuplicatePanel(panel.key.clone()));
            }
        }

        Ok(Self {
            groups: groups.into_iter().map(Group::new).collect(),
            widths,
        })
    }

    /// Build a layout whose groups share the width evenly
    pub fn with_even_widths(groups: Vec<Vec<Panel>>) -> Result<Self, LayoutError> {
        let mut widths = vec![Width::default(); groups.len()];
        rescale(&mut widths, FULL_WIDTH);
        Self::new(groups, widths)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn widths(&self) -> &[Width] {
        &self.widths
    }

    pub fn panel_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// All panels in group order, left to right
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.groups.iter().flat_map(|g| g.panels.iter())
    }

    /// Locate a panel as `(group index, tab index)`
    pub fn find_panel(&self, key: &PanelKey) -> Option<(usize, usize)> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(g, group)| group.position(key).map(|i| (g, i)))
    }

    /// Keys of each group, for compact comparisons
    pub fn keys(&self) -> Vec<Vec<&str>> {
        self.groups
            .iter()
            .map(|g| g.panels.iter().map(|p| p.key.as_str()).collect())
            .collect()
    }

    fn check_group(&self, index: usize) -> Result<(), LayoutError> {
        if index >= self.groups.len() {
            return Err(LayoutError::GroupOutOfRange {
                index,
                count: self.groups.len(),
            });
        }
        Ok(())
    }

    fn check_tab(&self, group: usize, index: usize) -> Result<(), LayoutError> {
        self.check_group(group)?;
        let count = self.groups[group].len();
        if index >= count {
            return Err(LayoutError::TabOutOfRange {
                group,
                index,
                count,
            });
        }
        Ok(())
    }

    /// Position of `key` inside group `group`
    fn locate(&self, key: &PanelKey, group: usize) -> Result<usize, LayoutError> {
        self.check_group(group)?;
        match self.groups[group].position(key) {
            Some(index) => Ok(index),
            None if self.find_panel(key).is_some() => Err(LayoutError::PanelNotInGroup {
                key: key.clone(),
                group,
            }),
            None => Err(LayoutError::UnknownPanel(key.clone())),
        }
    }

    /// Remove a group and hand its width to the rest proportionally
    fn remove_group(&mut self, index: usize) {
        self.groups.remove(index);
        self.widths.remove(index);
        rescale(&mut self.widths, FULL_WIDTH);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Make a tab the visible one in its group
    pub fn activate(&mut self, group: usize, index: usize) -> Result<(), LayoutError> {
        self.check_tab(group, index)?;
        self.groups[group].active = index;
        Ok(())
    }

    /// Move the panel at `from` to `to` within one group
    pub fn reorder_within_group(
        &mut self,
        group: usize,
        from: usize,
        to: usize,
    ) -> Result<(), LayoutError> {
        self.check_tab(group, from)?;
        self.check_tab(group, to)?;
        if from == to {
            return Ok(());
        }

        let group = &mut self.groups[group];
        let active = group.active_key();
        let panel = group.panels.remove(from);
        group.panels.insert(to, panel);
        group.restore_active(active.as_ref());
        Ok(())
    }

    /// Move a panel into another group at `target_index` (clamped to the end).
    ///
    /// An emptied source group is removed. Returns the target group's index
    /// after the move, which shifts left when the source group disappeared
    /// before it.
    pub fn move_across_groups(
        &mut self,
        key: &PanelKey,
        source: usize,
        target: usize,
        target_index: usize,
    ) -> Result<usize, LayoutError> {
        let from = self.locate(key, source)?;
        self.check_group(target)?;
        if source == target {
            return Err(LayoutError::SameGroup(source));
        }

        let source_group = &mut self.groups[source];
        let source_active = source_group.active_key();
        let panel = source_group.panels.remove(from);
        source_group.restore_active(source_active.as_ref());

        let target_group = &mut self.groups[target];
        let index = target_index.min(target_group.len());
        target_group.panels.insert(index, panel);
        target_group.active = index;

        if self.groups[source].is_empty() {
            self.remove_group(source);
            if source < target {
                return Ok(target - 1);
            }
        }
        Ok(target)
    }

    /// Extract a panel into a brand-new single-panel group.
    ///
    /// The new group takes an equal share of the width and the other groups
    /// are scaled into the rest. Returns the new group's index.
    pub fn split_group(
        &mut self,
        key: &PanelKey,
        source: usize,
        side: SplitSide,
    ) -> Result<usize, LayoutError> {
        let from = self.locate(key, source)?;
        let count = self.groups.len();
        let mut position = match side {
            SplitSide::Left => 0,
            SplitSide::Right => count,
            SplitSide::Between(boundary) => {
                if boundary > count {
                    return Err(LayoutError::BoundaryOutOfRange {
                        index: boundary,
                        count,
                    });
                }
                boundary
            }
        };

        let source_group = &mut self.groups[source];
        let source_active = source_group.active_key();
        let panel = source_group.panels.remove(from);
        source_group.restore_active(source_active.as_ref());

        if self.groups[source].is_empty() {
            self.remove_group(source);
            if position > source {
                position -= 1;
            }
        }

        let share = FULL_WIDTH / (self.groups.len() as u32 + 1);
        rescale(&mut self.widths, FULL_WIDTH - share);
        self.groups.insert(position, Group::new(vec![panel]));
        self.widths.insert(position, Width(share));
        Ok(position)
    }

    /// Replace the width list. Length must match and the sum must be 100%.
    pub fn set_widths(&mut self, widths: Vec<Width>) -> Result<(), LayoutError> {
        if widths.len() != self.groups.len() {
            return Err(LayoutError::WidthCountMismatch {
                expected: self.groups.len(),
                actual: widths.len(),
            });
        }
        let sum = width_sum(&widths);
        if sum != u64::from(FULL_WIDTH) {
            return Err(LayoutError::WidthSumMismatch(sum));
        }
        self.widths = widths;
        Ok(())
    }
}

// ============================================================================
// Debug Invariant Validation
// ============================================================================

impl Layout {
    /// Validate structural invariants in debug builds.
    ///
    /// Checks that:
    /// - there is at least one group and no group is empty
    /// - widths parallel groups and sum to exactly 100%
    /// - every panel key appears exactly once
    /// - every active index points at a tab
    ///
    /// Panics in debug builds if any invariant is violated.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        assert!(!self.groups.is_empty(), "layout has no groups");
        assert_eq!(
            self.groups.len(),
            self.widths.len(),
            "{} groups but {} widths",
            self.groups.len(),
            self.widths.len()
        );

        let sum = width_sum(&self.widths);
        assert_eq!(sum, u64::from(FULL_WIDTH), "widths sum to {} basis points", sum);

        let mut seen = HashSet::new();
        for (index, group) in self.groups.iter().enumerate() {
            assert!(!group.is_empty(), "group {} is empty", index);
            assert!(
                group.active < group.len(),
                "group {} has active index {} but only {} tabs",
                index,
                group.active,
                group.len()
            );
            for panel in &group.panels {
                assert!(
                    seen.insert(&panel.key),
                    "panel '{}' appears more than once",
                    panel.key
                );
            }
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}
