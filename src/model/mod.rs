//! Workspace model - the complete state of the layout engine
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod debounce;
pub mod drag;
pub mod drop;
pub mod geometry;
pub mod indicator;
pub mod layout;
pub mod panel;
pub mod resize;
pub mod snapshot;

pub use debounce::Debouncer;
pub use drag::{ArmedTab, DragPayload, DragSession, DragState, PayloadError, TransferData};
pub use drop::{DropIndicator, DropIntent};
pub use geometry::{GroupFrame, Point, Rect, SplitterBar, TabMetrics};
pub use indicator::IndicatorController;
pub use layout::{Group, Layout, LayoutError, SplitSide, Width, FULL_WIDTH};
pub use panel::{Panel, PanelKey, PanelKind};
pub use resize::ResizeDrag;
pub use snapshot::{GeometrySnapshot, TabBounds};

use crate::config::WorkspaceConfig;

/// Viewport used until the host reports a real one
pub const DEFAULT_VIEWPORT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1280.0,
    height: 800.0,
};

/// What sits under a pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Splitter between group `boundary` and `boundary + 1`
    Splitter(usize),
    Tab { group: usize, index: usize },
    /// Empty part of a group's tab strip
    Header(usize),
    /// Content area of a group
    Body(usize),
}

impl HitTarget {
    pub fn group(&self) -> Option<usize> {
        match *self {
            HitTarget::Splitter(_) => None,
            HitTarget::Tab { group, .. } | HitTarget::Header(group) | HitTarget::Body(group) => {
                Some(group)
            }
        }
    }
}

/// The complete workspace model
#[derive(Debug, Clone)]
pub struct WorkspaceModel {
    /// Groups, panels and widths
    pub layout: Layout,
    /// Screen area the groups are laid out in
    pub viewport: Rect,
    /// One frame per group, recomputed after every layout change
    pub frames: Vec<GroupFrame>,
    pub splitters: Vec<SplitterBar>,
    /// Pointer gesture in progress
    pub drag: DragState,
    /// Applied split indicator and its pending update
    pub indicator: IndicatorController,
    pub config: WorkspaceConfig,
    pub metrics: TabMetrics,
}

impl WorkspaceModel {
    pub fn new(layout: Layout, config: WorkspaceConfig) -> Self {
        let metrics = config.metrics();
        let indicator = IndicatorController::new(config.indicator_delay());
        let mut model = Self {
            layout,
            viewport: DEFAULT_VIEWPORT,
            frames: Vec::new(),
            splitters: Vec::new(),
            drag: DragState::Idle,
            indicator,
            config,
            metrics,
        };
        model.relayout();
        model
    }

    /// Recompute group frames and splitters from the current layout
    pub fn relayout(&mut self) {
        let (frames, splitters) =
            geometry::compute_frames(self.viewport, &self.layout, &self.metrics);
        self.frames = frames;
        self.splitters = splitters;
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.relayout();
    }

    /// Replace the whole layout, dropping any gesture in progress
    pub fn replace_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.end_gesture();
        self.relayout();
    }

    /// The active drag session, if a tab is being dragged
    pub fn session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// Return to idle and clear indicators immediately
    pub fn end_gesture(&mut self) {
        self.drag = DragState::Idle;
        self.indicator.clear();
    }

    /// Find what lies under `point`. Splitters win over the groups they overlap.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if let Some(bar) = self.splitters.iter().find(|s| s.rect.contains_point(point)) {
            return Some(HitTarget::Splitter(bar.boundary));
        }

        let (group, frame) = self
            .frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.rect.contains_point(point))?;

        if frame.header.contains_point(point) {
            return Some(match frame.tab_at(point) {
                Some(index) => HitTarget::Tab { group, index },
                None => HitTarget::Header(group),
            });
        }
        Some(HitTarget::Body(group))
    }

    /// Group whose horizontal span contains `x`, ignoring y
    pub fn group_at_x(&self, x: f32) -> Option<usize> {
        let last = self.frames.len().checked_sub(1)?;
        self.frames.iter().enumerate().position(|(i, frame)| {
            x >= frame.rect.x && (x < frame.rect.right() || (i == last && x <= frame.rect.right()))
        })
    }

    /// Capture the tab strips of every group for a new drag
    pub fn capture_snapshot(&self) -> GeometrySnapshot {
        GeometrySnapshot::capture(&self.frames)
    }
}

impl Default for WorkspaceModel {
    fn default() -> Self {
        Self::new(Layout::default(), WorkspaceConfig::default())
    }
}
