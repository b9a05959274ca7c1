//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::time::Instant;

use crate::model::{Layout, PanelKey, Point, Rect, SplitSide, Width};

/// Pointer input, already translated to workspace coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMsg {
    /// Primary button pressed. `at` is only read by debug traces; pressing
    /// never starts a timer.
    Down { pos: Point, at: Instant },
    /// Pointer moved (button may or may not be held)
    Move { pos: Point, at: Instant },
    /// Primary button released
    Up { pos: Point, at: Instant },
    /// Pointer left the workspace while a gesture was running
    Leave,
    /// Gesture aborted (pointer left the window, Escape)
    Cancel,
}

/// Direct layout operations (menus, CLI, keyboard)
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    /// Make a tab the visible one in its group
    ActivateTab { group: usize, index: usize },
    /// Move a tab within its group
    Reorder { group: usize, from: usize, to: usize },
    /// Move a panel into another group; `None` appends
    MoveToGroup {
        key: PanelKey,
        source: usize,
        target: usize,
        index: Option<usize>,
    },
    /// Extract a panel into a new group
    Split {
        key: PanelKey,
        source: usize,
        side: SplitSide,
    },
    /// Move the splitter after group `boundary` by a pixel delta
    ResizeBoundary { boundary: usize, delta_px: f32 },
    /// Replace all widths at once
    SetWidths(Vec<Width>),
    /// Replace the whole layout (e.g. after loading)
    Replace(Layout),
    /// Go back to the default layout
    Reset,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Pointer(PointerMsg),
    Layout(LayoutMsg),
    /// Host resized the workspace area
    Viewport(Rect),
    /// Timer wake-up for debounced work
    Tick(Instant),
}

// Convenience constructors for common messages
impl Msg {
    pub fn down(x: f32, y: f32, at: Instant) -> Self {
        Msg::Pointer(PointerMsg::Down {
            pos: Point::new(x, y),
            at,
        })
    }

    pub fn move_to(x: f32, y: f32, at: Instant) -> Self {
        Msg::Pointer(PointerMsg::Move {
            pos: Point::new(x, y),
            at,
        })
    }

    pub fn up(x: f32, y: f32, at: Instant) -> Self {
        Msg::Pointer(PointerMsg::Up {
            pos: Point::new(x, y),
            at,
        })
    }

    pub fn viewport(width: f32, height: f32) -> Self {
        Msg::Viewport(Rect::new(0.0, 0.0, width, height))
    }
}
