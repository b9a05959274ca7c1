//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

pub mod layout;
pub mod pointer;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::WorkspaceModel;

#[cfg(debug_assertions)]
use crate::tracing::LayoutSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use layout::update_layout;
pub use pointer::update_pointer;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut WorkspaceModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut WorkspaceModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Viewport(rect) => {
            model.set_viewport(rect);
            Some(Cmd::Redraw)
        }
        Msg::Tick(now) => pointer::tick(model, now),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after layout state and logs diffs for debugging.
/// Filters out noisy messages like pointer moves and ticks from logging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut WorkspaceModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::PointerMsg;

    let is_noisy = matches!(
        &msg,
        Msg::Tick(_) | Msg::Pointer(PointerMsg::Move { .. })
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = LayoutSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = LayoutSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "layout", %diff, "state changed");
    }

    model.layout.assert_invariants();

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Pointer::Cancel`
/// - `Layout::Reorder { group: 0, from: 0, to: 2 }`
/// - `Viewport(Rect { .. })`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Viewport(rect) => format!("Viewport({}x{})", rect.width, rect.height),
        Msg::Tick(_) => "Tick".to_string(),
    }
}
