//! Pointer handlers: tab drag and drop, splitter resize, tab clicks

use std::time::Instant;

use tracing::{debug, warn};

use crate::commands::Cmd;
use crate::messages::PointerMsg;
use crate::model::drop::{resolve_drop, resolve_pointer, DropProbe, PointerResolution};
use crate::model::resize::resize_boundary;
use crate::model::{
    ArmedTab, DragPayload, DragSession, DragState, DropIndicator, DropIntent, GeometrySnapshot,
    HitTarget, LayoutError, Point, ResizeDrag, WorkspaceModel,
};

/// Handle pointer input
pub fn update_pointer(model: &mut WorkspaceModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Down { pos, .. } => pointer_down(model, pos),
        PointerMsg::Move { pos, at } => pointer_move(model, pos, at),
        PointerMsg::Up { pos, at } => pointer_up(model, pos, at),
        PointerMsg::Leave => drag_leave(model),
        PointerMsg::Cancel => cancel(model),
    }
}

/// Apply a due indicator update
pub fn tick(model: &mut WorkspaceModel, now: Instant) -> Option<Cmd> {
    let session_active = model.drag.is_dragging();
    if model.indicator.tick(now, session_active) {
        return Some(Cmd::Redraw);
    }
    // Woken early: ask again for the remaining time
    model.indicator.deadline().map(Cmd::WakeAt)
}

// ============================================================================
// Press
// ============================================================================

fn pointer_down(model: &mut WorkspaceModel, pos: Point) -> Option<Cmd> {
    if !model.drag.is_idle() {
        debug!(target: "drag", state = ?model.drag, "press ignored, gesture in progress");
        return None;
    }

    match model.hit_test(pos)? {
        HitTarget::Splitter(boundary) => {
            debug!(target: "drag", boundary, "resize start");
            model.drag = DragState::Resizing(ResizeDrag {
                boundary,
                last_x: pos.x,
            });
            Some(Cmd::Redraw)
        }
        HitTarget::Tab { group, index } => {
            model.drag = DragState::Armed(ArmedTab {
                group,
                index,
                origin: pos,
            });
            None
        }
        HitTarget::Header(_) | HitTarget::Body(_) => None,
    }
}

// ============================================================================
// Move
// ============================================================================

fn pointer_move(model: &mut WorkspaceModel, pos: Point, at: Instant) -> Option<Cmd> {
    match model.drag {
        DragState::Idle => None,
        DragState::Armed(armed) => {
            if armed.origin.distance_to(pos) < model.config.drag_threshold_px {
                return None;
            }
            start_drag(model, armed, pos)?;
            drag_over(model, pos, at)
        }
        DragState::Dragging(_) => drag_over(model, pos, at),
        DragState::Resizing(resize) => resize_move(model, resize, pos),
    }
}

/// Armed -> Dragging: freeze geometry and build the transfer payload
fn start_drag(model: &mut WorkspaceModel, armed: ArmedTab, pos: Point) -> Option<()> {
    let Some(panel) = model
        .layout
        .group(armed.group)
        .and_then(|g| g.panel(armed.index))
    else {
        warn!(
            "Pressed tab {}:{} no longer exists, dropping gesture",
            armed.group, armed.index
        );
        model.end_gesture();
        return None;
    };

    let payload = DragPayload {
        key: panel.key.clone(),
        kind: panel.kind,
        source_group: armed.group,
        source_index: armed.index,
    };
    debug!(target: "drag", key = %payload.key, group = armed.group, index = armed.index, "drag start");

    let session = DragSession::new(&payload, model.capture_snapshot(), pos);
    model.drag = DragState::Dragging(Box::new(session));
    Some(())
}

/// Resolve the pointer against the group under it, reading cached tab bounds
fn resolve_at(
    model: &WorkspaceModel,
    snapshot: &GeometrySnapshot,
    pos: Point,
) -> Option<(usize, PointerResolution)> {
    if !model.viewport.contains_point(pos) {
        return None;
    }
    let target = model.group_at_x(pos.x)?;
    let frame = model.frames.get(target)?;

    let probe = DropProbe {
        pointer: pos,
        container: frame.rect,
        header: frame.header,
        group: target,
        group_count: model.frames.len(),
        tabs: snapshot.tabs(target),
        edge_threshold: model.config.edge_threshold_px,
    };
    resolve_pointer(&probe).map(|resolution| (target, resolution))
}

fn drag_over(model: &mut WorkspaceModel, pos: Point, at: Instant) -> Option<Cmd> {
    if !model.viewport.contains_point(pos) {
        return drag_leave(model);
    }
    let session = model.session()?;
    let (target, resolution) = resolve_at(model, &session.snapshot, pos)?;

    let session = model.drag.session_mut()?;
    session.pointer = pos;
    session.target_group = Some(target);
    session.slot = Some(resolution.slot);

    model.indicator.request(resolution.indicator, at);
    match model.indicator.deadline() {
        Some(deadline) => Some(Cmd::batch(vec![Cmd::Redraw, Cmd::WakeAt(deadline)])),
        None => Some(Cmd::Redraw),
    }
}

/// Pointer left the workspace: hide every indicator, keep the session
fn drag_leave(model: &mut WorkspaceModel) -> Option<Cmd> {
    let session = model.drag.session_mut()?;
    session.target_group = None;
    session.slot = None;
    model.indicator.clear();
    debug!(target: "drag", "drag leave");
    Some(Cmd::Redraw)
}

fn resize_move(model: &mut WorkspaceModel, resize: ResizeDrag, pos: Point) -> Option<Cmd> {
    let delta = pos.x - resize.last_x;
    if delta == 0.0 {
        return None;
    }

    match resize_boundary(
        &mut model.layout,
        resize.boundary,
        delta,
        model.viewport.width,
    ) {
        Ok(()) => {
            model.drag = DragState::Resizing(ResizeDrag {
                boundary: resize.boundary,
                last_x: pos.x,
            });
            model.relayout();
            Some(Cmd::Redraw)
        }
        Err(e) => {
            warn!("Resize rejected: {}", e);
            None
        }
    }
}

// ============================================================================
// Release
// ============================================================================

fn pointer_up(model: &mut WorkspaceModel, pos: Point, at: Instant) -> Option<Cmd> {
    match std::mem::take(&mut model.drag) {
        DragState::Idle => None,
        DragState::Armed(armed) => {
            // Released before crossing the threshold: a click
            match model.layout.activate(armed.group, armed.index) {
                Ok(()) => Some(Cmd::Redraw),
                Err(e) => {
                    warn!("Could not activate tab: {}", e);
                    None
                }
            }
        }
        DragState::Resizing(resize) => {
            debug!(target: "drag", boundary = resize.boundary, "resize end");
            resize_move(model, resize, pos);
            model.drag = DragState::Idle;
            Some(Cmd::layout_changed())
        }
        DragState::Dragging(session) => {
            let resolved = resolve_at(model, &session.snapshot, pos);
            // An update already due counts even if its tick hasn't arrived yet
            model.indicator.tick(at, true);
            // Precedence reads the indicator as shown, not what is pending
            let applied = model.indicator.current();
            model.end_gesture();

            let Some((target, resolution)) = resolved else {
                debug!(target: "drag", "released outside any group");
                return Some(Cmd::Redraw);
            };
            drop_session(model, &session, target, resolution.slot, applied)
        }
    }
}

/// Apply a drop. Indicators are already cleared and the session ended.
fn drop_session(
    model: &mut WorkspaceModel,
    session: &DragSession,
    target: usize,
    slot: usize,
    applied: DropIndicator,
) -> Option<Cmd> {
    let payload = match DragPayload::parse(&session.transfer) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Drop aborted: {}", e);
            return Some(Cmd::Redraw);
        }
    };

    let source_ok = model
        .layout
        .group(payload.source_group)
        .and_then(|g| g.panel(payload.source_index))
        .is_some_and(|p| p.key == payload.key);
    if !source_ok {
        warn!(
            "Drop aborted: '{}' is no longer at {}:{}",
            payload.key, payload.source_group, payload.source_index
        );
        return Some(Cmd::Redraw);
    }

    let intent = resolve_drop(
        payload.source_group,
        payload.source_index,
        target,
        Some(slot),
        applied,
    );
    debug!(target: "drag", ?intent, key = %payload.key, "drop");

    match apply_intent(model, &payload, intent) {
        Ok(true) => {
            model.relayout();
            Some(Cmd::layout_changed())
        }
        Ok(false) => Some(Cmd::Redraw),
        Err(e) => {
            warn!("Drop rejected: {}", e);
            Some(Cmd::Redraw)
        }
    }
}

/// Returns whether the layout changed
fn apply_intent(
    model: &mut WorkspaceModel,
    payload: &DragPayload,
    intent: DropIntent,
) -> Result<bool, LayoutError> {
    let layout = &mut model.layout;
    match intent {
        DropIntent::Split { source, side } => {
            layout.split_group(&payload.key, source, side)?;
        }
        DropIntent::MoveToGroup {
            source,
            target,
            index,
        } => {
            layout.move_across_groups(&payload.key, source, target, index.unwrap_or(usize::MAX))?;
        }
        DropIntent::Reorder { group, from, to } => {
            layout.reorder_within_group(group, from, to)?;
        }
        DropIntent::None => return Ok(false),
    }
    Ok(true)
}

fn cancel(model: &mut WorkspaceModel) -> Option<Cmd> {
    match std::mem::take(&mut model.drag) {
        DragState::Idle => None,
        DragState::Armed(_) => None,
        DragState::Dragging(session) => {
            debug!(target: "drag", key = %session.panel, "drag canceled");
            model.end_gesture();
            Some(Cmd::Redraw)
        }
        // Widths already applied during the drag stay
        DragState::Resizing(_) => Some(Cmd::layout_changed()),
    }
}
