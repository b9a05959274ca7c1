//! Layout message handlers (tabs, groups, widths)

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::resize::resize_boundary;
use crate::model::{Layout, LayoutError, WorkspaceModel};

/// Handle direct layout operations. Rejected operations leave the layout untouched.
pub fn update_layout(model: &mut WorkspaceModel, msg: LayoutMsg) -> Option<Cmd> {
    match apply(model, msg) {
        Ok(cmd) => {
            model.relayout();
            Some(cmd)
        }
        Err(e) => {
            tracing::warn!("Rejected layout operation: {}", e);
            None
        }
    }
}

fn apply(model: &mut WorkspaceModel, msg: LayoutMsg) -> Result<Cmd, LayoutError> {
    let layout = &mut model.layout;
    match msg {
        // Active tabs are not persisted
        LayoutMsg::ActivateTab { group, index } => {
            layout.activate(group, index)?;
            Ok(Cmd::Redraw)
        }

        LayoutMsg::Reorder { group, from, to } => {
            layout.reorder_within_group(group, from, to)?;
            Ok(Cmd::layout_changed())
        }

        LayoutMsg::MoveToGroup {
            key,
            source,
            target,
            index,
        } => {
            layout.move_across_groups(&key, source, target, index.unwrap_or(usize::MAX))?;
            Ok(Cmd::layout_changed())
        }

        LayoutMsg::Split { key, source, side } => {
            layout.split_group(&key, source, side)?;
            Ok(Cmd::layout_changed())
        }

        LayoutMsg::ResizeBoundary { boundary, delta_px } => {
            resize_boundary(layout, boundary, delta_px, model.viewport.width)?;
            Ok(Cmd::layout_changed())
        }

        LayoutMsg::SetWidths(widths) => {
            layout.set_widths(widths)?;
            Ok(Cmd::layout_changed())
        }

        LayoutMsg::Replace(layout) => {
            model.replace_layout(layout);
            Ok(Cmd::Redraw)
        }

        LayoutMsg::Reset => {
            tracing::info!("Resetting to default layout");
            model.replace_layout(Layout::default());
            Ok(Cmd::layout_changed())
        }
    }
}
