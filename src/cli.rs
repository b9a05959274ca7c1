//! Command-line argument parsing for shopdesk
//!
//! Supports:
//! - Showing and resetting the persisted layout
//! - One-shot layout operations (activate, reorder, move, split, resize)
//! - Replaying pointer scripts through the drag state machine

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::messages::LayoutMsg;
use crate::model::{Layout, PanelKey, SplitSide};

/// Tabbed multi-panel workspace layout engine
#[derive(Parser, Debug)]
#[command(
    name = "shopdesk",
    version,
    about = "Inspect and rearrange the shop workspace layout"
)]
pub struct CliArgs {
    /// Directory holding the persisted layout (default: ~/.config/shopdesk/state)
    #[arg(long, value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Config file (default: ~/.config/shopdesk/config.yaml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print the current layout
    Show,
    /// Restore and persist the default layout
    Reset,
    /// Make a tab the visible one in its group
    Activate { group: usize, index: usize },
    /// Move a tab within its group
    Reorder { group: usize, from: usize, to: usize },
    /// Move a panel into another group
    Move {
        key: String,
        target: usize,
        /// Insertion index (default: append)
        #[arg(long, value_name = "N")]
        index: Option<usize>,
    },
    /// Extract a panel into a new group
    Split {
        key: String,
        side: SideArg,
        /// Boundary for `between` splits: the index the new group takes
        #[arg(long, value_name = "N")]
        boundary: Option<usize>,
    },
    /// Drag the splitter after group BOUNDARY by DELTA pixels
    Resize {
        boundary: usize,
        #[arg(allow_hyphen_values = true)]
        delta: f32,
        /// Workspace width the delta is measured against
        #[arg(long, value_name = "PX", default_value_t = 1280.0)]
        width: f32,
    },
    /// Run a pointer script against the layout
    Replay { script: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    Left,
    Right,
    Between,
}

impl CliCommand {
    /// The layout message this command sends, if it sends one
    pub fn to_layout_msg(&self, layout: &Layout) -> Result<Option<LayoutMsg>> {
        let msg = match self {
            CliCommand::Show | CliCommand::Replay { .. } => return Ok(None),
            CliCommand::Reset => LayoutMsg::Reset,
            CliCommand::Activate { group, index } => LayoutMsg::ActivateTab {
                group: *group,
                index: *index,
            },
            CliCommand::Reorder { group, from, to } => LayoutMsg::Reorder {
                group: *group,
                from: *from,
                to: *to,
            },
            CliCommand::Move { key, target, index } => {
                let key = PanelKey::from(key.as_str());
                let (source, _) = locate(layout, &key)?;
                LayoutMsg::MoveToGroup {
                    key,
                    source,
                    target: *target,
                    index: *index,
                }
            }
            CliCommand::Split {
                key,
                side,
                boundary,
            } => {
                let side = match (side, boundary) {
                    (SideArg::Left, None) => SplitSide::Left,
                    (SideArg::Right, None) => SplitSide::Right,
                    (SideArg::Between, Some(boundary)) => SplitSide::Between(*boundary),
                    (SideArg::Between, None) => bail!("between splits need --boundary"),
                    (_, Some(_)) => bail!("--boundary only applies to between splits"),
                };
                let key = PanelKey::from(key.as_str());
                let (source, _) = locate(layout, &key)?;
                LayoutMsg::Split { key, source, side }
            }
            CliCommand::Resize {
                boundary, delta, ..
            } => LayoutMsg::ResizeBoundary {
                boundary: *boundary,
                delta_px: *delta,
            },
        };
        Ok(Some(msg))
    }
}

fn locate(layout: &Layout, key: &PanelKey) -> Result<(usize, usize)> {
    layout
        .find_panel(key)
        .ok_or_else(|| anyhow!("no panel with key '{}'", key))
}

/// Human-readable layout, one group per line. The active tab is starred.
pub fn format_layout(layout: &Layout) -> String {
    let mut out = String::new();
    for (index, (group, width)) in layout.groups().iter().zip(layout.widths()).enumerate() {
        let tabs: Vec<String> = group
            .panels()
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                let marker = if i == group.active_index() { "*" } else { "" };
                format!("{}{} ({})", panel.key, marker, panel.kind)
            })
            .collect();
        let _ = writeln!(out, "group {} [{}]: {}", index, width, tabs.join(", "));
    }
    out
}
