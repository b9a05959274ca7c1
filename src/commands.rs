//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::time::Instant;

/// Side effects requested by an update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw (tab shift, indicator change)
    Redraw,
    /// Persist the layout through the storage adapter
    SaveLayout,
    /// Deliver `Msg::Tick` no earlier than this instant
    WakeAt(Instant),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Redraw and persist, after a layout mutation
    pub fn layout_changed() -> Self {
        Cmd::Batch(vec![Cmd::Redraw, Cmd::SaveLayout])
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Persisting doesn't change what is on screen
            Cmd::SaveLayout => false,
            Cmd::WakeAt(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Check if this command persists the layout
    pub fn saves_layout(&self) -> bool {
        match self {
            Cmd::SaveLayout => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.saves_layout()),
            _ => false,
        }
    }

    /// Earliest requested wake-up
    pub fn wake_at(&self) -> Option<Instant> {
        match self {
            Cmd::WakeAt(at) => Some(*at),
            Cmd::Batch(cmds) => cmds.iter().filter_map(|c| c.wake_at()).min(),
            _ => None,
        }
    }
}
