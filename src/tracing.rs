//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! drag sessions, drop resolution and layout mutations.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=drag=debug,layout=debug` - scoped filtering
//! - `RUST_LOG=shopdesk::persistence=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/shopdesk/logs/shopdesk.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{DragState, DropIndicator, WorkspaceModel};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG env var and defaults to `warn`.
/// File logging writes to `~/.config/shopdesk/logs/shopdesk.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "shopdesk.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of layout and gesture state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub groups: Vec<Vec<String>>,
    pub widths: Vec<String>,
    pub active: Vec<usize>,
    pub gesture: &'static str,
    pub indicator: DropIndicator,
}

impl LayoutSnapshot {
    pub fn from_model(model: &WorkspaceModel) -> Self {
        let layout = &model.layout;
        Self {
            groups: layout
                .groups()
                .iter()
                .map(|g| g.panels().iter().map(|p| p.key.to_string()).collect())
                .collect(),
            widths: layout.widths().iter().map(|w| w.to_string()).collect(),
            active: layout.groups().iter().map(|g| g.active_index()).collect(),
            gesture: match model.drag {
                DragState::Idle => "idle",
                DragState::Armed(_) => "armed",
                DragState::Dragging(_) => "dragging",
                DragState::Resizing(_) => "resizing",
            },
            indicator: model.indicator.current(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.groups != other.groups {
            changes.push(format!("groups: {:?} → {:?}", self.groups, other.groups));
        }
        if self.widths != other.widths {
            changes.push(format!(
                "widths: [{}] → [{}]",
                self.widths.join(", "),
                other.widths.join(", ")
            ));
        }
        if self.active != other.active && self.groups == other.groups {
            changes.push(format!("active: {:?} → {:?}", self.active, other.active));
        }
        if self.gesture != other.gesture {
            changes.push(format!("gesture: {} → {}", self.gesture, other.gesture));
        }
        if self.indicator != other.indicator {
            changes.push(format!(
                "indicator: {:?} → {:?}",
                self.indicator, other.indicator
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
