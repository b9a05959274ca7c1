//! Shopdesk - tabbed multi-panel workspace layout engine
//!
//! This crate provides the layout model, drag-and-drop state machine and
//! persistence for a horizontal row of tab groups, implementing the Elm
//! Architecture pattern.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod persistence;
pub mod replay;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use app::Workspace;
pub use commands::Cmd;
pub use config::WorkspaceConfig;
pub use messages::Msg;
pub use model::{Layout, WorkspaceModel};
