//! Workspace driver: owns the model and the storage, runs commands
//!
//! Hosts feed it messages (pointer events, viewport changes, timer wake-ups)
//! and poll `wake_at()` to know when to deliver the next `Msg::Tick`.

use std::time::Instant;

use crate::commands::Cmd;
use crate::config::WorkspaceConfig;
use crate::messages::Msg;
use crate::model::{Layout, WorkspaceModel};
use crate::persistence::{load_layout, save_layout, LayoutStorage};
use crate::update::update;

pub struct Workspace {
    model: WorkspaceModel,
    storage: Box<dyn LayoutStorage>,
    /// Pending timer for `Msg::Tick`
    wake_at: Option<Instant>,
    redraw_pending: bool,
}

impl Workspace {
    /// Restore the persisted layout (or the default) and build the model
    pub fn open(config: WorkspaceConfig, storage: Box<dyn LayoutStorage>) -> Self {
        let layout = load_layout(storage.as_ref(), &config.storage_key);
        Self::with_layout(layout, config, storage)
    }

    pub fn with_layout(
        layout: Layout,
        config: WorkspaceConfig,
        storage: Box<dyn LayoutStorage>,
    ) -> Self {
        Self {
            model: WorkspaceModel::new(layout, config),
            storage,
            wake_at: None,
            redraw_pending: true,
        }
    }

    pub fn model(&self) -> &WorkspaceModel {
        &self.model
    }

    pub fn layout(&self) -> &Layout {
        &self.model.layout
    }

    pub fn storage(&self) -> &dyn LayoutStorage {
        self.storage.as_ref()
    }

    /// When the host should deliver the next `Msg::Tick`
    pub fn wake_at(&self) -> Option<Instant> {
        self.wake_at
    }

    /// Whether something changed on screen since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Run one message through update and execute the resulting command.
    ///
    /// Returns the command for hosts that want to inspect it.
    pub fn dispatch(&mut self, msg: Msg) -> Option<Cmd> {
        if let Msg::Tick(_) = msg {
            self.wake_at = None;
        }
        let cmd = update(&mut self.model, msg)?;
        self.process_cmd(cmd.clone());
        Some(cmd)
    }

    /// Deliver every timer wake-up due at or before `now`
    pub fn advance_to(&mut self, now: Instant) {
        while let Some(at) = self.wake_at.filter(|at| *at <= now) {
            self.dispatch(Msg::Tick(at));
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraw_pending = true,
            Cmd::SaveLayout => {
                let key = self.model.config.storage_key.clone();
                // The in-memory layout stays authoritative when a write fails
                if let Err(e) = save_layout(self.storage.as_mut(), &key, &self.model.layout) {
                    tracing::warn!("Failed to persist layout: {:#}", e);
                }
            }
            Cmd::WakeAt(at) => self.wake_at = Some(at),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::LayoutMsg;
    use crate::persistence::{MemoryStorage, LAYOUT_STORAGE_KEY};

    struct FailingStorage;

    impl LayoutStorage for FailingStorage {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn test_mutation_is_persisted() {
        let mut ws = Workspace::open(WorkspaceConfig::default(), Box::new(MemoryStorage::new()));
        assert!(ws.storage().get(LAYOUT_STORAGE_KEY).unwrap().is_none());

        ws.dispatch(Msg::Layout(LayoutMsg::Reorder {
            group: 0,
            from: 0,
            to: 1,
        }));
        let stored = ws.storage().get(LAYOUT_STORAGE_KEY).unwrap().unwrap();
        assert!(stored.starts_with(r#"{"groups":[[{"type":"inventory""#), "{}", stored);
    }

    #[test]
    fn test_failed_write_keeps_change() {
        let mut ws = Workspace::open(WorkspaceConfig::default(), Box::new(FailingStorage));
        ws.dispatch(Msg::Layout(LayoutMsg::Reorder {
            group: 0,
            from: 0,
            to: 1,
        }));
        assert_eq!(ws.layout().keys()[0][0], "inventory");
    }

    #[test]
    fn test_rejected_operation_returns_no_command() {
        let mut ws = Workspace::open(WorkspaceConfig::default(), Box::new(MemoryStorage::new()));
        ws.take_redraw();
        let cmd = ws.dispatch(Msg::Layout(LayoutMsg::ActivateTab { group: 3, index: 0 }));
        assert_eq!(cmd, None);
        assert!(!ws.take_redraw());
    }
}
