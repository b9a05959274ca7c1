//! Split indicator state with debounced updates
//!
//! Pointer jitter near an edge threshold would otherwise make the split
//! indicator flicker on and off. Requests go through a [`Debouncer`] and only
//! the last one in a burst is applied.

use std::time::{Duration, Instant};

use super::debounce::Debouncer;
use super::drop::DropIndicator;

/// Delay before a requested indicator change is applied
pub const INDICATOR_DEBOUNCE_MS: u64 = 50;

/// Owns the applied indicator and its pending update
#[derive(Debug, Clone)]
pub struct IndicatorController {
    current: DropIndicator,
    debouncer: Debouncer<DropIndicator>,
}

impl Default for IndicatorController {
    fn default() -> Self {
        Self::new(Duration::from_millis(INDICATOR_DEBOUNCE_MS))
    }
}

impl IndicatorController {
    pub fn new(delay: Duration) -> Self {
        Self {
            current: DropIndicator::None,
            debouncer: Debouncer::new(delay),
        }
    }

    /// The indicator currently shown
    pub fn current(&self) -> DropIndicator {
        self.current
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending update fires, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Ask for `value` to be shown once the pointer settles
    pub fn request(&mut self, value: DropIndicator, now: Instant) {
        if value == self.current && !self.debouncer.is_pending() {
            return;
        }
        self.debouncer.schedule(value, now);
    }

    /// Apply a due update. Returns true if the shown indicator changed.
    ///
    /// An update that comes due after its drag session ended is discarded.
    pub fn tick(&mut self, now: Instant, session_active: bool) -> bool {
        let Some(value) = self.debouncer.poll(now) else {
            return false;
        };
        if !session_active {
            tracing::debug!(?value, "discarding indicator update after drag ended");
            return false;
        }
        if value == self.current {
            return false;
        }
        tracing::trace!(from = ?self.current, to = ?value, "indicator");
        self.current = value;
        true
    }

    /// Cancel any pending update without touching the shown indicator
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }

    /// Clear immediately, bypassing the debounce
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.current = DropIndicator::None;
    }
}
