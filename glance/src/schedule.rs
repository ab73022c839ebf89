//! Two-tier update scheduling.
//!
//! Immediate updates are handed straight back for synchronous application. Deferred updates
//! wait for the host's next idle tick, so higher-priority work (e.g. echoing a keystroke) can
//! render first. Deferral is a responsiveness hint only; correctness never depends on it.

use core::mem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Immediate,
    Deferred,
}

/// Pending deferred updates, coalesced last-writer-wins per update kind.
///
/// Two updates are the same kind when they are the same enum variant, so a newer
/// `Update::Search(..)` replaces an older pending one instead of queueing behind it.
#[derive(Clone, Debug)]
pub struct UpdateQueue<U> {
    deferred: Vec<U>,
}

impl<U> Default for UpdateQueue<U> {
    fn default() -> Self {
        Self {
            deferred: Vec::new(),
        }
    }
}

impl<U> UpdateQueue<U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `update`. Immediate updates are returned for the caller to apply now.
    #[must_use = "immediate updates are returned, not queued"]
    pub fn schedule(&mut self, priority: Priority, update: U) -> Option<U> {
        match priority {
            Priority::Immediate => Some(update),
            Priority::Deferred => {
                self.defer(update);
                None
            }
        }
    }

    /// Queues `update` for the next idle tick, replacing a pending update of the same kind.
    pub fn defer(&mut self, update: U) {
        let kind = mem::discriminant(&update);
        self.deferred.retain(|u| mem::discriminant(u) != kind);
        self.deferred.push(update);
    }

    /// Drops pending updates for which `keep` returns `false`.
    pub fn retain(&mut self, keep: impl FnMut(&U) -> bool) {
        self.deferred.retain(keep);
    }

    /// Removes and returns every deferred update in scheduling order.
    pub fn drain_deferred(&mut self) -> impl Iterator<Item = U> + '_ {
        self.deferred.drain(..)
    }

    pub fn pending(&self) -> usize {
        self.deferred.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deferred.is_empty()
    }

    pub fn clear(&mut self) {
        self.deferred.clear();
    }
}
