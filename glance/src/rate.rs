//! Host-clocked rate limiters.
//!
//! Neither type owns a timer. The host passes its monotonic clock (`now_ms`) into every call and
//! polls pending work from its frame/timer tick, which keeps both primitives deterministic and
//! usable from a single cooperative event loop.

/// Delays a value until input activity pauses for `wait_ms`.
///
/// Each [`Debouncer::call`] replaces the pending value and restarts the wait window, so only the
/// most recent value is ever delivered.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    wait_ms: u64,
    pending: Option<T>,
    last_call_ms: u64,
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            pending: None,
            last_call_ms: 0,
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    pub fn set_wait_ms(&mut self, wait_ms: u64) {
        self.wait_ms = wait_ms;
    }

    /// Records `value` as the pending value and restarts the wait window at `now_ms`.
    pub fn call(&mut self, value: T, now_ms: u64) {
        if self.pending.is_some() {
            gtrace!(now_ms, "Debouncer::call superseded pending value");
        }
        self.pending = Some(value);
        self.last_call_ms = now_ms;
    }

    /// Returns the pending value once `wait_ms` has elapsed since the last call.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.is_none() {
            return None;
        }
        if now_ms.saturating_sub(self.last_call_ms) < self.wait_ms {
            return None;
        }
        self.pending.take()
    }

    /// The clock value at which the pending value becomes due, if any.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|_| self.last_call_ms.saturating_add(self.wait_ms))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Takes the pending value immediately, ignoring the wait window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drops the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Caps delivery to at most once per `limit_ms`.
///
/// The first call after an idle period fires immediately (leading edge). Calls that land inside
/// the active window are dropped, not queued.
#[derive(Clone, Debug)]
pub struct Throttler {
    limit_ms: u64,
    last_fire_ms: Option<u64>,
    dropped: u64,
}

impl Throttler {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            last_fire_ms: None,
            dropped: 0,
        }
    }

    pub fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    pub fn set_limit_ms(&mut self, limit_ms: u64) {
        self.limit_ms = limit_ms;
    }

    /// Returns `true` (and opens a new window) when a call at `now_ms` may fire.
    pub fn try_acquire(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_fire_ms {
            if now_ms.saturating_sub(last) < self.limit_ms {
                self.dropped = self.dropped.saturating_add(1);
                gtrace!(now_ms, last, "Throttler dropped call");
                return false;
            }
        }
        self.last_fire_ms = Some(now_ms);
        true
    }

    /// Passes `value` through when the call may fire, drops it otherwise.
    pub fn call<T>(&mut self, value: T, now_ms: u64) -> Option<T> {
        self.try_acquire(now_ms).then_some(value)
    }

    /// Number of calls dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Forgets the active window so the next call fires immediately.
    pub fn reset(&mut self) {
        self.last_fire_ms = None;
    }
}
