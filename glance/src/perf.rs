//! Stage timing and memory sampling.
//!
//! The monitor only observes: wrapping a stage in [`PerformanceMonitor::measure`] returns the
//! stage's result unchanged and records how long it took. Hosts construct one monitor per
//! session and hand it to whatever drives the pipeline.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default interval between memory samples.
pub const DEFAULT_MEMORY_SAMPLE_INTERVAL_MS: u64 = 5_000;

/// Monotonic time source used for stage durations.
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary, fixed origin.
    fn elapsed(&self) -> Duration;
}

/// Wall-clock time based on [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let us = u64::try_from(by.as_micros()).unwrap_or(u64::MAX);
        self.micros.fetch_add(us, Ordering::Relaxed);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }
}

/// Reports resident memory of the current process, when the host exposes it.
pub trait MemoryProbe: Send + Sync {
    fn used_bytes(&self) -> Option<u64>;
}

/// A probe for hosts without a memory API.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMemoryProbe;

impl MemoryProbe for NoMemoryProbe {
    fn used_bytes(&self) -> Option<u64> {
        None
    }
}

/// Reads `VmRSS` from `/proc/self/status`.
#[cfg(target_os = "linux")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcStatusProbe;

#[cfg(target_os = "linux")]
impl MemoryProbe for ProcStatusProbe {
    fn used_bytes(&self) -> Option<u64> {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        parse_vm_rss_kb(&status).map(|kb| kb.saturating_mul(1024))
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    line.split_whitespace().nth(1)?.parse().ok()
}

/// The probe best suited to the current platform.
pub fn default_memory_probe() -> Arc<dyn MemoryProbe> {
    #[cfg(target_os = "linux")]
    {
        Arc::new(ProcStatusProbe)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Arc::new(NoMemoryProbe)
    }
}

/// A measured pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Filter,
    Sort,
    Render,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Sort => "sort",
            Self::Render => "render",
        }
    }
}

/// One timed stage execution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceSample {
    pub stage: Stage,
    pub duration_ms: f64,
    /// Clock reading at the end of the stage, in milliseconds.
    pub timestamp_ms: f64,
}

/// Most recent duration of each stage plus the last memory reading.
///
/// Durations are overwritten each cycle, not accumulated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceMetrics {
    pub render_time: f64,
    pub filter_time: f64,
    pub sort_time: f64,
    /// `None` until the host's memory probe has reported at least once.
    pub memory_usage_mb: Option<f64>,
}

pub struct PerformanceMonitor {
    clock: Arc<dyn Clock>,
    probe: Arc<dyn MemoryProbe>,
    metrics: PerformanceMetrics,
    memory_interval_ms: u64,
    last_memory_sample_ms: Option<u64>,
    history: VecDeque<PerformanceSample>,
    history_capacity: usize,
}

impl PerformanceMonitor {
    /// A monitor on the system clock with the platform's default memory probe.
    pub fn new() -> Self {
        Self::with_sources(Arc::new(SystemClock::new()), default_memory_probe())
    }

    pub fn with_sources(clock: Arc<dyn Clock>, probe: Arc<dyn MemoryProbe>) -> Self {
        Self {
            clock,
            probe,
            metrics: PerformanceMetrics::default(),
            memory_interval_ms: DEFAULT_MEMORY_SAMPLE_INTERVAL_MS,
            last_memory_sample_ms: None,
            history: VecDeque::new(),
            history_capacity: 0,
        }
    }

    /// Keeps the `capacity` most recent samples (0 disables history).
    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self.history = VecDeque::with_capacity(capacity);
        self
    }

    pub fn with_memory_interval_ms(mut self, interval_ms: u64) -> Self {
        self.memory_interval_ms = interval_ms;
        self
    }

    pub fn memory_interval_ms(&self) -> u64 {
        self.memory_interval_ms
    }

    /// Runs `f` and records its duration under `stage`.
    pub fn measure<R>(&mut self, stage: Stage, f: impl FnOnce() -> R) -> R {
        let started = self.clock.elapsed();
        let out = f();
        let ended = self.clock.elapsed();
        self.record(stage, ended.saturating_sub(started), ended);
        out
    }

    fn record(&mut self, stage: Stage, duration: Duration, at: Duration) {
        let duration_ms = duration.as_secs_f64() * 1_000.0;
        match stage {
            Stage::Filter => self.metrics.filter_time = duration_ms,
            Stage::Sort => self.metrics.sort_time = duration_ms,
            Stage::Render => self.metrics.render_time = duration_ms,
        }
        gtrace!(stage = stage.name(), duration_ms, "stage timed");
        if self.history_capacity == 0 {
            return;
        }
        if self.history.len() == self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(PerformanceSample {
            stage,
            duration_ms,
            timestamp_ms: at.as_secs_f64() * 1_000.0,
        });
    }

    /// Samples memory if the sampling interval has elapsed since the last sample.
    ///
    /// Returns `true` when the probe was consulted. A probe that reports nothing leaves the
    /// previous reading in place.
    pub fn maybe_sample_memory(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_memory_sample_ms {
            if now_ms.saturating_sub(last) < self.memory_interval_ms {
                return false;
            }
        }
        self.last_memory_sample_ms = Some(now_ms);
        self.sample_memory();
        true
    }

    /// Consults the memory probe immediately.
    pub fn sample_memory(&mut self) {
        match self.probe.used_bytes() {
            Some(bytes) => {
                self.metrics.memory_usage_mb = Some(bytes as f64 / (1024.0 * 1024.0));
            }
            None => {
                gdebug!("memory probe unavailable; keeping last reading");
            }
        }
    }

    /// Read-only snapshot of the latest metrics.
    pub fn snapshot(&self) -> PerformanceMetrics {
        self.metrics
    }

    pub fn history(&self) -> impl Iterator<Item = &PerformanceSample> + '_ {
        self.history.iter()
    }

    /// Clears metrics and history (e.g. at the start of a new session).
    pub fn reset(&mut self) {
        self.metrics = PerformanceMetrics::default();
        self.history.clear();
        self.last_memory_sample_ms = None;
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for PerformanceMonitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PerformanceMonitor")
            .field("metrics", &self.metrics)
            .field("memory_interval_ms", &self.memory_interval_ms)
            .field("history_capacity", &self.history_capacity)
            .finish_non_exhaustive()
    }
}
