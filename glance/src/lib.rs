//! Headless primitives for rendering a bounded window out of a large, frequently-changing
//! collection while staying responsive under continuous input.
//!
//! For a ready-made data view wiring these together, see the `glance-adapter` crate.
//!
//! The crate covers:
//! - host-clocked rate limiting ([`Debouncer`], [`Throttler`])
//! - a filter/sort pipeline over index views ([`pipeline`])
//! - fixed-row-height windowing ([`WindowManager`], [`compute_visible_range`])
//! - progressive, chunked loading ([`ChunkedLoader`])
//! - swipe/pinch classification ([`TouchTracker`], [`classify_swipe`], [`detect_pinch`])
//! - observation-only stage timing ([`PerformanceMonitor`])
//!
//! Nothing here renders, performs I/O on the host's behalf, or spawns threads. Time-dependent
//! calls take the host's monotonic clock as `now_ms`.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod chunk;
mod error;
mod gesture;
mod options;
mod perf;
pub mod pipeline;
mod query;
mod rate;
mod sample;
mod schedule;
mod value;
mod window;

#[cfg(test)]
mod tests;

pub use chunk::{Chunk, ChunkedLoader, DateRange};
pub use error::{ConfigError, Result};
pub use gesture::{
    DEFAULT_MOVE_SAMPLE_MS, DEFAULT_SWIPE_MIN_DISTANCE, DEFAULT_ZOOM_IN_SCALE,
    DEFAULT_ZOOM_OUT_SCALE, Gesture, GestureConfig, PinchGesture, Point, SwipeDirection,
    TouchTracker, ZoomIntent, classify_swipe, detect_pinch,
};
pub use options::OptimizerOptions;
#[cfg(target_os = "linux")]
pub use perf::ProcStatusProbe;
pub use perf::{
    Clock, DEFAULT_MEMORY_SAMPLE_INTERVAL_MS, ManualClock, MemoryProbe, NoMemoryProbe,
    PerformanceMetrics, PerformanceMonitor, PerformanceSample, Stage, SystemClock,
    default_memory_probe,
};
pub use query::{Query, SortDirection};
pub use rate::{Debouncer, Throttler};
pub use sample::downsample;
pub use schedule::{Priority, UpdateQueue};
pub use value::{FieldValue, Record};
pub use window::{ScrollMetrics, VisibleRange, WindowManager, compute_visible_range};
