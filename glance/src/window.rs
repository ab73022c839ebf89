use crate::Throttler;

/// `[start, end)` window into the processed collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn as_range(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }

    /// Clamps into `0 <= start <= end <= len`.
    pub fn clamped(self, len: usize) -> Self {
        let end = self.end.min(len);
        let start = self.start.min(end);
        Self { start, end }
    }
}

/// Scroll container geometry, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub item_height: f64,
    pub container_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, item_height: f64, container_height: f64) -> Self {
        Self {
            scroll_top,
            item_height,
            container_height,
        }
    }

    fn has_valid_item_height(&self) -> bool {
        self.item_height.is_finite() && self.item_height > 0.0
    }

    /// Rows that fit in the container (`ceil(container_height / item_height)`).
    pub fn visible_count(&self) -> usize {
        if !self.has_valid_item_height() {
            return 0;
        }
        let container = sanitize(self.container_height);
        (container / self.item_height).ceil() as usize
    }

    /// Index of the first row under `scroll_top` (`floor(scroll_top / item_height)`).
    pub fn first_index(&self) -> usize {
        if !self.has_valid_item_height() {
            return 0;
        }
        (sanitize(self.scroll_top) / self.item_height).floor() as usize
    }
}

fn sanitize(px: f64) -> f64 {
    if px.is_finite() { px.max(0.0) } else { 0.0 }
}

/// Computes the window to render for `len` processed items.
///
/// `start = floor(scroll_top / item_height)`, `end = min(start + visible_count + buffer, len)`.
/// A `start` past the last full page is clamped to `len - visible_count` so over-scrolling keeps
/// a full window instead of an empty one. Degenerate metrics (non-positive or non-finite item
/// height) yield a window over the first `buffer` rows.
pub fn compute_visible_range(metrics: &ScrollMetrics, len: usize, buffer: usize) -> VisibleRange {
    if len == 0 {
        return VisibleRange::EMPTY;
    }
    let visible_count = metrics.visible_count();
    let max_start = len.saturating_sub(visible_count);
    let mut start = metrics.first_index();
    if start > max_start {
        gtrace!(start, max_start, len, "compute_visible_range clamped start");
        start = max_start;
    }
    let end = start
        .saturating_add(visible_count)
        .saturating_add(buffer)
        .min(len);
    VisibleRange { start, end }
}

/// Tracks the current window over a processed collection and rate-limits scroll-driven
/// recomputation.
#[derive(Clone, Debug)]
pub struct WindowManager {
    enabled: bool,
    buffer: usize,
    initial_len: usize,
    metrics: Option<ScrollMetrics>,
    range: VisibleRange,
    len: usize,
    throttle: Throttler,
}

impl WindowManager {
    /// `initial_len` is the window size used until the first scroll metrics arrive (typically
    /// the page size).
    pub fn new(buffer: usize, initial_len: usize, throttle_ms: u64) -> Self {
        Self {
            enabled: true,
            buffer,
            initial_len,
            metrics: None,
            range: VisibleRange::EMPTY,
            len: 0,
            throttle: Throttler::new(throttle_ms),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.recompute();
    }

    pub fn buffer(&self) -> usize {
        self.buffer
    }

    pub fn range(&self) -> VisibleRange {
        self.range
    }

    pub fn metrics(&self) -> Option<ScrollMetrics> {
        self.metrics
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Applies a scroll event unless it lands inside the active throttle window.
    ///
    /// Returns `true` when the metrics were applied and the window recomputed.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now_ms: u64) -> bool {
        if !self.accept_scroll(now_ms) {
            return false;
        }
        self.apply_metrics(metrics);
        true
    }

    /// The throttle half of [`WindowManager::on_scroll`]: `true` when a scroll event at `now_ms`
    /// may be applied.
    pub fn accept_scroll(&mut self, now_ms: u64) -> bool {
        self.throttle.try_acquire(now_ms)
    }

    /// Applies scroll metrics unconditionally and recomputes the window.
    pub fn apply_metrics(&mut self, metrics: ScrollMetrics) {
        if !metrics.has_valid_item_height() {
            gwarn!(
                item_height = metrics.item_height,
                "WindowManager::on_scroll: degenerate item height"
            );
        }
        self.metrics = Some(metrics);
        self.recompute();
    }

    /// Updates the processed collection length and recomputes the window.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.recompute();
    }

    /// Replaces the window directly, clamped to the current length.
    pub fn set_range(&mut self, range: VisibleRange) {
        let clamped = range.clamped(self.len);
        if clamped != range {
            gwarn!(
                start = range.start,
                end = range.end,
                len = self.len,
                "WindowManager::set_range clamped out-of-range request"
            );
        }
        self.range = clamped;
    }

    pub fn recompute(&mut self) {
        self.range = if !self.enabled {
            VisibleRange::new(0, self.len)
        } else if let Some(metrics) = &self.metrics {
            compute_visible_range(metrics, self.len, self.buffer)
        } else {
            VisibleRange::new(0, self.initial_len).clamped(self.len)
        };
    }

    pub fn throttler(&self) -> &Throttler {
        &self.throttle
    }
}
