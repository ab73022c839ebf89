use std::sync::Arc;

use glance::{
    ChunkedLoader, ConfigError, DateRange, Debouncer, Gesture, OptimizerOptions,
    PerformanceMetrics, PerformanceMonitor, Point, Query, Record, ScrollMetrics, Stage,
    SwipeDirection, TouchTracker, UpdateQueue, VisibleRange, WindowManager, ZoomIntent,
    downsample, pipeline,
};

/// Low-priority state changes applied on the host's idle tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Update {
    /// A settled search edit.
    Search(String),
    /// Load the next unloaded chunk (scrolling reached the end of the loaded data).
    LoadNextChunk,
}

/// A framework-neutral data view over a large collection.
///
/// The optimizer owns no UI objects. Hosts drive it by calling the handlers (`search`,
/// `scroll`, `sort`, ...) when input arrives, `tick(now_ms)` every frame/timer tick, and
/// `idle(now_ms)` when the renderer has spare time. After any of these, the read-only outputs
/// (`visible_slice`, `total_count`, `visible_range`, `performance_metrics`) reflect the new state.
///
/// Data flow: loaded chunks → date range → filter → sort → optional sampling → window.
pub struct Optimizer<T> {
    items: Arc<[T]>,
    options: OptimizerOptions,
    query: Query,
    date_range: Option<DateRange>,
    loader: ChunkedLoader,
    window: WindowManager,
    search: Debouncer<String>,
    updates: UpdateQueue<Update>,
    touch: TouchTracker,
    monitor: PerformanceMonitor,
    processed: Arc<[usize]>,
}

impl<T: Record> Optimizer<T> {
    /// Creates an optimizer with a fresh [`PerformanceMonitor`] on the system clock.
    pub fn new(items: impl Into<Arc<[T]>>, options: OptimizerOptions) -> Result<Self, ConfigError> {
        let monitor = PerformanceMonitor::new();
        Self::with_monitor(items, options, monitor)
    }

    /// Creates an optimizer that reports into `monitor`.
    ///
    /// Fails fast on invalid options; nothing after construction returns an error.
    pub fn with_monitor(
        items: impl Into<Arc<[T]>>,
        options: OptimizerOptions,
        monitor: PerformanceMonitor,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let items = items.into();
        let loader = Self::make_loader(items.len(), &options)?;
        let window = WindowManager::new(
            options.buffer_size,
            options.items_per_page,
            options.throttle_ms,
        )
        .with_enabled(options.enable_virtualization);
        let touch = TouchTracker::new(options.gesture)?;
        let monitor = monitor.with_memory_interval_ms(options.memory_sample_interval_ms);
        gdebug!(
            items = items.len(),
            chunks = loader.chunk_count(),
            progressive = options.progressive_loading,
            virtualization = options.enable_virtualization,
            "Optimizer::new"
        );

        let mut o = Self {
            items,
            search: Debouncer::new(options.debounce_ms),
            options,
            query: Query::default(),
            date_range: None,
            loader,
            window,
            updates: UpdateQueue::new(),
            touch,
            monitor,
            processed: Arc::from(Vec::new()),
        };
        o.recompute();
        Ok(o)
    }

    fn make_loader(len: usize, options: &OptimizerOptions) -> Result<ChunkedLoader, ConfigError> {
        let mut loader = ChunkedLoader::new(len, options.chunk_size)?;
        if !options.progressive_loading {
            loader.load_all();
        }
        Ok(loader)
    }

    // --- outputs -------------------------------------------------------------------------

    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn loader(&self) -> &ChunkedLoader {
        &self.loader
    }

    /// Raw-collection indexes after filter, sort, and sampling.
    ///
    /// A new `Arc` is produced on every recomputation, so `Arc::ptr_eq` detects changes.
    pub fn processed(&self) -> &Arc<[usize]> {
        &self.processed
    }

    /// Length of the processed collection.
    pub fn total_count(&self) -> usize {
        self.processed.len()
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.window.range()
    }

    /// Raw-collection indexes of the visible rows.
    pub fn visible_indices(&self) -> &[usize] {
        let range = self.window.range().clamped(self.processed.len());
        &self.processed[range.as_range()]
    }

    /// The visible rows, in display order.
    pub fn visible_slice(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.window.range().len());
        self.for_each_visible(|_, item| out.push(item));
        out
    }

    /// Iterates visible rows as `(position in processed collection, item)` without allocating.
    pub fn for_each_visible<'a>(&'a self, mut f: impl FnMut(usize, &'a T)) {
        let range = self.window.range().clamped(self.processed.len());
        for pos in range.as_range() {
            if let Some(item) = self.items.get(self.processed[pos]) {
                f(pos, item);
            }
        }
    }

    pub fn performance_metrics(&self) -> PerformanceMetrics {
        self.monitor.snapshot()
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// The search text waiting for the debounce window to settle, if any.
    pub fn pending_search(&self) -> Option<&str> {
        self.search.peek().map(String::as_str)
    }

    pub fn pending_updates(&self) -> usize {
        self.updates.pending()
    }

    // --- handlers ------------------------------------------------------------------------

    /// Records a search edit. The filter runs once typing pauses for `debounce_ms` and the
    /// host reaches an idle tick.
    pub fn search(&mut self, text: impl Into<String>, now_ms: u64) {
        self.search.call(text.into(), now_ms);
    }

    /// Applies scroll metrics unless the event lands inside the throttle window.
    ///
    /// Returns `true` when the visible range was recomputed.
    pub fn scroll(
        &mut self,
        scroll_top: f64,
        item_height: f64,
        container_height: f64,
        now_ms: u64,
    ) -> bool {
        let metrics = ScrollMetrics::new(scroll_top, item_height, container_height);
        if !self.window.accept_scroll(now_ms) {
            return false;
        }
        let window = &mut self.window;
        self.monitor
            .measure(Stage::Render, || window.apply_metrics(metrics));
        self.schedule_auto_load();
        true
    }

    /// Sorts by `key`, toggling the direction when already sorted by it.
    pub fn sort(&mut self, key: &str) {
        self.query.toggle_sort(key);
        gdebug!(
            key,
            direction = ?self.query.sort_direction,
            "Optimizer::sort"
        );
        self.recompute();
    }

    pub fn clear_sort(&mut self) {
        self.query.clear_sort();
        self.recompute();
    }

    /// Overrides the visible range (clamped to the processed collection).
    pub fn set_visible_range(&mut self, range: VisibleRange) {
        self.window.set_range(range);
        self.schedule_auto_load();
    }

    /// Makes chunk `index` available to the pipeline. Returns `true` when newly loaded.
    pub fn load_chunk(&mut self, index: usize) -> bool {
        if !self.loader.load_chunk(index) {
            return false;
        }
        self.recompute();
        true
    }

    /// Restricts the dataset to items whose timestamp falls in `[start_ms, end_ms)`.
    pub fn set_date_range(&mut self, start_ms: i64, end_ms: i64) {
        let range = DateRange::new(start_ms, end_ms);
        if self.date_range == Some(range) {
            return;
        }
        self.date_range = Some(range);
        self.recompute();
    }

    pub fn clear_date_range(&mut self) {
        if self.date_range.take().is_some() {
            self.recompute();
        }
    }

    /// Replaces the raw collection (e.g. after the data source refetched).
    ///
    /// Loading restarts from chunk 0; the query and date range are kept.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) {
        self.items = items.into();
        self.loader.reset(self.items.len());
        if !self.options.progressive_loading {
            self.loader.load_all();
        }
        // A chunk request refers to the old collection; a settled search still applies.
        self.updates
            .retain(|u| !matches!(u, Update::LoadNextChunk));
        self.recompute();
    }

    // --- host loop -----------------------------------------------------------------------

    /// Advances timers: settles debounced input and samples memory.
    ///
    /// Returns `true` when deferred updates are waiting for [`Optimizer::idle`].
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if let Some(text) = self.search.poll(now_ms) {
            self.updates.defer(Update::Search(text));
        }
        self.monitor.maybe_sample_memory(now_ms);
        !self.updates.is_empty()
    }

    /// Applies deferred updates. Returns `true` when the processed collection changed.
    pub fn idle(&mut self, _now_ms: u64) -> bool {
        let mut dirty = false;
        let pending: Vec<Update> = self.updates.drain_deferred().collect();
        for update in pending {
            match update {
                Update::Search(text) => {
                    if self.query.search_text != text {
                        gdebug!(text = %text, "Optimizer: search applied");
                        self.query.search_text = text;
                        dirty = true;
                    }
                }
                Update::LoadNextChunk => {
                    if let Some(next) = self.loader.next_unloaded() {
                        dirty |= self.loader.load_chunk(next);
                    }
                }
            }
        }
        if dirty {
            self.recompute();
        }
        dirty
    }

    /// `tick` followed by `idle`, for hosts without a separate idle phase.
    pub fn flush(&mut self, now_ms: u64) -> bool {
        self.tick(now_ms);
        self.idle(now_ms)
    }

    // --- navigation ----------------------------------------------------------------------

    pub fn page(&self) -> usize {
        self.window.range().start / self.options.items_per_page
    }

    pub fn page_count(&self) -> usize {
        self.total_count().div_ceil(self.options.items_per_page)
    }

    /// Shows page `page` (zero-based), clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        let per_page = self.options.items_per_page;
        let last = self.page_count().saturating_sub(1);
        let start = page.min(last).saturating_mul(per_page);
        self.set_visible_range(VisibleRange::new(start, start.saturating_add(per_page)));
    }

    /// Swipe left shows the next page, swipe right the previous one.
    ///
    /// Returns `true` when the page changed.
    pub fn apply_swipe(&mut self, direction: SwipeDirection) -> bool {
        let page = self.page();
        let target = match direction {
            SwipeDirection::Left => page.saturating_add(1),
            SwipeDirection::Right => page.saturating_sub(1),
            SwipeDirection::Up | SwipeDirection::Down => return false,
        };
        if target == page || target >= self.page_count() {
            return false;
        }
        self.set_page(target);
        true
    }

    pub fn touch_start(&mut self, points: &[Point], now_ms: u64) {
        self.touch.begin(points, now_ms);
    }

    /// Samples an intermediate touch move (rate-limited).
    pub fn touch_move(&mut self, points: &[Point], now_ms: u64) -> bool {
        self.touch.update(points, now_ms)
    }

    /// Ends a touch sequence. Horizontal swipes page through the data; the recognised gesture
    /// is returned so the caller can act on pinches (e.g. switch to a coarser view).
    pub fn touch_end(&mut self, release: &[Point]) -> Option<Gesture> {
        let gesture = self.touch.end(release)?;
        if let Gesture::Swipe(direction) = gesture {
            self.apply_swipe(direction);
        }
        Some(gesture)
    }

    pub fn touch_cancel(&mut self) {
        self.touch.cancel();
    }

    /// Maps a pinch to a zoom intent using the configured thresholds.
    pub fn zoom_intent(&self, gesture: &Gesture) -> Option<ZoomIntent> {
        match gesture {
            Gesture::Pinch(p) => self.options.gesture.zoom_intent(p),
            Gesture::Swipe(_) => None,
        }
    }

    // --- internals -----------------------------------------------------------------------

    fn schedule_auto_load(&mut self) {
        if !self.options.progressive_loading || !self.options.auto_load_chunks {
            return;
        }
        if self.loader.is_fully_loaded() {
            return;
        }
        let end = self.window.range().end;
        if end.saturating_add(self.options.buffer_size) >= self.processed.len() {
            gtrace!(end, len = self.processed.len(), "Optimizer: nearing loaded end");
            self.updates.defer(Update::LoadNextChunk);
        }
    }

    fn recompute(&mut self) {
        let items: &[T] = &self.items;
        let query = &self.query;
        let candidates = self.loader.effective_indices(items, self.date_range.as_ref());

        let mut out = self.monitor.measure(Stage::Filter, || {
            pipeline::filter_indices(items, &candidates, &query.search_text)
        });
        if let Some(key) = query.sort_key.as_deref() {
            let direction = query.sort_direction;
            self.monitor.measure(Stage::Sort, || {
                pipeline::sort_indices(items, &mut out, key, direction)
            });
        }
        if self.options.enable_data_sampling && out.len() > self.options.max_data_points {
            gwarn!(
                len = out.len(),
                max = self.options.max_data_points,
                "Optimizer: downsampling processed collection"
            );
            out = downsample(&out, self.options.max_data_points);
        }

        self.processed = out.into();
        let len = self.processed.len();
        let window = &mut self.window;
        self.monitor.measure(Stage::Render, || window.set_len(len));
        gtrace!(
            candidates = candidates.len(),
            len,
            range = ?self.window.range(),
            "Optimizer::recompute"
        );
    }
}

impl<T> core::fmt::Debug for Optimizer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Optimizer")
            .field("items", &self.items.len())
            .field("options", &self.options)
            .field("query", &self.query)
            .field("date_range", &self.date_range)
            .field("loaded_chunks", &self.loader.loaded_count())
            .field("processed", &self.processed.len())
            .field("visible_range", &self.window.range())
            .finish_non_exhaustive()
    }
}
