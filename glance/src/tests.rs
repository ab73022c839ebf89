use crate::*;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

type Row = BTreeMap<String, FieldValue<'static>>;

fn row(fields: &[(&str, FieldValue<'static>)]) -> Row {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

fn named(names: &[&str]) -> Vec<Row> {
    names
        .iter()
        .map(|n| row(&[("name", FieldValue::from((*n).to_owned()))]))
        .collect()
}

fn all(items: &[Row]) -> Vec<usize> {
    (0..items.len()).collect()
}

#[derive(Debug)]
struct Event {
    title: &'static str,
    start_ms: i64,
}

impl Record for Event {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "title" => Some(FieldValue::from(self.title)),
            "start" => Some(FieldValue::Int(self.start_ms)),
            _ => None,
        }
    }

    fn for_each_field(&self, f: &mut dyn FnMut(&str, FieldValue<'_>)) {
        f("title", FieldValue::from(self.title));
        f("start", FieldValue::Int(self.start_ms));
    }

    fn timestamp_ms(&self) -> Option<i64> {
        Some(self.start_ms)
    }
}

// --- rate limiting ---------------------------------------------------------------------------

#[test]
fn debounce_collapses_burst_into_last_value() {
    let mut d = Debouncer::new(300);
    for (i, now) in [0u64, 50, 120, 299, 450].into_iter().enumerate() {
        d.call(i, now);
        assert_eq!(d.poll(now), None);
    }
    assert_eq!(d.poll(749), None);
    assert_eq!(d.deadline_ms(), Some(750));
    assert_eq!(d.poll(750), Some(4));
    assert_eq!(d.poll(2_000), None);
    assert!(!d.is_pending());
}

#[test]
fn debounce_cancel_and_flush() {
    let mut d = Debouncer::new(100);
    d.call("a", 0);
    d.cancel();
    assert_eq!(d.poll(1_000), None);

    d.call("b", 0);
    assert_eq!(d.peek(), Some(&"b"));
    assert_eq!(d.flush(), Some("b"));
    assert_eq!(d.poll(1_000), None);
}

#[test]
fn throttle_fires_leading_edge_and_drops_inside_window() {
    let mut t = Throttler::new(100);
    assert_eq!(t.call(1, 0), Some(1));
    assert_eq!(t.call(2, 50), None);
    assert_eq!(t.call(3, 99), None);
    assert_eq!(t.call(4, 100), Some(4));
    assert_eq!(t.dropped(), 2);

    t.reset();
    assert!(t.try_acquire(101));
}

#[test]
fn throttle_rate_is_bounded_under_continuous_calls() {
    let mut rng = Lcg::new(7);
    for _ in 0..50 {
        let limit = rng.gen_range_u64(1, 200);
        let duration = rng.gen_range_u64(1, 5_000);
        let step = rng.gen_range_u64(1, 20);
        let mut t = Throttler::new(limit);
        let mut fired = 0u64;
        let mut now = 0u64;
        while now < duration {
            if t.try_acquire(now) {
                fired += 1;
            }
            now += step;
        }
        assert!(fired <= duration.div_ceil(limit) + 1, "limit={limit} T={duration}");
    }
}

// --- filter / sort ---------------------------------------------------------------------------

#[test]
fn filter_matches_any_field_case_insensitively() {
    let items = named(&["Widget A", "Widget B", "Component X"]);
    let out = pipeline::filter_indices(&items, &all(&items), "wid");
    assert_eq!(out, vec![0, 1]);

    let items = vec![
        row(&[("name", "Anvil".into()), ("sku", FieldValue::Int(4411))]),
        row(&[("name", "Hammer".into()), ("in_stock", FieldValue::Bool(true))]),
    ];
    assert_eq!(pipeline::filter_indices(&items, &all(&items), "441"), vec![0]);
    assert_eq!(pipeline::filter_indices(&items, &all(&items), "TRUE"), vec![1]);
}

#[test]
fn empty_search_is_identity() {
    let items = named(&["b", "a", "c"]);
    let candidates = vec![2, 0, 1];
    assert_eq!(pipeline::filter_indices(&items, &candidates, ""), candidates);
}

#[test]
fn filter_is_idempotent() {
    let mut rng = Lcg::new(11);
    let words = ["alpha", "beta", "gamma", "delta", "Alphabet", "GAMMA ray"];
    let items: Vec<Row> = (0..200)
        .map(|_| {
            let w = words[rng.gen_range_usize(0, words.len())];
            row(&[("name", FieldValue::from(w.to_owned()))])
        })
        .collect();
    for needle in ["al", "GAM", "zzz", "a"] {
        let once = pipeline::filter_indices(&items, &all(&items), needle);
        let twice = pipeline::filter_indices(&items, &once, needle);
        assert_eq!(once, twice);
    }
}

#[test]
fn sort_is_monotonic_in_both_directions() {
    let mut rng = Lcg::new(3);
    let items: Vec<Row> = (0..300)
        .map(|_| row(&[("qty", FieldValue::Int(rng.gen_range_u64(0, 50) as i64))]))
        .collect();
    let qty = |i: usize| match items[i].field("qty") {
        Some(FieldValue::Int(q)) => q,
        _ => unreachable!(),
    };

    let mut asc = all(&items);
    pipeline::sort_indices(&items, &mut asc, "qty", SortDirection::Asc);
    assert!(asc.windows(2).all(|w| qty(w[0]) <= qty(w[1])));

    let mut desc = all(&items);
    pipeline::sort_indices(&items, &mut desc, "qty", SortDirection::Desc);
    assert!(desc.windows(2).all(|w| qty(w[0]) >= qty(w[1])));
}

#[test]
fn sort_keeps_missing_values_last_and_ties_stable() {
    let items = vec![
        row(&[("price", FieldValue::Float(2.5))]),
        row(&[("name", "no price".into())]),
        row(&[("price", FieldValue::Int(1))]),
        row(&[("price", FieldValue::Float(2.5))]),
    ];
    let mut asc = all(&items);
    pipeline::sort_indices(&items, &mut asc, "price", SortDirection::Asc);
    assert_eq!(asc, vec![2, 0, 3, 1]);

    let mut desc = all(&items);
    pipeline::sort_indices(&items, &mut desc, "price", SortDirection::Desc);
    assert_eq!(desc, vec![0, 3, 2, 1]);
}

#[test]
fn toggling_sort_twice_returns_to_ascending() {
    let mut q = Query::new();
    q.toggle_sort("name");
    assert_eq!(q.sort_direction, SortDirection::Asc);
    q.toggle_sort("name");
    assert_eq!(q.sort_direction, SortDirection::Desc);
    q.toggle_sort("name");
    assert_eq!(q.sort_direction, SortDirection::Asc);

    q.toggle_sort("name");
    q.toggle_sort("price");
    assert_eq!(q.sort_key.as_deref(), Some("price"));
    assert_eq!(q.sort_direction, SortDirection::Asc);

    let items = named(&["c", "a", "b"]);
    let q = Query::new().with_sort("name", SortDirection::Asc);
    let first = pipeline::process(&items, &all(&items), &q);
    let second = pipeline::process(&items, &all(&items), &q);
    assert_eq!(&*first, &[1, 2, 0]);
    assert_eq!(first, second);
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn mixed_kinds_have_a_fixed_order() {
    let a = FieldValue::Bool(true);
    let b = FieldValue::Int(3);
    let c = FieldValue::Float(2.0);
    let d = FieldValue::from("x");
    assert!(a.total_cmp(&b).is_lt());
    assert!(c.total_cmp(&b).is_lt());
    assert!(b.total_cmp(&d).is_lt());
}

// --- windowing -------------------------------------------------------------------------------

#[test]
fn scenario_scroll_window() {
    let m = ScrollMetrics::new(500.0, 20.0, 400.0);
    assert_eq!(compute_visible_range(&m, 1_000, 5), VisibleRange::new(25, 50));
}

#[test]
fn window_bounds_hold_for_random_metrics() {
    let mut rng = Lcg::new(42);
    for _ in 0..2_000 {
        let len = rng.gen_range_usize(0, 500);
        let m = ScrollMetrics::new(
            rng.gen_range_u64(0, 50_000) as f64,
            rng.gen_range_u64(0, 80) as f64,
            rng.gen_range_u64(0, 2_000) as f64,
        );
        let buffer = rng.gen_range_usize(0, 10);
        let r = compute_visible_range(&m, len, buffer);
        assert!(r.start <= r.end && r.end <= len, "{m:?} len={len} -> {r:?}");
    }
}

#[test]
fn window_edge_cases() {
    let m = ScrollMetrics::new(500.0, 20.0, 400.0);
    assert_eq!(compute_visible_range(&m, 0, 5), VisibleRange::EMPTY);

    // Scrolled past the end: keep a full window at the tail.
    let far = ScrollMetrics::new(1.0e9, 20.0, 400.0);
    assert_eq!(compute_visible_range(&far, 100, 5), VisibleRange::new(80, 100));

    // Fewer items than fit in the viewport.
    assert_eq!(compute_visible_range(&far, 7, 5), VisibleRange::new(0, 7));

    let degenerate = ScrollMetrics::new(100.0, 0.0, 400.0);
    assert_eq!(compute_visible_range(&degenerate, 100, 5), VisibleRange::new(0, 5));
    let nan = ScrollMetrics::new(f64::NAN, 20.0, -5.0);
    assert_eq!(compute_visible_range(&nan, 100, 5), VisibleRange::new(0, 5));
}

#[test]
fn window_manager_throttles_scroll_and_tracks_len() {
    let mut w = WindowManager::new(5, 50, 100);
    w.set_len(1_000);
    assert_eq!(w.range(), VisibleRange::new(0, 50));

    assert!(w.on_scroll(ScrollMetrics::new(500.0, 20.0, 400.0), 0));
    assert_eq!(w.range(), VisibleRange::new(25, 50));
    assert!(!w.on_scroll(ScrollMetrics::new(5_000.0, 20.0, 400.0), 40));
    assert_eq!(w.range(), VisibleRange::new(25, 50));
    assert!(w.on_scroll(ScrollMetrics::new(5_000.0, 20.0, 400.0), 100));
    assert_eq!(w.range(), VisibleRange::new(250, 275));

    w.set_len(30);
    assert_eq!(w.range(), VisibleRange::new(10, 30));

    w.set_range(VisibleRange::new(20, 90));
    assert_eq!(w.range(), VisibleRange::new(20, 30));

    w.set_enabled(false);
    assert_eq!(w.range(), VisibleRange::new(0, 30));
}

#[test]
fn window_manager_scroll_can_be_split_into_accept_and_apply() {
    let mut w = WindowManager::new(5, 50, 100);
    w.set_len(1_000);

    assert!(w.accept_scroll(0));
    assert!(!w.accept_scroll(60));
    assert_eq!(w.range(), VisibleRange::new(0, 50));
    assert_eq!(w.throttler().dropped(), 1);

    w.apply_metrics(ScrollMetrics::new(500.0, 20.0, 400.0));
    assert_eq!(w.range(), VisibleRange::new(25, 50));
    assert!(!w.on_scroll(ScrollMetrics::new(0.0, 20.0, 400.0), 99));
    assert_eq!(w.range(), VisibleRange::new(25, 50));
}

// --- chunked loading -------------------------------------------------------------------------

#[test]
fn chunks_reassemble_the_collection() {
    let mut rng = Lcg::new(5);
    for _ in 0..200 {
        let len = rng.gen_range_usize(0, 300);
        let size = rng.gen_range_usize(1, 64);
        let items: Vec<usize> = (0..len).collect();
        let loader = ChunkedLoader::new(len, size).unwrap();
        let chunks: Vec<_> = loader.chunks(&items).collect();
        assert_eq!(chunks.len(), loader.chunk_count());
        assert!(chunks.iter().enumerate().all(|(i, c)| c.index == i));
        let joined: Vec<usize> = chunks.iter().flat_map(|c| c.items.iter().copied()).collect();
        assert_eq!(joined, items);
    }
}

#[test]
fn scenario_chunk_sizes_and_initial_load() {
    let items: Vec<u32> = (0..250).collect();
    let mut loader = ChunkedLoader::new(items.len(), 100).unwrap();
    let sizes: Vec<usize> = loader.chunks(&items).map(|c| c.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(loader.loaded_chunks().collect::<Vec<_>>(), vec![0]);
    assert_eq!(loader.loaded_len(), 100);

    assert!(loader.load_chunk(2));
    assert!(!loader.load_chunk(2));
    assert!(!loader.load_chunk(3));
    assert_eq!(loader.next_unloaded(), Some(1));
    assert_eq!(loader.loaded_indices().count(), 150);
    assert_eq!(loader.loaded_indices().nth(100), Some(200));

    loader.load_all();
    assert!(loader.is_fully_loaded());
    assert_eq!(loader.next_unloaded(), None);
}

#[test]
fn chunk_loader_rejects_zero_chunk_size_and_handles_empty() {
    assert_eq!(ChunkedLoader::new(10, 0).unwrap_err(), ConfigError::ZeroChunkSize);
    let loader = ChunkedLoader::new(0, 10).unwrap();
    assert_eq!(loader.chunk_count(), 0);
    assert_eq!(loader.loaded_count(), 0);
    assert_eq!(loader.chunk_range(0), None);
}

#[test]
fn chunk_loader_reset_keeps_only_the_first_chunk() {
    let mut loader = ChunkedLoader::new(250, 100).unwrap();
    loader.load_all();
    assert!(loader.is_fully_loaded());

    loader.reset(30);
    assert_eq!(loader.chunk_count(), 1);
    assert_eq!(loader.loaded_chunks().collect::<Vec<_>>(), [0]);
    assert_eq!(loader.loaded_len(), 30);

    loader.reset(0);
    assert_eq!(loader.loaded_count(), 0);
}

#[test]
fn date_range_filters_loaded_events() {
    let events = vec![
        Event { title: "standup", start_ms: 1_000 },
        Event { title: "review", start_ms: 5_000 },
        Event { title: "retro", start_ms: 9_000 },
    ];
    let mut loader = ChunkedLoader::new(events.len(), 2).unwrap();
    let range = DateRange::new(9_500, 900);
    assert_eq!(range, DateRange { start_ms: 900, end_ms: 9_500 });
    assert_eq!(loader.effective_indices(&events, Some(&DateRange::new(2_000, 9_500))), vec![1]);
    loader.load_chunk(1);
    assert_eq!(
        loader.effective_indices(&events, Some(&DateRange::new(2_000, 9_500))),
        vec![1, 2]
    );
    assert_eq!(loader.effective_indices(&events, None), vec![0, 1, 2]);
}

// --- sampling --------------------------------------------------------------------------------

#[test]
fn downsample_keeps_endpoints_and_budget() {
    let series: Vec<usize> = (0..1_000).collect();
    let out = downsample(&series, 10);
    assert_eq!(out.len(), 10);
    assert_eq!(out.first(), Some(&0));
    assert_eq!(out.last(), Some(&999));
    assert!(out.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(downsample(&series[..5], 10), vec![0, 1, 2, 3, 4]);
    assert_eq!(downsample(&series, 1), vec![0]);
    assert!(downsample(&series, 0).is_empty());
}

// --- gestures --------------------------------------------------------------------------------

#[test]
fn swipe_threshold_and_cardinal_directions() {
    let o = Point::new(100.0, 100.0);
    assert_eq!(classify_swipe(o, Point::new(130.0, 120.0), 50.0), None);
    assert_eq!(classify_swipe(o, o, 0.0), None);
    assert_eq!(classify_swipe(o, Point::new(160.0, 100.0), 50.0), Some(SwipeDirection::Right));
    assert_eq!(classify_swipe(o, Point::new(100.0, 160.0), 50.0), Some(SwipeDirection::Down));
    assert_eq!(classify_swipe(o, Point::new(40.0, 100.0), 50.0), Some(SwipeDirection::Left));
    assert_eq!(classify_swipe(o, Point::new(100.0, 40.0), 50.0), Some(SwipeDirection::Up));
    // Diagonal-ish movement buckets to the dominant axis.
    assert_eq!(classify_swipe(o, Point::new(40.0, 130.0), 50.0), Some(SwipeDirection::Left));
}

#[test]
fn pinch_scale_center_and_intent() {
    let cfg = GestureConfig::default();
    let prev = [Point::new(100.0, 100.0), Point::new(200.0, 100.0)];
    let spread = [Point::new(50.0, 100.0), Point::new(250.0, 100.0)];
    let p = detect_pinch(prev, spread).unwrap();
    assert!((p.scale - 2.0).abs() < 1e-6);
    assert_eq!(p.center, Point::new(150.0, 100.0));
    assert_eq!(cfg.zoom_intent(&p), Some(ZoomIntent::ZoomIn));

    let squeeze = [Point::new(140.0, 100.0), Point::new(160.0, 100.0)];
    let p = detect_pinch(prev, squeeze).unwrap();
    assert_eq!(cfg.zoom_intent(&p), Some(ZoomIntent::ZoomOut));

    let hold = [Point::new(100.0, 100.0), Point::new(205.0, 100.0)];
    assert_eq!(cfg.zoom_intent(&detect_pinch(prev, hold).unwrap()), None);

    let stacked = [Point::new(1.0, 1.0), Point::new(1.0, 1.0)];
    assert_eq!(detect_pinch(stacked, spread), None);
}

#[test]
fn touch_tracker_classifies_on_release() {
    let mut t = TouchTracker::new(GestureConfig::default()).unwrap();
    t.begin(&[Point::new(300.0, 200.0)], 0);
    assert!(!t.update(&[Point::new(280.0, 200.0)], 5));
    assert!(t.update(&[Point::new(250.0, 200.0)], 20));
    assert_eq!(
        t.end(&[Point::new(200.0, 205.0)]),
        Some(Gesture::Swipe(SwipeDirection::Left))
    );
    assert!(!t.is_tracking());

    // Release without coordinates falls back to the last sampled move.
    t.begin(&[Point::new(0.0, 0.0)], 100);
    t.update(&[Point::new(0.0, 80.0)], 200);
    assert_eq!(t.end(&[]), Some(Gesture::Swipe(SwipeDirection::Down)));

    // Second finger turns the sequence into a pinch; lifting one finger first keeps it.
    t.begin(&[Point::new(100.0, 100.0)], 300);
    t.update(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)], 301);
    t.update(&[Point::new(50.0, 100.0), Point::new(250.0, 100.0)], 400);
    match t.end(&[Point::new(250.0, 100.0)]) {
        Some(Gesture::Pinch(p)) => assert!((p.scale - 2.0).abs() < 1e-6),
        other => panic!("expected pinch, got {other:?}"),
    }

    assert_eq!(t.end(&[]), None);
}

#[test]
fn gesture_config_validation() {
    assert!(GestureConfig::default().validate().is_ok());
    assert!(matches!(
        GestureConfig::default().with_min_swipe_distance(-1.0).validate(),
        Err(ConfigError::InvalidThreshold { name: "min_swipe_distance", .. })
    ));
    assert!(GestureConfig::default().with_zoom_scales(0.5, 0.8).validate().is_err());
    assert!(TouchTracker::new(GestureConfig::default().with_zoom_scales(1.2, 0.0)).is_err());
}

// --- performance monitor ---------------------------------------------------------------------

struct FakeProbe(AtomicU64);

impl MemoryProbe for FakeProbe {
    fn used_bytes(&self) -> Option<u64> {
        match self.0.load(Ordering::Relaxed) {
            0 => None,
            n => Some(n),
        }
    }
}

#[test]
fn monitor_records_latest_stage_durations() {
    let clock = ManualClock::new();
    let mut m = PerformanceMonitor::with_sources(Arc::new(clock.clone()), Arc::new(NoMemoryProbe))
        .with_history(2);

    let out = m.measure(Stage::Filter, || {
        clock.advance_ms(12);
        42
    });
    assert_eq!(out, 42);
    m.measure(Stage::Sort, || clock.advance_ms(3));
    m.measure(Stage::Filter, || clock.advance_ms(4));

    let snap = m.snapshot();
    assert!((snap.filter_time - 4.0).abs() < 1e-9);
    assert!((snap.sort_time - 3.0).abs() < 1e-9);
    assert_eq!(snap.render_time, 0.0);

    let history: Vec<_> = m.history().map(|s| s.stage).collect();
    assert_eq!(history, vec![Stage::Sort, Stage::Filter]);
    assert!((m.history().last().unwrap().timestamp_ms - 19.0).abs() < 1e-9);
}

#[test]
fn memory_sampling_is_periodic_and_degrades_gracefully() {
    let probe = Arc::new(FakeProbe(AtomicU64::new(0)));
    let mut m = PerformanceMonitor::with_sources(Arc::new(ManualClock::new()), probe.clone())
        .with_memory_interval_ms(5_000);

    assert!(m.maybe_sample_memory(0));
    assert_eq!(m.snapshot().memory_usage_mb, None);

    probe.0.store(64 * 1024 * 1024, Ordering::Relaxed);
    assert!(!m.maybe_sample_memory(4_999));
    assert_eq!(m.snapshot().memory_usage_mb, None);
    assert!(m.maybe_sample_memory(5_000));
    assert_eq!(m.snapshot().memory_usage_mb, Some(64.0));

    // Probe goes away: keep the last known value.
    probe.0.store(0, Ordering::Relaxed);
    assert!(m.maybe_sample_memory(10_000));
    assert_eq!(m.snapshot().memory_usage_mb, Some(64.0));

    m.reset();
    assert_eq!(m.snapshot(), PerformanceMetrics::default());
}

#[test]
fn vm_rss_parsing() {
    let status = "Name:\tglance\nVmPeak:\t  9000 kB\nVmRSS:\t  2048 kB\nThreads:\t1\n";
    assert_eq!(crate::perf::parse_vm_rss_kb(status), Some(2048));
    assert_eq!(crate::perf::parse_vm_rss_kb("Name:\tx\n"), None);
}

// --- scheduling / options --------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum Update {
    Search(&'static str),
    Page(usize),
}

#[test]
fn deferred_updates_coalesce_per_kind() {
    let mut q = UpdateQueue::new();
    assert_eq!(q.schedule(Priority::Immediate, Update::Page(1)), Some(Update::Page(1)));
    assert!(q.is_empty());

    assert_eq!(q.schedule(Priority::Deferred, Update::Search("w")), None);
    assert_eq!(q.schedule(Priority::Deferred, Update::Page(2)), None);
    assert_eq!(q.schedule(Priority::Deferred, Update::Search("wid")), None);
    assert_eq!(q.pending(), 2);

    let drained: Vec<_> = q.drain_deferred().collect();
    assert_eq!(drained, vec![Update::Page(2), Update::Search("wid")]);
    assert!(q.is_empty());
}

#[test]
fn defer_coalesces_and_retain_filters_pending_updates() {
    let mut q = UpdateQueue::new();
    q.defer(Update::Search("w"));
    q.defer(Update::Page(3));
    q.defer(Update::Search("wi"));
    assert_eq!(q.pending(), 2);

    q.retain(|u| !matches!(u, Update::Page(_)));
    let drained: Vec<_> = q.drain_deferred().collect();
    assert_eq!(drained, vec![Update::Search("wi")]);
}

#[test]
fn options_defaults_and_validation() {
    let o = OptimizerOptions::default();
    assert_eq!(o.items_per_page, 50);
    assert_eq!(o.debounce_ms, 300);
    assert_eq!(o.throttle_ms, 100);
    assert_eq!(o.chunk_size, 100);
    assert!(o.enable_virtualization);
    assert!(o.validate().is_ok());

    assert_eq!(
        o.clone().with_chunk_size(0).validate(),
        Err(ConfigError::ZeroChunkSize)
    );
    assert_eq!(
        o.clone().with_throttle_ms(0).validate(),
        Err(ConfigError::ZeroWindow { name: "throttle_ms" })
    );
    assert_eq!(
        o.clone().with_data_sampling(0).validate(),
        Err(ConfigError::ZeroMaxDataPoints)
    );
    assert_eq!(
        o.with_items_per_page(0).validate(),
        Err(ConfigError::ZeroItemsPerPage)
    );
    assert_eq!(
        ConfigError::ZeroWindow { name: "debounce_ms" }.to_string(),
        "debounce_ms must be a positive number of milliseconds"
    );
}
