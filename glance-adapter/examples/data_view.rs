use std::collections::BTreeMap;

use glance::{FieldValue, OptimizerOptions};
use glance_adapter::Optimizer;

type Row = BTreeMap<String, FieldValue<'static>>;

fn main() -> Result<(), glance::ConfigError> {
    // Example: a host loop driving the optimizer without holding any UI objects.
    //
    // An adapter would:
    // - forward input (keystrokes, scroll events, touches) to the handlers
    // - call tick(now_ms) from a frame loop / timer, and idle(now_ms) when it has spare time
    // - render visible_slice() into the real list/table
    let items: Vec<Row> = (0..25_000)
        .map(|i| {
            let mut r = Row::new();
            r.insert("id".to_owned(), FieldValue::Int(i));
            r.insert(
                "name".to_owned(),
                FieldValue::from(format!("{} #{i}", if i % 10 == 0 { "Widget" } else { "Part" })),
            );
            r
        })
        .collect();

    let options = OptimizerOptions::default()
        .with_chunk_size(5_000)
        .with_progressive_loading(true);
    let mut view = Optimizer::new(items, options)?;
    println!(
        "loaded_chunks={} total={}",
        view.loader().loaded_count(),
        view.total_count()
    );

    // Typing "widget" one key per 60ms: the filter runs once, after the quiet period.
    let mut now_ms = 0u64;
    for end in 1..="widget".len() {
        view.search(&"widget"[..end], now_ms);
        now_ms += 60;
        view.tick(now_ms);
    }
    while !view.tick(now_ms) {
        now_ms += 16;
    }
    view.idle(now_ms);
    println!("t={now_ms} search={:?} total={}", view.query().search_text, view.total_count());

    // Scroll to the bottom of the loaded data; the next chunk loads on the idle tick.
    for step in 0..40u64 {
        now_ms += 16;
        let scroll_top = step as f64 * 400.0;
        if view.scroll(scroll_top, 20.0, 600.0, now_ms) && view.tick(now_ms) {
            view.idle(now_ms);
        }
    }
    println!(
        "loaded_chunks={} total={} visible={:?}",
        view.loader().loaded_count(),
        view.total_count(),
        view.visible_range()
    );

    view.sort("id");
    view.sort("id");
    let first: Vec<String> = view
        .visible_slice()
        .iter()
        .take(3)
        .filter_map(|r| r.get("name").map(|v| v.to_string()))
        .collect();
    println!("first_rows={first:?}");
    println!("metrics={:?}", view.performance_metrics());
    Ok(())
}
