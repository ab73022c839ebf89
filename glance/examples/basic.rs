// Example: the filter/sort pipeline, windowing, and chunked loading without the adapter.
use std::collections::BTreeMap;

use glance::{
    ChunkedLoader, FieldValue, Query, ScrollMetrics, SortDirection, compute_visible_range,
    pipeline,
};

type Row = BTreeMap<String, FieldValue<'static>>;

fn main() -> glance::Result<()> {
    let items: Vec<Row> = (0..1_000)
        .map(|i| {
            let mut r = Row::new();
            let kind = if i % 3 == 0 { "Widget" } else { "Component" };
            r.insert("name".to_owned(), FieldValue::from(format!("{kind} {i}")));
            r.insert("price".to_owned(), FieldValue::Int((i * 7919) % 1_000));
            r
        })
        .collect();

    let mut loader = ChunkedLoader::new(items.len(), 100)?;
    loader.load_chunk(1);
    println!(
        "chunks={} loaded={:?} loaded_len={}",
        loader.chunk_count(),
        loader.loaded_chunks().collect::<Vec<_>>(),
        loader.loaded_len()
    );

    let candidates = loader.effective_indices(&items, None);
    let query = Query::new()
        .with_search_text("wid")
        .with_sort("price", SortDirection::Desc);
    let view = pipeline::process(&items, &candidates, &query);
    println!("matched={} of {}", view.len(), candidates.len());

    let metrics = ScrollMetrics::new(200.0, 20.0, 120.0);
    let range = compute_visible_range(&metrics, view.len(), 2);
    println!("visible_range={range:?}");
    for &i in &view[range.as_range()] {
        println!(
            "  {} ({})",
            items[i]["name"],
            items[i].get("price").map(|p| p.to_string()).unwrap_or_default()
        );
    }
    Ok(())
}
