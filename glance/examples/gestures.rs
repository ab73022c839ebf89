// Example: classifying raw touch samples into swipes and pinches.
use glance::{Gesture, GestureConfig, Point, TouchTracker};

fn main() -> glance::Result<()> {
    let config = GestureConfig::default();
    let mut tracker = TouchTracker::new(config)?;

    // One finger dragged right, sampled every 8ms; only every other move is recorded.
    tracker.begin(&[Point::new(10.0, 200.0)], 0);
    let mut recorded = 0;
    for step in 1..=10u64 {
        let x = 10.0 + step as f32 * 12.0;
        if tracker.update(&[Point::new(x, 203.0)], step * 8) {
            recorded += 1;
        }
    }
    println!("recorded_moves={recorded}");
    println!("swipe={:?}", tracker.end(&[]));

    // Two fingers moving apart.
    tracker.begin(&[Point::new(100.0, 100.0), Point::new(140.0, 100.0)], 200);
    let gesture = tracker.end(&[Point::new(80.0, 100.0), Point::new(160.0, 100.0)]);
    if let Some(Gesture::Pinch(pinch)) = gesture {
        println!(
            "pinch scale={:.2} center={:?} intent={:?}",
            pinch.scale,
            pinch.center,
            config.zoom_intent(&pinch)
        );
    }
    Ok(())
}
