// Example: a grid whose column count is measured from rendered children.
use virtual_scroll::engine::count_items_per_row;
use virtual_scroll::{ChildMetrics, ContainerMetrics, Measurements, Viewport, ViewportOptions};

fn main() {
    // Nothing configured: the first pass renders a single placeholder item.
    let mut v = Viewport::new(ViewportOptions::new().with_buffer_amount(4));
    let metrics = ContainerMetrics::new(400.0, 300.0, 0.0);

    let pass = v.recompute(1000, metrics, &Measurements::default(), 0.0);
    println!("startup: {:?} reschedule={}", pass.window.range(), pass.reschedule);

    // The host rendered the slice; children are 100x30 and wrap every 4 items.
    let mut rendered = 1usize;
    while v.is_starting_up() {
        let offsets = (0..rendered).map(|i| (i / 4) as f64 * 30.0);
        let measurements =
            Measurements::new(count_items_per_row(offsets), Some(ChildMetrics::new(100.0, 30.0)));
        let pass = v.recompute(1000, metrics, &measurements, 0.0);
        rendered = pass.window.end - pass.window.start;
        println!(
            "pass: {:?} per_row={} reschedule={}",
            pass.window.range(),
            pass.window.items_per_row,
            pass.reschedule
        );
    }
}
