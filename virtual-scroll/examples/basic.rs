// Example: minimal usage with fixed child sizes.
use virtual_scroll::{ContainerMetrics, Measurements, Viewport, ViewportOptions};

fn main() {
    let mut v = Viewport::new(ViewportOptions::new().with_child_size(300.0, 20.0));

    for scroll_top in [0.0, 500.0, 19_800.0] {
        let metrics = ContainerMetrics::new(300.0, 200.0, scroll_top);
        let pass = v.recompute(1_000_000, metrics, &Measurements::default(), 0.0);
        println!(
            "scroll_top={scroll_top} change={:?} top_padding={} scroll_height={}",
            pass.change.map(|c| c.range),
            pass.window.top_padding,
            pass.window.scroll_height
        );
    }

    let to = v.scroll_into_offset(
        999_999,
        1_000_000,
        ContainerMetrics::new(300.0, 200.0, 0.0),
        &Measurements::default(),
    );
    println!("scroll_into(999_999): offset={to:?}");
}
