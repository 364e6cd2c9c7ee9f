use std::sync::{Arc, Mutex};

use virtual_scroll::{ChildMetrics, ContainerMetrics, ViewportOptions};
use virtual_scroll_adapter::{Controller, ListenerKind, ScrollParent, ViewportHost};

fn main() {
    // Example: a 4-column card grid whose column count is measured from the rendered children.
    //
    // An adapter would:
    // - call on_scroll / on_resize from its listeners
    // - call tick() from an animation-frame callback while a refresh is pending
    // - render the slice passed to on_update, translated by surface().translate_y
    let host = GridHost::new(400.0, 300.0, ChildMetrics::new(100.0, 60.0));
    let rendered = host.rendered.clone();

    let mut c = Controller::new(host, ViewportOptions::new().with_buffer_amount(4))
        .with_on_update(move |items: &[Person]| *rendered.lock().unwrap() = items.len())
        .with_on_change(|r| println!("  change {}..{} ({} items)", r.start, r.end, r.len()));

    println!("mount 1000 people:");
    c.set_items(people(1000));
    run_frames(&mut c);

    println!("sort by name:");
    let mut sorted = c.items().to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    c.set_items(sorted);
    run_frames(&mut c);

    println!("scroll to #640:");
    if let Some(target) = c.items().iter().find(|p| p.index == 640).cloned() {
        c.scroll_into(&target);
    }
    run_frames(&mut c);

    for len in [0, 49, 1000] {
        println!("reduce to {len}:");
        c.set_items(people(len));
        run_frames(&mut c);
    }

    let surface = c.surface();
    println!(
        "surface: height={} translate_y={} overflow={:?}",
        surface.total_height, surface.translate_y, surface.overflow_y
    );
}

#[derive(Clone, Debug, PartialEq)]
struct Person {
    index: usize,
    name: String,
}

fn people(n: usize) -> Vec<Person> {
    (0..n)
        .map(|index| Person {
            index,
            name: format!("person-{:03}", (index * 7919) % 1000),
        })
        .collect()
}

fn run_frames(c: &mut Controller<Person, GridHost>) {
    while c.tick() {}
}

/// A fake DOM: a fixed-size container that lays children out in as many columns as fit.
struct GridHost {
    metrics: ContainerMetrics,
    child: ChildMetrics,
    rendered: Arc<Mutex<usize>>,
}

impl GridHost {
    fn new(width: f64, height: f64, child: ChildMetrics) -> Self {
        Self {
            metrics: ContainerMetrics::new(width, height, 0.0),
            child,
            rendered: Arc::new(Mutex::new(0)),
        }
    }

    fn rendered(&self) -> usize {
        self.rendered.lock().map(|n| *n).unwrap_or(0)
    }
}

impl ViewportHost for GridHost {
    type Element = ();

    fn metrics(&self, _source: Option<&ScrollParent<()>>) -> ContainerMetrics {
        self.metrics
    }

    fn set_scroll_top(&mut self, _source: Option<&ScrollParent<()>>, scroll_top: f64) {
        self.metrics.scroll_top = scroll_top;
    }

    fn rendered_row_offsets(&self, out: &mut Vec<f64>) {
        let columns = (self.metrics.client_width / self.child.width).floor().max(1.0) as usize;
        out.extend((0..self.rendered()).map(|i| (i / columns) as f64 * self.child.height));
    }

    fn first_child_size(&self) -> Option<ChildMetrics> {
        (self.rendered() > 0).then_some(self.child)
    }

    fn add_listener(&mut self, _target: &ScrollParent<()>, _kind: ListenerKind) {}

    fn remove_listener(&mut self, _target: &ScrollParent<()>, _kind: ListenerKind) {}
}
