use crate::*;

use std::sync::{Arc, Mutex};

use virtual_scroll::{ChangeEvent, ChildMetrics, ContainerMetrics, Overflow, ViewportOptions};

type Parent = ScrollParent<&'static str>;

#[derive(Debug, Default)]
struct Dom {
    own: ContainerMetrics,
    outer: ContainerMetrics,
    window: ContainerMetrics,
    /// Size of each rendered child; `None` renders nothing measurable.
    child: Option<ChildMetrics>,
    columns: usize,
    rendered: usize,
    content_offset: f64,
    listeners: Vec<(Parent, ListenerKind)>,
    scroll_writes: Vec<f64>,
}

impl Dom {
    fn source_mut(&mut self, source: Option<&Parent>) -> &mut ContainerMetrics {
        match source {
            None => &mut self.own,
            Some(ScrollParent::Element(_)) => &mut self.outer,
            Some(ScrollParent::Window) => &mut self.window,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct FakeHost(Arc<Mutex<Dom>>);

impl FakeHost {
    fn with(&self, f: impl FnOnce(&mut Dom)) {
        f(&mut self.0.lock().unwrap());
    }

    fn read<R>(&self, f: impl FnOnce(&Dom) -> R) -> R {
        f(&self.0.lock().unwrap())
    }
}

impl ViewportHost for FakeHost {
    type Element = &'static str;

    fn metrics(&self, source: Option<&Parent>) -> ContainerMetrics {
        *self.0.lock().unwrap().source_mut(source)
    }

    fn set_scroll_top(&mut self, source: Option<&Parent>, scroll_top: f64) {
        let mut dom = self.0.lock().unwrap();
        dom.source_mut(source).scroll_top = scroll_top;
        dom.scroll_writes.push(scroll_top);
    }

    fn rendered_row_offsets(&self, out: &mut Vec<f64>) {
        let dom = self.0.lock().unwrap();
        let Some(child) = dom.child else {
            return;
        };
        let columns = dom.columns.max(1);
        out.extend((0..dom.rendered).map(|i| (i / columns) as f64 * child.height));
    }

    fn first_child_size(&self) -> Option<ChildMetrics> {
        let dom = self.0.lock().unwrap();
        if dom.rendered == 0 { None } else { dom.child }
    }

    fn content_offset(&self, source: Option<&Parent>) -> f64 {
        if source.is_some() {
            self.0.lock().unwrap().content_offset
        } else {
            0.0
        }
    }

    fn add_listener(&mut self, target: &Parent, kind: ListenerKind) {
        self.0.lock().unwrap().listeners.push((target.clone(), kind));
    }

    fn remove_listener(&mut self, target: &Parent, kind: ListenerKind) {
        self.0
            .lock()
            .unwrap()
            .listeners
            .retain(|(t, k)| !(t == target && *k == kind));
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Update(Vec<u32>),
    Change(ChangeEvent),
    Start(ChangeEvent),
    End(ChangeEvent),
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.lock().unwrap())
    }
}

fn list(n: u32) -> Vec<u32> {
    (0..n).collect()
}

fn column_host() -> FakeHost {
    let host = FakeHost::default();
    host.with(|dom| {
        dom.own = ContainerMetrics::new(300.0, 200.0, 0.0);
        dom.child = Some(ChildMetrics::new(300.0, 20.0));
        dom.columns = 1;
    });
    host
}

fn controller(host: &FakeHost, options: ViewportOptions) -> (Controller<u32, FakeHost>, Recorder) {
    let rec = Recorder::default();
    let c = Controller::new(host.clone(), options)
        .with_on_update({
            let rec = rec.clone();
            move |items: &[u32]| rec.0.lock().unwrap().push(Event::Update(items.to_vec()))
        })
        .with_on_change({
            let rec = rec.clone();
            move |r| rec.0.lock().unwrap().push(Event::Change(r))
        })
        .with_on_start({
            let rec = rec.clone();
            move |r| rec.0.lock().unwrap().push(Event::Start(r))
        })
        .with_on_end({
            let rec = rec.clone();
            move |r| rec.0.lock().unwrap().push(Event::End(r))
        });
    (c, rec)
}

/// Runs one frame and lets the fake DOM render the emitted slice.
fn frame(c: &mut Controller<u32, FakeHost>) -> bool {
    let ran = c.tick();
    let rendered = c.viewport_items().len();
    c.host().with(|dom| dom.rendered = rendered);
    ran
}

/// Runs frames until no pass is pending.
fn settle(c: &mut Controller<u32, FakeHost>) -> usize {
    let mut frames = 0;
    while frame(c) {
        frames += 1;
        assert!(frames < 16, "controller never settled");
    }
    frames
}

fn fixed_column() -> ViewportOptions {
    ViewportOptions::new().with_child_size(300.0, 20.0)
}

#[test]
fn first_pass_emits_the_visible_slice() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    assert!(c.is_refresh_pending());

    assert!(frame(&mut c));
    let r = ChangeEvent::new(0, 10);
    assert_eq!(
        rec.take(),
        vec![
            Event::Update(list(10)),
            Event::Start(r),
            Event::End(r),
            Event::Change(r),
        ]
    );
    assert_eq!(c.range(), r);
    assert_eq!(c.surface().translate_y, 0.0);

    // Startup: one more pass confirms the range, without emitting.
    assert!(c.is_refresh_pending());
    assert!(frame(&mut c));
    assert!(rec.take().is_empty());
    assert!(!c.viewport().is_starting_up());
    assert!(!frame(&mut c));
}

#[test]
fn scrolling_moves_the_window() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    host.with(|dom| dom.own.scroll_top = 500.0);
    c.on_scroll();
    assert!(frame(&mut c));

    let r = ChangeEvent::new(25, 35);
    assert_eq!(
        rec.take(),
        vec![
            Event::Update((25..35).collect()),
            Event::Start(r),
            Event::End(r),
            Event::Change(r),
        ]
    );
    assert_eq!(c.viewport_items(), &(25..35).collect::<Vec<u32>>()[..]);
    let surface = c.surface();
    assert_eq!(surface.translate_y, 500.0);
    assert_eq!(surface.total_height, 20_000.0);
    assert_eq!(surface.overflow_y, Overflow::Auto);
}

#[test]
fn triggers_coalesce_into_one_pass() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    host.with(|dom| dom.own.scroll_top = 100.0);
    assert!(c.refresh());
    for _ in 0..50 {
        c.on_scroll();
        assert!(!c.refresh());
    }
    c.on_resize();

    // The pass reads the freshest metrics, not the ones at scheduling time.
    host.with(|dom| dom.own.scroll_top = 500.0);
    assert!(frame(&mut c));
    assert!(!frame(&mut c));

    let changes: Vec<_> = rec
        .take()
        .into_iter()
        .filter(|e| matches!(e, Event::Change(_)))
        .collect();
    assert_eq!(changes, vec![Event::Change(ChangeEvent::new(25, 35))]);
}

#[test]
fn unchanged_inputs_emit_nothing() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    c.refresh();
    assert!(frame(&mut c));
    c.refresh();
    assert!(frame(&mut c));
    assert!(rec.take().is_empty());
}

#[test]
fn only_the_moved_boundary_is_reported() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    host.with(|dom| dom.own.scroll_top = 19_800.0);
    settle(&mut c);
    assert_eq!(c.range(), ChangeEvent::new(990, 1000));
    rec.take();

    // A taller container at the end of the list only pulls the start back.
    host.with(|dom| dom.own.client_height = 400.0);
    c.on_resize();
    frame(&mut c);
    let r = ChangeEvent::new(980, 1000);
    assert_eq!(
        rec.take(),
        vec![
            Event::Update((980..1000).collect()),
            Event::Start(r),
            Event::Change(r),
        ]
    );
}

#[test]
fn collection_change_reports_both_boundaries() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    // A new collection always emits, even though the start stays at 0.
    c.set_items(list(5));
    frame(&mut c);
    let r = ChangeEvent::new(0, 5);
    assert_eq!(
        rec.take(),
        vec![
            Event::Update(list(5)),
            Event::Start(r),
            Event::End(r),
            Event::Change(r),
        ]
    );
}

#[test]
fn replaced_collection_with_same_range_is_emitted() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    let reversed: Vec<u32> = (0..1000).rev().collect();
    c.set_items(reversed);
    frame(&mut c);
    let events = rec.take();
    assert_eq!(events[0], Event::Update((990..1000).rev().collect()));
    assert!(events.contains(&Event::Change(ChangeEvent::new(0, 10))));
}

#[test]
fn emptying_and_refilling_behaves_like_a_fresh_mount() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    let fresh = rec.take();

    c.set_items(Vec::new());
    assert!(frame(&mut c));
    let r = ChangeEvent::new(0, 0);
    assert_eq!(
        rec.take(),
        vec![
            Event::Update(Vec::new()),
            Event::Start(r),
            Event::End(r),
            Event::Change(r),
        ]
    );
    assert!(c.viewport_items().is_empty());
    assert!(!c.is_refresh_pending());

    c.set_items(list(1000));
    assert!(c.viewport().is_starting_up());
    settle(&mut c);
    assert_eq!(rec.take(), fresh);
}

#[test]
fn clearing_items_then_setting_restarts_startup() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(20));
    settle(&mut c);

    c.clear_items();
    settle(&mut c);
    assert_eq!(c.range(), ChangeEvent::new(0, 0));
    assert!(c.items().is_empty());
    rec.take();

    c.set_items(list(20));
    assert!(c.viewport().is_starting_up());
    assert_eq!(settle(&mut c), 2);
    assert_eq!(c.viewport_items(), &list(10)[..]);
}

#[test]
fn scroll_into_missing_item_does_nothing() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    c.scroll_into(&5_000);
    assert!(!c.is_refresh_pending());
    assert!(host.read(|dom| dom.scroll_writes.is_empty()));
    assert_eq!(host.read(|dom| dom.own.scroll_top), 0.0);
    assert!(rec.take().is_empty());
}

#[test]
fn scroll_into_moves_the_container() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column().with_buffer_amount(2));
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    c.scroll_into(&25);
    assert!(c.is_refresh_pending());
    assert_eq!(host.read(|dom| dom.scroll_writes.clone()), vec![460.0]);

    frame(&mut c);
    assert_eq!(c.range(), ChangeEvent::new(21, 35));
    assert_eq!(c.viewport_items()[2], 23);
    assert_eq!(c.viewport_items()[4], 25);
}

#[test]
fn overflowing_scroll_offset_is_written_back() {
    let host = column_host();
    let (mut c, _rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);

    host.with(|dom| dom.own.scroll_top = 5_000.0);
    c.on_scroll();
    settle(&mut c);

    c.set_items(list(5));
    frame(&mut c);
    assert_eq!(host.read(|dom| dom.own.scroll_top), 100.0);
    assert_eq!(c.range(), ChangeEvent::new(0, 5));
}

#[test]
fn startup_measures_rendered_children() {
    let host = FakeHost::default();
    host.with(|dom| {
        dom.own = ContainerMetrics::new(400.0, 200.0, 0.0);
        dom.child = Some(ChildMetrics::new(100.0, 20.0));
        dom.columns = 4;
    });
    let (mut c, rec) = controller(&host, ViewportOptions::new());
    c.set_items(list(100));

    // Nothing rendered: one placeholder item the size of the viewport.
    frame(&mut c);
    assert_eq!(c.range(), ChangeEvent::new(0, 1));

    // One child rendered: width implies 4 columns, height implies 10 rows.
    frame(&mut c);
    assert_eq!(c.range(), ChangeEvent::new(0, 40));
    assert!(c.is_refresh_pending());

    // Forty rendered children confirm the grid.
    frame(&mut c);
    assert!(!c.is_refresh_pending());
    assert!(!c.viewport().is_starting_up());
    assert_eq!(c.viewport().dimensions().items_per_row, 4);

    let updates = rec
        .take()
        .into_iter()
        .filter(|e| matches!(e, Event::Update(_)))
        .count();
    assert_eq!(updates, 2);
}

#[test]
fn parent_listeners_follow_reconfiguration() {
    let host = column_host();
    let (mut c, _rec) = controller(&host, fixed_column());
    assert!(host.read(|dom| dom.listeners.is_empty()));

    c.set_scroll_parent(Some(ScrollParent::Element("outer")));
    assert_eq!(
        host.read(|dom| dom.listeners.clone()),
        vec![(ScrollParent::Element("outer"), ListenerKind::Scroll)]
    );

    // Same owner: no duplicate listeners.
    c.set_scroll_parent(Some(ScrollParent::Element("outer")));
    assert_eq!(host.read(|dom| dom.listeners.len()), 1);

    c.set_scroll_parent(Some(ScrollParent::Window));
    assert_eq!(
        host.read(|dom| dom.listeners.clone()),
        vec![
            (ScrollParent::Window, ListenerKind::Scroll),
            (ScrollParent::Window, ListenerKind::Resize),
        ]
    );
    assert_eq!(c.surface().overflow_y, Overflow::Hidden);

    c.set_scroll_parent(None);
    assert!(host.read(|dom| dom.listeners.is_empty()));
    assert_eq!(c.surface().overflow_y, Overflow::Auto);

    c.set_scroll_parent(Some(ScrollParent::Element("other")));
    drop(c);
    assert!(host.read(|dom| dom.listeners.is_empty()));
}

#[test]
fn destroy_is_idempotent() {
    let host = column_host();
    let (mut c, _rec) = controller(&host, fixed_column());
    c.destroy();
    c.set_scroll_parent(Some(ScrollParent::Window));
    c.destroy();
    c.destroy();
    assert!(host.read(|dom| dom.listeners.is_empty()));
}

#[test]
fn parent_scroll_uses_parent_metrics_and_offset() {
    let host = column_host();
    host.with(|dom| {
        dom.outer = ContainerMetrics::new(300.0, 200.0, 600.0);
        dom.content_offset = 100.0;
    });
    let (mut c, _rec) = controller(&host, fixed_column());
    c.set_scroll_parent(Some(ScrollParent::Element("outer")));
    c.set_items(list(1000));
    settle(&mut c);
    assert_eq!(c.range(), ChangeEvent::new(25, 35));

    c.scroll_into(&50);
    assert_eq!(host.read(|dom| dom.outer.scroll_top), 1_000.0);
    assert_eq!(host.read(|dom| dom.own.scroll_top), 0.0);
}

#[test]
fn option_changes_re_emit() {
    let host = column_host();
    let (mut c, rec) = controller(&host, fixed_column());
    c.set_items(list(1000));
    settle(&mut c);
    rec.take();

    c.update_options(|o| o.scrollbar_height = 0.0);
    assert!(c.is_refresh_pending());
    frame(&mut c);
    assert!(rec.take().contains(&Event::Change(ChangeEvent::new(0, 10))));

    c.update_options(|o| o.buffer_amount = 5);
    frame(&mut c);
    assert_eq!(c.range(), ChangeEvent::new(0, 15));
}

#[test]
fn gate_reopens_before_the_pass() {
    let mut gate = FrameGate::new();
    assert!(!gate.take());
    assert!(gate.request());
    assert!(!gate.request());
    assert!(gate.is_pending());
    assert!(gate.take());
    assert!(!gate.is_pending());
    assert!(gate.request());
}
