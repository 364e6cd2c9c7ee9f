use std::sync::Arc;

use virtual_scroll::engine::count_items_per_row;
use virtual_scroll::{
    ChangeEvent, Measurements, Overflow, SurfaceStyle, Viewport, ViewportOptions,
};

use crate::{FrameGate, ScrollParent, ViewportHost};

/// A callback receiving the items currently in range.
pub type OnUpdateCallback<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// A callback receiving a visible range (`end` exclusive).
pub type OnRangeCallback = Arc<dyn Fn(ChangeEvent) + Send + Sync>;

/// A framework-neutral controller that drives a [`Viewport`] for an item collection.
///
/// The controller owns the host and talks to it through [`ViewportHost`]. Adapters drive it by
/// calling:
/// - `on_scroll` / `on_resize` / `refresh` when something may have moved
/// - `tick()` once per frame (e.g. from an animation-frame callback)
///
/// Triggers are coalesced: however many fire before a frame, `tick()` runs at most one pass, and
/// that pass reads live metrics from the host.
pub struct Controller<T, H: ViewportHost> {
    host: H,
    viewport: Viewport,
    items: Option<Vec<T>>,
    range: ChangeEvent,
    parent: Option<ScrollParent<H::Element>>,
    listening: bool,
    gate: FrameGate,
    row_offsets: Vec<f64>,

    on_update: Option<OnUpdateCallback<T>>,
    on_change: Option<OnRangeCallback>,
    on_start: Option<OnRangeCallback>,
    on_end: Option<OnRangeCallback>,
}

impl<T, H: ViewportHost> Controller<T, H> {
    pub fn new(host: H, options: ViewportOptions) -> Self {
        Self {
            host,
            viewport: Viewport::new(options),
            items: None,
            range: ChangeEvent::default(),
            parent: None,
            listening: false,
            gate: FrameGate::new(),
            row_offsets: Vec::new(),
            on_update: None,
            on_change: None,
            on_start: None,
            on_end: None,
        }
    }

    /// Fired with the item slice whenever the range changes.
    pub fn with_on_update(mut self, f: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        self.set_on_update(Some(f));
        self
    }

    /// Fired with the new range whenever it changes.
    pub fn with_on_change(mut self, f: impl Fn(ChangeEvent) + Send + Sync + 'static) -> Self {
        self.set_on_change(Some(f));
        self
    }

    /// Fired when the start of the range moves.
    pub fn with_on_start(mut self, f: impl Fn(ChangeEvent) + Send + Sync + 'static) -> Self {
        self.set_on_start(Some(f));
        self
    }

    /// Fired when the end of the range moves.
    pub fn with_on_end(mut self, f: impl Fn(ChangeEvent) + Send + Sync + 'static) -> Self {
        self.set_on_end(Some(f));
        self
    }

    pub fn set_on_update(&mut self, f: Option<impl Fn(&[T]) + Send + Sync + 'static>) {
        self.on_update = f.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_change(&mut self, f: Option<impl Fn(ChangeEvent) + Send + Sync + 'static>) {
        self.on_change = f.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_start(&mut self, f: Option<impl Fn(ChangeEvent) + Send + Sync + 'static>) {
        self.on_start = f.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_end(&mut self, f: Option<impl Fn(ChangeEvent) + Send + Sync + 'static>) {
        self.on_end = f.map(|f| Arc::new(f) as _);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &ViewportOptions {
        self.viewport.options()
    }

    /// The current collection (empty when none was set).
    pub fn items(&self) -> &[T] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// Replaces the collection and schedules a pass.
    ///
    /// The next pass always emits. Going from no (or an empty) collection to a new one also
    /// restarts the startup passes, since the rendered children no longer say anything about
    /// the new items' size.
    pub fn set_items(&mut self, items: Vec<T>) {
        let was_empty = self.items.as_ref().is_none_or(Vec::is_empty);
        vdebug!(len = items.len(), was_empty, "set_items");
        self.items = Some(items);
        self.viewport.reset_range();
        if was_empty {
            self.viewport.begin_startup();
        }
        self.refresh();
    }

    /// Drops the collection. The next pass emits an empty range.
    pub fn clear_items(&mut self) {
        vdebug!("clear_items");
        self.items = None;
        self.viewport.reset_range();
        self.refresh();
    }

    /// Takes the collection back, leaving none in place.
    pub fn take_items(&mut self) -> Option<Vec<T>> {
        let items = self.items.take();
        self.viewport.reset_range();
        self.refresh();
        items
    }

    pub fn set_options(&mut self, options: ViewportOptions) {
        self.viewport.set_options(options);
        self.refresh();
    }

    /// Copies the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ViewportOptions)) {
        let mut next = *self.viewport.options();
        f(&mut next);
        self.set_options(next);
    }

    pub fn scroll_parent(&self) -> Option<&ScrollParent<H::Element>> {
        self.parent.as_ref()
    }

    /// Moves scroll listening to another owner (`None` = the viewport's own container).
    ///
    /// Listeners on the previous owner are removed before the new ones are added. Setting the
    /// current owner again does nothing.
    pub fn set_scroll_parent(&mut self, parent: Option<ScrollParent<H::Element>>) {
        if self.parent == parent {
            return;
        }
        self.detach_listeners();
        self.parent = parent;
        self.attach_listeners();
        self.viewport.reset_range();
        self.refresh();
    }

    /// Call this from the scroll listener.
    pub fn on_scroll(&mut self) {
        self.refresh();
    }

    /// Call this from the resize listener.
    pub fn on_resize(&mut self) {
        self.refresh();
    }

    /// Requests a pass on the next frame.
    ///
    /// Returns `true` if this call scheduled it; hosts can use this to request exactly one
    /// animation frame.
    pub fn refresh(&mut self) -> bool {
        let scheduled = self.gate.request();
        if scheduled {
            vtrace!("refresh scheduled");
        }
        scheduled
    }

    pub fn is_refresh_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Frame callback. Runs the pending pass, if any, and returns whether one ran.
    pub fn tick(&mut self) -> bool {
        if !self.gate.take() {
            return false;
        }
        self.calculate_items();
        true
    }

    /// Scrolls so that `item` is at the top of the viewport (minus the buffer).
    ///
    /// Items that are not in the current collection are ignored.
    pub fn scroll_into(&mut self, item: &T)
    where
        T: PartialEq,
    {
        let Some(index) = self.items().iter().position(|it| it == item) else {
            vdebug!("scroll_into: item not in collection");
            return;
        };
        let count = self.items().len();
        let metrics = self.host.metrics(self.parent.as_ref());
        let measurements = self.measure();
        let Some(scroll_top) =
            self.viewport
                .scroll_into_offset(index, count, metrics, &measurements)
        else {
            return;
        };
        vtrace!(index, scroll_top, "scroll_into");
        self.host.set_scroll_top(self.parent.as_ref(), scroll_top);
        self.refresh();
    }

    /// The last emitted range.
    pub fn range(&self) -> ChangeEvent {
        self.range
    }

    /// The items in the last emitted range, clipped to the current collection.
    pub fn viewport_items(&self) -> &[T] {
        let items = self.items();
        let end = self.range.end.min(items.len());
        let start = self.range.start.min(end);
        &items[start..end]
    }

    /// Styles for the rendering surface after the last pass.
    pub fn surface(&self) -> SurfaceStyle {
        let overflow_y = if self.parent.is_some() {
            Overflow::Hidden
        } else {
            Overflow::Auto
        };
        self.viewport.surface(overflow_y)
    }

    /// Removes all listeners from the scroll owner. Calling it again does nothing.
    ///
    /// This also runs on drop.
    pub fn destroy(&mut self) {
        self.detach_listeners();
    }

    fn attach_listeners(&mut self) {
        if self.listening {
            return;
        }
        let Some(parent) = &self.parent else {
            return;
        };
        for &kind in parent.listener_kinds() {
            self.host.add_listener(parent, kind);
        }
        self.listening = true;
    }

    fn detach_listeners(&mut self) {
        if !self.listening {
            return;
        }
        if let Some(parent) = &self.parent {
            for &kind in parent.listener_kinds() {
                self.host.remove_listener(parent, kind);
            }
        }
        self.listening = false;
    }

    fn measure(&mut self) -> Measurements {
        self.row_offsets.clear();
        self.host.rendered_row_offsets(&mut self.row_offsets);
        let observed_per_row = count_items_per_row(self.row_offsets.iter().copied());
        let first_child = if self.viewport.options().needs_measurement() {
            self.host.first_child_size()
        } else {
            None
        };
        Measurements::new(observed_per_row, first_child)
    }

    fn calculate_items(&mut self) {
        let count = self.items().len();
        let metrics = self.host.metrics(self.parent.as_ref());
        let content_offset = self.host.content_offset(self.parent.as_ref());
        let measurements = self.measure();

        let pass = self
            .viewport
            .recompute(count, metrics, &measurements, content_offset);

        if let Some(scroll_top) = pass.window.corrected_scroll_top {
            self.host.set_scroll_top(self.parent.as_ref(), scroll_top);
        }

        let Some(change) = pass.change else {
            return;
        };
        self.range = change.range;

        if let Some(cb) = &self.on_update {
            cb(self.viewport_items());
        }

        // Startup passes may have used a placeholder child size: measure again next frame.
        if pass.reschedule {
            self.refresh();
        }

        if change.start_changed {
            if let Some(cb) = &self.on_start {
                cb(change.range);
            }
        }
        if change.end_changed {
            if let Some(cb) = &self.on_end {
                cb(change.range);
            }
        }
        if let Some(cb) = &self.on_change {
            cb(change.range);
        }
    }
}

impl<T, H: ViewportHost> Drop for Controller<T, H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<T: core::fmt::Debug, H: ViewportHost + core::fmt::Debug> core::fmt::Debug
    for Controller<T, H>
where
    H::Element: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("host", &self.host)
            .field("viewport", &self.viewport)
            .field("items", &self.items)
            .field("range", &self.range)
            .field("parent", &self.parent)
            .field("listening", &self.listening)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
