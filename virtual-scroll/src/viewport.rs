use crate::engine::{self, Dimensions, Window};
use crate::{
    ChangeEvent, ContainerMetrics, Measurements, Overflow, RangeChange, SurfaceStyle,
    ViewportOptions, ViewportSnapshot,
};

/// The outcome of one recompute pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pass {
    pub window: Window,
    /// Set when the range differs from the last emitted one.
    pub change: Option<RangeChange>,
    /// Whether the host should run another pass on the next frame.
    ///
    /// This happens while the viewport is still starting up: the pass may have used a
    /// placeholder child size because nothing was rendered yet.
    pub reschedule: bool,
}

/// A headless virtual scroll viewport.
///
/// This type holds the state that survives between passes (the last emitted range, the last
/// scroll extent and the startup flag) and runs the windowing engine. It does not hold items or
/// UI objects: the adapter passes the item count and live metrics into [`Viewport::recompute`].
///
/// For a host-driven controller with event emission and frame coalescing, see the
/// `virtual-scroll-adapter` crate.
#[derive(Clone, Debug)]
pub struct Viewport {
    options: ViewportOptions,
    previous: Option<ChangeEvent>,
    top_padding: f64,
    scroll_height: Option<f64>,
    starting_up: bool,
    dimensions: Dimensions,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportOptions::default())
    }
}

impl Viewport {
    /// Creates a viewport. It starts in the startup state.
    pub fn new(options: ViewportOptions) -> Self {
        vdebug!(
            buffer_amount = options.buffer_amount,
            needs_measurement = options.needs_measurement(),
            "Viewport::new"
        );
        Self {
            options,
            previous: None,
            top_padding: 0.0,
            scroll_height: None,
            starting_up: true,
            dimensions: Dimensions::default(),
        }
    }

    pub fn options(&self) -> &ViewportOptions {
        &self.options
    }

    /// Replaces the options. The next pass always emits.
    pub fn set_options(&mut self, options: ViewportOptions) {
        self.options = options;
        vtrace!(
            buffer_amount = self.options.buffer_amount,
            "Viewport::set_options"
        );
        self.reset_range();
    }

    /// Copies the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ViewportOptions)) {
        let mut next = self.options;
        f(&mut next);
        self.set_options(next);
    }

    /// Forgets the last emitted range so the next pass looks like a change.
    pub fn reset_range(&mut self) {
        self.previous = None;
    }

    /// Re-enters the startup state (e.g. after the collection went from empty to non-empty).
    pub fn begin_startup(&mut self) {
        self.starting_up = true;
    }

    pub fn is_starting_up(&self) -> bool {
        self.starting_up
    }

    /// The last emitted range, if any.
    pub fn previous_range(&self) -> Option<ChangeEvent> {
        self.previous
    }

    pub fn top_padding(&self) -> f64 {
        self.top_padding
    }

    /// Total scrollable extent from the last pass (`0` before the first pass).
    pub fn scroll_height(&self) -> f64 {
        self.scroll_height.unwrap_or(0.0)
    }

    /// Layout used by the last pass.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn surface(&self, overflow_y: Overflow) -> SurfaceStyle {
        SurfaceStyle {
            total_height: self.scroll_height(),
            translate_y: self.top_padding,
            overflow_y,
        }
    }

    /// Derives the layout for the given inputs, without touching any state.
    pub fn measure(
        &self,
        item_count: usize,
        metrics: ContainerMetrics,
        measurements: &Measurements,
    ) -> Dimensions {
        engine::calculate_dimensions(
            &self.options,
            item_count,
            metrics,
            measurements,
            self.scroll_height,
        )
    }

    /// Runs one windowing pass and compares the result with the last emitted range.
    pub fn recompute(
        &mut self,
        item_count: usize,
        metrics: ContainerMetrics,
        measurements: &Measurements,
        content_offset: f64,
    ) -> Pass {
        let dimensions = self.measure(item_count, metrics, measurements);
        let window = engine::calculate_window(
            &dimensions,
            metrics.scroll_top,
            content_offset,
            self.options.buffer_amount,
        );
        self.dimensions = dimensions;
        self.top_padding = window.top_padding;
        self.scroll_height = Some(window.scroll_height);

        let range = window.range();
        if self.previous == Some(range) {
            if self.starting_up {
                vdebug!(start = range.start, end = range.end, "startup settled");
                self.starting_up = false;
            }
            return Pass {
                window,
                change: None,
                reschedule: false,
            };
        }

        let change = RangeChange {
            range,
            start_changed: self.previous.is_none_or(|p| p.start != range.start),
            end_changed: self.previous.is_none_or(|p| p.end != range.end),
        };
        vtrace!(
            start = range.start,
            end = range.end,
            starting_up = self.starting_up,
            "range changed"
        );
        self.previous = Some(range);

        Pass {
            window,
            change: Some(change),
            reschedule: self.starting_up,
        }
    }

    /// Scroll offset that brings item `index` into view, or `None` if `index` is out of bounds.
    pub fn scroll_into_offset(
        &self,
        index: usize,
        item_count: usize,
        metrics: ContainerMetrics,
        measurements: &Measurements,
    ) -> Option<f64> {
        if index >= item_count {
            return None;
        }
        let dimensions = self.measure(item_count, metrics, measurements);
        Some(engine::scroll_top_for_index(
            &dimensions,
            index,
            self.options.buffer_amount,
        ))
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            previous: self.previous,
            top_padding: self.top_padding,
            scroll_height: self.scroll_height,
            starting_up: self.starting_up,
        }
    }

    /// Restores state captured by [`Viewport::snapshot`].
    pub fn restore(&mut self, snapshot: ViewportSnapshot) {
        self.previous = snapshot.previous;
        self.top_padding = snapshot.top_padding;
        self.scroll_height = snapshot.scroll_height;
        self.starting_up = snapshot.starting_up;
    }
}
