//! Pure windowing math.
//!
//! Everything in this module is a function of its inputs: container metrics, child metrics,
//! the item count and the buffer. Degenerate inputs (zero-sized containers, empty collections,
//! unmeasurable children) produce empty windows instead of errors.

use core::cmp;

use crate::{ChangeEvent, ChildMetrics, ContainerMetrics, Measurements, ViewportOptions};

/// Layout derived from container and child metrics for one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub item_count: usize,
    pub view_width: f64,
    pub view_height: f64,
    pub child_width: f64,
    pub child_height: f64,
    /// Columns in the grid (items sharing one row).
    pub items_per_row: usize,
    /// Rows visible in the viewport.
    pub items_per_col: usize,
    /// Columns implied by the available width alone.
    pub items_per_row_by_calc: usize,
}

impl Dimensions {
    pub fn child(&self) -> ChildMetrics {
        ChildMetrics::new(self.child_width, self.child_height)
    }

    pub fn is_measurable(&self) -> bool {
        self.child().is_measurable()
    }
}

/// The result of one windowing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: usize,
    pub end: usize, // exclusive
    /// Offset of the rendered slice from the top of the content.
    pub top_padding: f64,
    /// Total scrollable extent of the collection.
    pub scroll_height: f64,
    pub items_per_row: usize,
    pub items_per_col: usize,
    /// Set when the container's scroll offset overflowed the content and was clamped.
    ///
    /// The host should write this value back to its scroll container.
    pub corrected_scroll_top: Option<f64>,
}

impl Window {
    pub fn range(&self) -> ChangeEvent {
        ChangeEvent::new(self.start, self.end)
    }
}

/// Counts how many leading children share the first child's row offset.
///
/// Returns `0` when nothing is rendered.
pub fn count_items_per_row(row_offsets: impl IntoIterator<Item = f64>) -> usize {
    let mut offsets = row_offsets.into_iter();
    let Some(first) = offsets.next() else {
        return 0;
    };
    1 + offsets.take_while(|&top| top == first).count()
}

/// Converts a non-negative float to an index. Saturates on overflow; NaN maps to `0`.
fn to_index(value: f64) -> usize {
    value as usize
}

/// `max(1, round(available / child))`, or `1` when the ratio is meaningless.
fn fit_count(available: f64, child: f64, round: fn(f64) -> f64) -> usize {
    let n = round(available / child);
    if n.is_finite() && n >= 1.0 {
        to_index(n)
    } else {
        1
    }
}

/// Derives the grid layout for a pass.
///
/// `previous_scroll_height` is the extent computed by the previous pass, if any. It is used to
/// decide whether a single observed column is real or only an artifact of too few rendered
/// children.
pub fn calculate_dimensions(
    options: &ViewportOptions,
    item_count: usize,
    metrics: ContainerMetrics,
    measurements: &Measurements,
    previous_scroll_height: Option<f64>,
) -> Dimensions {
    let view_width = metrics.client_width - options.scrollbar_width;
    let view_height = metrics.client_height - options.scrollbar_height;

    // Nothing rendered yet: assume one child fills the viewport.
    let measured = measurements
        .first_child
        .unwrap_or(ChildMetrics::new(view_width, view_height));
    let child_width = options.configured_width().unwrap_or(measured.width);
    let child_height = options.configured_height().unwrap_or(measured.height);

    let mut items_per_row = measurements.observed_per_row.max(1);
    let items_per_row_by_calc = fit_count(view_width, child_width, f64::floor);
    let items_per_col = fit_count(view_height, child_height, f64::ceil);

    let scroll_top = metrics.scroll_top.max(0.0);
    let should_use_calc = if scroll_top > 0.0 {
        previous_scroll_height.is_some_and(|scroll_height| {
            let by_calc = items_per_row_by_calc as f64;
            (scroll_top / scroll_height * by_calc).floor() + by_calc >= item_count as f64
        })
    } else {
        items_per_row_by_calc > items_per_row
    };

    if items_per_row == 1 && should_use_calc {
        items_per_row = items_per_row_by_calc;
    }

    vtrace!(
        item_count,
        view_width,
        view_height,
        child_width,
        child_height,
        items_per_row,
        items_per_col,
        "calculate_dimensions"
    );

    Dimensions {
        item_count,
        view_width,
        view_height,
        child_width,
        child_height,
        items_per_row,
        items_per_col,
        items_per_row_by_calc,
    }
}

/// Computes the visible window for `scroll_top`.
///
/// `content_offset` is where the list starts inside the scroll source (e.g. when a parent
/// element or the window scrolls and the list sits below a header).
pub fn calculate_window(
    dimensions: &Dimensions,
    scroll_top: f64,
    content_offset: f64,
    buffer_amount: usize,
) -> Window {
    let count = dimensions.item_count;
    let per_row = dimensions.items_per_row.max(1);
    let per_col = dimensions.items_per_col.max(1);
    let child_height = dimensions.child_height;
    let measurable = dimensions.is_measurable();

    let scroll_height = if measurable {
        child_height * count as f64 / per_row as f64
    } else {
        0.0
    };

    let mut window = Window {
        start: 0,
        end: 0,
        top_padding: 0.0,
        scroll_height,
        items_per_row: per_row,
        items_per_col: per_col,
        corrected_scroll_top: None,
    };

    // The content shrank below the current scroll position.
    let mut scroll_top = scroll_top;
    if scroll_top > scroll_height + content_offset {
        scroll_top = scroll_height + content_offset;
        window.corrected_scroll_top = Some(scroll_top);
        vdebug!(scroll_top, scroll_height, "scroll offset clamped to content");
    }

    if !measurable || count == 0 {
        return window;
    }

    let effective = (scroll_top - content_offset).max(0.0);
    let row_size = count as f64 / per_row as f64;
    let row_index = if scroll_height > 0.0 {
        effective / scroll_height * row_size
    } else {
        0.0
    };

    let visible = per_row.saturating_mul(per_col);
    let end = cmp::min(
        count,
        to_index(row_index.ceil())
            .saturating_mul(per_row)
            .saturating_add(visible),
    );
    // Always fill the last row, full or not.
    let max_end = end.div_ceil(per_row).saturating_mul(per_row);
    let max_start = max_end.saturating_sub(visible);
    let start = cmp::min(max_start, to_index(row_index.floor()).saturating_mul(per_row));

    // The buffer is counted in items but applied in whole rows.
    let buffer_rows = buffer_amount.div_ceil(per_row);
    let start_row = start.div_ceil(per_row);
    let top_padding = child_height * start_row as f64
        - child_height * cmp::min(start_row, buffer_rows) as f64;
    window.top_padding = if top_padding.is_finite() {
        top_padding
    } else {
        0.0
    };

    let buffer_items = buffer_rows.saturating_mul(per_row);
    window.start = start.saturating_sub(buffer_items);
    window.end = cmp::min(count, end.saturating_add(buffer_items));

    if window.start > window.end {
        vwarn!(
            start = window.start,
            end = window.end,
            "calculate_window: start past end"
        );
        debug_assert!(
            window.start <= window.end,
            "calculate_window: start past end (start={}, end={})",
            window.start,
            window.end
        );
        window.start = window.end;
    }

    window
}

/// Scroll offset that brings `index` to the top of the viewport, keeping `buffer_amount` items
/// above it.
pub fn scroll_top_for_index(dimensions: &Dimensions, index: usize, buffer_amount: usize) -> f64 {
    if !dimensions.is_measurable() {
        return 0.0;
    }
    let per_row = dimensions.items_per_row.max(1);
    let row = index / per_row;
    let buffer_rows = buffer_amount.div_ceil(per_row);
    let child_height = dimensions.child_height;
    let top = child_height * row as f64 - child_height * cmp::min(row, buffer_rows) as f64;
    top.max(0.0)
}
