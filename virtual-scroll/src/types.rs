/// Live geometry of the scroll source (the viewport's own container, a parent element or the
/// window), in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerMetrics {
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_top: f64,
}

impl ContainerMetrics {
    pub fn new(client_width: f64, client_height: f64, scroll_top: f64) -> Self {
        Self {
            client_width,
            client_height,
            scroll_top,
        }
    }
}

/// Size of one rendered item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildMetrics {
    pub width: f64,
    pub height: f64,
}

impl ChildMetrics {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both sides are usable as a divisor for row/column math.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// What the host could observe about the currently rendered children.
///
/// Hosts that always configure explicit child sizes can pass `Measurements::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurements {
    /// Number of leading rendered children sharing the first child's row offset.
    pub observed_per_row: usize,
    /// Bounding box of the first rendered child, if any child is rendered.
    pub first_child: Option<ChildMetrics>,
}

impl Measurements {
    pub fn new(observed_per_row: usize, first_child: Option<ChildMetrics>) -> Self {
        Self {
            observed_per_row,
            first_child,
        }
    }
}

/// A visible index range. `end` is exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeEvent {
    pub start: usize,
    pub end: usize, // exclusive
}

impl ChangeEvent {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A range change produced by a recompute pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeChange {
    pub range: ChangeEvent,
    pub start_changed: bool,
    pub end_changed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
    /// The viewport scrolls itself.
    #[default]
    Auto,
    /// A parent element or the window scrolls; the viewport must not.
    Hidden,
}

/// Styles a host applies to its rendering surface after a pass.
///
/// - `total_height` sizes the invisible spacer so the scrollbar reflects the full collection.
/// - `translate_y` positions the rendered slice.
/// - `overflow_y` is the scroll behavior of the viewport's own container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceStyle {
    pub total_height: f64,
    pub translate_y: f64,
    pub overflow_y: Overflow,
}
