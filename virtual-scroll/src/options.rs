/// Configuration for a virtual scroll viewport.
///
/// `child_width`/`child_height` are independent: any side left unset (or set to `0`) is measured
/// from the first rendered child instead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewportOptions {
    /// Subtracted from the container's client width.
    pub scrollbar_width: f64,
    /// Subtracted from the container's client height.
    pub scrollbar_height: f64,
    pub child_width: Option<f64>,
    pub child_height: Option<f64>,
    /// Extra items rendered before and after the visible range (applied in whole rows).
    pub buffer_amount: usize,
}

impl ViewportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with both child dimensions fixed, so no measurement is needed.
    pub fn with_child_size(mut self, width: f64, height: f64) -> Self {
        self.child_width = Some(width);
        self.child_height = Some(height);
        self
    }

    pub fn with_child_width(mut self, width: Option<f64>) -> Self {
        self.child_width = width;
        self
    }

    pub fn with_child_height(mut self, height: Option<f64>) -> Self {
        self.child_height = height;
        self
    }

    pub fn with_scrollbar(mut self, scrollbar_width: f64, scrollbar_height: f64) -> Self {
        self.scrollbar_width = scrollbar_width;
        self.scrollbar_height = scrollbar_height;
        self
    }

    pub fn with_buffer_amount(mut self, buffer_amount: usize) -> Self {
        self.buffer_amount = buffer_amount;
        self
    }

    /// The configured width, if it can be used as-is (`0` means "measure").
    pub(crate) fn configured_width(&self) -> Option<f64> {
        self.child_width.filter(|w| *w != 0.0 && !w.is_nan())
    }

    /// The configured height, if it can be used as-is (`0` means "measure").
    pub(crate) fn configured_height(&self) -> Option<f64> {
        self.child_height.filter(|h| *h != 0.0 && !h.is_nan())
    }

    /// Whether the engine needs the host to measure rendered children.
    pub fn needs_measurement(&self) -> bool {
        self.configured_width().is_none() || self.configured_height().is_none()
    }
}
