use virtual_scroll::{ChildMetrics, ContainerMetrics};

/// An external scroll owner: an ancestor element, or the global window.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollParent<E> {
    Element(E),
    Window,
}

impl<E> ScrollParent<E> {
    /// The events the controller listens to on this owner.
    ///
    /// Elements only scroll; the window also resizes.
    pub fn listener_kinds(&self) -> &'static [ListenerKind] {
        match self {
            Self::Element(_) => &[ListenerKind::Scroll],
            Self::Window => &[ListenerKind::Scroll, ListenerKind::Resize],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListenerKind {
    Scroll,
    Resize,
}

/// The UI side of a [`crate::Controller`].
///
/// Every method that takes a `source` receives `None` for the viewport's own container and
/// `Some(parent)` when an external scroll owner is configured.
///
/// Listener callbacks registered through `add_listener` are expected to call
/// [`crate::Controller::on_scroll`] / [`crate::Controller::on_resize`].
pub trait ViewportHost {
    /// Handle to an element that can own scrolling.
    type Element: Clone + PartialEq;

    /// Live metrics of the scroll source.
    fn metrics(&self, source: Option<&ScrollParent<Self::Element>>) -> ContainerMetrics;

    /// Writes a scroll offset back to the scroll source.
    fn set_scroll_top(&mut self, source: Option<&ScrollParent<Self::Element>>, scroll_top: f64);

    /// Pushes the row offset (offset-top) of each rendered child, in order.
    ///
    /// The default reports nothing rendered, which is fine when the column count follows from
    /// configured child sizes.
    fn rendered_row_offsets(&self, _out: &mut Vec<f64>) {}

    /// Bounding box of the first rendered child, if any.
    fn first_child_size(&self) -> Option<ChildMetrics> {
        None
    }

    /// Where the list starts inside the scroll source (e.g. below a header).
    fn content_offset(&self, _source: Option<&ScrollParent<Self::Element>>) -> f64 {
        0.0
    }

    fn add_listener(&mut self, target: &ScrollParent<Self::Element>, kind: ListenerKind);

    /// Must tolerate removing a listener that is not attached.
    fn remove_listener(&mut self, target: &ScrollParent<Self::Element>, kind: ListenerKind);
}
