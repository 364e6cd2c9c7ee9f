use crate::ChangeEvent;

/// A lightweight, serializable snapshot of a [`crate::Viewport`]'s recompute state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`. This is useful for
/// restoring a viewport across host re-creations without re-running the startup passes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSnapshot {
    /// The last emitted range. `None` forces the next pass to emit.
    pub previous: Option<ChangeEvent>,
    pub top_padding: f64,
    pub scroll_height: Option<f64>,
    pub starting_up: bool,
}
