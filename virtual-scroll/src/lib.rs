//! A headless virtual scroll engine for row/column item grids.
//!
//! For host-driven control (event emission, frame coalescing, scroll-owner listeners), see the
//! `virtual-scroll-adapter` crate.
//!
//! This crate computes which contiguous slice of a large collection is visible inside a
//! scrollable container, and the offsets needed to render only that slice: a leading padding
//! (translation) for the rendered items and the total scrollable extent.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - container size and scroll offset
//! - child size (configured, or measured from the first rendered child)
//! - how many rendered children share one row (for grids whose column count is not configured)
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod engine;
mod options;
mod state;
mod types;
mod viewport;


pub use engine::{Dimensions, Window};
pub use options::ViewportOptions;
pub use state::ViewportSnapshot;
pub use types::{
    ChangeEvent, ChildMetrics, ContainerMetrics, Measurements, Overflow, RangeChange,
    SurfaceStyle,
};
pub use viewport::{Pass, Viewport};
