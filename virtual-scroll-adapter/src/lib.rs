//! Host-driven viewport controller for the `virtual-scroll` crate.
//!
//! The `virtual-scroll` crate is UI-agnostic and focuses on the windowing math and recompute
//! state. This crate provides the workflow a UI component needs around it:
//!
//! - Owning the item collection and emitting the visible slice and range changes
//! - Coalescing scroll/resize/collection triggers into at most one pass per frame
//! - Attaching and detaching listeners when scrolling is delegated to a parent element or the
//!   window
//!
//! This crate is intentionally framework-agnostic: the UI is reached through [`ViewportHost`].
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod gate;
mod host;

#[cfg(test)]
mod tests;

pub use controller::{Controller, OnRangeCallback, OnUpdateCallback};
pub use gate::FrameGate;
pub use host::{ListenerKind, ScrollParent, ViewportHost};
