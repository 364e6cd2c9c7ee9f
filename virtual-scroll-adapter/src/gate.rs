/// Coalesces recompute requests into at most one pending pass.
///
/// Scroll events can fire for every pixel scrolled. Each trigger calls [`FrameGate::request`];
/// only the first one before the next frame actually schedules work. The frame callback calls
/// [`FrameGate::take`] and runs the pass if it returns `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameGate {
    ticking: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a pass. Returns `true` if this call scheduled it, `false` if one was pending.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.ticking
    }

    /// Consumes the pending request. Returns `true` if a pass should run now.
    ///
    /// The gate is reopened before the pass runs, so a pass may request the next one.
    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.ticking, false)
    }
}
