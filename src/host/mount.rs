//! Bookkeeping for an animation mounted on a timeout-driven target.
//!
//! A [`Mount`] owns the animator and the one pending timeout handle. The
//! target only draws frames and arms or clears timeouts; the browser host
//! backs it with a DOM element and `window.setTimeout`.

use web_time::Duration;

use crate::animation::{Frame, TextAnimator};

/// Where a mounted animation draws and how it schedules its next tick.
pub(crate) trait MountTarget {
    /// Error reported when a timeout cannot be armed.
    type Error;

    /// Show a frame.
    fn render(&mut self, frame: &Frame);

    /// Arm a one-shot timeout; returns its handle.
    fn set_timeout(&mut self, delay: Duration) -> Result<i32, Self::Error>;

    /// Clear a timeout armed by [`set_timeout`](Self::set_timeout).
    fn clear_timeout(&mut self, handle: i32);
}

/// One animator bound to one target, with at most one pending timeout.
pub(crate) struct Mount<T> {
    animator: Box<dyn TextAnimator>,
    target: T,
    timeout: Option<i32>,
    mounted: bool,
}

impl<T: MountTarget> Mount<T> {
    pub(crate) fn new(animator: Box<dyn TextAnimator>, target: T) -> Self {
        Self {
            animator,
            target,
            timeout: None,
            mounted: false,
        }
    }

    /// Draw the first frame and arm the first timeout.
    pub(crate) fn start(&mut self) -> Result<(), T::Error> {
        self.mounted = true;
        self.render();
        self.schedule()
    }

    /// The pending timeout fired. Ignored once unmounted.
    pub(crate) fn on_timeout(&mut self) -> Result<(), T::Error> {
        self.timeout = None;
        if !self.mounted {
            return Ok(());
        }
        self.animator.tick();
        self.render();
        self.schedule()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) -> Result<(), T::Error> {
        if !self.mounted {
            return Ok(());
        }
        self.animator.set_visible(visible);
        self.render();
        if self.timeout.is_none() {
            self.schedule()?;
        }
        Ok(())
    }

    /// Clear the pending timeout and stop reacting to anything. Returns
    /// `true` only for the call that actually unmounted.
    pub(crate) fn unmount(&mut self) -> bool {
        if let Some(handle) = self.timeout.take() {
            self.target.clear_timeout(handle);
        }
        std::mem::replace(&mut self.mounted, false)
    }

    pub(crate) fn text(&self) -> &str {
        self.animator.text()
    }

    pub(crate) fn name(&self) -> &'static str {
        self.animator.name()
    }

    pub(crate) fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    fn render(&mut self) {
        let frame = Frame::capture(&self.animator);
        self.target.render(&frame);
    }

    fn schedule(&mut self) -> Result<(), T::Error> {
        if let Some(handle) = self.timeout.take() {
            self.target.clear_timeout(handle);
        }
        if let Some(delay) = self.animator.next_delay() {
            self.timeout = Some(self.target.set_timeout(delay)?);
        }
        Ok(())
    }
}
