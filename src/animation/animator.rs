//! Cooperative frame loop.
//!
//! The animator never sleeps and never owns a thread. While running, every
//! tick advances the animation once and asks the host, through a
//! [`FrameScheduler`], to draw again after [`FRAME_DELAY`]. The host's next
//! draw calls [`AnimatorController::tick`] again, and so on until the
//! callback stops the loop.

use std::time::Duration;

use crate::constants::FRAME_DELAY;
use crate::Result;

/// Deferred redraw requests, backed by whatever timer the host owns.
pub trait FrameScheduler {
    /// Ask for the surface to be drawn again after `delay`.
    ///
    /// A new request replaces one that has not fired yet. An error means the
    /// surface is gone and no redraw will ever happen.
    fn request_redraw(&mut self, delay: Duration) -> Result<()>;

    /// Drop the outstanding redraw request, if any.
    fn cancel(&mut self);
}

/// Running flag for one view, with explicit start/stop/tick.
#[derive(Debug, Default)]
pub struct AnimatorController {
    running: bool,
}

impl AnimatorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start the loop and request an immediate redraw. No-op when running.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.running {
            return;
        }
        self.running = true;
        self.schedule(scheduler, Duration::ZERO);
    }

    /// Let the current tick be the last one.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
        }
    }

    /// Stop and drop any pending redraw right away.
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.stop();
        scheduler.cancel();
        log::debug!("Animation loop cancelled");
    }

    /// Run one frame of the loop.
    ///
    /// When running, calls `advance` and then schedules the next frame, even
    /// if `advance` stopped the loop, so the final state gets painted.
    /// Returns whether a tick happened.
    pub fn tick<S, F>(&mut self, scheduler: &mut S, advance: F) -> bool
    where
        S: FrameScheduler + ?Sized,
        F: FnOnce(&mut Self),
    {
        if !self.running {
            return false;
        }
        advance(self);
        self.schedule(scheduler, FRAME_DELAY);
        true
    }

    fn schedule<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, delay: Duration) {
        if let Err(e) = scheduler.request_redraw(delay) {
            // Surface went away mid-cycle: the loop just ends here
            log::debug!("Redraw not scheduled ({}), stopping animation loop", e);
            self.running = false;
        }
    }
}
