//! Cancellable frame scheduler.
//!
//! The host's display refresh drives `step` once per tick. Tests drive
//! `run_frames` instead, so a bounded number of frames can be simulated
//! without a live refresh source.

use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for a `FrameLoop`.
/// Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Counts executed frames and refuses to run once cancelled.
#[derive(Debug, Default)]
pub struct FrameLoop {
    frame: u64,
    cancel: CancelHandle,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that can stop this loop.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Number of frames executed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run a single frame unless cancelled. Returns whether it ran.
    pub fn step(&mut self, f: impl FnOnce(u64)) -> bool {
        if !self.is_running() {
            return false;
        }
        f(self.frame);
        self.frame += 1;
        true
    }

    /// Run up to `n` frames, stopping early if cancelled mid-run.
    /// Returns the number of frames executed.
    pub fn run_frames(&mut self, n: u32, mut f: impl FnMut(u64)) -> u32 {
        let mut ran = 0;
        while ran < n && self.step(&mut f) {
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_exactly_n_frames() {
        let mut frames = FrameLoop::new();
        let mut seen = Vec::new();
        assert_eq!(frames.run_frames(5, |f| seen.push(f)), 5);
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(frames.frame(), 5);
    }

    #[test]
    fn cancelled_loop_does_not_step() {
        let mut frames = FrameLoop::new();
        frames.cancel();
        let mut count = 0;
        assert!(!frames.step(|_| count += 1));
        assert_eq!(frames.run_frames(10, |_| count += 1), 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn cancel_mid_run_stops_after_current_frame() {
        let mut frames = FrameLoop::new();
        let handle = frames.cancel_handle();
        let ran = frames.run_frames(100, |f| {
            if f == 2 {
                handle.cancel();
            }
        });
        assert_eq!(ran, 3);
        assert!(!frames.is_running());
    }
}
