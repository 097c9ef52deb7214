/// Start/poll bookkeeping for the non-blocking delay.
///
/// Works on raw countdown values: `start` is the current value when the delay
/// began and `target` the number of ticks to wait. Elapsed time is
/// `start - current` in wrapping arithmetic, which only holds while the
/// counter has not been reloaded between start and check.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DelayTracker {
    start: u32,
    target: u32,
    in_progress: bool,
}

impl DelayTracker {
    #[inline]
    pub const fn new() -> Self {
        Self {
            start: 0,
            target: 0,
            in_progress: false,
        }
    }

    /// Begin a delay of `target` ticks from countdown value `snapshot`,
    /// replacing any delay in progress.
    #[inline]
    pub fn start(&mut self, snapshot: u32, target: u32) {
        self.start = snapshot;
        self.target = target;
        self.in_progress = true;
    }

    /// Returns `true` once the delay has elapsed, and whenever no delay is in
    /// progress.
    #[inline]
    pub fn check(&mut self, current: u32) -> bool {
        if !self.in_progress {
            return true;
        }

        let elapsed = self.start.wrapping_sub(current);
        if elapsed >= self.target {
            self.in_progress = false;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.in_progress
    }
}
