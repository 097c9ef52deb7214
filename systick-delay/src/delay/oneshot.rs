use crate::syst::{SysTickRegisters, CTRL_COUNTFLAG, CTRL_ENABLE, CTRL_TICKINT};

/// Progress of a one-shot countdown.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OneShotState {
    /// Reload loaded, counter not yet started.
    Armed,
    /// Counter running, waiting for it to reach zero.
    Counting,
    /// Counter reached zero, or was stopped from elsewhere.
    Expired,
}

impl OneShotState {
    /// State after observing `ctrl` in this state.
    #[inline]
    pub fn next(self, ctrl: u32) -> Self {
        match self {
            OneShotState::Counting
                if ctrl & CTRL_ENABLE == 0 || ctrl & CTRL_COUNTFLAG != 0 =>
            {
                OneShotState::Expired
            }
            state => state,
        }
    }
}

/// The SysTick timer borrowed as a one-shot countdown.
///
/// Arming saves the control and reload registers and masks the periodic
/// interrupt. Dropping stops the counter and writes both saved registers back
/// unchanged, whatever state the countdown reached, so the periodic interrupt
/// resumes at its old rate.
#[derive(Debug)]
pub struct OneShot<'a, R: SysTickRegisters> {
    syst: &'a mut R,
    saved_ctrl: u32,
    saved_reload: u32,
    ctrl: u32,
    state: OneShotState,
}

impl<'a, R: SysTickRegisters> OneShot<'a, R> {
    /// Take over `syst` and load a countdown of `ticks`.
    ///
    /// `ticks` must be non-zero: a zero reload never sets the count flag.
    #[inline]
    pub fn arm(syst: &'a mut R, ticks: u32) -> Self {
        let saved_ctrl = syst.read_ctrl() & !CTRL_COUNTFLAG;
        let saved_reload = syst.read_reload();

        // Keep the tick handler off the reload and current registers.
        let ctrl = saved_ctrl & !CTRL_TICKINT;
        syst.write_ctrl(ctrl);

        syst.write_reload(ticks);
        syst.clear_current();

        Self {
            syst,
            saved_ctrl,
            saved_reload,
            ctrl,
            state: OneShotState::Armed,
        }
    }

    #[inline]
    pub fn state(&self) -> OneShotState {
        self.state
    }

    /// Control register value that will be restored on drop.
    #[inline]
    pub fn saved_ctrl(&self) -> u32 {
        self.saved_ctrl
    }

    /// Start counting. Does nothing unless armed.
    #[inline]
    pub fn start(&mut self) {
        if self.state == OneShotState::Armed {
            self.ctrl |= CTRL_ENABLE;
            self.syst.write_ctrl(self.ctrl);
            self.state = OneShotState::Counting;
        }
    }

    /// Sample the control register once and advance the state.
    #[inline]
    pub fn poll(&mut self) -> OneShotState {
        if self.state == OneShotState::Counting {
            let ctrl = self.syst.read_ctrl();
            self.state = self.state.next(ctrl);
        }
        self.state
    }

    /// Start and busy-wait for expiry, then restore the timer.
    ///
    /// There is no timeout: a counter that never reaches zero spins forever.
    #[inline]
    pub fn wait(mut self) {
        self.start();
        while self.poll() != OneShotState::Expired {}
    }
}

impl<R: SysTickRegisters> Drop for OneShot<'_, R> {
    fn drop(&mut self) {
        self.syst.write_ctrl(self.ctrl & !CTRL_ENABLE);
        self.syst.write_reload(self.saved_reload);
        self.syst.clear_current();
        self.syst.write_ctrl(self.saved_ctrl);
    }
}
