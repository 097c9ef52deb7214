//! Blocking and non-blocking delays on the SysTick timer.
//!
//! Example usage:
//!
//! ```ignore
//! static TICKS: TickCounter = TickCounter::new();
//!
//! let mut delay = delay::Config { clock_mhz: 72 }.make(syst, &TICKS);
//!
//! // Blocking.
//! delay.delay_us(20);
//! delay.delay_ms(1500);
//!
//! // Non-blocking.
//! delay.start_nonblocking(5);
//! while !delay.check_nonblocking() {
//!     // Do other work.
//! }
//! ```
//!
//! A blocking delay masks the periodic interrupt for its whole length, so the
//! tick counter does not advance meanwhile. It also reprograms the reload and
//! current-value registers that the non-blocking delay measures against: do
//! not start a blocking delay, or re-run [`Delay::init`], while
//! [`Delay::is_pending`] is `true`.

mod oneshot;
mod tracker;

pub use oneshot::{OneShot, OneShotState};
pub use tracker::DelayTracker;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::calibration::{self, Calibration};
use crate::syst::SysTickRegisters;
use crate::tick::TickCounter;

/// Delay configuration.
///
/// Use [make][Config::make()] to create a new [Delay].
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Core clock in MHz. Should be a multiple of 8.
    pub clock_mhz: u16,
}

impl Config {
    #[inline]
    pub fn make<R: SysTickRegisters>(self, syst: R, ticks: &TickCounter) -> Delay<'_, R> {
        Delay::new(syst, ticks, self)
    }
}

/// SysTick timing context.
///
/// Owns the timer and borrows the [`TickCounter`] that its exception handler
/// advances.
#[derive(Debug)]
pub struct Delay<'t, R: SysTickRegisters> {
    syst: R,
    ticks: &'t TickCounter,
    calibration: Calibration,
    tracker: DelayTracker,
}

impl<'t, R: SysTickRegisters> Delay<'t, R> {
    /// Calibrate `syst` and start the 1ms periodic interrupt.
    #[inline]
    pub fn new(mut syst: R, ticks: &'t TickCounter, config: Config) -> Self {
        let calibration = calibration::init(&mut syst, config.clock_mhz);
        Self {
            syst,
            ticks,
            calibration,
            tracker: DelayTracker::new(),
        }
    }

    /// Re-run the timer setup for a new core clock.
    #[inline]
    pub fn init(&mut self, clock_mhz: u16) {
        self.calibration = calibration::init(&mut self.syst, clock_mhz);
    }

    #[inline]
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Blocks program for `us` microseconds.
    ///
    /// Countdowns longer than the reload register run as several one-shots
    /// back to back. `us` times the tick factor must fit in a `u32`; larger
    /// products saturate.
    pub fn delay_us(&mut self, us: u32) {
        let mut remaining = self.calibration.us_to_ticks(us);
        while remaining > R::RELOAD_MAX {
            OneShot::arm(&mut self.syst, R::RELOAD_MAX).wait();
            remaining -= R::RELOAD_MAX;
        }

        if remaining != 0 {
            OneShot::arm(&mut self.syst, remaining).wait();
        }
    }

    /// Blocks program for `ms` milliseconds, one second at a time.
    pub fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms / 1000 {
            self.delay_us(1_000_000);
        }

        let remain = u32::from(ms % 1000);
        if remain != 0 {
            self.delay_us(remain * 1000);
        }
    }

    /// Start a non-blocking delay of `ms` milliseconds.
    ///
    /// Replaces any delay already in progress. The timer configuration is
    /// left untouched.
    ///
    /// Elapsed time is measured on the raw countdown, which the periodic
    /// interrupt reloads every millisecond. A request of 2ms or more cannot
    /// be reached within one reload period, so on hardware it reports
    /// complete at the next reload instead. For longer waits compare
    /// [`TickCounter::elapsed_since`] against [`now`][Delay::now].
    #[inline]
    pub fn start_nonblocking(&mut self, ms: u16) {
        let snapshot = self.syst.read_current();
        self.tracker.start(snapshot, self.calibration.ms_to_ticks(ms));
    }

    /// Returns `true` if the non-blocking delay has elapsed, or none was
    /// started.
    #[inline]
    pub fn check_nonblocking(&mut self) -> bool {
        let current = self.syst.read_current();
        self.tracker.check(current)
    }

    /// Whether a non-blocking delay is outstanding.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.tracker.is_pending()
    }

    /// Milliseconds since the timer was started, wrapping.
    #[inline]
    pub fn now(&self) -> u32 {
        self.ticks.now()
    }

    #[inline]
    pub fn syst(&self) -> &R {
        &self.syst
    }

    #[inline]
    pub fn syst_mut(&mut self) -> &mut R {
        &mut self.syst
    }

    /// Release the timer. Its configuration is left as is.
    #[inline]
    pub fn free(self) -> R {
        self.syst
    }
}

impl<R: SysTickRegisters> DelayUs<u32> for Delay<'_, R> {
    #[inline]
    fn delay_us(&mut self, us: u32) {
        Delay::delay_us(self, us);
    }
}

impl<R: SysTickRegisters> DelayUs<u16> for Delay<'_, R> {
    #[inline]
    fn delay_us(&mut self, us: u16) {
        Delay::delay_us(self, u32::from(us));
    }
}

impl<R: SysTickRegisters> DelayMs<u16> for Delay<'_, R> {
    #[inline]
    fn delay_ms(&mut self, ms: u16) {
        Delay::delay_ms(self, ms);
    }
}

impl<R: SysTickRegisters> DelayMs<u8> for Delay<'_, R> {
    #[inline]
    fn delay_ms(&mut self, ms: u8) {
        Delay::delay_ms(self, u16::from(ms));
    }
}
