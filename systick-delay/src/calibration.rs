//! Conversion of the core clock into SysTick tick factors, and the timer
//! setup for the 1ms periodic interrupt.

use crate::syst::{SysTickRegisters, CTRL_CLKSOURCE, CTRL_ENABLE, CTRL_TICKINT};

/// Fixed prescaler between the core clock and the SysTick external clock
/// tap selected by [`init`].
pub const CLOCK_DIVIDER: u16 = 8;

/// Number of SysTick ticks per time unit at the configured clock.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Calibration {
    ticks_per_us: u32,
    ticks_per_ms: u32,
}

impl Calibration {
    /// Tick factors for a core clock of `clock_mhz`.
    ///
    /// The division truncates, so `clock_mhz` should be a multiple of
    /// [`CLOCK_DIVIDER`]. A clock of zero gives zero factors and every delay
    /// then returns at once.
    #[inline]
    pub const fn from_mhz(clock_mhz: u16) -> Self {
        let ticks_per_us = (clock_mhz / CLOCK_DIVIDER) as u32;
        Self {
            ticks_per_us,
            ticks_per_ms: ticks_per_us * 1000,
        }
    }

    #[inline]
    pub const fn ticks_per_us(&self) -> u32 {
        self.ticks_per_us
    }

    #[inline]
    pub const fn ticks_per_ms(&self) -> u32 {
        self.ticks_per_ms
    }

    /// Ticks for `us` microseconds, saturating at `u32::MAX`.
    #[inline]
    pub fn us_to_ticks(&self, us: u32) -> u32 {
        us.saturating_mul(self.ticks_per_us)
    }

    /// Ticks for `ms` milliseconds, saturating at `u32::MAX`.
    #[inline]
    pub fn ms_to_ticks(&self, ms: u16) -> u32 {
        u32::from(ms).saturating_mul(self.ticks_per_ms)
    }
}

/// Setup of the SysTick timer.
///
/// Stops the counter, selects the core clock / 8 source, and starts a 1ms
/// periodic interrupt. The interrupt fires from the moment this returns, so
/// the `SysTick` vector must already forward to
/// [`TickCounter::increment`][crate::TickCounter::increment].
pub fn init<R: SysTickRegisters>(syst: &mut R, clock_mhz: u16) -> Calibration {
    syst.write_ctrl(0);
    syst.modify_ctrl(|ctrl| ctrl & !CTRL_CLKSOURCE);

    let calibration = Calibration::from_mhz(clock_mhz);

    // Reload for one millisecond.
    syst.write_reload(calibration.ticks_per_ms.min(R::RELOAD_MAX));
    syst.clear_current();
    syst.modify_ctrl(|ctrl| ctrl | CTRL_TICKINT);
    syst.modify_ctrl(|ctrl| ctrl | CTRL_ENABLE);

    calibration
}
