//! SysTick register access.
//!
//! Everything the timing service needs from the hardware goes through the
//! [`SysTickRegisters`] trait, so the arbitration logic can run against the
//! real `SYST` peripheral or against a simulated timer.

use cortex_m::peripheral::SYST;

/// Counter enable.
pub const CTRL_ENABLE: u32 = 1 << 0;
/// Exception request on count to zero.
pub const CTRL_TICKINT: u32 = 1 << 1;
/// Clock source: set = core clock, clear = core clock / 8.
pub const CTRL_CLKSOURCE: u32 = 1 << 2;
/// Set when the counter reached zero since the last read. Read-only.
pub const CTRL_COUNTFLAG: u32 = 1 << 16;

/// Control/status, reload and current-value registers of a countdown timer.
pub trait SysTickRegisters {
    /// Largest value the reload register holds.
    const RELOAD_MAX: u32 = 0x00FF_FFFF;

    /// Read the control/status register.
    ///
    /// On hardware this clears [`CTRL_COUNTFLAG`].
    fn read_ctrl(&mut self) -> u32;

    /// Write the control/status register. [`CTRL_COUNTFLAG`] is ignored.
    fn write_ctrl(&mut self, ctrl: u32);

    /// Read the reload register.
    fn read_reload(&mut self) -> u32;

    /// Write the reload register.
    fn write_reload(&mut self, reload: u32);

    /// Read the current countdown value.
    fn read_current(&mut self) -> u32;

    /// Reset the current value to zero, also clearing [`CTRL_COUNTFLAG`].
    fn clear_current(&mut self);

    /// Read-modify-write of the control/status register.
    #[inline]
    fn modify_ctrl<F>(&mut self, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let ctrl = self.read_ctrl();
        self.write_ctrl(f(ctrl));
    }
}

impl SysTickRegisters for SYST {
    #[inline]
    fn read_ctrl(&mut self) -> u32 {
        self.csr.read()
    }

    #[inline]
    fn write_ctrl(&mut self, ctrl: u32) {
        unsafe { self.csr.write(ctrl & !CTRL_COUNTFLAG) }
    }

    #[inline]
    fn read_reload(&mut self) -> u32 {
        self.rvr.read()
    }

    #[inline]
    fn write_reload(&mut self, reload: u32) {
        unsafe { self.rvr.write(reload & Self::RELOAD_MAX) }
    }

    #[inline]
    fn read_current(&mut self) -> u32 {
        self.cvr.read()
    }

    #[inline]
    fn clear_current(&mut self) {
        unsafe { self.cvr.write(0) }
    }
}

impl<R: SysTickRegisters> SysTickRegisters for &mut R {
    const RELOAD_MAX: u32 = R::RELOAD_MAX;

    #[inline]
    fn read_ctrl(&mut self) -> u32 {
        (**self).read_ctrl()
    }

    #[inline]
    fn write_ctrl(&mut self, ctrl: u32) {
        (**self).write_ctrl(ctrl)
    }

    #[inline]
    fn read_reload(&mut self) -> u32 {
        (**self).read_reload()
    }

    #[inline]
    fn write_reload(&mut self, reload: u32) {
        (**self).write_reload(reload)
    }

    #[inline]
    fn read_current(&mut self) -> u32 {
        (**self).read_current()
    }

    #[inline]
    fn clear_current(&mut self) {
        (**self).clear_current()
    }
}
