//! Simulated SysTick shared by the integration tests.

#![allow(dead_code)]

use systick_delay::syst::{
    SysTickRegisters, CTRL_COUNTFLAG, CTRL_ENABLE, CTRL_TICKINT,
};
use systick_delay::TickCounter;

/// Cycle-stepped model of the SysTick timer.
///
/// Time only moves when the control register is read, one timer clock per
/// read, which is how a busy-wait loop observes the hardware. `advance`
/// moves time explicitly.
///
/// Besides the registers it keeps an independent reference clock: the number
/// of timer clocks counted since the last `clear_current`, logged each time
/// the counter is stopped.
#[derive(Debug)]
pub struct SimSysTick<'a> {
    ctrl: u32,
    reload: u32,
    current: u32,
    count_flag: bool,
    isr: Option<&'a TickCounter>,
    interrupts: u32,
    window: u64,
    runs: Vec<u64>,
    reloads: Vec<u32>,
}

impl<'a> SimSysTick<'a> {
    pub fn new() -> Self {
        Self {
            ctrl: 0,
            reload: 0,
            current: 0,
            count_flag: false,
            isr: None,
            interrupts: 0,
            window: 0,
            runs: Vec::new(),
            reloads: Vec::new(),
        }
    }

    /// Simulated timer whose interrupt vector advances `ticks`.
    pub fn with_isr(ticks: &'a TickCounter) -> Self {
        Self {
            isr: Some(ticks),
            ..Self::new()
        }
    }

    /// One timer clock.
    fn clock(&mut self) {
        if self.ctrl & CTRL_ENABLE == 0 {
            return;
        }
        self.window += 1;

        if self.current == 0 {
            self.current = self.reload;
            return;
        }

        self.current -= 1;
        if self.current == 0 {
            self.count_flag = true;
            if self.ctrl & CTRL_TICKINT != 0 {
                self.interrupts += 1;
                if let Some(ticks) = self.isr {
                    ticks.increment();
                }
            }
        }
    }

    pub fn advance(&mut self, clocks: u64) {
        for _ in 0..clocks {
            self.clock();
        }
    }

    /// Control register without side effects.
    pub fn ctrl(&self) -> u32 {
        self.ctrl
    }

    pub fn set_ctrl(&mut self, ctrl: u32) {
        self.ctrl = ctrl & !CTRL_COUNTFLAG;
    }

    pub fn reload(&self) -> u32 {
        self.reload
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn set_current(&mut self, current: u32) {
        self.current = current;
    }

    /// Periodic interrupts taken so far.
    pub fn interrupts(&self) -> u32 {
        self.interrupts
    }

    /// Reference-clock length of each counting run, oldest first.
    pub fn runs(&self) -> &[u64] {
        &self.runs
    }

    /// Every value written to the reload register, oldest first.
    pub fn reloads(&self) -> &[u32] {
        &self.reloads
    }

    pub fn clear_log(&mut self) {
        self.runs.clear();
        self.reloads.clear();
    }
}

impl SysTickRegisters for SimSysTick<'_> {
    fn read_ctrl(&mut self) -> u32 {
        self.clock();
        let flag = if self.count_flag { CTRL_COUNTFLAG } else { 0 };
        self.count_flag = false;
        self.ctrl | flag
    }

    fn write_ctrl(&mut self, ctrl: u32) {
        let stopping = self.ctrl & CTRL_ENABLE != 0 && ctrl & CTRL_ENABLE == 0;
        if stopping {
            self.runs.push(self.window);
        }
        self.ctrl = ctrl & !CTRL_COUNTFLAG;
    }

    fn read_reload(&mut self) -> u32 {
        self.reload
    }

    fn write_reload(&mut self, reload: u32) {
        let reload = reload & Self::RELOAD_MAX;
        self.reloads.push(reload);
        self.reload = reload;
    }

    fn read_current(&mut self) -> u32 {
        self.current
    }

    fn clear_current(&mut self) {
        self.current = 0;
        self.count_flag = false;
        self.window = 0;
    }
}
