use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

/// Millisecond tick counter, advanced by the SysTick exception.
///
/// Meant to live in a `static` shared between the exception handler, which
/// calls [`increment`][TickCounter::increment], and the rest of the program,
/// which reads it with [`now`][TickCounter::now]. Wraps to zero after
/// `u32::MAX`, roughly every 49.7 days.
pub struct TickCounter {
    count: Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Counter starting at zero.
    #[inline]
    pub const fn new() -> Self {
        Self::with_initial(0)
    }

    /// Counter starting at `ticks`.
    #[inline]
    pub const fn with_initial(ticks: u32) -> Self {
        Self {
            count: Mutex::new(Cell::new(ticks)),
        }
    }

    /// Advance by one tick. Call exactly once per periodic interrupt.
    #[inline]
    pub fn increment(&self) {
        critical_section::with(|cs| {
            let count = self.count.borrow(cs);
            count.set(count.get().wrapping_add(1));
        });
    }

    /// Milliseconds since the timer was started, wrapping.
    ///
    /// Safe to call from thread and interrupt context.
    #[inline]
    pub fn now(&self) -> u32 {
        critical_section::with(|cs| self.count.borrow(cs).get())
    }

    /// Milliseconds between `earlier` and now, correct across one wrap.
    #[inline]
    pub fn elapsed_since(&self, earlier: u32) -> u32 {
        self.now().wrapping_sub(earlier)
    }
}

impl Default for TickCounter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TickCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickCounter").field("now", &self.now()).finish()
    }
}
