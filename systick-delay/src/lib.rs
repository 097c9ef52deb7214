//! Timing service built on the Cortex-M SysTick timer.
//!
//! One hardware countdown timer is time-shared between two roles:
//!
//! - a free-running 1ms periodic interrupt feeding a millisecond
//!   [`TickCounter`], and
//! - a one-shot countdown used by the blocking [`Delay::delay_us`] and
//!   [`Delay::delay_ms`].
//!
//! A non-blocking millisecond delay ([`Delay::start_nonblocking`] /
//! [`Delay::check_nonblocking`]) reads the raw countdown value and can be
//! polled from a main loop.
//!
//! Example usage:
//!
//! ```ignore
//! static TICKS: TickCounter = TickCounter::new();
//!
//! let cp = cortex_m::Peripherals::take().unwrap();
//! let mut delay = delay::Config { clock_mhz: 72 }.make(cp.SYST, &TICKS);
//! delay.delay_ms(10);
//! let uptime = delay.now();
//!
//! #[exception]
//! fn SysTick() {
//!     TICKS.increment();
//! }
//! ```
//!
//! The library doesn't allocate, doesn't panic and reports no errors.
//! Out-of-range inputs give silently shorter or longer delays; see the
//! individual operations for the constraints placed on callers.

#![cfg_attr(not(test), no_std)]

pub mod calibration;
pub mod delay;
pub mod syst;

mod tick;

pub use calibration::Calibration;
pub use delay::Delay;
pub use syst::SysTickRegisters;
pub use tick::TickCounter;
