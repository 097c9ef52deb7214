//! Non-blocking delay tests against the simulated SysTick.
//!
//! The simulated countdown is driven by hand with `set_current`, standing in
//! for a free-running counter between start and check.

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use helpers::SimSysTick;
use systick_delay::delay;
use systick_delay::TickCounter;

#[test]
fn test_check_without_start_is_complete() {
    let ticks = TickCounter::new();
    let mut delay = delay::Config { clock_mhz: 72 }.make(SimSysTick::new(), &ticks);

    assert!(!delay.is_pending());
    assert!(delay.check_nonblocking());
    assert!(delay.check_nonblocking());
}

#[test]
fn test_zero_delay_completes_on_first_check() {
    let ticks = TickCounter::new();
    let mut delay = delay::Config { clock_mhz: 72 }.make(SimSysTick::new(), &ticks);
    delay.syst_mut().set_current(4_000);

    delay.start_nonblocking(0);
    assert!(delay.is_pending());
    assert!(delay.check_nonblocking());
    assert!(!delay.is_pending());
}

#[test]
fn test_completes_at_threshold_exactly_once() {
    const START: u32 = 100_000;

    let ticks = TickCounter::new();
    let mut delay = delay::Config { clock_mhz: 8 }.make(SimSysTick::new(), &ticks);
    let threshold = 50 * delay.calibration().ticks_per_ms();
    assert_eq!(threshold, 50_000);

    delay.syst_mut().set_current(START);
    delay.start_nonblocking(50);

    for elapsed in (0..threshold).step_by(997).chain(threshold - 3..threshold) {
        delay.syst_mut().set_current(START - elapsed);
        assert!(!delay.check_nonblocking(), "elapsed = {}", elapsed);
        assert!(delay.is_pending());
    }

    delay.syst_mut().set_current(START - threshold);
    assert!(delay.check_nonblocking());
    assert!(!delay.is_pending());

    // Later checks are trivially complete, even with no time elapsed.
    delay.syst_mut().set_current(START);
    assert!(delay.check_nonblocking());
    assert!(!delay.is_pending());
}

#[test]
fn test_complete_beyond_threshold() {
    let ticks = TickCounter::new();
    let mut delay = delay::Config { clock_mhz: 8 }.make(SimSysTick::new(), &ticks);

    delay.syst_mut().set_current(80_000);
    delay.start_nonblocking(50);
    delay.syst_mut().set_current(10_000);

    assert!(delay.check_nonblocking());
}

#[test]
fn test_restart_replaces_outstanding_delay() {
    let ticks = TickCounter::new();
    let mut delay = delay::Config { clock_mhz: 8 }.make(SimSysTick::new(), &ticks);

    delay.syst_mut().set_current(60_000);
    delay.start_nonblocking(50);
    delay.syst_mut().set_current(40_000);
    delay.start_nonblocking(10);

    // 10ms from the second start, not 50ms from the first.
    delay.syst_mut().set_current(35_000);
    assert!(!delay.check_nonblocking());
    delay.syst_mut().set_current(30_000);
    assert!(delay.check_nonblocking());
}

#[test]
fn test_does_not_touch_timer_configuration() {
    let ticks = TickCounter::new();
    let mut delay = delay::Config { clock_mhz: 72 }.make(SimSysTick::new(), &ticks);
    let ctrl = delay.syst().ctrl();
    let reload = delay.syst().reload();
    delay.syst_mut().clear_log();

    delay.start_nonblocking(20);
    delay.check_nonblocking();

    assert_eq!(delay.syst().ctrl(), ctrl);
    assert_eq!(delay.syst().reload(), reload);
    assert!(delay.syst().reloads().is_empty());
}
