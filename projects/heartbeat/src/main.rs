#![no_main]
#![no_std]

mod clock;

extern crate panic_halt;

use cortex_m_rt::{entry, exception};
use cortex_m_semihosting::hprintln;
use systick_delay::{delay, TickCounter};

/// Milliseconds since boot, advanced by the SysTick exception.
static TICKS: TickCounter = TickCounter::new();

/// Heartbeat period in milliseconds.
const HEARTBEAT_MS: u32 = 500;

/// Busy-wait between main loop passes.
const LOOP_PACING_US: u32 = 200;

/// Settling time after startup, long enough to exercise the second split.
const SETTLE_MS: u16 = 1_250;

/// Short non-blocking wait inside each pass.
const POLL_MS: u16 = 1;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the heartbeat example.").unwrap();
    }

    // System setup.
    unsafe {
        clock::init();
    }

    let cp = cortex_m::Peripherals::take().unwrap();
    let mut delay = delay::Config {
        clock_mhz: clock::HCLK_MHZ,
    }
    .make(cp.SYST, &TICKS);

    delay.delay_ms(SETTLE_MS);

    let mut last_beat = delay.now();
    let mut beats: u32 = 0;

    // Entering main loop.
    loop {
        delay.start_nonblocking(POLL_MS);
        while !delay.check_nonblocking() {}

        if TICKS.elapsed_since(last_beat) >= HEARTBEAT_MS {
            last_beat = last_beat.wrapping_add(HEARTBEAT_MS);
            beats = beats.wrapping_add(1);
            if cfg!(debug_assertions) {
                hprintln!("beat {} at {} ms", beats, delay.now()).unwrap();
            }
        }

        delay.delay_us(LOOP_PACING_US);
    }
}

/// System tick ISR. Advances the tick counter.
#[exception]
fn SysTick() {
    TICKS.increment();
}
