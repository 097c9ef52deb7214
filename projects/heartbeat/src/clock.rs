//! System clock setup.

use stm32f1xx_hal::pac::Peripherals as DevicePeripherals;

/// Core clock (HCLK) in MHz after [init].
///
/// SysTick runs from HCLK / 8, giving 9 ticks per microsecond.
pub const HCLK_MHZ: u16 = 72;

/// Setup of the system clock.
///
/// Assumes a `8MHz` external crystal is used.
pub unsafe fn init() {
    let dp = DevicePeripherals::steal();

    dp.FLASH.acr.write(|w| {
        // Enable the prefetch buffer.
        w.prftbe().set_bit();
        // Flash half cycle access: disabled.
        w.hlfcya().clear_bit();
        // Latency: two wait states if 48MHz < SYSCLK <= 72MHz.
        w.latency().ws2()
    });

    while !dp.FLASH.acr.read().latency().is_ws2() {}

    dp.RCC.cfgr.write(|w| {
        // HSE oscillator clock selected as PLL input clock.
        w.pllsrc().hse_div_prediv();
        // PLL multiplication factor: 8MHz * 9 = 72MHz.
        w.pllmul().mul9();
        // AHB prescaler: HCLK = SYSCLK.
        w.hpre().div1();
        // APB low-speed prescaler: 36MHz max.
        w.ppre1().div2()
    });

    dp.RCC.cr.write(|w| {
        w.hseon().set_bit();
        w.pllon().set_bit()
    });

    // Wait for PLL to become ready.
    while !dp.RCC.cr.read().pllrdy().is_ready() {}

    // Switch to PLL as system clock.
    dp.RCC.cfgr.modify(|_, w| w.sw().pll());

    // Wait for switch to complete.
    while !dp.RCC.cfgr.read().sws().is_pll() {}
}
