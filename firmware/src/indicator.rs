//! WS2812 status LED
//!
//! The core writes colours synchronously; the PIO driver is async. A signal
//! carries the latest colour to the LED task, so only the newest colour is
//! ever shown.

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use mute_core::{Color, HalError, IndicatorLed};
use smart_leds::RGB8;

pub type LedSignal = Signal<CriticalSectionRawMutex, Color>;

/// Latest colour requested for the status LED
pub static LED_COLOR: LedSignal = Signal::new();

/// [`IndicatorLed`] that hands colours to [`led_task`]
pub struct SignalLed {
    signal: &'static LedSignal,
}

impl SignalLed {
    pub const fn new(signal: &'static LedSignal) -> Self {
        Self { signal }
    }
}

impl IndicatorLed for SignalLed {
    type Error = HalError;

    fn set_color(&mut self, color: Color) -> Result<(), Self::Error> {
        self.signal.signal(color);
        Ok(())
    }
}

fn to_rgb8(color: Color) -> RGB8 {
    RGB8::new(color.r, color.g, color.b)
}

#[embassy_executor::task]
pub async fn led_task(mut ws2812: PioWs2812<'static, PIO0, 0, 1>, signal: &'static LedSignal) -> ! {
    defmt::info!("LED task started");
    ws2812.write(&[to_rgb8(Color::OFF)]).await;

    loop {
        let color = signal.wait().await;
        defmt::trace!("LED {} {} {}", color.r, color.g, color.b);
        ws2812.write(&[to_rgb8(color)]).await;
    }
}
