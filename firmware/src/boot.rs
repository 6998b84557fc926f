//! Boot-time bootloader entry and startup blink

use embassy_rp::gpio::Input;
use embassy_time::Timer;
use mute_core::{Color, IndicatorLed};

use crate::config::*;

/// Reset into the USB mass-storage bootloader if the mute button or the
/// encoder switch is held at power-up; otherwise blink once and return.
pub async fn enter_bootloader_if_held<L: IndicatorLed>(
    mute: &Input<'static>,
    encoder_switch: &Input<'static>,
    led: &mut L,
) {
    Timer::after(BOOT_SAMPLE_DELAY).await;

    if mute.is_low() || encoder_switch.is_low() {
        defmt::info!("Button held at boot, entering USB bootloader");
        for _ in 0..BOOT_BLINK_COUNT {
            led.set_color(Color::PURPLE).ok();
            Timer::after(BOOT_BLINK).await;
            led.off().ok();
            Timer::after(BOOT_BLINK).await;
        }
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    }

    led.set_color(Color::STARTUP).ok();
    Timer::after(STARTUP_BLINK).await;
    led.off().ok();
}
