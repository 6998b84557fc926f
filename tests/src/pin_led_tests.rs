//! Discrete RGB LED driver against embedded-hal-mock pins

use embedded_hal_mock::eh1::MockError;
use std::io::ErrorKind;
use embedded_hal_mock::eh1::pin::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use mute_core::*;

fn expect(states: &[PinState]) -> PinMock {
    let transactions: Vec<PinTransaction> =
        states.iter().map(|s| PinTransaction::set(*s)).collect();
    PinMock::new(&transactions)
}

fn finish(led: RgbPinLed<PinMock, PinMock, PinMock>) {
    let (mut r, mut g, mut b) = led.release();
    r.done();
    g.done();
    b.done();
}

#[test]
fn test_solid_call_colours_active_high() {
    use PinState::{High, Low};

    let red = expect(&[Low, High]);
    let green = expect(&[High, Low]);
    let blue = expect(&[Low, Low]);
    let mut led = RgbPinLed::new(red, green, blue, false);

    led.set_color(Color::GREEN).unwrap();
    led.set_color(Color::RED).unwrap();
    finish(led);
}

#[test]
fn test_active_low_inverts_levels() {
    use PinState::{High, Low};

    let red = expect(&[Low, High]);
    let green = expect(&[Low, High]);
    let blue = expect(&[Low, High]);
    let mut led = RgbPinLed::new(red, green, blue, true);

    led.set_color(Color::STARTUP).unwrap();
    led.off().unwrap();
    finish(led);
}

#[test]
fn test_pin_error_maps_to_gpio_error() {
    let red = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let green =
        PinMock::new(&[PinTransaction::set(PinState::Low).with_error(MockError::Io(ErrorKind::Other))]);
    let blue = expect(&[]);
    let mut led = RgbPinLed::new(red, green, blue, false);

    assert_eq!(led.set_color(Color::PURPLE), Err(HalError::GpioError));
    finish(led);
}

#[test]
fn test_animator_breath_on_pin_led() {
    use PinState::High;

    // First breath step is dim white: every channel on
    let red = expect(&[High]);
    let green = expect(&[High]);
    let blue = expect(&[High]);
    let mut led = RgbPinLed::new(red, green, blue, false);

    let state = DeviceState::new();
    let mut animator = IndicatorAnimator::new(default_config());
    animator.service(&state, Instant::from_millis(100), &mut led);
    finish(led);
}
