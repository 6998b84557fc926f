//! Debounced buttons and PIO rotary encoder feeding the core classifier

use embassy_futures::select::{select, select_array, Either};
use embassy_rp::gpio::Input;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::rotary_encoder::{Direction, PioEncoder};
use embassy_time::{Instant, Timer};
use mute_core::{Button, InputClassifier};

use crate::config::DEBOUNCE;

pub const BUTTON_COUNT: usize = 5;

/// Button inputs, active low with pull-ups
pub struct ButtonInputs {
    pub mute: Input<'static>,
    pub encoder_switch: Input<'static>,
    pub hook: Input<'static>,
    pub volume_up: Input<'static>,
    pub volume_down: Input<'static>,
}

impl ButtonInputs {
    const ORDER: [Button; BUTTON_COUNT] = [
        Button::Mute,
        Button::EncoderSwitch,
        Button::Hook,
        Button::VolumeUp,
        Button::VolumeDown,
    ];

    fn levels(&self) -> [bool; BUTTON_COUNT] {
        [
            self.mute.is_low(),
            self.encoder_switch.is_low(),
            self.hook.is_low(),
            self.volume_up.is_low(),
            self.volume_down.is_low(),
        ]
    }

    async fn wait_for_edge(&mut self) {
        select_array([
            self.mute.wait_for_any_edge(),
            self.encoder_switch.wait_for_any_edge(),
            self.hook.wait_for_any_edge(),
            self.volume_up.wait_for_any_edge(),
            self.volume_down.wait_for_any_edge(),
        ])
        .await;
    }
}

/// Single input future: owns the classifier, so classification never runs
/// concurrently with itself.
#[embassy_executor::task]
pub async fn input_task(
    mut buttons: ButtonInputs,
    mut encoder: PioEncoder<'static, PIO0, 1>,
    mut classifier: InputClassifier<'static>,
) -> ! {
    defmt::info!("Input task started");
    let mut stable = buttons.levels();

    loop {
        let input = select(buttons.wait_for_edge(), encoder.read()).await;
        match input {
            Either::First(()) => {
                Timer::after(DEBOUNCE).await;
                let now = Instant::now();
                let levels = buttons.levels();
                for (i, button) in ButtonInputs::ORDER.iter().enumerate() {
                    if levels[i] != stable[i] {
                        stable[i] = levels[i];
                        let queued = classifier.on_button(*button, levels[i], now);
                        defmt::debug!("{:?} pressed={} queued={}", button, levels[i], queued);
                    }
                }
            }
            Either::Second(direction) => {
                let delta = match direction {
                    Direction::Clockwise => 1,
                    Direction::CounterClockwise => -1,
                };
                classifier.on_encoder(delta);
            }
        }
    }
}
