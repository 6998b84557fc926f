//! Status indicator animation
//!
//! Idle: a slow white "breath" whose pause at the bottom tells the USB
//! state apart (mounted, suspended, not mounted). On a call: solid green,
//! or solid red while the host has the microphone muted.

use crate::hal::{millis_between, Duration, IndicatorLed, Instant};
use crate::state::DeviceState;
use crate::types::{AnimationState, BreathDirection, Color, ControlConfig, DeviceFlag};

/// Breath level at boot
pub const INITIAL_LEVEL: u8 = 5;
/// Top of the breath
pub const MAX_LEVEL: u8 = 10;
/// Bottom of the breath; dropping below it turns the breath around
pub const MIN_LEVEL: u8 = 6;

/// Polling state machine mapping the device state register to a colour
#[derive(Debug)]
pub struct IndicatorAnimator {
    config: ControlConfig,
    level: u8,
    direction: BreathDirection,
    interval: Duration,
    last_tick: Instant,
    rendered: Option<AnimationState>,
}

impl IndicatorAnimator {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            level: INITIAL_LEVEL,
            direction: BreathDirection::Up,
            interval: config.idle_not_mounted,
            last_tick: Instant::from_millis(0),
            rendered: None,
            config,
        }
    }

    /// Animation state implied by the register
    pub fn target(state: &DeviceState) -> AnimationState {
        if state.is_set(DeviceFlag::OnCall) {
            if state.is_set(DeviceFlag::MuteActive) {
                AnimationState::SolidRed
            } else {
                AnimationState::SolidGreen
            }
        } else {
            AnimationState::Breathing
        }
    }

    /// Advance the animation at `now`.
    ///
    /// Returns the colour to show, or `None` if the interval has not elapsed
    /// or a solid colour is already on display.
    pub fn poll(&mut self, state: &DeviceState, now: Instant) -> Option<Color> {
        if millis_between(self.last_tick, now) < self.interval.as_millis() as u64 {
            return None;
        }
        self.last_tick = now;

        let target = Self::target(state);
        if self.rendered == Some(target) && target != AnimationState::Breathing {
            return None;
        }

        #[cfg(feature = "defmt")]
        if self.rendered != Some(target) {
            defmt::debug!("Indicator: {:?} -> {:?}", self.rendered, target);
        }
        self.rendered = Some(target);

        match target {
            AnimationState::Breathing => Some(self.breathe(state)),
            AnimationState::SolidGreen => {
                self.interval = self.config.breath_step;
                Some(Color::GREEN)
            }
            AnimationState::SolidRed => {
                self.interval = self.config.breath_step;
                Some(Color::RED)
            }
        }
    }

    /// [`poll`](Self::poll) and write the result to `led`.
    /// A failed write is retried on the next accepted tick.
    pub fn service<L: IndicatorLed>(&mut self, state: &DeviceState, now: Instant, led: &mut L) {
        if let Some(color) = self.poll(state, now) {
            if led.set_color(color).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Indicator write failed");
                self.rendered = None;
            }
        }
    }

    fn breathe(&mut self, state: &DeviceState) -> Color {
        match self.direction {
            BreathDirection::Up => {
                self.level += 1;
                if self.level > MAX_LEVEL {
                    self.level = MAX_LEVEL;
                    self.direction = BreathDirection::Down;
                }
                self.interval = self.config.breath_step;
            }
            BreathDirection::Down => {
                self.level -= 1;
                if self.level < MIN_LEVEL + 1 {
                    self.level = MIN_LEVEL;
                    self.direction = BreathDirection::Up;
                    self.interval = self.idle_pause(state);
                }
            }
        }

        breath_color(self.level)
    }

    fn idle_pause(&self, state: &DeviceState) -> Duration {
        if state.is_set(DeviceFlag::UsbMounted) {
            self.config.idle_mounted
        } else if state.is_set(DeviceFlag::UsbSuspended) {
            self.config.idle_suspended
        } else {
            self.config.idle_not_mounted
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn direction(&self) -> BreathDirection {
        self.direction
    }

    /// Wait before the next accepted tick
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Last state rendered, `None` before the first tick
    pub fn rendered(&self) -> Option<AnimationState> {
        self.rendered
    }
}

/// White at `level³ / 216`
pub fn breath_color(level: u8) -> Color {
    let level = level as u32;
    Color::white((level * level * level / 216) as u8)
}
