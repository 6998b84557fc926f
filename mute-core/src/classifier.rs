//! Input classifier: raw button edges and encoder deltas to semantic events

use crate::hal::{millis_between, Instant};
use crate::queue::EventQueue;
use crate::state::DeviceState;
use crate::types::{Button, ControlConfig, DeviceFlag, Event};

/// Turns debounced input notifications into queued [`Event`]s.
///
/// The mute button and the encoder push switch share one edge timestamp,
/// which drives two heuristics:
/// - a press within the long-press window of the previous edge also
///   sends `HookDown` (double press answers or hangs up);
/// - a long hold released while the host is not muted sends an extra
///   `MuteUp`/`MuteDown` pair so the host sees a toggle.
pub struct InputClassifier<'a> {
    queue: &'a EventQueue,
    state: &'a DeviceState,
    config: ControlConfig,
    encoder_position: i32,
    last_mute_edge: Instant,
}

impl<'a> InputClassifier<'a> {
    pub fn new(queue: &'a EventQueue, state: &'a DeviceState, config: ControlConfig) -> Self {
        Self {
            queue,
            state,
            config,
            encoder_position: 0,
            last_mute_edge: Instant::from_millis(0),
        }
    }

    /// Accumulated encoder detents since the last volume pulse
    pub fn encoder_position(&self) -> i32 {
        self.encoder_position
    }

    /// Time of the last mute/encoder switch edge
    pub fn last_mute_edge(&self) -> Instant {
        self.last_mute_edge
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Feed an encoder movement (positive is clockwise).
    ///
    /// Returns the number of events accepted by the queue.
    pub fn on_encoder(&mut self, delta: i32) -> usize {
        self.encoder_position = self.encoder_position.saturating_add(delta);
        let threshold = self.config.encoder_threshold;

        let pulse = if self.encoder_position > threshold {
            Event::VolUpDown
        } else if self.encoder_position < -threshold {
            Event::VolDownDown
        } else {
            return 0;
        };

        self.encoder_position = 0;
        self.emit(&[pulse, Event::VolRelease])
    }

    /// Feed a debounced button edge observed at `now`.
    ///
    /// Returns the number of events accepted by the queue.
    pub fn on_button(&mut self, button: Button, pressed: bool, now: Instant) -> usize {
        match (button, pressed) {
            (Button::Mute | Button::EncoderSwitch, _) => self.on_mute_edge(pressed, now),
            (Button::Hook, true) => self.emit(&[Event::HookDown]),
            (Button::Hook, false) => self.emit(&[Event::HookUp]),
            (Button::VolumeUp, true) => self.emit(&[Event::VolUpDown]),
            (Button::VolumeDown, true) => self.emit(&[Event::VolDownDown]),
            (Button::VolumeUp | Button::VolumeDown, false) => self.emit(&[Event::VolRelease]),
        }
    }

    fn on_mute_edge(&mut self, pressed: bool, now: Instant) -> usize {
        let since_last = millis_between(self.last_mute_edge, now);
        let window = self.config.long_press.as_millis() as u64;
        self.last_mute_edge = now;

        if pressed {
            if since_last < window {
                self.emit(&[Event::HookDown, Event::MuteDown])
            } else {
                self.emit(&[Event::MuteDown])
            }
        } else if !self.state.is_set(DeviceFlag::MuteActive) && since_last > window {
            self.emit(&[Event::MuteUp, Event::MuteDown, Event::MuteUp])
        } else {
            self.emit(&[Event::MuteUp])
        }
    }

    fn emit(&self, events: &[Event]) -> usize {
        events.iter().filter(|&&e| self.queue.push(e)).count()
    }
}
