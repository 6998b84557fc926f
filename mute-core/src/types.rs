//! Core data types for the mute button

use crate::hal::Duration;

/// Semantic input events consumed by the report arbiter
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Nothing queued
    None,
    /// Mute request asserted
    MuteDown,
    /// Mute request released
    MuteUp,
    /// Hook switch asserted (answer/reject)
    HookDown,
    /// Hook switch released
    HookUp,
    /// Volume increment pulse started
    VolUpDown,
    /// Volume decrement pulse started
    VolDownDown,
    /// Volume pulse ended
    VolRelease,
}

impl Event {
    /// Returns true if this event touches the telephony report
    pub const fn is_telephony(&self) -> bool {
        matches!(
            self,
            Event::MuteDown | Event::MuteUp | Event::HookDown | Event::HookUp
        )
    }

    /// Returns true if this event touches the consumer-control report
    pub const fn is_consumer(&self) -> bool {
        matches!(self, Event::VolUpDown | Event::VolDownDown | Event::VolRelease)
    }
}

/// Flags held in the device state register
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceFlag {
    /// USB bus is powered and enabled
    UsbOn = 1 << 0,
    /// Host has configured the device
    UsbMounted = 1 << 1,
    /// Bus is suspended
    UsbSuspended = 1 << 2,
    /// Transport accepts reports
    UsbReady = 1 << 3,
    /// Host reports the microphone muted
    MuteActive = 1 << 4,
    /// Host reports an active call
    OnCall = 1 << 5,
}

impl DeviceFlag {
    /// Every flag, in bit order
    pub const ALL: [DeviceFlag; 6] = [
        DeviceFlag::UsbOn,
        DeviceFlag::UsbMounted,
        DeviceFlag::UsbSuspended,
        DeviceFlag::UsbReady,
        DeviceFlag::MuteActive,
        DeviceFlag::OnCall,
    ];

    /// Bit mask of this flag
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Physical controls wired to the classifier
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Dedicated mute button
    Mute,
    /// Push switch on the rotary encoder, behaves like `Mute`
    EncoderSwitch,
    /// Hook (answer/hang up) button
    Hook,
    /// Volume up button
    VolumeUp,
    /// Volume down button
    VolumeDown,
}

/// Indicator animation states
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationState {
    /// Idle white pulse, pace reflects the USB connection tier
    Breathing,
    /// On call, microphone live
    SolidGreen,
    /// On call, microphone muted
    SolidRed,
}

/// Breathing direction
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BreathDirection {
    Up,
    Down,
}

/// Indicator colour, one byte per channel
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const OFF: Color = Color::new(0x00, 0x00, 0x00);
    pub const RED: Color = Color::new(0x0f, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0x0f, 0x00);
    /// Bootloader entry blink
    pub const PURPLE: Color = Color::new(0x0f, 0x00, 0x0f);
    /// Startup blink
    pub const STARTUP: Color = Color::new(0x0f, 0x0f, 0x0f);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same intensity on all three channels
    pub const fn white(intensity: u8) -> Self {
        Self::new(intensity, intensity, intensity)
    }

    pub const fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Timing and threshold policy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlConfig {
    /// Encoder detents that must accumulate before a volume pulse fires
    pub encoder_threshold: i32,
    /// Window separating a double actuation from a long press
    pub long_press: Duration,
    /// Breathing step while ascending, and solid colour poll rate
    pub breath_step: Duration,
    /// Pause at the bottom of a breath when not mounted
    pub idle_not_mounted: Duration,
    /// Pause at the bottom of a breath when mounted
    pub idle_mounted: Duration,
    /// Pause at the bottom of a breath when suspended
    pub idle_suspended: Duration,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            encoder_threshold: 3,
            long_press: Duration::from_millis(500),
            breath_step: Duration::from_millis(60),
            idle_not_mounted: Duration::from_millis(100),
            idle_mounted: Duration::from_millis(5000),
            idle_suspended: Duration::from_millis(20000),
        }
    }
}

impl ControlConfig {
    /// Create a new configuration with validation
    pub fn new(
        encoder_threshold: i32,
        long_press_ms: u64,
        breath_step_ms: u64,
        idle_not_mounted_ms: u64,
        idle_mounted_ms: u64,
        idle_suspended_ms: u64,
    ) -> Result<Self, &'static str> {
        if encoder_threshold < 1 || encoder_threshold > 64 {
            return Err("Encoder threshold must be between 1 and 64");
        }
        if long_press_ms == 0 || long_press_ms > 5000 {
            return Err("Long press window must be between 1 and 5000ms");
        }
        if breath_step_ms == 0 {
            return Err("Breath step must be non-zero");
        }
        if idle_not_mounted_ms == 0 || idle_mounted_ms == 0 || idle_suspended_ms == 0 {
            return Err("Idle intervals must be non-zero");
        }

        Ok(Self {
            encoder_threshold,
            long_press: Duration::from_millis(long_press_ms),
            breath_step: Duration::from_millis(breath_step_ms),
            idle_not_mounted: Duration::from_millis(idle_not_mounted_ms),
            idle_mounted: Duration::from_millis(idle_mounted_ms),
            idle_suspended: Duration::from_millis(idle_suspended_ms),
        })
    }
}
