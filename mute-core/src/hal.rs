//! Hardware Abstraction Layer for the mute button core

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock instant type for compilation without embassy-time.
    /// Time never advances on its own; callers construct instants explicitly.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Instant(u64);

    impl Instant {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub fn duration_since(&self, other: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(other.0))
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }

    impl core::ops::Add<Duration> for Instant {
        type Output = Instant;

        fn add(self, rhs: Duration) -> Instant {
            Instant(self.0 + rhs.as_millis())
        }
    }

    /// Mock duration type
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }
}

/// Milliseconds elapsed from `earlier` to `later`, zero if `later` is older
pub fn millis_between(earlier: Instant, later: Instant) -> u64 {
    later.as_millis().saturating_sub(earlier.as_millis())
}

use crate::types::Color;
use embedded_hal::digital::OutputPin;

/// Error types for collaborator operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Indicator driver rejected the write
    IndicatorError,
    /// USB transport rejected the report
    TransportError,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::IndicatorError => write!(f, "Indicator write failed"),
            HalError::TransportError => write!(f, "USB transport write failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Single colour status output (neopixel or discrete RGB LED)
pub trait IndicatorLed {
    type Error: From<HalError>;

    /// Show `color` until the next call
    fn set_color(&mut self, color: Color) -> Result<(), Self::Error>;

    /// Turn the indicator off
    fn off(&mut self) -> Result<(), Self::Error> {
        self.set_color(Color::OFF)
    }
}

/// Discrete RGB LED on three embedded-hal output pins.
/// A channel is lit when its component is non-zero.
pub struct RgbPinLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    active_low: bool,
}

impl<R, G, B> RgbPinLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    pub fn new(red: R, green: G, blue: B, active_low: bool) -> Self {
        Self {
            red,
            green,
            blue,
            active_low,
        }
    }

    /// Give the pins back
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn drive<P: OutputPin>(pin: &mut P, lit: bool, active_low: bool) -> Result<(), HalError> {
    if lit != active_low {
        pin.set_high().map_err(|_| HalError::GpioError)
    } else {
        pin.set_low().map_err(|_| HalError::GpioError)
    }
}

impl<R, G, B> IndicatorLed for RgbPinLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    type Error = HalError;

    fn set_color(&mut self, color: Color) -> Result<(), Self::Error> {
        drive(&mut self.red, color.r > 0, self.active_low)?;
        drive(&mut self.green, color.g > 0, self.active_low)?;
        drive(&mut self.blue, color.b > 0, self.active_low)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use std::vec::Vec;

    /// Indicator that records every colour written
    #[derive(Default)]
    pub struct MockIndicator {
        history: Vec<Color>,
        fail_next: bool,
    }

    impl MockIndicator {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every colour written, oldest first
        pub fn history(&self) -> &[Color] {
            &self.history
        }

        /// Most recent colour, if any
        pub fn current(&self) -> Option<Color> {
            self.history.last().copied()
        }

        /// Make the next write fail
        pub fn fail_next_write(&mut self) {
            self.fail_next = true;
        }
    }

    impl IndicatorLed for MockIndicator {
        type Error = HalError;

        fn set_color(&mut self, color: Color) -> Result<(), Self::Error> {
            if self.fail_next {
                self.fail_next = false;
                return Err(HalError::IndicatorError);
            }
            self.history.push(color);
            Ok(())
        }
    }
}
