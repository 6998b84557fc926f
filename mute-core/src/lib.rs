#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Mute Core
//!
//! Control core for a USB telephony mute button.
//! Buttons and a volume encoder go in, HID telephony/consumer reports and a
//! status colour come out. Hardware-free and host-testable.

pub mod types;
pub mod hal;
pub mod queue;
pub mod state;
pub mod classifier;
pub mod report;
pub mod arbiter;
pub mod animator;
pub mod serial;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use hal::{*, Instant, Duration};
pub use queue::*;
pub use state::*;
pub use classifier::*;
pub use report::*;
pub use arbiter::*;
pub use animator::*;
pub use serial::*;

/// Mute core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timing used by the shipped firmware
pub fn default_config() -> ControlConfig {
    ControlConfig {
        encoder_threshold: 3,
        long_press: Duration::from_millis(500),
        breath_step: Duration::from_millis(60),
        idle_not_mounted: Duration::from_millis(100),
        idle_mounted: Duration::from_millis(5000),
        idle_suspended: Duration::from_millis(20000),
    }
}
