//! Board configuration for the RP2040 mute button

use embassy_time::Duration;
use mute_core::{default_config, ControlConfig};

// ===================================================================
// USB identity
// ===================================================================

pub const USB_VID: u16 = 0xDA1E;
pub const USB_PID: u16 = 0xB0CA;
pub const USB_MANUFACTURER: &str = "Shh";
pub const USB_PRODUCT: &str = "Mute button";
/// Used only if the flash unique id cannot be read
pub const USB_SERIAL_FALLBACK: &str = "0000000000000000";
pub const USB_MAX_POWER_MA: u16 = 100;

/// Interrupt endpoint polling interval
pub const HID_POLL_MS: u8 = 10;
/// Largest HID packet in either direction, report id included
pub const HID_PACKET_SIZE: usize = 8;
/// Reports the control loop may queue ahead of the IN endpoint
pub const REPORT_CHANNEL_DEPTH: usize = 4;

/// Pico on-board QSPI flash
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

// ===================================================================
// Timing
// ===================================================================

/// Level must hold this long after an edge to count
pub const DEBOUNCE: Duration = Duration::from_millis(10);
/// Settle time before sampling the bootloader buttons
pub const BOOT_SAMPLE_DELAY: Duration = Duration::from_millis(10);
/// On and off time of each bootloader blink
pub const BOOT_BLINK: Duration = Duration::from_millis(200);
pub const BOOT_BLINK_COUNT: usize = 3;
/// Startup blink length
pub const STARTUP_BLINK: Duration = Duration::from_millis(200);
/// Main loop period
pub const LOOP_PERIOD: Duration = Duration::from_millis(1);

/// Policy handed to the core
pub fn control_config() -> ControlConfig {
    default_config()
}
