//! Device state register shared by interrupt callbacks and the main loop

use portable_atomic::{AtomicU8, Ordering};

use crate::types::DeviceFlag;

/// USB bus lifecycle notifications
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbEvent {
    /// Host configured the device
    Mounted,
    /// Host dropped the configuration or the cable was pulled
    Unmounted,
    /// Bus entered suspend
    Suspended,
    /// Bus resumed; `mounted` is the configuration state at resume time
    Resumed { mounted: bool },
    /// Bus enabled or disabled
    Powered(bool),
}

/// Atomic bitfield of [`DeviceFlag`]s.
///
/// Every operation is a single atomic read-modify-write, so flags can be
/// set from USB callbacks while the main loop reads them. There is no
/// ordering guarantee between two different flags.
pub struct DeviceState {
    bits: AtomicU8,
}

impl DeviceState {
    /// All flags clear
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    pub fn set(&self, flag: DeviceFlag) {
        self.bits.fetch_or(flag.bit(), Ordering::AcqRel);
    }

    pub fn clear(&self, flag: DeviceFlag) {
        self.bits.fetch_and(!flag.bit(), Ordering::AcqRel);
    }

    pub fn is_set(&self, flag: DeviceFlag) -> bool {
        self.bits.load(Ordering::Acquire) & flag.bit() != 0
    }

    /// Set or clear `flag`
    pub fn assign(&self, flag: DeviceFlag, value: bool) {
        if value {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Raw snapshot of all flags
    pub fn bits(&self) -> u8 {
        self.bits.load(Ordering::Acquire)
    }

    /// Update the USB flags for a bus lifecycle notification
    pub fn apply_usb_event(&self, event: UsbEvent) {
        #[cfg(feature = "defmt")]
        defmt::debug!("USB event: {:?}", event);

        match event {
            UsbEvent::Mounted => self.set(DeviceFlag::UsbMounted),
            // Only the power flag drops here; UsbMounted is left for the
            // next resume or mount to settle.
            UsbEvent::Unmounted => self.clear(DeviceFlag::UsbOn),
            UsbEvent::Suspended => self.set(DeviceFlag::UsbSuspended),
            UsbEvent::Resumed { mounted } => {
                self.clear(DeviceFlag::UsbSuspended);
                self.assign(DeviceFlag::UsbMounted, mounted);
            }
            UsbEvent::Powered(on) => self.assign(DeviceFlag::UsbOn, on),
        }
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for DeviceState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "DeviceState({:#08b})", self.bits())
    }
}
