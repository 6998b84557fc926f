//! HID report payloads exchanged with the host

/// Report id of the telephony collection (in and out)
pub const REPORT_ID_TELEPHONY: u8 = 1;
/// Report id of the consumer-control collection
pub const REPORT_ID_CONSUMER: u8 = 2;

/// Telephony headset input report: bit0 mute request, bit1 hook switch
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelephonyReport(pub u8);

impl TelephonyReport {
    pub const MUTE: u8 = 1 << 0;
    pub const HOOK: u8 = 1 << 1;

    pub const fn mute(&self) -> bool {
        self.0 & Self::MUTE != 0
    }

    pub const fn hook(&self) -> bool {
        self.0 & Self::HOOK != 0
    }

    pub fn set_mute(&mut self, on: bool) {
        self.set_bit(Self::MUTE, on);
    }

    pub fn set_hook(&mut self, on: bool) {
        self.set_bit(Self::HOOK, on);
    }

    fn set_bit(&mut self, mask: u8, on: bool) {
        if on {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}

/// Consumer-control input report: one 16-bit usage, 0 when idle
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport(pub u16);

impl ConsumerReport {
    pub const IDLE: u16 = 0x0000;
    pub const VOLUME_INCREMENT: u16 = 0x00E9;
    pub const VOLUME_DECREMENT: u16 = 0x00EA;

    pub const fn usage(&self) -> u16 {
        self.0
    }

    pub const fn to_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// Report chosen by the arbiter for transmission
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutboundReport {
    Telephony(TelephonyReport),
    Consumer(ConsumerReport),
}

impl OutboundReport {
    /// Longest serialized report, id byte included
    pub const MAX_LEN: usize = 3;

    pub const fn report_id(&self) -> u8 {
        match self {
            OutboundReport::Telephony(_) => REPORT_ID_TELEPHONY,
            OutboundReport::Consumer(_) => REPORT_ID_CONSUMER,
        }
    }

    /// Write the wire form (report id, then payload) into `buf`.
    /// Returns the number of bytes used, or `None` if `buf` is too short.
    pub fn serialize(&self, buf: &mut [u8]) -> Option<usize> {
        match self {
            OutboundReport::Telephony(report) => {
                let out = buf.get_mut(..2)?;
                out[0] = REPORT_ID_TELEPHONY;
                out[1] = report.0;
                Some(2)
            }
            OutboundReport::Consumer(report) => {
                let out = buf.get_mut(..3)?;
                out[0] = REPORT_ID_CONSUMER;
                out[1..].copy_from_slice(&report.to_bytes());
                Some(3)
            }
        }
    }
}

/// Call state pushed by the host in the telephony output report
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostTelephonyState {
    pub on_call: bool,
    pub mute_active: bool,
}

impl HostTelephonyState {
    /// Decode the first payload byte; bits 2..7 are ignored
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            on_call: byte & 0x01 != 0,
            mute_active: byte & 0x02 != 0,
        }
    }
}

/// Split the report id byte off an inbound buffer.
///
/// With report ids in use every buffer starts with the id, so exactly one
/// byte is removed. An id-only buffer yields an empty payload.
pub fn strip_report_id(report_id: u8, data: &[u8]) -> Result<&[u8], ReportError> {
    match data.split_first() {
        Some((&id, payload)) if id == report_id => Ok(payload),
        Some((&id, _)) => Err(ReportError::UnknownReportId(id)),
        None => Ok(&[]),
    }
}

/// Inbound report rejection reasons
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Report id is not the telephony output report
    UnknownReportId(u8),
    /// Payload shorter than the report
    TooShort { expected: usize, actual: usize },
}

#[cfg(feature = "std")]
impl core::fmt::Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportError::UnknownReportId(id) => write!(f, "Unknown report id {}", id),
            ReportError::TooShort { expected, actual } => {
                write!(f, "Report too short: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReportError {}
