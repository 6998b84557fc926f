//! HID report arbiter: folds queued events into change-triggered reports

use crate::queue::EventQueue;
use crate::report::{
    strip_report_id, ConsumerReport, HostTelephonyState, OutboundReport, ReportError,
    TelephonyReport, REPORT_ID_TELEPHONY,
};
use crate::state::DeviceState;
use crate::types::{DeviceFlag, Event};

/// Length answered to a GET_REPORT request
pub const fn get_report_len() -> usize {
    0
}

/// Loop-owned report accumulators and their last emitted snapshots
#[derive(Debug, Default)]
pub struct ReportArbiter {
    telephony: TelephonyReport,
    telephony_sent: TelephonyReport,
    consumer: ConsumerReport,
    consumer_sent: ConsumerReport,
}

impl ReportArbiter {
    pub const fn new() -> Self {
        Self {
            telephony: TelephonyReport(0),
            telephony_sent: TelephonyReport(0),
            consumer: ConsumerReport(0),
            consumer_sent: ConsumerReport(0),
        }
    }

    /// One loop iteration.
    ///
    /// Consumes at most one event and returns at most one report. A pending
    /// telephony change wins over a consumer change; the consumer report
    /// then goes out on a later tick.
    pub fn tick(
        &mut self,
        queue: &EventQueue,
        state: &DeviceState,
        transport_ready: bool,
    ) -> Option<OutboundReport> {
        if !transport_ready {
            state.clear(DeviceFlag::UsbReady);
            return None;
        }
        state.set(DeviceFlag::UsbReady);

        match queue.pop() {
            Event::None => return None,
            Event::MuteDown => self.telephony.set_mute(true),
            Event::MuteUp => self.telephony.set_mute(false),
            Event::HookDown => self.telephony.set_hook(true),
            Event::HookUp => self.telephony.set_hook(false),
            Event::VolUpDown => self.consumer = ConsumerReport(ConsumerReport::VOLUME_INCREMENT),
            Event::VolDownDown => self.consumer = ConsumerReport(ConsumerReport::VOLUME_DECREMENT),
            Event::VolRelease => self.consumer = ConsumerReport(ConsumerReport::IDLE),
        }

        let report = if self.telephony != self.telephony_sent {
            self.telephony_sent = self.telephony;
            OutboundReport::Telephony(self.telephony)
        } else if self.consumer != self.consumer_sent {
            self.consumer_sent = self.consumer;
            OutboundReport::Consumer(self.consumer)
        } else {
            return None;
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("Report out: {:?}", report);

        Some(report)
    }

    /// Telephony accumulator as folded so far
    pub fn telephony(&self) -> TelephonyReport {
        self.telephony
    }

    /// Consumer accumulator as folded so far
    pub fn consumer(&self) -> ConsumerReport {
        self.consumer
    }

    /// True if either accumulator differs from what was last sent
    pub fn has_pending(&self) -> bool {
        self.telephony != self.telephony_sent || self.consumer != self.consumer_sent
    }
}

/// Apply a SET_REPORT / OUT report from the host.
///
/// Only the telephony output report is understood. While a call is active a
/// `HookUp` is queued so a held hook bit is released.
pub fn handle_host_report(
    state: &DeviceState,
    queue: &EventQueue,
    report_id: u8,
    data: &[u8],
) -> Result<HostTelephonyState, ReportError> {
    if report_id != REPORT_ID_TELEPHONY {
        #[cfg(feature = "defmt")]
        defmt::warn!("Ignoring host report id {}", report_id);
        return Err(ReportError::UnknownReportId(report_id));
    }
    let byte = *data.first().ok_or(ReportError::TooShort {
        expected: 1,
        actual: data.len(),
    })?;

    let host = HostTelephonyState::from_byte(byte);
    state.assign(DeviceFlag::OnCall, host.on_call);
    state.assign(DeviceFlag::MuteActive, host.mute_active);

    #[cfg(feature = "defmt")]
    defmt::debug!("Host report: {:?}", host);

    if state.is_set(DeviceFlag::OnCall) {
        queue.push(Event::HookUp);
    }

    Ok(host)
}

/// [`handle_host_report`] for a buffer that still carries its report id,
/// as delivered by the USB stack.
pub fn handle_prefixed_host_report(
    state: &DeviceState,
    queue: &EventQueue,
    report_id: u8,
    data: &[u8],
) -> Result<HostTelephonyState, ReportError> {
    let payload = strip_report_id(report_id, data)?;
    handle_host_report(state, queue, report_id, payload)
}
