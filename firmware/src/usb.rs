//! USB HID transport: telephony headset + consumer control
//!
//! Outbound reports come from the core arbiter. Inbound SET_REPORT/OUT
//! reports and bus lifecycle callbacks are forwarded to the core.

use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::{FLASH, USB};
use embassy_rp::usb::Driver;
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_usb::class::hid::{
    Config as HidConfig, HidReader, HidReaderWriter, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use mute_core::{
    get_report_len, handle_prefixed_host_report, serial_from_unique_id, DeviceFlag, DeviceState,
    EventQueue, HalError, OutboundReport, UsbEvent, SERIAL_LEN, UNIQUE_ID_LEN,
};
use portable_atomic::{AtomicBool, Ordering};
use static_cell::StaticCell;

use crate::config::*;

pub type UsbDriver = Driver<'static, USB>;

// ===================================================================
// HID Report Descriptor
// ===================================================================
//
// Report 1: telephony headset. In: phone mute (relative), hook switch.
//           Out: off-hook and mute LEDs.
// Report 2: consumer control, one 16-bit usage.

pub const HID_REPORT_DESCRIPTOR: &[u8] = &[
    // Usage Page (Telephony), Usage (Headset), Collection (Application)
    0x05, 0x0B, 0x09, 0x05, 0xA1, 0x01,
    // Report ID (1), Logical Minimum (0), Logical Maximum (1)
    0x85, 0x01, 0x15, 0x00, 0x25, 0x01,
    // Usage (Phone Mute), 1 bit, Input (Data,Var,Rel)
    0x09, 0x2F, 0x95, 0x01, 0x75, 0x01, 0x81, 0x06,
    // Usage (Hook Switch), 1 bit, Input (Data,Var,Abs,No Preferred)
    0x09, 0x20, 0x95, 0x01, 0x75, 0x01, 0x81, 0x22,
    // 6 bit padding, Input (Const)
    0x95, 0x01, 0x75, 0x06, 0x81, 0x01,
    // Usage Page (LEDs), Usage (Off-Hook), Usage (Mute)
    0x05, 0x08, 0x09, 0x17, 0x09, 0x09,
    // 2 bits, Output (Data,Var,Abs)
    0x95, 0x02, 0x75, 0x01, 0x91, 0x02,
    // 6 bit padding, Output (Const)
    0x95, 0x01, 0x75, 0x06, 0x91, 0x01,
    // End Collection
    0xC0,
    // Usage Page (Consumer), Usage (Consumer Control), Collection (Application)
    0x05, 0x0C, 0x09, 0x01, 0xA1, 0x01,
    // Report ID (2), Logical Minimum (0), Logical Maximum (0x3FF)
    0x85, 0x02, 0x15, 0x00, 0x26, 0xFF, 0x03,
    // Usage Minimum (0), Usage Maximum (0x3FF)
    0x19, 0x00, 0x2A, 0xFF, 0x03,
    // 16 bit x 1, Input (Data,Array,Abs)
    0x75, 0x10, 0x95, 0x01, 0x81, 0x00,
    // End Collection
    0xC0,
];

/// Set while the host has the device configured
static CONFIGURED: AtomicBool = AtomicBool::new(false);

pub type ReportChannel = Channel<CriticalSectionRawMutex, OutboundReport, REPORT_CHANNEL_DEPTH>;

/// Reports handed from the control loop to [`hid_writer_task`]
pub static OUTBOUND_REPORTS: ReportChannel = Channel::new();

/// True when an IN report can be handed to the writer without waiting
pub fn transport_ready(state: &DeviceState) -> bool {
    CONFIGURED.load(Ordering::Acquire)
        && !state.is_set(DeviceFlag::UsbSuspended)
        && !OUTBOUND_REPORTS.is_full()
}

// ===================================================================
// Inbound reports
// ===================================================================

/// Handles GET_REPORT / SET_REPORT on EP0 and OUT endpoint reports
pub struct HostReportHandler {
    state: &'static DeviceState,
    queue: &'static EventQueue,
}

impl HostReportHandler {
    pub const fn new(state: &'static DeviceState, queue: &'static EventQueue) -> Self {
        Self { state, queue }
    }
}

impl RequestHandler for HostReportHandler {
    fn get_report(&mut self, id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        defmt::debug!("HID Get Report: {:?}", id);
        Some(get_report_len())
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        if let ReportId::Out(report_id) = id {
            // Report data arrives with the report id in front
            match handle_prefixed_host_report(self.state, self.queue, report_id, data) {
                Ok(host) => defmt::info!(
                    "Host: on_call={} mute={}",
                    host.on_call,
                    host.mute_active
                ),
                Err(e) => defmt::warn!("Rejected host report: {:?}", e),
            }
        }
        OutResponse::Accepted
    }
}

// ===================================================================
// Bus lifecycle
// ===================================================================

/// Maps embassy-usb device callbacks to [`UsbEvent`]s
pub struct UsbStateHandler {
    state: &'static DeviceState,
}

impl UsbStateHandler {
    pub const fn new(state: &'static DeviceState) -> Self {
        Self { state }
    }
}

impl Handler for UsbStateHandler {
    fn enabled(&mut self, enabled: bool) {
        self.state.apply_usb_event(UsbEvent::Powered(enabled));
        if !enabled {
            CONFIGURED.store(false, Ordering::Release);
        }
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Release);
        let event = if configured {
            UsbEvent::Mounted
        } else {
            UsbEvent::Unmounted
        };
        self.state.apply_usb_event(event);
    }

    fn suspended(&mut self, suspended: bool) {
        let event = if suspended {
            UsbEvent::Suspended
        } else {
            UsbEvent::Resumed {
                mounted: CONFIGURED.load(Ordering::Acquire),
            }
        };
        self.state.apply_usb_event(event);
    }
}

// ===================================================================
// Device construction
// ===================================================================

pub struct UsbParts {
    pub device: UsbDevice<'static, UsbDriver>,
    pub reader: HidReader<'static, UsbDriver, HID_PACKET_SIZE>,
    pub writer: HidWriter<'static, UsbDriver, HID_PACKET_SIZE>,
}

/// Serial number string from the flash unique id, so each unit enumerates
/// with its own identity. Must only be called once.
pub fn unique_serial(flash: Peri<'static, FLASH>) -> &'static str {
    static SERIAL: StaticCell<[u8; SERIAL_LEN]> = StaticCell::new();

    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);
    let mut id = [0u8; UNIQUE_ID_LEN];
    if let Err(e) = flash.blocking_unique_id(&mut id) {
        defmt::warn!("Flash unique id unavailable: {:?}", e);
        return USB_SERIAL_FALLBACK;
    }

    let serial = SERIAL.init(serial_from_unique_id(&id));
    core::str::from_utf8(serial).unwrap_or(USB_SERIAL_FALLBACK)
}

fn usb_config(serial: &'static str) -> Config<'static> {
    let mut config = Config::new(USB_VID, USB_PID);
    config.manufacturer = Some(USB_MANUFACTURER);
    config.product = Some(USB_PRODUCT);
    config.serial_number = Some(serial);
    config.max_power = USB_MAX_POWER_MA;
    config.max_packet_size_0 = 64;
    config.device_class = 0x00;
    config.device_sub_class = 0x00;
    config.device_protocol = 0x00;
    config.composite_with_iads = false;
    config
}

/// Build the USB device with its single HID interface.
/// Must only be called once.
pub fn build(
    driver: UsbDriver,
    serial: &'static str,
    state: &'static DeviceState,
    queue: &'static EventQueue,
) -> UsbParts {
    static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static HID_STATE: StaticCell<State<'static>> = StaticCell::new();
    static DEVICE_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();
    static CONTROL_HANDLER: StaticCell<HostReportHandler> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        usb_config(serial),
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );
    builder.handler(DEVICE_HANDLER.init(UsbStateHandler::new(state)));

    let hid_config = HidConfig {
        report_descriptor: HID_REPORT_DESCRIPTOR,
        request_handler: Some(
            CONTROL_HANDLER.init(HostReportHandler::new(state, queue)) as &mut dyn RequestHandler,
        ),
        poll_ms: HID_POLL_MS,
        max_packet_size: HID_PACKET_SIZE as _,
    };
    let hid = HidReaderWriter::<_, HID_PACKET_SIZE, HID_PACKET_SIZE>::new(
        &mut builder,
        HID_STATE.init(State::new()),
        hid_config,
    );
    defmt::info!("HID descriptor: {} bytes", HID_REPORT_DESCRIPTOR.len());

    let device = builder.build();
    let (reader, writer) = hid.split();
    UsbParts {
        device,
        reader,
        writer,
    }
}

/// Queue one arbiter report for [`hid_writer_task`] without waiting.
pub fn send_report(report: OutboundReport) -> Result<(), HalError> {
    OUTBOUND_REPORTS.try_send(report).map_err(|_: TrySendError<_>| {
        defmt::warn!("Report {} dropped, writer busy", report.report_id());
        HalError::TransportError
    })
}

async fn write_report(
    writer: &mut HidWriter<'static, UsbDriver, HID_PACKET_SIZE>,
    report: OutboundReport,
) -> Result<(), HalError> {
    let mut buf = [0u8; OutboundReport::MAX_LEN];
    let len = report.serialize(&mut buf).ok_or(HalError::TransportError)?;
    writer.write(&buf[..len]).await.map_err(|e| {
        defmt::warn!("Report {} not sent: {:?}", report.report_id(), e);
        HalError::TransportError
    })?;
    defmt::debug!("Sent report {}: {:?}", report.report_id(), &buf[..len]);
    Ok(())
}

// ===================================================================
// Tasks
// ===================================================================

#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    defmt::info!("USB task started");
    device.run().await
}

/// Writes queued reports to the IN endpoint. A failed write is not retried.
#[embassy_executor::task]
pub async fn hid_writer_task(
    mut writer: HidWriter<'static, UsbDriver, HID_PACKET_SIZE>,
    reports: &'static ReportChannel,
) -> ! {
    defmt::info!("HID writer task started");
    loop {
        let report = reports.receive().await;
        write_report(&mut writer, report).await.ok();
    }
}

#[embassy_executor::task]
pub async fn hid_reader_task(
    reader: HidReader<'static, UsbDriver, HID_PACKET_SIZE>,
    state: &'static DeviceState,
    queue: &'static EventQueue,
) -> ! {
    let mut handler = HostReportHandler::new(state, queue);
    reader.run(true, &mut handler).await
}
