#![no_std]

//! Firmware library: RP2040 glue between embassy peripherals and the mute core

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;
pub use static_cell::StaticCell;

pub use mute_core::*;

pub mod boot;
pub mod config;
pub mod indicator;
pub mod input;
pub mod usb;

pub use crate::indicator::{led_task, SignalLed, LED_COLOR};
pub use crate::input::{input_task, ButtonInputs};
pub use crate::usb::{
    hid_reader_task, hid_writer_task, send_report, transport_ready, usb_task, OUTBOUND_REPORTS,
};
