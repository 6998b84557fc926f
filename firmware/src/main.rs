#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_halt as _;

use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{PIO0, USB};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::rotary_encoder::{PioEncoder, PioEncoderProgram};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::usb::{self as rp_usb, Driver};
use embassy_time::{Instant, Timer};

use mute_firmware::config::*;
use mute_firmware::*;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => rp_usb::InterruptHandler<USB>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

// Shared between the input task, USB callbacks and the control loop
static EVENTS: EventQueue = EventQueue::new();
static STATE: DeviceState = DeviceState::new();

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("Mute button firmware v{} starting", VERSION);
    let p = embassy_rp::init(Default::default());

    let serial = usb::unique_serial(p.FLASH);
    defmt::info!("Serial number {}", serial);

    // Status LED (GP2) and encoder (GP7/GP8) share PIO0
    let Pio {
        mut common,
        sm0,
        sm1,
        ..
    } = Pio::new(p.PIO0, Irqs);
    let ws2812_program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_2, &ws2812_program);
    let encoder_program = PioEncoderProgram::new(&mut common);
    let encoder = PioEncoder::new(&mut common, sm1, p.PIN_7, p.PIN_8, &encoder_program);
    spawner.must_spawn(led_task(ws2812, &LED_COLOR));

    // Active low: mute GP19, encoder switch GP9, hook GP21, volume GP18/GP20
    let buttons = ButtonInputs {
        mute: Input::new(p.PIN_19, Pull::Up),
        encoder_switch: Input::new(p.PIN_9, Pull::Up),
        hook: Input::new(p.PIN_21, Pull::Up),
        volume_up: Input::new(p.PIN_18, Pull::Up),
        volume_down: Input::new(p.PIN_20, Pull::Up),
    };

    let mut led = SignalLed::new(&LED_COLOR);
    boot::enter_bootloader_if_held(&buttons.mute, &buttons.encoder_switch, &mut led).await;

    let config = control_config();
    let classifier = InputClassifier::new(&EVENTS, &STATE, config);
    spawner.must_spawn(input_task(buttons, encoder, classifier));

    let driver = Driver::new(p.USB, Irqs);
    let usb::UsbParts {
        device,
        reader,
        writer,
    } = usb::build(driver, serial, &STATE, &EVENTS);
    spawner.must_spawn(usb_task(device));
    spawner.must_spawn(hid_reader_task(reader, &STATE, &EVENTS));
    spawner.must_spawn(hid_writer_task(writer, &OUTBOUND_REPORTS));

    defmt::info!("Mute button ready");

    let mut arbiter = ReportArbiter::new();
    let mut animator = IndicatorAnimator::new(config);

    loop {
        let ready = transport_ready(&STATE);
        if let Some(report) = arbiter.tick(&EVENTS, &STATE, ready) {
            send_report(report).ok();
        }
        animator.service(&STATE, Instant::now(), &mut led);
        Timer::after(LOOP_PERIOD).await;
    }
}
