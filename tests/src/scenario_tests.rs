//! Table-driven scenarios through classifier, arbiter and animator

use mute_core::test_utils::input_script::InputScript;
use mute_core::test_utils::output_capture::{drain_events, pump_reports, wire_bytes};
use mute_core::test_utils::virtual_time::VirtualClock;
use mute_core::*;
use rstest::rstest;

fn telephony(bits: u8) -> Option<OutboundReport> {
    Some(OutboundReport::Telephony(TelephonyReport(bits)))
}

fn consumer(usage: u16) -> Option<OutboundReport> {
    Some(OutboundReport::Consumer(ConsumerReport(usage)))
}

/// Single event folded into fresh accumulators
#[rstest]
#[case::mute_down(Event::MuteDown, telephony(0x01))]
#[case::mute_up(Event::MuteUp, None)]
#[case::hook_down(Event::HookDown, telephony(0x02))]
#[case::hook_up(Event::HookUp, None)]
#[case::vol_up(Event::VolUpDown, consumer(ConsumerReport::VOLUME_INCREMENT))]
#[case::vol_down(Event::VolDownDown, consumer(ConsumerReport::VOLUME_DECREMENT))]
#[case::vol_release(Event::VolRelease, None)]
fn test_fold_from_idle(#[case] event: Event, #[case] expected: Option<OutboundReport>) {
    let queue = EventQueue::new();
    let state = DeviceState::new();
    let mut arbiter = ReportArbiter::new();

    queue.push(event);
    assert_eq!(arbiter.tick(&queue, &state, true), expected);
}

#[rstest]
#[case::hook(Button::Hook, Event::HookDown, Event::HookUp)]
#[case::volume_up(Button::VolumeUp, Event::VolUpDown, Event::VolRelease)]
#[case::volume_down(Button::VolumeDown, Event::VolDownDown, Event::VolRelease)]
fn test_plain_button_events(#[case] button: Button, #[case] down: Event, #[case] up: Event) {
    let queue = EventQueue::new();
    let state = DeviceState::new();
    let mut classifier = InputClassifier::new(&queue, &state, default_config());

    InputScript::starting_at(2000)
        .tap(button, 50)
        .run(&mut classifier);
    assert_eq!(drain_events(&queue), vec![down, up]);
}

#[rstest]
#[case::short_tap(100, false, vec![Event::MuteDown, Event::MuteUp])]
#[case::long_hold(800, false, vec![Event::MuteDown, Event::MuteUp, Event::MuteDown, Event::MuteUp])]
#[case::long_hold_muted(800, true, vec![Event::MuteDown, Event::MuteUp])]
#[case::exactly_window(500, false, vec![Event::MuteDown, Event::MuteUp])]
fn test_mute_hold(#[case] hold_ms: u64, #[case] host_muted: bool, #[case] expected: Vec<Event>) {
    for button in [Button::Mute, Button::EncoderSwitch] {
        let queue = EventQueue::new();
        let state = DeviceState::new();
        state.assign(DeviceFlag::MuteActive, host_muted);
        let mut classifier = InputClassifier::new(&queue, &state, default_config());

        InputScript::starting_at(5000)
            .tap(button, hold_ms)
            .run(&mut classifier);
        assert_eq!(drain_events(&queue), expected, "{:?}", button);
    }
}

#[test]
fn test_double_press_answers_call() {
    let queue = EventQueue::new();
    let state = DeviceState::new();
    let mut classifier = InputClassifier::new(&queue, &state, default_config());
    let mut arbiter = ReportArbiter::new();

    let script = InputScript::starting_at(3000)
        .tap(Button::Mute, 80)
        .wait(150)
        .tap(Button::EncoderSwitch, 80);
    assert_eq!(script.run(&mut classifier), 5);
    assert_eq!(script.end_ms(), 3310);

    let reports = pump_reports(&mut arbiter, &queue, &state);
    let wire: Vec<Vec<u8>> = reports.iter().map(wire_bytes).collect();
    assert_eq!(
        wire,
        vec![
            vec![0x01, 0x01], // MuteDown
            vec![0x01, 0x00], // MuteUp
            vec![0x01, 0x02], // HookDown
            vec![0x01, 0x03], // MuteDown
            vec![0x01, 0x02], // MuteUp
        ]
    );
}

#[test]
fn test_encoder_turn_wire_format() {
    let queue = EventQueue::new();
    let state = DeviceState::new();
    let mut classifier = InputClassifier::new(&queue, &state, default_config());
    let mut arbiter = ReportArbiter::new();

    InputScript::new()
        .turn(-1)
        .turn(-1)
        .turn(-1)
        .turn(-1)
        .run(&mut classifier);

    let reports = pump_reports(&mut arbiter, &queue, &state);
    let wire: Vec<Vec<u8>> = reports.iter().map(wire_bytes).collect();
    assert_eq!(wire, vec![vec![0x02, 0xEA, 0x00], vec![0x02, 0x00, 0x00]]);
}

/// Host reports an active call: state set, HookUp queued, LED goes green
#[test]
fn test_inbound_call_turns_indicator_green() {
    let queue = EventQueue::new();
    let state = DeviceState::new();
    let clock = VirtualClock::new();
    let mut animator = IndicatorAnimator::new(default_config());
    let mut led = test_utils::MockIndicator::new();

    state.apply_usb_event(UsbEvent::Powered(true));
    state.apply_usb_event(UsbEvent::Mounted);

    let host = handle_host_report(&state, &queue, REPORT_ID_TELEPHONY, &[0x01]).unwrap();
    assert_eq!(
        host,
        HostTelephonyState {
            on_call: true,
            mute_active: false
        }
    );
    assert!(state.is_set(DeviceFlag::OnCall));
    assert!(!state.is_set(DeviceFlag::MuteActive));
    assert_eq!(drain_events(&queue), vec![Event::HookUp]);

    clock.advance_ms(100);
    animator.service(&state, clock.now(), &mut led);
    assert_eq!(led.current(), Some(Color::GREEN));
    assert_eq!(animator.rendered(), Some(AnimationState::SolidGreen));
}

#[rstest]
#[case::not_mounted(false, false, 100)]
#[case::suspended(false, true, 20_000)]
#[case::mounted(true, false, 5_000)]
#[case::mounted_and_suspended(true, true, 5_000)]
fn test_breath_pause_tier(#[case] mounted: bool, #[case] suspended: bool, #[case] pause_ms: u64) {
    let state = DeviceState::new();
    state.assign(DeviceFlag::UsbMounted, mounted);
    state.assign(DeviceFlag::UsbSuspended, suspended);
    let clock = VirtualClock::new();
    let mut animator = IndicatorAnimator::new(default_config());

    // Up to the top, back down to the bottom
    for _ in 0..10 {
        clock.advance(animator.interval());
        assert!(animator.poll(&state, clock.now()).is_some());
    }
    assert_eq!(animator.level(), MIN_LEVEL);
    assert_eq!(animator.interval(), Duration::from_millis(pause_ms));
}

#[rstest]
#[case::unknown_id(3, vec![0x01], ReportError::UnknownReportId(3))]
#[case::empty(REPORT_ID_TELEPHONY, vec![], ReportError::TooShort { expected: 1, actual: 0 })]
fn test_malformed_host_report(#[case] id: u8, #[case] data: Vec<u8>, #[case] error: ReportError) {
    let queue = EventQueue::new();
    let state = DeviceState::new();

    let result = handle_host_report(&state, &queue, id, &data);
    assert_eq!(result, Err(error));
    println!("rejected: {}", error);
    assert_eq!(state.bits(), 0);
    assert!(queue.is_empty());
}

/// Buffers as the USB stack hands them over, report id still in front
#[rstest]
#[case::id_only(vec![REPORT_ID_TELEPHONY], ReportError::TooShort { expected: 1, actual: 0 })]
#[case::empty(vec![], ReportError::TooShort { expected: 1, actual: 0 })]
#[case::wrong_id_byte(vec![REPORT_ID_CONSUMER, 0x01], ReportError::UnknownReportId(REPORT_ID_CONSUMER))]
fn test_malformed_prefixed_host_report(#[case] data: Vec<u8>, #[case] error: ReportError) {
    let queue = EventQueue::new();
    let state = DeviceState::new();

    let result = handle_prefixed_host_report(&state, &queue, REPORT_ID_TELEPHONY, &data);
    assert_eq!(result, Err(error));
    assert!(!state.is_set(DeviceFlag::OnCall));
    assert_eq!(state.bits(), 0);
    assert!(queue.is_empty());
}

#[test]
fn test_prefixed_host_report_reaches_state() {
    let queue = EventQueue::new();
    let state = DeviceState::new();

    handle_prefixed_host_report(&state, &queue, REPORT_ID_TELEPHONY, &[REPORT_ID_TELEPHONY, 0x03])
        .unwrap();
    assert!(state.is_set(DeviceFlag::OnCall));
    assert!(state.is_set(DeviceFlag::MuteActive));
    assert_eq!(drain_events(&queue), vec![Event::HookUp]);
}

#[test]
fn test_get_report_answers_empty() {
    assert_eq!(get_report_len(), 0);
}
