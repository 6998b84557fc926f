// End-to-end smoke run of the mute button core on the host

use mute_core::test_utils::input_script::InputScript;
use mute_core::test_utils::output_capture::{drain_events, pump_reports, wire_bytes};
use mute_core::test_utils::virtual_time::VirtualClock;
use mute_core::*;

fn main() {
    println!("🧪 Mute Button Core Smoke Run (v{})", VERSION);

    // Test 1: Queue policy
    test_queue_policy();

    // Test 2: Button gestures to wire reports
    test_gestures_to_reports();

    // Test 3: Host call state to indicator
    test_call_indicator();

    // Test 4: Configuration validation
    test_configuration_validation();

    println!("✅ All smoke checks passed!");
    println!();
    println!("📝 Run the full suite with: cargo test");
}

fn test_queue_policy() {
    println!("📥 Testing event queue...");

    let queue = EventQueue::new();
    let mut accepted = 0;
    for _ in 0..12 {
        if queue.push(Event::VolUpDown) {
            accepted += 1;
        }
    }
    assert_eq!(accepted, queue.capacity());
    assert_eq!(drain_events(&queue).len(), 9);
    assert_eq!(queue.pop(), Event::None);

    println!("  ✅ {} of 12 pushes accepted, overflow dropped", accepted);
}

fn test_gestures_to_reports() {
    println!("🔘 Testing gestures...");

    let queue = EventQueue::new();
    let state = DeviceState::new();
    let mut classifier = InputClassifier::new(&queue, &state, default_config());
    let mut arbiter = ReportArbiter::new();

    let script = InputScript::starting_at(1000)
        .tap(Button::Mute, 100)
        .wait(1000)
        .tap(Button::Mute, 900)
        .turn(2)
        .turn(2);
    let queued = script.run(&mut classifier);

    let reports = pump_reports(&mut arbiter, &queue, &state);
    for report in &reports {
        println!("    → {:02X?}", wire_bytes(report));
    }
    assert_eq!(queued, 8);
    assert_eq!(reports.len(), 8);

    println!("  ✅ {} reports sent", reports.len());
}

fn test_call_indicator() {
    println!("💡 Testing indicator...");

    let queue = EventQueue::new();
    let state = DeviceState::new();
    let clock = VirtualClock::new();
    let mut animator = IndicatorAnimator::new(default_config());
    let mut led = test_utils::MockIndicator::new();

    clock.advance_ms(100);
    animator.service(&state, clock.now(), &mut led);
    assert_eq!(animator.rendered(), Some(AnimationState::Breathing));

    handle_host_report(&state, &queue, REPORT_ID_TELEPHONY, &[0x03]).unwrap();
    clock.advance(animator.interval());
    animator.service(&state, clock.now(), &mut led);
    assert_eq!(led.current(), Some(Color::RED));

    println!("  ✅ Muted call shows red");
}

fn test_configuration_validation() {
    println!("⚙️ Testing configuration...");

    assert!(ControlConfig::new(3, 500, 60, 100, 5000, 20000).is_ok());
    assert!(ControlConfig::new(0, 500, 60, 100, 5000, 20000).is_err());
    assert!(ControlConfig::new(3, 500, 60, 0, 5000, 20000).is_err());
    assert_eq!(default_config(), ControlConfig::default());

    println!("  ✅ Configuration validation working");
}
