//! Test utilities for the mute core

pub mod virtual_time {
    //! Virtual time for deterministic testing

    use crate::hal::{Duration, Instant};
    use std::sync::{Arc, Mutex};

    /// Shared manually advanced clock
    #[derive(Clone)]
    pub struct VirtualClock {
        now: Arc<Mutex<Instant>>,
    }

    impl Default for VirtualClock {
        fn default() -> Self {
            Self {
                now: Arc::new(Mutex::new(Instant::from_millis(0))),
            }
        }
    }

    impl VirtualClock {
        pub fn new() -> Self {
            Self::default()
        }

        /// Current virtual time
        pub fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }

        /// Advance virtual time by duration
        pub fn advance(&self, duration: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + duration;
        }

        pub fn advance_ms(&self, ms: u64) {
            self.advance(Duration::from_millis(ms));
        }
    }
}

pub mod input_script {
    //! Scripted button and encoder input on virtual time

    use crate::classifier::InputClassifier;
    use crate::hal::Instant;
    use crate::types::Button;
    use std::vec::Vec;

    /// One raw input at an absolute time
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum InputStep {
        Button { at_ms: u64, button: Button, pressed: bool },
        Encoder { delta: i32 },
    }

    /// Ordered list of raw inputs
    #[derive(Debug, Clone, Default)]
    pub struct InputScript {
        steps: Vec<InputStep>,
        cursor_ms: u64,
    }

    impl InputScript {
        pub fn new() -> Self {
            Self::default()
        }

        /// Start the script at `ms`
        pub fn starting_at(ms: u64) -> Self {
            Self {
                steps: Vec::new(),
                cursor_ms: ms,
            }
        }

        /// Move the script clock forward
        pub fn wait(mut self, ms: u64) -> Self {
            self.cursor_ms += ms;
            self
        }

        pub fn press(mut self, button: Button) -> Self {
            self.steps.push(InputStep::Button {
                at_ms: self.cursor_ms,
                button,
                pressed: true,
            });
            self
        }

        pub fn release(mut self, button: Button) -> Self {
            self.steps.push(InputStep::Button {
                at_ms: self.cursor_ms,
                button,
                pressed: false,
            });
            self
        }

        /// Press, hold for `hold_ms`, release
        pub fn tap(self, button: Button, hold_ms: u64) -> Self {
            self.press(button).wait(hold_ms).release(button)
        }

        pub fn turn(mut self, delta: i32) -> Self {
            self.steps.push(InputStep::Encoder { delta });
            self
        }

        /// Script clock after the last step
        pub fn end_ms(&self) -> u64 {
            self.cursor_ms
        }

        /// Feed every step into `classifier`; returns events accepted
        pub fn run(&self, classifier: &mut InputClassifier<'_>) -> usize {
            self.steps
                .iter()
                .map(|step| match *step {
                    InputStep::Button {
                        at_ms,
                        button,
                        pressed,
                    } => classifier.on_button(button, pressed, Instant::from_millis(at_ms)),
                    InputStep::Encoder { delta } => classifier.on_encoder(delta),
                })
                .sum()
        }
    }
}

pub mod output_capture {
    //! Queue draining and report capture

    use crate::arbiter::ReportArbiter;
    use crate::queue::EventQueue;
    use crate::report::OutboundReport;
    use crate::state::DeviceState;
    use crate::types::Event;
    use std::vec::Vec;

    /// Pop until the queue is empty
    pub fn drain_events(queue: &EventQueue) -> Vec<Event> {
        std::iter::from_fn(|| match queue.pop() {
            Event::None => None,
            e => Some(e),
        })
        .collect()
    }

    /// Tick a ready transport until the queue is empty and nothing is pending,
    /// collecting every report sent
    pub fn pump_reports(
        arbiter: &mut ReportArbiter,
        queue: &EventQueue,
        state: &DeviceState,
    ) -> Vec<OutboundReport> {
        let mut reports = Vec::new();
        // One event per tick, plus one tick per pending accumulator
        for _ in 0..(queue.capacity() + 2) {
            if queue.is_empty() && !arbiter.has_pending() {
                break;
            }
            if let Some(report) = arbiter.tick(queue, state, true) {
                reports.push(report);
            }
        }
        reports
    }

    /// Wire bytes of a report, id first
    pub fn wire_bytes(report: &OutboundReport) -> Vec<u8> {
        let mut buf = [0u8; OutboundReport::MAX_LEN];
        let len = report.serialize(&mut buf).unwrap_or(0);
        buf[..len].to_vec()
    }
}

pub use crate::hal::mock::MockIndicator;
