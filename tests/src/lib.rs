//! Host integration tests for the mute button core

#[cfg(test)]
mod pin_led_tests;
#[cfg(test)]
mod scenario_tests;
