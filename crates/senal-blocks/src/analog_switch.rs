//! Clock-gated analog switch.

use crate::process::{ProcessInputs, ProcessIssue, Processed, Processor};
use senal_analysis::CLOCK_THRESHOLD;
use senal_core::Buffer;

/// Passes `input` while the clock is high and outputs 0.0 while it is low.
/// Samples without a matching clock sample are treated as low.
pub fn analog_switch(input: &[f64], clock: &[f64]) -> Buffer {
    input
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if clock.get(i).is_some_and(|&c| c > CLOCK_THRESHOLD) {
                x
            } else {
                0.0
            }
        })
        .collect()
}

/// Analog switch block: data input plus clock input.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalogSwitch;

impl Processor for AnalogSwitch {
    fn process(&self, inputs: &ProcessInputs<'_>, _sample_rate: f64) -> Processed {
        let Some(input) = inputs.primary() else {
            return Processed::degraded(inputs.silence(), ProcessIssue::MissingInput);
        };
        match inputs.clock {
            Some(clock) => Processed::ok(analog_switch(input, clock)),
            None => Processed::degraded(input.to_vec(), ProcessIssue::MissingClock),
        }
    }
}
