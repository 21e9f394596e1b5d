//! Clocked sample-and-hold.

use crate::process::{ProcessInputs, ProcessIssue, Processed, Processor};
use senal_analysis::{CLOCK_THRESHOLD, is_rising_edge};
use senal_core::Buffer;

/// Samples `input` at each rising edge of `clock` and holds the value until
/// the next edge. The output is 0.0 before the first edge.
///
/// Samples past the end of `clock` keep the last held value.
pub fn sample_hold(input: &[f64], clock: &[f64]) -> Buffer {
    let mut held = 0.0;
    input
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if is_rising_edge(clock, i, CLOCK_THRESHOLD) {
                held = x;
            }
            held
        })
        .collect()
}

/// Sample-and-hold block: data input plus clock input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleHold;

impl Processor for SampleHold {
    fn process(&self, inputs: &ProcessInputs<'_>, _sample_rate: f64) -> Processed {
        let Some(input) = inputs.primary() else {
            return Processed::degraded(inputs.silence(), ProcessIssue::MissingInput);
        };
        match inputs.clock {
            Some(clock) => Processed::ok(sample_hold(input, clock)),
            None => Processed::degraded(input.to_vec(), ProcessIssue::MissingClock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_between_edges() {
        let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let clock = [0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        assert_eq!(
            sample_hold(&input, &clock),
            [0.0, 2.0, 2.0, 2.0, 2.0, 6.0, 6.0, 6.0]
        );
    }

    #[test]
    fn clock_high_at_start_is_not_sampled() {
        let input = [9.0, 8.0, 7.0, 6.0];
        let clock = [1.0, 1.0, 0.0, 1.0];
        assert_eq!(sample_hold(&input, &clock), [0.0, 0.0, 0.0, 6.0]);
    }

    #[test]
    fn missing_clock_passes_input_through() {
        let input = [0.5, -0.5, 0.25];
        let inputs = ProcessInputs::new(3).with_data(vec![Some(&input[..])]);
        let out = SampleHold.process(&inputs, 1.0);
        assert_eq!(out.buffer, input);
        assert_eq!(out.issue, Some(ProcessIssue::MissingClock));
    }

    #[test]
    fn missing_input_outputs_silence() {
        let clock = [0.0, 1.0];
        let inputs = ProcessInputs::new(2)
            .with_data(vec![None])
            .with_clock(Some(&clock[..]));
        let out = SampleHold.process(&inputs, 1.0);
        assert_eq!(out.buffer, [0.0, 0.0]);
        assert_eq!(out.issue, Some(ProcessIssue::MissingInput));
    }
}
