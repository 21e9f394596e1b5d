//! Elementwise adder.

use crate::process::{ProcessInputs, ProcessIssue, Processed, Processor};
use senal_core::Buffer;
use thiserror::Error;

/// Inputs to [`add`] had different lengths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot add buffers of lengths {lengths:?}")]
pub struct ShapeMismatch {
    /// Length of every input, in order.
    pub lengths: Vec<usize>,
}

/// Elementwise sum of equally long buffers. No buffers sum to an empty one.
pub fn add(inputs: &[&[f64]]) -> Result<Buffer, ShapeMismatch> {
    let Some((first, rest)) = inputs.split_first() else {
        return Ok(Vec::new());
    };
    if rest.iter().any(|b| b.len() != first.len()) {
        return Err(ShapeMismatch {
            lengths: inputs.iter().map(|b| b.len()).collect(),
        });
    }
    let mut sum = first.to_vec();
    for buffer in rest {
        for (acc, &x) in sum.iter_mut().zip(buffer.iter()) {
            *acc += x;
        }
    }
    Ok(sum)
}

/// Adder block: sums whichever data inputs are connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adder;

impl Processor for Adder {
    fn process(&self, inputs: &ProcessInputs<'_>, _sample_rate: f64) -> Processed {
        let connected = inputs.connected();
        let Some(first) = connected.first() else {
            return Processed::degraded(inputs.silence(), ProcessIssue::MissingInput);
        };
        match add(&connected) {
            Ok(sum) => Processed::ok(sum),
            Err(ShapeMismatch { lengths }) => Processed::degraded(
                vec![0.0; first.len()],
                ProcessIssue::ShapeMismatch { lengths },
            ),
        }
    }
}
