//! Capabilities shared by the block implementations.

use rand::RngCore;
use senal_core::Buffer;

/// A block that computes its buffer from the time vector.
pub trait Source {
    /// Produces one sample per entry of `time`.
    fn generate(&self, time: &[f64], sample_rate: f64, rng: &mut dyn RngCore) -> Buffer;
}

/// A block that computes its buffer from upstream buffers.
pub trait Processor {
    /// Processes the gathered input buffers as one batch.
    fn process(&self, inputs: &ProcessInputs<'_>, sample_rate: f64) -> Processed;
}

/// Buffers wired into a processing block.
#[derive(Debug, Clone, Default)]
pub struct ProcessInputs<'a> {
    /// One entry per data input slot; `None` when nothing is connected.
    pub data: Vec<Option<&'a [f64]>>,
    /// The clock buffer, if the block has a clock input and it is connected.
    pub clock: Option<&'a [f64]>,
    /// Length of the run's time vector.
    pub nominal_len: usize,
}

impl<'a> ProcessInputs<'a> {
    /// Empty inputs for a run of `nominal_len` samples.
    pub fn new(nominal_len: usize) -> Self {
        Self {
            data: Vec::new(),
            clock: None,
            nominal_len,
        }
    }

    /// Sets the data slots.
    pub fn with_data(mut self, data: Vec<Option<&'a [f64]>>) -> Self {
        self.data = data;
        self
    }

    /// Sets the clock buffer.
    pub fn with_clock(mut self, clock: Option<&'a [f64]>) -> Self {
        self.clock = clock;
        self
    }

    /// The first data slot, when connected.
    pub fn primary(&self) -> Option<&'a [f64]> {
        self.data.first().copied().flatten()
    }

    /// All connected data buffers in slot order.
    pub fn connected(&self) -> Vec<&'a [f64]> {
        self.data.iter().flatten().copied().collect()
    }

    /// Zero buffer of the nominal length.
    pub fn silence(&self) -> Buffer {
        vec![0.0; self.nominal_len]
    }
}

/// Something a processor had to work around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessIssue {
    /// No data input was connected; the output is silence.
    MissingInput,
    /// No clock was connected; the input passes through.
    MissingClock,
    /// Inputs of different lengths; the output is silence of the first length.
    ShapeMismatch {
        /// Length of every connected input, in slot order.
        lengths: Vec<usize>,
    },
}

/// Output of [`Processor::process`].
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    /// The block's output buffer.
    pub buffer: Buffer,
    /// Set when the block fell back to a degraded output.
    pub issue: Option<ProcessIssue>,
}

impl Processed {
    /// A clean result.
    pub fn ok(buffer: Buffer) -> Self {
        Self {
            buffer,
            issue: None,
        }
    }

    /// A result produced while working around `issue`.
    pub fn degraded(buffer: Buffer, issue: ProcessIssue) -> Self {
        Self {
            buffer,
            issue: Some(issue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_skips_empty_slots() {
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        let inputs = ProcessInputs::new(2).with_data(vec![None, Some(&a[..]), Some(&b[..])]);
        assert_eq!(inputs.connected(), vec![&a[..], &b[..]]);
        assert!(inputs.primary().is_none());
    }

    #[test]
    fn silence_uses_nominal_length() {
        assert_eq!(ProcessInputs::new(3).silence(), vec![0.0; 3]);
    }
}
