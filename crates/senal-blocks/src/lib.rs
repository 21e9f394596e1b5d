//! Senal Blocks - behaviour of every block type
//!
//! Each block type of the sandbox maps to one implementation here:
//!
//! - [`SignalParams`] - sum of sinusoids sharing one amplitude
//! - [`ClockParams`] - 0/1 square wave with duty cycle and phase
//! - [`NoiseParams`] - Gaussian noise rescaled to a peak-to-peak span
//! - [`LowPassParams`] - ideal brick-wall low-pass (both FAA and FR)
//! - [`SampleHold`] - samples its input on clock rising edges
//! - [`AnalogSwitch`] - gates its input with the clock level
//! - [`Adder`] - elementwise sum of its inputs
//!
//! Sources implement [`Source`], everything else implements [`Processor`].
//! [`role`] picks the right one for a [`BlockParams`].
//!
//! ## Example
//!
//! ```rust
//! use senal_blocks::{ProcessInputs, Processor, SampleHold, Source};
//! use senal_core::{ClockParams, SignalParams, TimeBase};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let base = TimeBase::new(8000.0, 0.01).unwrap();
//! let time = base.times();
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let signal = SignalParams::tone(100.0, 1.0).generate(&time, 8000.0, &mut rng);
//! let clock = ClockParams::new(1000.0, 0.5).generate(&time, 8000.0, &mut rng);
//!
//! let inputs = ProcessInputs::new(base.len())
//!     .with_data(vec![Some(signal.as_slice())])
//!     .with_clock(Some(clock.as_slice()));
//! let held = SampleHold.process(&inputs, 8000.0);
//! assert_eq!(held.buffer.len(), signal.len());
//! assert!(held.issue.is_none());
//! ```

pub mod adder;
pub mod analog_switch;
pub mod clock;
pub mod lowpass;
pub mod noise;
pub mod process;
pub mod sample_hold;
pub mod signal;

pub use adder::{Adder, ShapeMismatch, add};
pub use analog_switch::{AnalogSwitch, analog_switch};
pub use lowpass::ideal_lowpass;
pub use noise::gaussian;
pub use process::{ProcessInputs, ProcessIssue, Processed, Processor, Source};
pub use sample_hold::{SampleHold, sample_hold};

use senal_core::BlockParams;
#[cfg(doc)]
use senal_core::{ClockParams, LowPassParams, NoiseParams, SignalParams};

/// How a block produces its buffer.
#[derive(Clone, Copy)]
pub enum Role<'a> {
    /// Computes its output from the time vector alone.
    Source(&'a dyn Source),
    /// Computes its output from the buffers wired into its inputs.
    Processor(&'a dyn Processor),
}

impl std::fmt::Debug for Role<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Source(_) => f.write_str("Source"),
            Role::Processor(_) => f.write_str("Processor"),
        }
    }
}

/// Behaviour behind a block's parameters.
pub fn role(params: &BlockParams) -> Role<'_> {
    match params {
        BlockParams::Signal(p) => Role::Source(p),
        BlockParams::Clock(p) => Role::Source(p),
        BlockParams::Noise(p) => Role::Source(p),
        BlockParams::Faa(p) | BlockParams::Fr(p) => Role::Processor(p),
        BlockParams::SampleHold => Role::Processor(&SampleHold),
        BlockParams::AnalogSwitch => Role::Processor(&AnalogSwitch),
        BlockParams::Adder => Role::Processor(&Adder),
    }
}

/// Renders a source block. Returns `None` for processing blocks.
pub fn render_source(
    params: &BlockParams,
    time: &[f64],
    sample_rate: f64,
    rng: &mut dyn rand::RngCore,
) -> Option<senal_core::Buffer> {
    match role(params) {
        Role::Source(source) => Some(source.generate(time, sample_rate, rng)),
        Role::Processor(_) => None,
    }
}

/// Runs a processing block. Returns `None` for source blocks.
pub fn render_processor(
    params: &BlockParams,
    inputs: &ProcessInputs<'_>,
    sample_rate: f64,
) -> Option<Processed> {
    match role(params) {
        Role::Processor(processor) => Some(processor.process(inputs, sample_rate)),
        Role::Source(_) => None,
    }
}
