//! Ideal brick-wall low-pass, used for both anti-aliasing (FAA) and
//! reconstruction (FR) filters.
//!
//! The whole buffer is transformed at once: every bin above the cutoff is
//! zeroed and the spectrum is transformed back. There is no transition band,
//! so the response rings around sharp edges in the input.

use crate::process::{ProcessInputs, ProcessIssue, Processed, Processor};
use rustfft::num_complex::Complex;
use senal_analysis::Fft;
use senal_core::{Buffer, LowPassParams};

/// Removes every frequency component of `input` above `cutoff`.
///
/// Bin `k` of an `N`-point transform sits at `min(k, N - k) · fs / N`; bins
/// strictly above the cutoff are cleared. The output has the input's length.
pub fn ideal_lowpass(input: &[f64], cutoff: f64, sample_rate: f64) -> Buffer {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let fft = Fft::new(n);
    let mut spectrum = fft.forward_full(input);
    let bin_width = sample_rate / n as f64;
    for (k, bin) in spectrum.iter_mut().enumerate() {
        let folded = k.min(n - k);
        if folded as f64 * bin_width > cutoff {
            *bin = Complex::new(0.0, 0.0);
        }
    }
    fft.inverse_full(&spectrum)
}

impl Processor for LowPassParams {
    fn process(&self, inputs: &ProcessInputs<'_>, sample_rate: f64) -> Processed {
        match inputs.primary() {
            Some(input) => Processed::ok(ideal_lowpass(input, self.cutoff, sample_rate)),
            None => Processed::degraded(inputs.silence(), ProcessIssue::MissingInput),
        }
    }
}
