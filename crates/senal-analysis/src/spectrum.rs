//! Spectral views of a block buffer

use crate::fft::Fft;

/// Magnitude of the positive-frequency spectrum, normalised by the buffer
/// length (`|rfft(x)| / N`).
///
/// A unit-amplitude sinusoid that falls exactly on a bin shows up as `0.5`.
pub fn magnitude_spectrum(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let n = signal.len();
    let fft = Fft::new(n);
    fft.forward(signal)
        .iter()
        .map(|c| c.norm() / n as f64)
        .collect()
}

/// Centre frequency of each bin returned by [`magnitude_spectrum`] for a
/// buffer of `len` samples.
pub fn bin_frequencies(len: usize, sample_rate: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    let bin_width = sample_rate / len as f64;
    (0..=len / 2).map(|k| k as f64 * bin_width).collect()
}

/// Normalised magnitude of the bin nearest to `frequency`.
///
/// Returns 0.0 for an empty signal or a frequency above Nyquist.
pub fn bin_magnitude(signal: &[f64], sample_rate: f64, frequency: f64) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let bin = (frequency * signal.len() as f64 / sample_rate).round() as usize;
    magnitude_spectrum(signal).get(bin).copied().unwrap_or(0.0)
}

/// Frequency of the strongest non-DC bin.
///
/// Returns `None` when the buffer is too short to have one or carries no
/// energy outside DC.
pub fn dominant_frequency(signal: &[f64], sample_rate: f64) -> Option<f64> {
    let spectrum = magnitude_spectrum(signal);
    let (bin, &peak) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    if peak <= 1e-12 {
        return None;
    }
    Some(bin as f64 * sample_rate / signal.len() as f64)
}
