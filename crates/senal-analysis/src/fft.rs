//! FFT wrapper over `rustfft` for real `f64` buffers.

use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// FFT processor with plan caching.
pub struct Fft {
    planner: FftPlanner<f64>,
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        // An empty buffer never reaches the plan; keep a valid one-point plan.
        let fft = planner.plan_fft_forward(size.max(1));
        let ifft = planner.plan_fft_inverse(size.max(1));

        Self {
            planner,
            fft,
            ifft,
            size,
        }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Resize the FFT (creates new plan if needed)
    pub fn resize(&mut self, size: usize) {
        if size != self.size {
            self.fft = self.planner.plan_fft_forward(size.max(1));
            self.ifft = self.planner.plan_fft_inverse(size.max(1));
            self.size = size;
        }
    }

    /// Full complex spectrum of a real input (all `size` bins).
    ///
    /// Input is zero-padded or truncated to the FFT size.
    pub fn forward_full(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));
        if self.size > 0 {
            self.fft.process(&mut buffer);
        }
        buffer
    }

    /// Positive-frequency half of the spectrum (DC to Nyquist,
    /// `size / 2 + 1` bins).
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut spectrum = self.forward_full(input);
        spectrum.truncate(self.size / 2 + 1);
        spectrum
    }

    /// Inverse of [`forward_full`](Self::forward_full): normalised real part.
    pub fn inverse_full(&self, spectrum: &[Complex<f64>]) -> Vec<f64> {
        let mut buffer = spectrum.to_vec();
        buffer.resize(self.size, Complex::new(0.0, 0.0));
        if self.size == 0 {
            return Vec::new();
        }
        self.ifft.process(&mut buffer);

        let scale = 1.0 / self.size as f64;
        buffer.iter().map(|c| c.re * scale).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn roundtrip_restores_signal() {
        let fft = Fft::new(256);
        let input: Vec<f64> = (0..256)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / 256.0).sin())
            .collect();

        let spectrum = fft.forward_full(&input);
        let reconstructed = fft.inverse_full(&spectrum);

        for (a, b) in input.iter().zip(reconstructed.iter()) {
            assert!((a - b).abs() < 1e-9, "Mismatch: {} vs {}", a, b);
        }
    }

    #[test]
    fn half_spectrum_has_nyquist_bin() {
        let fft = Fft::new(8);
        assert_eq!(fft.forward(&[1.0; 8]).len(), 5);
        let fft = Fft::new(7);
        assert_eq!(fft.forward(&[1.0; 7]).len(), 4);
    }

    #[test]
    fn dc_lands_in_bin_zero() {
        let fft = Fft::new(16);
        let spectrum = fft.forward(&[0.5; 16]);
        assert!((spectrum[0].re - 8.0).abs() < 1e-12);
        for bin in &spectrum[1..] {
            assert!(bin.norm() < 1e-12);
        }
    }

    #[test]
    fn resize_replans() {
        let mut fft = Fft::new(16);
        fft.resize(32);
        assert_eq!(fft.size(), 32);
        assert_eq!(fft.forward_full(&[1.0]).len(), 32);
    }

    #[test]
    fn empty_size_is_harmless() {
        let fft = Fft::new(0);
        assert!(fft.forward_full(&[]).is_empty());
        assert!(fft.inverse_full(&[]).is_empty());
    }
}
