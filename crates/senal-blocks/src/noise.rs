//! Gaussian noise generator.

use crate::process::Source;
use rand::{Rng, RngCore};
use senal_core::{Buffer, NoiseParams};
use std::f64::consts::TAU;

/// One standard-normal draw (Box-Muller).
pub fn gaussian(rng: &mut dyn RngCore) -> f64 {
    // 1 - U keeps the logarithm's argument in (0, 1].
    let u1 = 1.0 - rng.gen_range(0.0..1.0_f64);
    let u2 = rng.gen_range(0.0..1.0_f64);
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

impl Source for NoiseParams {
    /// Normal noise with σ = pp/6, then rescaled so that its maximum minus its
    /// minimum equals the peak-to-peak amplitude. A flat draw is left as-is.
    fn generate(&self, time: &[f64], _sample_rate: f64, rng: &mut dyn RngCore) -> Buffer {
        let sigma = self.peak_to_peak / 6.0;
        let mut noise: Buffer = (0..time.len()).map(|_| gaussian(rng) * sigma).collect();

        let (min, max) = noise
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let spread = max - min;
        if spread > 0.0 {
            let scale = self.peak_to_peak / spread;
            for x in &mut noise {
                *x *= scale;
            }
        }
        noise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn render(pp: f64, len: usize, seed: u64) -> Buffer {
        let time = vec![0.0; len];
        NoiseParams::white(pp).generate(&time, 44100.0, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn span_matches_peak_to_peak() {
        let noise = render(2.0, 4096, 3);
        let max = noise.iter().copied().fold(f64::MIN, f64::max);
        let min = noise.iter().copied().fold(f64::MAX, f64::min);
        assert!((max - min - 2.0).abs() < 1e-9);
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        assert_eq!(render(1.0, 512, 42), render(1.0, 512, 42));
        assert_ne!(render(1.0, 512, 42), render(1.0, 512, 43));
    }

    #[test]
    fn gaussian_draws_look_standard() {
        let mut rng = StdRng::seed_from_u64(9);
        let draws: Vec<f64> = (0..20000).map(|_| gaussian(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / draws.len() as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn degenerate_lengths_stay_finite() {
        assert!(render(1.0, 0, 1).is_empty());
        let single = render(1.0, 1, 1);
        assert_eq!(single.len(), 1);
        assert!(single[0].is_finite());
        assert!(render(0.0, 16, 1).iter().all(|&x| x == 0.0));
    }
}
