//! Sum-of-sinusoids generator.

use crate::process::Source;
use rand::RngCore;
use senal_core::{Buffer, SignalParams};
use std::f64::consts::TAU;

impl Source for SignalParams {
    /// `y(t) = (A / n) · Σ sin(2π·fᵢ·t)`: the amplitude is split evenly
    /// between the `n` components.
    fn generate(&self, time: &[f64], _sample_rate: f64, _rng: &mut dyn RngCore) -> Buffer {
        if self.frequencies.is_empty() {
            return vec![0.0; time.len()];
        }
        let share = self.amplitude / self.frequencies.len() as f64;
        time.iter()
            .map(|&t| {
                self.frequencies
                    .iter()
                    .map(|&f| share * (TAU * f * t).sin())
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use senal_core::TimeBase;

    #[test]
    fn single_tone_is_a_plain_sine() {
        let base = TimeBase::new(44100.0, 1.0).unwrap();
        let time = base.times();
        let mut rng = StdRng::seed_from_u64(0);
        let y = SignalParams::tone(1000.0, 1.0).generate(&time, 44100.0, &mut rng);
        assert_eq!(y.len(), 44100);
        for (i, &v) in y.iter().enumerate() {
            let expected = (TAU * 1000.0 * i as f64 / 44100.0).sin();
            assert!((v - expected).abs() < 1e-9, "sample {i}: {v} vs {expected}");
        }
    }

    #[test]
    fn amplitude_is_shared_between_components() {
        let params = SignalParams {
            frequencies: vec![100.0, 300.0],
            amplitude: 2.0,
        };
        let time = [0.00125];
        let mut rng = StdRng::seed_from_u64(0);
        let y = params.generate(&time, 8000.0, &mut rng);
        let expected = (TAU * 100.0 * 0.00125).sin() + (TAU * 300.0 * 0.00125).sin();
        assert!((y[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_time_gives_empty_buffer() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(SignalParams::default().generate(&[], 1.0, &mut rng).is_empty());
    }
}
