//! Square-wave clock generator.

use crate::process::Source;
use rand::RngCore;
use senal_core::{Buffer, ClockParams};
use std::f64::consts::TAU;

impl Source for ClockParams {
    /// High (1.0) while the phase-shifted position inside the period is below
    /// the duty cycle, low (0.0) otherwise.
    fn generate(&self, time: &[f64], _sample_rate: f64, _rng: &mut dyn RngCore) -> Buffer {
        let period = 1.0 / self.frequency;
        let offset = self.phase / TAU;
        time.iter()
            .map(|&t| {
                let position = (t.rem_euclid(period) / period + offset).rem_euclid(1.0);
                if position < self.duty_cycle { 1.0 } else { 0.0 }
            })
            .collect()
    }
}
