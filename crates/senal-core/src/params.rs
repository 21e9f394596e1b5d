//! Per-kind block parameters.
//!
//! [`BlockParams`] is the closed tagged variant over every block kind. Its
//! variant *is* the block's type: [`BlockParams::kind`] derives the
//! [`BlockKind`] tag, so a block can never carry parameters of another kind.
//!
//! Defaults mirror the values a freshly dropped block gets on the canvas.
//!
//! # TOML Format
//!
//! ```toml
//! type = "clock"
//! frequency = 1000.0
//! duty_cycle = 0.5
//! phase = 0.0
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::BlockKind;

/// Errors produced by [`BlockParams::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    /// A parameter is NaN or infinite.
    #[error("parameter '{param}' must be finite, got {value}")]
    NonFinite {
        /// Parameter name.
        param: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A parameter must be strictly positive.
    #[error("parameter '{param}' must be positive, got {value}")]
    NotPositive {
        /// Parameter name.
        param: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A parameter must not be negative.
    #[error("parameter '{param}' must not be negative, got {value}")]
    Negative {
        /// Parameter name.
        param: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A signal generator needs at least one component.
    #[error("signal needs at least one frequency component")]
    NoFrequencies,

    /// Duty cycle outside the open interval (0, 1).
    #[error("duty cycle {0} outside (0, 1)")]
    DutyCycle(f64),
}

/// Sum-of-sinusoids generator parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    /// Component frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Total peak amplitude, split evenly across components.
    pub amplitude: f64,
}

impl SignalParams {
    /// A single sinusoid.
    pub fn tone(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequencies: vec![frequency],
            amplitude,
        }
    }
}

impl Default for SignalParams {
    fn default() -> Self {
        Self::tone(1000.0, 1.0)
    }
}

/// Square-wave clock parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockParams {
    /// Clock frequency in Hz.
    pub frequency: f64,
    /// Fraction of each period spent high, in (0, 1).
    pub duty_cycle: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

impl ClockParams {
    /// A clock with zero phase.
    pub fn new(frequency: f64, duty_cycle: f64) -> Self {
        Self {
            frequency,
            duty_cycle,
            phase: 0.0,
        }
    }

    /// Sets the phase from degrees, the unit the editor dialog uses.
    pub fn with_phase_degrees(mut self, degrees: f64) -> Self {
        self.phase = degrees.to_radians();
        self
    }
}

impl Default for ClockParams {
    fn default() -> Self {
        Self::new(1000.0, 0.5)
    }
}

/// Spectral colour of a noise generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseColor {
    /// Flat spectrum, Gaussian amplitude distribution.
    #[default]
    White,
}

/// Noise generator parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Target distance between the largest and smallest sample.
    pub peak_to_peak: f64,
    /// Spectral colour.
    pub color: NoiseColor,
}

impl NoiseParams {
    /// White noise with the given peak-to-peak span.
    pub fn white(peak_to_peak: f64) -> Self {
        Self {
            peak_to_peak,
            color: NoiseColor::White,
        }
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::white(1.0)
    }
}

/// Ideal low-pass filter parameters (FAA and FR blocks).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowPassParams {
    /// Frequencies above this (Hz) are removed.
    pub cutoff: f64,
}

impl LowPassParams {
    /// A filter with the given cutoff.
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl Default for LowPassParams {
    fn default() -> Self {
        Self::new(5000.0)
    }
}

/// Parameters of a block, tagged by block kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockParams {
    /// Sum of sinusoids.
    Signal(SignalParams),
    /// Square-wave clock.
    Clock(ClockParams),
    /// Gaussian noise.
    Noise(NoiseParams),
    /// Anti-aliasing low-pass.
    Faa(LowPassParams),
    /// Reconstruction low-pass.
    Fr(LowPassParams),
    /// Sample-and-hold (no parameters).
    SampleHold,
    /// Analog switch (no parameters).
    AnalogSwitch,
    /// Adder (no parameters).
    Adder,
}

impl BlockParams {
    /// Default parameters for a kind.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Signal => Self::Signal(SignalParams::default()),
            BlockKind::Clock => Self::Clock(ClockParams::default()),
            BlockKind::Noise => Self::Noise(NoiseParams::default()),
            BlockKind::Faa => Self::Faa(LowPassParams::default()),
            BlockKind::Fr => Self::Fr(LowPassParams::default()),
            BlockKind::SampleHold => Self::SampleHold,
            BlockKind::AnalogSwitch => Self::AnalogSwitch,
            BlockKind::Adder => Self::Adder,
        }
    }

    /// The block kind these parameters belong to.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Signal(_) => BlockKind::Signal,
            Self::Clock(_) => BlockKind::Clock,
            Self::Noise(_) => BlockKind::Noise,
            Self::Faa(_) => BlockKind::Faa,
            Self::Fr(_) => BlockKind::Fr,
            Self::SampleHold => BlockKind::SampleHold,
            Self::AnalogSwitch => BlockKind::AnalogSwitch,
            Self::Adder => BlockKind::Adder,
        }
    }

    /// Checks that every value is usable by the block library.
    pub fn validate(&self) -> Result<(), ParamError> {
        match self {
            Self::Signal(p) => {
                if p.frequencies.is_empty() {
                    return Err(ParamError::NoFrequencies);
                }
                for &f in &p.frequencies {
                    positive("frequency", f)?;
                }
                finite("amplitude", p.amplitude)
            }
            Self::Clock(p) => {
                positive("frequency", p.frequency)?;
                finite("duty_cycle", p.duty_cycle)?;
                if p.duty_cycle <= 0.0 || p.duty_cycle >= 1.0 {
                    return Err(ParamError::DutyCycle(p.duty_cycle));
                }
                finite("phase", p.phase)
            }
            Self::Noise(p) => non_negative("peak_to_peak", p.peak_to_peak),
            Self::Faa(p) | Self::Fr(p) => non_negative("cutoff", p.cutoff),
            Self::SampleHold | Self::AnalogSwitch | Self::Adder => Ok(()),
        }
    }
}

fn finite(param: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NonFinite { param, value })
    }
}

fn positive(param: &'static str, value: f64) -> Result<(), ParamError> {
    finite(param, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::NotPositive { param, value })
    }
}

fn non_negative(param: &'static str, value: f64) -> Result<(), ParamError> {
    finite(param, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::Negative { param, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_tagged() {
        for kind in BlockKind::ALL {
            let params = BlockParams::default_for(kind);
            assert_eq!(params.kind(), kind);
            assert!(params.validate().is_ok(), "{kind:?} defaults rejected");
        }
    }

    #[test]
    fn signal_without_components_is_rejected() {
        let params = BlockParams::Signal(SignalParams {
            frequencies: vec![],
            amplitude: 1.0,
        });
        assert_eq!(params.validate(), Err(ParamError::NoFrequencies));
    }

    #[test]
    fn duty_cycle_must_be_inside_unit_interval() {
        for duty in [0.0, 1.0, 1.5, -0.2] {
            let params = BlockParams::Clock(ClockParams::new(1000.0, duty));
            assert_eq!(params.validate(), Err(ParamError::DutyCycle(duty)));
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let params = BlockParams::Faa(LowPassParams::new(f64::NAN));
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFinite { param: "cutoff", .. })
        ));
        let params = BlockParams::Signal(SignalParams::tone(f64::INFINITY, 1.0));
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFinite {
                param: "frequency",
                ..
            })
        ));
    }

    #[test]
    fn zero_peak_to_peak_is_allowed() {
        assert!(BlockParams::Noise(NoiseParams::white(0.0)).validate().is_ok());
        assert!(BlockParams::Noise(NoiseParams::white(-1.0)).validate().is_err());
    }

    #[test]
    fn phase_degrees_convert_to_radians() {
        let clock = ClockParams::default().with_phase_degrees(180.0);
        assert!((clock.phase - core::f64::consts::PI).abs() < 1e-12);
    }
}
