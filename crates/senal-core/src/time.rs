//! Shared time base of a simulation run.

use thiserror::Error;

/// A block's output: one `f64` sample per time step.
pub type Buffer = Vec<f64>;

/// Errors produced when building a [`TimeBase`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeBaseError {
    /// Sample rate is zero, negative, or not finite.
    #[error("sample rate must be a positive finite number, got {0}")]
    SampleRate(f64),
    /// Duration is negative or not finite.
    #[error("duration must be a non-negative finite number, got {0}")]
    Duration(f64),
}

/// Sample clock shared by every block of a run.
///
/// Sample `i` sits at `t = i / sample_rate`. The sample count is
/// `round(sample_rate * duration)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeBase {
    sample_rate: f64,
    len: usize,
}

impl TimeBase {
    /// Creates a time base covering `duration` seconds.
    pub fn new(sample_rate: f64, duration: f64) -> Result<Self, TimeBaseError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(TimeBaseError::SampleRate(sample_rate));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(TimeBaseError::Duration(duration));
        }
        Ok(Self {
            sample_rate,
            len: (sample_rate * duration).round() as usize,
        })
    }

    /// Creates a time base with an exact sample count.
    pub fn from_len(sample_rate: f64, len: usize) -> Result<Self, TimeBaseError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(TimeBaseError::SampleRate(sample_rate));
        }
        Ok(Self { sample_rate, len })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of samples (the run's nominal buffer length).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the run has no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Covered duration in seconds.
    pub fn duration(&self) -> f64 {
        self.len as f64 / self.sample_rate
    }

    /// The time of every sample, in seconds.
    pub fn times(&self) -> Vec<f64> {
        (0..self.len).map(|i| i as f64 / self.sample_rate).collect()
    }

    /// A silent buffer of the nominal length.
    pub fn zeros(&self) -> Buffer {
        vec![0.0; self.len]
    }
}
