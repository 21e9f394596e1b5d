//! Analysis helpers for senal signal buffers.
//!
//! - [`Fft`]: cached forward/inverse FFT over `f64` buffers
//! - [`magnitude_spectrum`], [`bin_frequencies`], [`dominant_frequency`]:
//!   the frequency-domain view the plotting collaborator draws
//! - [`rising_edges`], [`estimate_clock_frequency`]: clock edge detection
//!   shared by the clocked blocks

pub mod edges;
pub mod fft;
pub mod spectrum;

pub use edges::{CLOCK_THRESHOLD, estimate_clock_frequency, is_rising_edge, rising_edges};
pub use fft::Fft;
pub use spectrum::{bin_frequencies, bin_magnitude, dominant_frequency, magnitude_spectrum};
