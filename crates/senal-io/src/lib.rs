//! Audio file output for senal runs.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for single buffers
//! - **Run export**: [`export_run`] writes every block's buffer of a run as
//!   its own mono WAV file, named after the block
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use senal_core::{BlockKind, Graph};
//! use senal_engine::{RunSettings, run};
//! use senal_io::export_run;
//!
//! let mut graph = Graph::new();
//! graph.add_default(BlockKind::Signal);
//! let output = run(&graph, &RunSettings::default())?;
//!
//! for path in export_run("out", &output)? {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod export;
mod wav;

pub use export::{export_file_names, export_run, export_run_with};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The sample rate cannot be stored in a WAV header.
    #[error("sample rate {0} Hz cannot be written to a WAV file")]
    InvalidSampleRate(f64),

    /// The requested sample format is not supported.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
