//! One-call simulation of a graph: time base, seeding, evaluation and the
//! metadata a viewer or exporter needs.

use crate::evaluator::{Diagnostic, Evaluator};
use rand::{SeedableRng, rngs::StdRng};
use senal_core::{BlockId, BlockKind, BlockParams, Buffer, Graph, TimeBase, TimeBaseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Settings of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Seed for noise blocks; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Record each processing block's data inputs.
    pub capture_inputs: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            duration: 1.0,
            seed: None,
            capture_inputs: false,
        }
    }
}

impl RunSettings {
    /// Settings with the given sample rate and duration.
    pub fn new(sample_rate: f64, duration: f64) -> Self {
        Self {
            sample_rate,
            duration,
            ..Self::default()
        }
    }

    /// Fixes the noise seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables input capture.
    pub fn with_capture_inputs(mut self, capture: bool) -> Self {
        self.capture_inputs = capture;
        self
    }

    /// Time base described by these settings.
    pub fn time_base(&self) -> Result<TimeBase, RunError> {
        Ok(TimeBase::new(self.sample_rate, self.duration)?)
    }
}

/// Errors that prevent a run from starting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// Sample rate or duration unusable.
    #[error("invalid time base: {0}")]
    InvalidTimeBase(#[from] TimeBaseError),
}

/// What a block was when the run happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockMeta {
    /// Block the metadata describes.
    pub id: BlockId,
    /// Block type.
    pub kind: BlockKind,
    /// Parameters at evaluation time.
    pub params: BlockParams,
}

impl BlockMeta {
    /// Descriptive name built from the block's type and key parameter, such
    /// as `Signal_1freqs_1000Hz`, `FAA_fc_500Hz`, `Clock_1000Hz` or
    /// `Noise_amp_1`. Other blocks fall back to `<type>_<index>`.
    pub fn label(&self) -> String {
        let kind = self.kind.label();
        match &self.params {
            BlockParams::Signal(p) => match p.frequencies.first() {
                Some(f0) => format!("{kind}_{}freqs_{f0}Hz", p.frequencies.len()),
                None => format!("{kind}_{}", self.id.index()),
            },
            BlockParams::Faa(p) => format!("{kind}_fc_{}Hz", p.cutoff),
            BlockParams::Clock(p) => format!("{kind}_{}Hz", p.frequency),
            BlockParams::Noise(p) => format!("{kind}_amp_{}", p.peak_to_peak),
            _ => format!("{kind}_{}", self.id.index()),
        }
    }
}

/// Summary of how evaluation went.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Dependent rounds executed.
    pub rounds: usize,
    /// Blocks that never resolved.
    pub stuck: Vec<BlockId>,
    /// Everything the evaluator noted.
    pub diagnostics: Vec<Diagnostic>,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Output buffer of every block.
    pub buffers: BTreeMap<BlockId, Buffer>,
    /// Shared time vector, `t[i] = i / sample_rate`.
    pub time: Vec<f64>,
    /// Type and parameters of every block.
    pub metadata: BTreeMap<BlockId, BlockMeta>,
    /// Evaluation summary.
    pub report: RunReport,
    /// Captured data inputs, empty unless capture was enabled.
    pub inputs: BTreeMap<BlockId, Vec<Buffer>>,
    /// Sample rate the run used.
    pub sample_rate: f64,
}

impl RunOutput {
    /// Output buffer of `block`.
    pub fn buffer(&self, block: BlockId) -> Option<&Buffer> {
        self.buffers.get(&block)
    }
}

/// Evaluates `graph` under `settings`.
///
/// The graph is only borrowed; repeated runs with the same seed produce
/// identical buffers.
pub fn run(graph: &Graph, settings: &RunSettings) -> Result<RunOutput, RunError> {
    let base = settings.time_base()?;
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    #[cfg(feature = "tracing")]
    tracing::info!(
        "run: {} blocks, {} samples at {} Hz",
        graph.block_count(),
        base.len(),
        base.sample_rate()
    );

    let eval = Evaluator::new(graph)
        .capture_inputs(settings.capture_inputs)
        .evaluate(&base, &mut rng);

    let metadata = graph
        .blocks()
        .map(|b| {
            let meta = BlockMeta {
                id: b.id(),
                kind: b.kind(),
                params: b.params().clone(),
            };
            (b.id(), meta)
        })
        .collect();

    let report = RunReport {
        rounds: eval.rounds,
        stuck: eval.stuck(),
        diagnostics: eval.diagnostics,
    };
    #[cfg(feature = "tracing")]
    if !report.stuck.is_empty() {
        tracing::warn!("run: {} blocks stuck", report.stuck.len());
    }

    Ok(RunOutput {
        buffers: eval.buffers,
        time: base.times(),
        metadata,
        report,
        inputs: eval.inputs,
        sample_rate: base.sample_rate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use senal_core::{ClockParams, LowPassParams, NoiseParams, SignalParams};

    fn meta(graph: &mut Graph, params: BlockParams) -> BlockMeta {
        let id = graph.add_block(params.clone()).unwrap();
        BlockMeta {
            id,
            kind: params.kind(),
            params,
        }
    }

    #[test]
    fn labels_follow_exporter_names() {
        let mut g = Graph::new();
        let sig = meta(
            &mut g,
            BlockParams::Signal(SignalParams {
                frequencies: vec![1000.0, 3000.0],
                amplitude: 1.0,
            }),
        );
        assert_eq!(sig.label(), "Signal_2freqs_1000Hz");
        let faa = meta(&mut g, BlockParams::Faa(LowPassParams::new(500.0)));
        assert_eq!(faa.label(), "FAA_fc_500Hz");
        let clk = meta(&mut g, BlockParams::Clock(ClockParams::new(1000.0, 0.5)));
        assert_eq!(clk.label(), "Clock_1000Hz");
        let noise = meta(&mut g, BlockParams::Noise(NoiseParams::white(0.5)));
        assert_eq!(noise.label(), "Noise_amp_0.5");
        let adder = meta(&mut g, BlockParams::Adder);
        assert_eq!(adder.label(), "Adder_4");
        let fr = meta(&mut g, BlockParams::Fr(LowPassParams::new(500.0)));
        assert_eq!(fr.label(), "FR_5");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let graph = Graph::new();
        assert!(matches!(
            run(&graph, &RunSettings::new(0.0, 1.0)),
            Err(RunError::InvalidTimeBase(TimeBaseError::SampleRate(_)))
        ));
        assert!(matches!(
            run(&graph, &RunSettings::new(1000.0, f64::NAN)),
            Err(RunError::InvalidTimeBase(TimeBaseError::Duration(_)))
        ));
    }

    #[test]
    fn zero_duration_runs_empty() {
        let mut graph = Graph::new();
        let sig = graph.add_default(BlockKind::Signal);
        let out = run(&graph, &RunSettings::new(1000.0, 0.0)).unwrap();
        assert!(out.time.is_empty());
        assert!(out.buffers[&sig].is_empty());
    }

    #[test]
    fn metadata_covers_every_block() {
        let mut graph = Graph::new();
        let sig = graph.add_default(BlockKind::Signal);
        let sh = graph.add_default(BlockKind::SampleHold);
        let out = run(&graph, &RunSettings::new(1000.0, 0.01)).unwrap();
        assert_eq!(out.metadata.len(), 2);
        assert_eq!(out.metadata[&sig].kind, BlockKind::Signal);
        assert_eq!(out.metadata[&sh].params, BlockParams::SampleHold);
        assert_eq!(out.sample_rate, 1000.0);
    }
}
