//! The `run` command: evaluate a patch and summarise each block.

use super::common::{PatchSource, peak, rms};
use anyhow::Context;
use clap::Args;
use senal_analysis::dominant_frequency;
use senal_config::{BuiltPatch, Patch};
use senal_core::FanInPolicy;
use senal_engine::{BlockState, RunOutput, RunReport, run as run_graph};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    source: PatchSource,

    /// Override the patch's sample rate (Hz)
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Override the patch's duration (seconds)
    #[arg(long)]
    duration: Option<f64>,

    /// Seed for noise blocks
    #[arg(long)]
    seed: Option<u64>,

    /// Override how several wires into one input combine (last-wins, sum, reject)
    #[arg(long, value_parser = parse_fan_in)]
    fan_in: Option<FanInPolicy>,

    /// Write one WAV file per block into this directory
    #[arg(long, value_name = "DIR")]
    wav_dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_fan_in(s: &str) -> Result<FanInPolicy, String> {
    match s.to_lowercase().as_str() {
        "last-wins" | "last" => Ok(FanInPolicy::LastWins),
        "sum" => Ok(FanInPolicy::Sum),
        "reject" => Ok(FanInPolicy::Reject),
        _ => Err(format!("unknown fan-in policy '{s}'")),
    }
}

/// One block's line of the report.
#[derive(Debug, Serialize)]
struct BlockSummary {
    name: String,
    kind: String,
    label: String,
    state: BlockState,
    samples: usize,
    peak: f64,
    rms: f64,
    dominant_hz: Option<f64>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    patch: &'a str,
    sample_rate: f64,
    samples: usize,
    blocks: Vec<BlockSummary>,
    report: &'a RunReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<PathBuf>,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut patch = args.source.load()?;
    apply_overrides(&mut patch, &args);

    let built = patch
        .build_graph()
        .with_context(|| format!("patch '{}' is invalid", patch.name))?;
    let settings = patch.run_settings();
    let output = run_graph(&built.graph, &settings)?;
    let blocks = summarize(&built, &output);

    let files = match &args.wav_dir {
        Some(dir) => senal_io::export_run(dir, &output)
            .with_context(|| format!("failed to export to {}", dir.display()))?,
        None => Vec::new(),
    };

    if args.json {
        let report = JsonReport {
            patch: &patch.name,
            sample_rate: output.sample_rate,
            samples: output.time.len(),
            blocks,
            report: &output.report,
            files,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {} samples at {} Hz, {} rounds",
        patch.name,
        output.time.len(),
        output.sample_rate,
        output.report.rounds
    );
    println!();
    println!(
        "  {:12}  {:10}  {:10}  {:>9}  {:>9}  {:>10}",
        "Block", "Type", "State", "Peak", "RMS", "Dominant"
    );
    println!(
        "  {:12}  {:10}  {:10}  {:>9}  {:>9}  {:>10}",
        "-----", "----", "-----", "----", "---", "--------"
    );
    for b in &blocks {
        let dominant = b
            .dominant_hz
            .map_or_else(|| "-".to_string(), |f| format!("{f:.1} Hz"));
        println!(
            "  {:12}  {:10}  {:10}  {:>9.4}  {:>9.4}  {:>10}",
            b.name, b.kind, b.state, b.peak, b.rms, dominant
        );
    }

    if !output.report.diagnostics.is_empty() {
        println!();
        println!("Diagnostics:");
        for diag in &output.report.diagnostics {
            let name = diag.block().and_then(|id| built.name_of(id));
            match name {
                Some(name) => println!("  [{name}] {diag}"),
                None => println!("  {diag}"),
            }
        }
    }

    if !files.is_empty() {
        println!();
        println!("Wrote {} files:", files.len());
        for path in &files {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

fn apply_overrides(patch: &mut Patch, args: &RunArgs) {
    if let Some(sample_rate) = args.sample_rate {
        patch.run.sample_rate = sample_rate;
    }
    if let Some(duration) = args.duration {
        patch.run.duration = duration;
    }
    if let Some(seed) = args.seed {
        patch.run.seed = Some(seed);
    }
    if let Some(policy) = args.fan_in {
        patch.run.fan_in = policy;
    }
}

fn summarize(built: &BuiltPatch, output: &RunOutput) -> Vec<BlockSummary> {
    output
        .metadata
        .values()
        .map(|meta| {
            let buffer = output.buffer(meta.id).map_or(&[][..], Vec::as_slice);
            let state = if output.report.stuck.contains(&meta.id) {
                BlockState::Stuck
            } else {
                BlockState::Resolved
            };
            BlockSummary {
                name: built
                    .name_of(meta.id)
                    .map_or_else(|| meta.id.to_string(), str::to_string),
                kind: meta.kind.id().to_string(),
                label: meta.label(),
                state,
                samples: buffer.len(),
                peak: peak(buffer),
                rms: rms(buffer),
                dominant_hz: dominant_frequency(buffer, output.sample_rate),
            }
        })
        .collect()
}
