//! Writing a whole run to disk, one WAV file per block.

use crate::wav::{WavSpec, write_wav};
use crate::Result;
use senal_core::BlockId;
use senal_engine::RunOutput;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// File stem for every block of `output`.
///
/// Stems are the blocks' descriptive labels. When two blocks share a label
/// (two identical tones, say) every one of them gets `_<index>` appended so
/// no file overwrites another.
pub fn export_file_names(output: &RunOutput) -> BTreeMap<BlockId, String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let labels: Vec<(BlockId, String)> = output
        .metadata
        .values()
        .map(|meta| (meta.id, meta.label()))
        .collect();
    for (_, label) in &labels {
        *counts.entry(label.clone()).or_default() += 1;
    }

    labels
        .into_iter()
        .map(|(id, label)| {
            let stem = if counts[&label] > 1 {
                format!("{label}_{}", id.index())
            } else {
                label
            };
            (id, stem)
        })
        .collect()
}

/// Writes every block buffer of `output` into `dir` as mono 32-bit float WAV.
///
/// The directory is created if needed. Returns the written paths in block
/// order.
pub fn export_run(dir: impl AsRef<Path>, output: &RunOutput) -> Result<Vec<PathBuf>> {
    let spec = WavSpec::mono(output.sample_rate)?;
    export_run_with(dir, output, spec)
}

/// Like [`export_run`] with an explicit WAV format.
///
/// Only the bit depth of `spec` is used. Files are always mono at the run's
/// sample rate.
pub fn export_run_with(
    dir: impl AsRef<Path>,
    output: &RunOutput,
    spec: WavSpec,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let spec = WavSpec {
        channels: 1,
        sample_rate: WavSpec::mono(output.sample_rate)?.sample_rate,
        ..spec
    };

    let names = export_file_names(output);
    let mut written = Vec::with_capacity(names.len());
    for (id, stem) in names {
        let Some(buffer) = output.buffer(id) else {
            continue;
        };
        let path = dir.join(format!("{stem}.wav"));
        write_wav(&path, buffer, spec)?;
        tracing::debug!("exported {} ({} samples)", path.display(), buffer.len());
        written.push(path);
    }

    tracing::info!("exported {} files to {}", written.len(), dir.display());
    Ok(written)
}
