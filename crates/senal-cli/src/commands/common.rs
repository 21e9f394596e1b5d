//! Helpers shared by several commands.

use anyhow::{Context, bail};
use clap::Args;
use senal_config::{Patch, get_factory_patch};
use std::path::PathBuf;

/// Where a command takes its patch from.
#[derive(Args, Debug)]
pub struct PatchSource {
    /// Patch file (TOML)
    #[arg(value_name = "PATCH", conflicts_with = "factory")]
    pub patch: Option<PathBuf>,

    /// Use a factory patch instead of a file
    #[arg(long, value_name = "NAME")]
    pub factory: Option<String>,
}

impl PatchSource {
    /// Loads the selected patch.
    pub fn load(&self) -> anyhow::Result<Patch> {
        match (&self.patch, &self.factory) {
            (Some(path), _) => Patch::load(path)
                .with_context(|| format!("failed to load patch {}", path.display())),
            (None, Some(name)) => get_factory_patch(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown factory patch: {}", name)),
            (None, None) => bail!("give a patch file or --factory NAME"),
        }
    }
}

/// Largest absolute sample value.
pub fn peak(buffer: &[f64]) -> f64 {
    buffer.iter().fold(0.0, |m, &x| m.max(x.abs()))
}

/// Root mean square of a buffer; 0 for an empty one.
pub fn rms(buffer: &[f64]) -> f64 {
    if buffer.is_empty() {
        return 0.0;
    }
    (buffer.iter().map(|x| x * x).sum::<f64>() / buffer.len() as f64).sqrt()
}
