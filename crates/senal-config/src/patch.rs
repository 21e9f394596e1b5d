//! Patch file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use senal_core::{BlockId, BlockParams, FanInPolicy, Graph};
use senal_engine::RunSettings;

use crate::endpoint::{Endpoint, PortSelector};
use crate::error::ConfigError;
use crate::validation::validate_patch;

/// A block diagram stored as TOML: named blocks, their parameters, the wires
/// between them and the settings to run them with.
///
/// # TOML Format
///
/// ```toml
/// name = "Sampling"
/// description = "Tone through an anti-aliasing filter into a sampler"
///
/// [run]
/// sample_rate = 44100.0
/// duration = 0.05
/// seed = 7
///
/// [[blocks]]
/// name = "sig"
/// type = "signal"
/// frequencies = [100.0]
///
/// [[blocks]]
/// name = "clk"
/// type = "clock"
/// frequency = 1000.0
///
/// [[blocks]]
/// name = "sh"
/// type = "sample-hold"
///
/// [[connections]]
/// from = "sig"
/// to = "sh"
///
/// [[connections]]
/// from = "clk"
/// to = "sh.clock"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// Name of the patch.
    pub name: String,

    /// Optional description of the patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Run settings.
    #[serde(default)]
    pub run: RunConfig,

    /// Blocks, in insertion order.
    #[serde(default)]
    pub blocks: Vec<BlockConfig>,

    /// Wires between blocks, in the order they are made.
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

/// The `[run]` table of a patch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Noise seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Record processing blocks' inputs.
    pub capture_inputs: bool,
    /// How several wires into one input combine.
    pub fan_in: FanInPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        let settings = RunSettings::default();
        Self {
            sample_rate: settings.sample_rate,
            duration: settings.duration,
            seed: settings.seed,
            capture_inputs: settings.capture_inputs,
            fan_in: FanInPolicy::default(),
        }
    }
}

/// One `[[blocks]]` entry: a unique name plus the tagged parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockConfig {
    /// Name used by connections to refer to the block.
    pub name: String,
    /// Block type and parameters (`type = "..."` plus its fields).
    #[serde(flatten)]
    pub params: BlockParams,
}

impl BlockConfig {
    /// Create a block entry.
    pub fn new(name: impl Into<String>, params: BlockParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// One `[[connections]]` entry.
///
/// `from` names a block (optionally `name.out`); `to` names a block and an
/// input: `name` or `name.in` for the first data input, `name.inN` for data
/// input `N`, `name.clock` for the clock input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Source endpoint.
    pub from: String,
    /// Target endpoint.
    pub to: String,
}

impl ConnectionConfig {
    /// Create a connection entry.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A graph built from a patch, with the patch's names mapped to block ids.
#[derive(Debug, Clone)]
pub struct BuiltPatch {
    /// The block graph.
    pub graph: Graph,
    /// Patch block name to graph id.
    pub names: BTreeMap<String, BlockId>,
}

impl BuiltPatch {
    /// Patch name of `id`.
    pub fn name_of(&self, id: BlockId) -> Option<&str> {
        self.names
            .iter()
            .find(|&(_, &b)| b == id)
            .map(|(name, _)| name.as_str())
    }
}

impl Patch {
    /// Create a new empty patch.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            run: RunConfig::default(),
            blocks: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Create a patch with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the run settings.
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Add a named block.
    pub fn with_block(mut self, name: impl Into<String>, params: BlockParams) -> Self {
        self.blocks.push(BlockConfig::new(name, params));
        self
    }

    /// Add a connection.
    pub fn with_connection(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.connections.push(ConnectionConfig::new(from, to));
        self
    }

    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let patch: Patch = toml::from_str(&content)?;
        Ok(patch)
    }

    /// Load a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the patch to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the patch to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Look up a block entry by name.
    pub fn block(&self, name: &str) -> Option<&BlockConfig> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Engine settings described by the `[run]` table.
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            sample_rate: self.run.sample_rate,
            duration: self.run.duration,
            seed: self.run.seed,
            capture_inputs: self.run.capture_inputs,
        }
    }

    /// Validates the patch and builds its graph.
    ///
    /// Blocks are inserted in file order, so block ids follow the order of the
    /// `[[blocks]]` entries; connections are made in file order too, which is
    /// what "last wins" fan-in refers to.
    pub fn build_graph(&self) -> Result<BuiltPatch, ConfigError> {
        validate_patch(self)?;

        let mut graph = Graph::with_fan_in(self.run.fan_in);
        let mut names = BTreeMap::new();
        for block in &self.blocks {
            let id = graph.add_block(block.params.clone())?;
            names.insert(block.name.clone(), id);
        }

        for conn in &self.connections {
            let from = Endpoint::parse(&conn.from);
            let to = Endpoint::parse(&conn.to);
            let (Some(&src), Some(&dst)) = (names.get(from.block), names.get(to.block)) else {
                continue;
            };
            let from_port = graph.output(src)?;
            let to_port = match to.target_selector() {
                Some(PortSelector::Input(slot)) => graph.input(dst, slot)?,
                Some(PortSelector::Clock) => graph.clock_input(dst)?,
                Some(PortSelector::Output) | None => continue,
            };
            graph.connect(from_port, to_port)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "patch '{}': {} blocks, {} connections",
            self.name,
            graph.block_count(),
            graph.connection_count()
        );
        Ok(BuiltPatch { graph, names })
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use senal_core::{BlockKind, ClockParams, LowPassParams, SignalParams};

    fn sampler() -> Patch {
        Patch::new("sampler")
            .with_block("sig", BlockParams::Signal(SignalParams::tone(100.0, 1.0)))
            .with_block("clk", BlockParams::Clock(ClockParams::new(1000.0, 0.5)))
            .with_block("sh", BlockParams::SampleHold)
            .with_connection("sig", "sh")
            .with_connection("clk", "sh.clock")
    }

    #[test]
    fn builds_graph_in_file_order() {
        let built = sampler().build_graph().unwrap();
        assert_eq!(built.graph.block_count(), 3);
        assert_eq!(built.graph.connection_count(), 2);

        let sh = built.names["sh"];
        assert_eq!(built.graph.block(sh).unwrap().kind(), BlockKind::SampleHold);
        assert!(built.names["sig"] < built.names["clk"]);
        assert_eq!(built.name_of(sh), Some("sh"));

        let clock = built.graph.clock_input(sh).unwrap();
        let sources: Vec<_> = built.graph.incoming(clock).map(|(_, b)| b).collect();
        assert_eq!(sources, [built.names["clk"]]);
    }

    #[test]
    fn toml_round_trip() {
        let patch = sampler().with_description("round trip");
        let text = patch.to_toml().unwrap();
        let back = Patch::from_toml(&text).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn parses_flattened_block_params() {
        let patch = Patch::from_toml(
            r#"
name = "filter"

[[blocks]]
name = "faa"
type = "faa"
cutoff = 500
"#,
        )
        .unwrap();
        assert_eq!(
            patch.block("faa").unwrap().params,
            BlockParams::Faa(LowPassParams::new(500.0))
        );
        assert_eq!(patch.run, RunConfig::default());
    }

    #[test]
    fn run_table_maps_to_settings() {
        let patch = Patch::from_toml(
            r#"
name = "settings"

[run]
sample_rate = 8000.0
duration = 0.5
seed = 3
fan_in = "sum"
"#,
        )
        .unwrap();
        let settings = patch.run_settings();
        assert_eq!(settings.sample_rate, 8000.0);
        assert_eq!(settings.duration, 0.5);
        assert_eq!(settings.seed, Some(3));
        assert!(!settings.capture_inputs);
        assert_eq!(patch.run.fan_in, FanInPolicy::Sum);
        assert_eq!(
            patch.build_graph().unwrap().graph.fan_in(),
            FanInPolicy::Sum
        );
    }

    #[test]
    fn reject_policy_surfaces_graph_error() {
        let mut patch = sampler().with_connection("clk", "sh");
        patch.run.fan_in = FanInPolicy::Reject;
        assert!(matches!(
            patch.build_graph(),
            Err(ConfigError::Graph(senal_core::GraphError::PortOccupied { .. }))
        ));
    }

    #[test]
    fn invalid_patch_does_not_build() {
        let patch = sampler().with_connection("nowhere", "sh");
        assert!(matches!(
            patch.build_graph(),
            Err(ConfigError::Validation(_))
        ));
    }
}
