//! Block identity, kind tags, and per-block bookkeeping.

use serde::{Deserialize, Serialize};

use super::port::PortId;
use crate::params::BlockParams;

/// Unique identifier for a block in the graph.
///
/// Block IDs are assigned sequentially and never reused within a graph
/// instance. They key the output-buffer map of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub(crate) u32);

impl BlockId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for BlockId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

/// The closed set of block types the sandbox offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// Sum of sinusoids.
    Signal,
    /// Square-wave clock with duty cycle and phase.
    Clock,
    /// Gaussian noise scaled to a peak-to-peak value.
    Noise,
    /// Anti-aliasing filter (ideal low-pass).
    Faa,
    /// Reconstruction filter (ideal low-pass, same behaviour as `Faa`).
    Fr,
    /// Zero-order hold triggered by clock rising edges.
    SampleHold,
    /// Gate that passes its input while the clock is high.
    AnalogSwitch,
    /// Elementwise sum of its inputs.
    Adder,
}

impl BlockKind {
    /// Every block kind, in toolbar order.
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Signal,
        BlockKind::Clock,
        BlockKind::Noise,
        BlockKind::Faa,
        BlockKind::Fr,
        BlockKind::SampleHold,
        BlockKind::AnalogSwitch,
        BlockKind::Adder,
    ];

    /// Returns true for blocks that generate a signal without inputs.
    pub fn is_source(self) -> bool {
        matches!(self, Self::Signal | Self::Clock | Self::Noise)
    }

    /// Stable machine identifier, as used in patch files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Signal => "signal",
            Self::Clock => "clock",
            Self::Noise => "noise",
            Self::Faa => "faa",
            Self::Fr => "fr",
            Self::SampleHold => "sample-hold",
            Self::AnalogSwitch => "analog-switch",
            Self::Adder => "adder",
        }
    }

    /// Short label shown on the canvas and in export file names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Signal => "Signal",
            Self::Clock => "Clock",
            Self::Noise => "Noise",
            Self::Faa => "FAA",
            Self::Fr => "FR",
            Self::SampleHold => "S&H",
            Self::AnalogSwitch => "A.Switch",
            Self::Adder => "Adder",
        }
    }

    /// Looks up a kind by its [`id`](Self::id). Case-insensitive.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }

    /// The fixed port set a block of this kind is created with.
    pub fn port_layout(self) -> PortLayout {
        match self {
            Self::Signal | Self::Clock | Self::Noise => PortLayout::new(0, 0),
            Self::Faa | Self::Fr => PortLayout::new(1, 0),
            Self::SampleHold | Self::AnalogSwitch => PortLayout::new(1, 1),
            Self::Adder => PortLayout::new(2, 0),
        }
    }
}

impl core::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of ports per direction for a block kind.
///
/// Every kind has exactly one output port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortLayout {
    /// Data input ports.
    pub inputs: usize,
    /// Clock input ports.
    pub clock_inputs: usize,
    /// Output ports.
    pub outputs: usize,
}

impl PortLayout {
    const fn new(inputs: usize, clock_inputs: usize) -> Self {
        Self {
            inputs,
            clock_inputs,
            outputs: 1,
        }
    }

    /// Total number of ports.
    pub fn total(self) -> usize {
        self.inputs + self.clock_inputs + self.outputs
    }
}

/// A block as stored in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub(crate) id: BlockId,
    pub(crate) params: BlockParams,
    /// Owned ports: data inputs, then clock inputs, then outputs.
    pub(crate) ports: Vec<PortId>,
}

impl Block {
    /// The block's identifier.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The block's type tag (derived from its parameters).
    pub fn kind(&self) -> BlockKind {
        self.params.kind()
    }

    /// The block's current parameters.
    pub fn params(&self) -> &BlockParams {
        &self.params
    }

    /// The ports owned by this block.
    pub fn ports(&self) -> &[PortId] {
        &self.ports
    }
}
