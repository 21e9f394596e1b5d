//! Port types.
//!
//! A port is the connection point of a block. It records its owner and the
//! connections incident on it by id only.

use serde::{Deserialize, Serialize};

use super::block::BlockId;
use super::connection::ConnectionId;

/// Unique identifier for a port in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId(pub(crate) u32);

impl PortId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for PortId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PortId({})", self.0)
    }
}

/// Signal direction of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortDirection {
    /// Produces the block's buffer.
    Output,
    /// Consumes a data signal.
    Input,
    /// Consumes a clock signal.
    ClockInput,
}

impl PortDirection {
    /// Returns true for `Input` and `ClockInput`.
    pub fn is_input(self) -> bool {
        !matches!(self, Self::Output)
    }
}

impl core::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Output => "output",
            Self::Input => "input",
            Self::ClockInput => "clock input",
        })
    }
}

/// A port as stored in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Port {
    pub(crate) id: PortId,
    pub(crate) block: BlockId,
    pub(crate) direction: PortDirection,
    /// Position among the owner's ports of the same direction.
    pub(crate) slot: usize,
    /// Incident connections, oldest first.
    pub(crate) connections: Vec<ConnectionId>,
}

impl Port {
    /// The port's identifier.
    pub fn id(&self) -> PortId {
        self.id
    }

    /// The block that owns this port.
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// The port's direction.
    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    /// Index among the owner's ports with the same direction.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Connections incident on this port, in the order they were made.
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }
}
