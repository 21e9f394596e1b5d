//! Connection types.
//!
//! A `Connection` links an output port to an input or clock port of another
//! block. The owning blocks of both endpoints are cached so that the source
//! block of any incoming connection resolves without a port lookup.

use serde::{Deserialize, Serialize};

use super::block::BlockId;
use super::port::PortId;

/// Unique identifier for a connection in the graph.
///
/// Connection IDs are assigned sequentially and never reused within a graph
/// instance. A higher id means a more recently made connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub(crate) u32);

impl ConnectionId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}

/// A directed link between two ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
    pub(crate) id: ConnectionId,
    pub(crate) from: PortId,
    pub(crate) to: PortId,
    pub(crate) source: BlockId,
    pub(crate) target: BlockId,
}

impl Connection {
    /// The connection's identifier.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The output port the signal leaves from.
    pub fn from(&self) -> PortId {
        self.from
    }

    /// The input or clock port the signal arrives at.
    pub fn to(&self) -> PortId {
        self.to
    }

    /// Block owning the source port.
    pub fn source(&self) -> BlockId {
        self.source
    }

    /// Block owning the destination port.
    pub fn target(&self) -> BlockId {
        self.target
    }
}
