//! Errors raised by graph mutations.

use thiserror::Error;

use super::block::{BlockId, BlockKind};
use super::connection::ConnectionId;
use super::port::{PortDirection, PortId};
use crate::params::ParamError;

/// Errors that can occur during graph operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// The specified block was not found in the graph.
    #[error("block {0} not found")]
    BlockNotFound(BlockId),

    /// The specified port was not found in the graph.
    #[error("port {0} not found")]
    PortNotFound(PortId),

    /// The specified connection was not found in the graph.
    #[error("connection {0} not found")]
    ConnectionNotFound(ConnectionId),

    /// The block has no port with this direction and slot.
    #[error("block {block} has no {direction} port at slot {slot}")]
    NoSuchPort {
        /// Block that was queried.
        block: BlockId,
        /// Requested direction.
        direction: PortDirection,
        /// Requested slot.
        slot: usize,
    },

    /// The connection violates a topology rule.
    #[error("invalid connection: {0}")]
    InvalidConnection(ConnectionFault),

    /// The input already has a connection and the graph rejects fan-in.
    #[error("port {port} of block {block} already has an incoming connection")]
    PortOccupied {
        /// Occupied port.
        port: PortId,
        /// Owner of the port.
        block: BlockId,
    },

    /// New parameters belong to a different block kind.
    #[error("block {block} is {expected}, cannot take {found} parameters")]
    KindMismatch {
        /// Block being updated.
        block: BlockId,
        /// Kind of the block.
        expected: BlockKind,
        /// Kind of the supplied parameters.
        found: BlockKind,
    },

    /// The parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamError),
}

/// The topology rule a rejected connection broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFault {
    /// The source port is not an output.
    SourceNotOutput(PortId),
    /// The destination port is not an input or clock input.
    TargetNotInput(PortId),
    /// Both endpoints belong to the same block.
    SelfLoop(BlockId),
}

impl core::fmt::Display for ConnectionFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SourceNotOutput(port) => write!(f, "source {port} is not an output"),
            Self::TargetNotInput(port) => write!(f, "destination {port} is not an input"),
            Self::SelfLoop(block) => write!(f, "{block} cannot feed itself"),
        }
    }
}
