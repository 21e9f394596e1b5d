//! The graph arena: mutation API and topology queries.
//!
//! [`Graph`] owns every block, port and connection. Mutations validate the
//! topology rules up front so that an invalid connection never enters the
//! arena. The graph does no signal processing; it is borrowed immutably by
//! the evaluator for the duration of a run.

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockId, BlockKind};
use super::connection::{Connection, ConnectionId};
use super::error::{ConnectionFault, GraphError};
use super::port::{Port, PortDirection, PortId};
use crate::params::BlockParams;

/// How an input port with several incoming connections is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FanInPolicy {
    /// Keep only the most recently made connection's buffer.
    #[default]
    LastWins,
    /// Sum the buffers of all connections elementwise.
    Sum,
    /// Refuse a second connection into an occupied input.
    Reject,
}

/// Signal-flow graph of blocks, ports and connections.
///
/// # Usage
///
/// 1. Create a graph with [`new()`](Self::new) or
///    [`with_fan_in()`](Self::with_fan_in)
/// 2. Add blocks: [`add_block()`](Self::add_block),
///    [`add_default()`](Self::add_default)
/// 3. Look up ports: [`output()`](Self::output), [`input()`](Self::input),
///    [`clock_input()`](Self::clock_input)
/// 4. Wire them: [`connect()`](Self::connect)
#[derive(Clone, Debug, Default)]
pub struct Graph {
    blocks: Vec<Option<Block>>,
    ports: Vec<Option<Port>>,
    connections: Vec<Option<Connection>>,
    fan_in: FanInPolicy,
}

impl Graph {
    /// Creates an empty graph with the default fan-in policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the given fan-in policy.
    pub fn with_fan_in(fan_in: FanInPolicy) -> Self {
        Self {
            fan_in,
            ..Self::default()
        }
    }

    /// The graph's fan-in policy.
    pub fn fan_in(&self) -> FanInPolicy {
        self.fan_in
    }

    // --- Block mutations ---

    /// Adds a block with the given parameters and creates its ports.
    ///
    /// Returns an error if the parameters fail validation.
    pub fn add_block(&mut self, params: BlockParams) -> Result<BlockId, GraphError> {
        params.validate()?;
        Ok(self.insert_block(params))
    }

    /// Adds a block of `kind` with its default parameters.
    pub fn add_default(&mut self, kind: BlockKind) -> BlockId {
        self.insert_block(BlockParams::default_for(kind))
    }

    fn insert_block(&mut self, params: BlockParams) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        let layout = params.kind().port_layout();

        let mut ports = Vec::with_capacity(layout.total());
        for slot in 0..layout.inputs {
            ports.push(self.insert_port(id, PortDirection::Input, slot));
        }
        for slot in 0..layout.clock_inputs {
            ports.push(self.insert_port(id, PortDirection::ClockInput, slot));
        }
        for slot in 0..layout.outputs {
            ports.push(self.insert_port(id, PortDirection::Output, slot));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(block = %id, kind = %params.kind(), "graph_add");

        self.blocks.push(Some(Block { id, params, ports }));
        id
    }

    fn insert_port(&mut self, block: BlockId, direction: PortDirection, slot: usize) -> PortId {
        let id = PortId(self.ports.len() as u32);
        self.ports.push(Some(Port {
            id,
            block,
            direction,
            slot,
            connections: Vec::new(),
        }));
        id
    }

    /// Removes a block, its ports, and every connection touching them.
    ///
    /// Connections are severed first so no other port keeps a reference to
    /// the removed block.
    pub fn remove_block(&mut self, id: BlockId) -> Result<(), GraphError> {
        let block = self.block(id).ok_or(GraphError::BlockNotFound(id))?;
        let ports = block.ports.clone();

        // Collect first to avoid a borrow conflict with disconnect_internal.
        let incident: Vec<ConnectionId> = ports
            .iter()
            .filter_map(|&p| self.port(p))
            .flat_map(|p| p.connections.iter().copied())
            .collect();
        for connection in incident {
            self.disconnect_internal(connection);
        }

        for port in ports {
            self.ports[port.0 as usize] = None;
        }
        self.blocks[id.0 as usize] = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(block = %id, "graph_remove");
        Ok(())
    }

    /// Replaces a block's parameters.
    ///
    /// The block kind cannot change, since it fixes the port set.
    pub fn set_params(&mut self, id: BlockId, params: BlockParams) -> Result<(), GraphError> {
        let block = self
            .blocks
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(GraphError::BlockNotFound(id))?;
        let expected = block.params.kind();
        let found = params.kind();
        if expected != found {
            return Err(GraphError::KindMismatch {
                block: id,
                expected,
                found,
            });
        }
        params.validate()?;
        block.params = params;

        #[cfg(feature = "tracing")]
        tracing::debug!(block = %id, "graph_set_params");
        Ok(())
    }

    // --- Connection mutations ---

    /// Connects an output port to an input or clock port of another block.
    ///
    /// Returns the new connection's ID, or an error if:
    /// - Either port doesn't exist
    /// - `from` is not an output or `to` is not an input
    /// - Both ports belong to the same block
    /// - `to` is occupied and the fan-in policy is [`FanInPolicy::Reject`]
    pub fn connect(&mut self, from: PortId, to: PortId) -> Result<ConnectionId, GraphError> {
        let src = self.port(from).ok_or(GraphError::PortNotFound(from))?;
        let dst = self.port(to).ok_or(GraphError::PortNotFound(to))?;

        if src.direction != PortDirection::Output {
            return Err(GraphError::InvalidConnection(
                ConnectionFault::SourceNotOutput(from),
            ));
        }
        if !dst.direction.is_input() {
            return Err(GraphError::InvalidConnection(
                ConnectionFault::TargetNotInput(to),
            ));
        }
        if src.block == dst.block {
            return Err(GraphError::InvalidConnection(ConnectionFault::SelfLoop(
                src.block,
            )));
        }
        if self.fan_in == FanInPolicy::Reject && !dst.connections.is_empty() {
            return Err(GraphError::PortOccupied {
                port: to,
                block: dst.block,
            });
        }

        let (source, target) = (src.block, dst.block);
        let id = ConnectionId(self.connections.len() as u32);
        self.connections.push(Some(Connection {
            id,
            from,
            to,
            source,
            target,
        }));

        for port in [from, to] {
            if let Some(Some(p)) = self.ports.get_mut(port.0 as usize) {
                p.connections.push(id);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(%source, %target, connection = %id, "graph_connect");
        Ok(id)
    }

    /// Removes a connection.
    pub fn disconnect(&mut self, id: ConnectionId) -> Result<(), GraphError> {
        if self.connection(id).is_none() {
            return Err(GraphError::ConnectionNotFound(id));
        }
        self.disconnect_internal(id);

        #[cfg(feature = "tracing")]
        tracing::debug!(connection = %id, "graph_disconnect");
        Ok(())
    }

    fn disconnect_internal(&mut self, id: ConnectionId) {
        let Some(connection) = self
            .connections
            .get_mut(id.0 as usize)
            .and_then(Option::take)
        else {
            return;
        };
        for port in [connection.from, connection.to] {
            if let Some(Some(p)) = self.ports.get_mut(port.0 as usize) {
                p.connections.retain(|&c| c != id);
            }
        }
    }

    // --- Port lookup ---

    /// Finds a block's port by direction and slot.
    pub fn find_port(
        &self,
        block: BlockId,
        direction: PortDirection,
        slot: usize,
    ) -> Result<PortId, GraphError> {
        let owner = self.block(block).ok_or(GraphError::BlockNotFound(block))?;
        owner
            .ports
            .iter()
            .filter_map(|&p| self.port(p))
            .find(|p| p.direction == direction && p.slot == slot)
            .map(Port::id)
            .ok_or(GraphError::NoSuchPort {
                block,
                direction,
                slot,
            })
    }

    /// The block's output port.
    pub fn output(&self, block: BlockId) -> Result<PortId, GraphError> {
        self.find_port(block, PortDirection::Output, 0)
    }

    /// The block's data input at `slot`.
    pub fn input(&self, block: BlockId, slot: usize) -> Result<PortId, GraphError> {
        self.find_port(block, PortDirection::Input, slot)
    }

    /// The block's clock input.
    pub fn clock_input(&self, block: BlockId) -> Result<PortId, GraphError> {
        self.find_port(block, PortDirection::ClockInput, 0)
    }

    // --- Queries ---

    /// Returns a block by ID.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0 as usize)?.as_ref()
    }

    /// Returns a port by ID.
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.0 as usize)?.as_ref()
    }

    /// Returns a connection by ID.
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0 as usize)?.as_ref()
    }

    /// Iterates live blocks in ascending ID order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().flatten()
    }

    /// Iterates live connections in ascending ID order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter().flatten()
    }

    /// Iterates the ports owned by a block.
    pub fn ports_of(&self, block: BlockId) -> impl Iterator<Item = &Port> {
        self.block(block)
            .into_iter()
            .flat_map(move |b| b.ports.iter().filter_map(move |&p| self.port(p)))
    }

    /// Iterates a block's `Input` and `ClockInput` ports.
    pub fn input_ports(&self, block: BlockId) -> impl Iterator<Item = &Port> {
        self.ports_of(block).filter(|p| p.direction.is_input())
    }

    /// Iterates the connections terminating at `port`, oldest first, paired
    /// with the block that owns each connection's source.
    pub fn incoming(&self, port: PortId) -> impl Iterator<Item = (ConnectionId, BlockId)> {
        self.port(port).into_iter().flat_map(move |p| {
            p.connections
                .iter()
                .filter_map(move |&c| self.connection(c))
                .filter(move |c| c.to == port)
                .map(|c| (c.id, c.source))
        })
    }

    /// Number of live blocks.
    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections().count()
    }

    /// Returns true if the graph has no blocks.
    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }
}
