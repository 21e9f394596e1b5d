//! Arena-backed signal-flow graph.
//!
//! Blocks, ports and connections live in indexed collections inside
//! [`Graph`]. Every cross reference is an integer id ([`BlockId`], [`PortId`],
//! [`ConnectionId`]) rather than a pointer, so a port never borrows its owning
//! block and a connection never borrows its endpoints. Removed entries leave an
//! empty slot behind; ids are never reused within a graph instance.
//!
//! # Topology rules
//!
//! - A connection runs from an `Output` port to an `Input` or `ClockInput`
//!   port of a *different* block.
//! - The port set of a block is fixed by its [`BlockKind`] when the block is
//!   created.
//! - The graph may contain cycles and disconnected islands; resolving those is
//!   the evaluator's job, not the model's.
//!
//! # Example
//!
//! ```rust
//! use senal_core::{BlockKind, Graph};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_default(BlockKind::Signal);
//! let b = graph.add_default(BlockKind::Signal);
//! let sum = graph.add_default(BlockKind::Adder);
//!
//! graph.connect(graph.output(a)?, graph.input(sum, 0)?)?;
//! graph.connect(graph.output(b)?, graph.input(sum, 1)?)?;
//!
//! graph.remove_block(a)?;
//! assert_eq!(graph.connection_count(), 1);
//! # Ok::<(), senal_core::GraphError>(())
//! ```

mod block;
mod connection;
mod error;
mod model;
mod port;

pub use block::{Block, BlockId, BlockKind, PortLayout};
pub use connection::{Connection, ConnectionId};
pub use error::{ConnectionFault, GraphError};
pub use model::{FanInPolicy, Graph};
pub use port::{Port, PortDirection, PortId};
