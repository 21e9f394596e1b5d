//! Senal Core - the signal-flow graph model
//!
//! This crate holds the data model of the block sandbox: blocks with typed
//! parameters, the ports each block owns, and the connections wired between
//! them. It carries no signal-processing behaviour of its own; the block
//! library (`senal-blocks`) and the evaluator (`senal-engine`) consume the
//! [`Graph`] built here.
//!
//! # Core Abstractions
//!
//! - [`Graph`] - arena of blocks, ports and connections, addressed by stable ids
//! - [`BlockKind`] / [`BlockParams`] - closed set of block types and their parameters
//! - [`PortDirection`] - `Output`, `Input` or `ClockInput`
//! - [`FanInPolicy`] - how several connections into one input are treated
//! - [`TimeBase`] - the shared sample clock of a run
//!
//! # Example
//!
//! ```rust
//! use senal_core::{BlockKind, BlockParams, Graph, SignalParams};
//!
//! let mut graph = Graph::new();
//! let sig = graph.add_block(BlockParams::Signal(SignalParams::tone(100.0, 1.0)))?;
//! let clk = graph.add_default(BlockKind::Clock);
//! let sh = graph.add_default(BlockKind::SampleHold);
//!
//! graph.connect(graph.output(sig)?, graph.input(sh, 0)?)?;
//! graph.connect(graph.output(clk)?, graph.clock_input(sh)?)?;
//! assert_eq!(graph.connection_count(), 2);
//! # Ok::<(), senal_core::GraphError>(())
//! ```

pub mod graph;
pub mod params;
pub mod time;

pub use graph::{
    Block, BlockId, BlockKind, Connection, ConnectionFault, ConnectionId, FanInPolicy, Graph,
    GraphError, Port, PortDirection, PortId, PortLayout,
};
pub use params::{
    BlockParams, ClockParams, LowPassParams, NoiseColor, NoiseParams, ParamError, SignalParams,
};
pub use time::{Buffer, TimeBase, TimeBaseError};
