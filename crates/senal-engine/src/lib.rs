//! Senal Engine - evaluation of block graphs
//!
//! The [`Evaluator`] turns a [`Graph`](senal_core::Graph) into one output
//! buffer per block. Sources are rendered first; processing blocks then
//! resolve in rounds as soon as every block feeding them has resolved.
//! Blocks caught in a cycle, or fed by one, never become ready and end up
//! [`BlockState::Stuck`] with a silent buffer.
//!
//! [`run`] wraps the evaluator with the time base, seeding and block metadata
//! that a caller needs to plot or export the result.
//!
//! # Example
//!
//! ```rust
//! use senal_core::{BlockKind, BlockParams, Graph, LowPassParams, SignalParams};
//! use senal_engine::{RunSettings, run};
//!
//! let mut graph = Graph::new();
//! let sig = graph.add_block(BlockParams::Signal(SignalParams::tone(1000.0, 1.0)))?;
//! let faa = graph.add_block(BlockParams::Faa(LowPassParams::new(500.0)))?;
//! graph.connect(graph.output(sig)?, graph.input(faa, 0)?)?;
//!
//! let output = run(&graph, &RunSettings::default().with_seed(7))?;
//! assert_eq!(output.time.len(), 44100);
//! assert!(output.buffers[&faa].iter().all(|x| x.abs() < 1e-9));
//! assert!(output.report.stuck.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod evaluator;
pub mod run;

pub use evaluator::{BlockState, Diagnostic, Evaluation, Evaluator};
pub use run::{BlockMeta, RunError, RunOutput, RunReport, RunSettings, run};
