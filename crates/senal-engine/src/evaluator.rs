//! Round-based fixed-point evaluation of a block graph.
//!
//! Evaluation is a batch job over whole buffers:
//!
//! 1. Every source block (Signal, Clock, Noise) renders against the shared
//!    time vector.
//! 2. Remaining blocks are visited in rounds, in ascending [`BlockId`] order.
//!    A block is ready once the source of every connection into any of its
//!    input or clock ports has resolved. Ready blocks resolve immediately, so
//!    a later block in the same round can already consume them.
//! 3. A round that resolves nothing ends evaluation. Whatever is left is
//!    [`BlockState::Stuck`]: part of a cycle, or downstream of one.
//!
//! Each round either resolves a block or is the last, so evaluation takes at
//! most `dependents + 1` rounds.

use rand::RngCore;
use senal_blocks::{ProcessInputs, ProcessIssue, Processor, Role, add, role};
use senal_core::{
    BlockId, Buffer, FanInPolicy, Graph, Port, PortDirection, PortId, TimeBase,
};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Resolution state of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockState {
    /// Not evaluated yet.
    Unresolved,
    /// Output buffer computed.
    Resolved,
    /// Never became ready; output is silence.
    Stuck,
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockState::Unresolved => "unresolved",
            BlockState::Resolved => "resolved",
            BlockState::Stuck => "stuck",
        })
    }
}

/// Something noteworthy that happened during evaluation.
///
/// None of these abort a run; each marks a block whose output fell back to a
/// well-defined default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// The graph has no blocks.
    EmptyGraph,
    /// The block waited on a cycle and never resolved.
    Stuck {
        /// Affected block.
        block: BlockId,
    },
    /// Inputs of different lengths were combined.
    ShapeMismatch {
        /// Affected block.
        block: BlockId,
        /// Length of each combined buffer.
        lengths: Vec<usize>,
    },
    /// A processing block had no data input connected.
    MissingInput {
        /// Affected block.
        block: BlockId,
    },
    /// A clocked block had no clock connected; its input passed through.
    MissingClock {
        /// Affected block.
        block: BlockId,
    },
    /// Several connections feed one input port.
    FanIn {
        /// Affected block.
        block: BlockId,
        /// The port with more than one connection.
        port: PortId,
        /// Number of connections into the port.
        connections: usize,
        /// How they were combined.
        policy: FanInPolicy,
    },
}

impl Diagnostic {
    /// The block the diagnostic is about, if any.
    pub fn block(&self) -> Option<BlockId> {
        match self {
            Diagnostic::EmptyGraph => None,
            Diagnostic::Stuck { block }
            | Diagnostic::ShapeMismatch { block, .. }
            | Diagnostic::MissingInput { block }
            | Diagnostic::MissingClock { block }
            | Diagnostic::FanIn { block, .. } => Some(*block),
        }
    }

    fn from_issue(block: BlockId, issue: ProcessIssue) -> Self {
        match issue {
            ProcessIssue::MissingInput => Diagnostic::MissingInput { block },
            ProcessIssue::MissingClock => Diagnostic::MissingClock { block },
            ProcessIssue::ShapeMismatch { lengths } => {
                Diagnostic::ShapeMismatch { block, lengths }
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyGraph => write!(f, "graph has no blocks"),
            Diagnostic::Stuck { block } => {
                write!(f, "{block} is stuck behind a cycle; output is silence")
            }
            Diagnostic::ShapeMismatch { block, lengths } => write!(
                f,
                "{block} received inputs of lengths {lengths:?}; output is silence"
            ),
            Diagnostic::MissingInput { block } => {
                write!(f, "{block} has no input connected; output is silence")
            }
            Diagnostic::MissingClock { block } => {
                write!(f, "{block} has no clock connected; input passes through")
            }
            Diagnostic::FanIn {
                block,
                port,
                connections,
                policy,
            } => write!(
                f,
                "{block} port {port} has {connections} incoming connections ({policy:?})"
            ),
        }
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Output buffer of every block, resolved or stuck.
    pub buffers: BTreeMap<BlockId, Buffer>,
    /// Final state of every block.
    pub states: BTreeMap<BlockId, BlockState>,
    /// Dependent rounds executed.
    pub rounds: usize,
    /// Diagnostics in the order they arose.
    pub diagnostics: Vec<Diagnostic>,
    /// Data-input buffers seen by each processing block, in slot order.
    /// Only filled when input capture is enabled.
    pub inputs: BTreeMap<BlockId, Vec<Buffer>>,
}

impl Evaluation {
    /// Output buffer of `block`.
    pub fn buffer(&self, block: BlockId) -> Option<&Buffer> {
        self.buffers.get(&block)
    }

    /// Final state of `block`.
    pub fn state(&self, block: BlockId) -> Option<BlockState> {
        self.states.get(&block).copied()
    }

    /// Blocks that ended stuck, ascending.
    pub fn stuck(&self) -> Vec<BlockId> {
        self.states
            .iter()
            .filter(|&(_, &s)| s == BlockState::Stuck)
            .map(|(&id, _)| id)
            .collect()
    }

    /// True if every block resolved.
    pub fn is_complete(&self) -> bool {
        self.states.values().all(|&s| s == BlockState::Resolved)
    }
}

/// Evaluates a borrowed graph. Holds no state between calls, so one graph can
/// be evaluated any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'g> {
    graph: &'g Graph,
    capture_inputs: bool,
}

impl<'g> Evaluator<'g> {
    /// Evaluator over `graph`.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            capture_inputs: false,
        }
    }

    /// Keep a copy of each processing block's data inputs in
    /// [`Evaluation::inputs`].
    pub fn capture_inputs(mut self, capture: bool) -> Self {
        self.capture_inputs = capture;
        self
    }

    /// Computes every block's output over `base`.
    pub fn evaluate(&self, base: &TimeBase, rng: &mut dyn RngCore) -> Evaluation {
        let mut eval = Evaluation::default();
        if self.graph.is_empty() {
            eval.diagnostics.push(Diagnostic::EmptyGraph);
            return eval;
        }

        let time = base.times();
        let sample_rate = base.sample_rate();
        let mut pending: Vec<(BlockId, &dyn Processor)> = Vec::new();

        for block in self.graph.blocks() {
            match role(block.params()) {
                Role::Source(source) => {
                    let buffer = source.generate(&time, sample_rate, rng);
                    eval.buffers.insert(block.id(), buffer);
                    eval.states.insert(block.id(), BlockState::Resolved);
                }
                Role::Processor(processor) => {
                    pending.push((block.id(), processor));
                    eval.states.insert(block.id(), BlockState::Unresolved);
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "evaluate: {} sources rendered, {} dependents pending",
            eval.buffers.len(),
            pending.len()
        );

        while !pending.is_empty() {
            eval.rounds += 1;
            let before = pending.len();
            let mut waiting = Vec::with_capacity(before);
            for (id, processor) in pending {
                if !self.is_ready(id, &eval.buffers) {
                    waiting.push((id, processor));
                    continue;
                }
                let buffer = self.resolve(id, processor, base, &mut eval);
                eval.buffers.insert(id, buffer);
                eval.states.insert(id, BlockState::Resolved);
            }
            pending = waiting;

            #[cfg(feature = "tracing")]
            tracing::trace!(
                "evaluate: round {} resolved {} blocks",
                eval.rounds,
                before - pending.len()
            );
            if pending.len() == before {
                break;
            }
        }

        for (id, _) in pending {
            #[cfg(feature = "tracing")]
            tracing::warn!("evaluate: {id} is stuck");
            eval.buffers.insert(id, base.zeros());
            eval.states.insert(id, BlockState::Stuck);
            eval.diagnostics.push(Diagnostic::Stuck { block: id });
        }
        eval
    }

    fn is_ready(&self, id: BlockId, buffers: &BTreeMap<BlockId, Buffer>) -> bool {
        self.graph.input_ports(id).all(|port| {
            self.graph
                .incoming(port.id())
                .all(|(_, source)| buffers.contains_key(&source))
        })
    }

    fn resolve(
        &self,
        id: BlockId,
        processor: &dyn Processor,
        base: &TimeBase,
        eval: &mut Evaluation,
    ) -> Buffer {
        let mut data: Vec<Option<Cow<'_, [f64]>>> = Vec::new();
        let mut clock = None;
        let mut notes = Vec::new();

        for port in self.graph.input_ports(id) {
            let gathered = self.gather(id, port, &eval.buffers, &mut notes);
            match port.direction() {
                PortDirection::ClockInput => clock = gathered,
                PortDirection::Input => {
                    if data.len() <= port.slot() {
                        data.resize_with(port.slot() + 1, || None);
                    }
                    data[port.slot()] = gathered;
                }
                PortDirection::Output => {}
            }
        }

        let inputs = ProcessInputs::new(base.len())
            .with_data(data.iter().map(|d| d.as_deref()).collect())
            .with_clock(clock.as_deref());
        let processed = processor.process(&inputs, base.sample_rate());

        if self.capture_inputs {
            let captured = inputs.connected().into_iter().map(<[f64]>::to_vec).collect();
            eval.inputs.insert(id, captured);
        }
        if let Some(issue) = processed.issue {
            #[cfg(feature = "tracing")]
            tracing::debug!("evaluate: {id} degraded: {issue:?}");
            notes.push(Diagnostic::from_issue(id, issue));
        }
        eval.diagnostics.append(&mut notes);
        processed.buffer
    }

    /// Buffer arriving at `port`, combining several connections according to
    /// the graph's fan-in policy.
    fn gather<'b>(
        &self,
        id: BlockId,
        port: &Port,
        buffers: &'b BTreeMap<BlockId, Buffer>,
        notes: &mut Vec<Diagnostic>,
    ) -> Option<Cow<'b, [f64]>> {
        let sources: Vec<&'b [f64]> = self
            .graph
            .incoming(port.id())
            .filter_map(|(_, source)| buffers.get(&source).map(Vec::as_slice))
            .collect();
        if sources.len() > 1 {
            notes.push(Diagnostic::FanIn {
                block: id,
                port: port.id(),
                connections: sources.len(),
                policy: self.graph.fan_in(),
            });
        }
        match self.graph.fan_in() {
            // Connections are listed oldest first.
            FanInPolicy::LastWins | FanInPolicy::Reject => {
                sources.last().map(|&b| Cow::Borrowed(b))
            }
            FanInPolicy::Sum => match sources.as_slice() {
                [] => None,
                [only] => Some(Cow::Borrowed(*only)),
                many => match add(many) {
                    Ok(sum) => Some(Cow::Owned(sum)),
                    Err(mismatch) => {
                        notes.push(Diagnostic::ShapeMismatch {
                            block: id,
                            lengths: mismatch.lengths,
                        });
                        Some(Cow::Owned(vec![0.0; many[0].len()]))
                    }
                },
            },
        }
    }
}
