//! Property-based tests for the evaluator.
//!
//! Random diagrams of sources and filters are wired arbitrarily, cycles
//! included. Whatever the wiring, evaluation terminates within its round
//! bound, every block gets a buffer of the nominal length, and the stuck set
//! is exactly the blocks that cannot be reached from sources alone.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use senal_core::{BlockId, BlockKind, Graph, PortDirection, TimeBase};
use senal_engine::{BlockState, Evaluator};
use std::collections::BTreeSet;

const KINDS: [BlockKind; 5] = [
    BlockKind::Signal,
    BlockKind::Clock,
    BlockKind::Faa,
    BlockKind::Adder,
    BlockKind::SampleHold,
];

fn build(kinds: &[usize], wires: &[(usize, usize, usize)]) -> Graph {
    let mut graph = Graph::new();
    let ids: Vec<BlockId> = kinds
        .iter()
        .map(|&k| graph.add_default(KINDS[k]))
        .collect();
    for &(from, to, slot) in wires {
        let from = ids[from % ids.len()];
        let to = ids[to % ids.len()];
        let inputs: Vec<_> = graph.input_ports(to).map(|p| p.id()).collect();
        if inputs.is_empty() {
            continue;
        }
        let Ok(out) = graph.output(from) else { continue };
        let _ = graph.connect(out, inputs[slot % inputs.len()]);
    }
    graph
}

/// Blocks resolvable from sources, computed as a plain least fixed point.
fn resolvable(graph: &Graph) -> BTreeSet<BlockId> {
    let mut done: BTreeSet<BlockId> = graph
        .blocks()
        .filter(|b| b.kind().is_source())
        .map(|b| b.id())
        .collect();
    loop {
        let before = done.len();
        for block in graph.blocks() {
            let ready = graph.input_ports(block.id()).all(|p| {
                graph.incoming(p.id()).all(|(_, src)| done.contains(&src))
            });
            if ready {
                done.insert(block.id());
            }
        }
        if done.len() == before {
            return done;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    #[test]
    fn evaluation_terminates_with_exact_stuck_set(
        kinds in prop::collection::vec(0usize..KINDS.len(), 1..12),
        wires in prop::collection::vec((0usize..32, 0usize..32, 0usize..4), 0..30),
    ) {
        let graph = build(&kinds, &wires);
        let base = TimeBase::from_len(1000.0, 32).unwrap();
        let eval = Evaluator::new(&graph).evaluate(&base, &mut StdRng::seed_from_u64(0));

        let dependents = graph.blocks().filter(|b| !b.kind().is_source()).count();
        prop_assert!(eval.rounds <= dependents + 1);
        prop_assert_eq!(eval.buffers.len(), graph.block_count());
        for buffer in eval.buffers.values() {
            prop_assert_eq!(buffer.len(), 32);
        }

        let expected = resolvable(&graph);
        for block in graph.blocks() {
            let state = eval.state(block.id()).unwrap();
            if expected.contains(&block.id()) {
                prop_assert_eq!(state, BlockState::Resolved);
            } else {
                prop_assert_eq!(state, BlockState::Stuck);
            }
        }
    }

    /// Wiring only from lower to higher block index never leaves anything stuck.
    #[test]
    fn forward_wiring_always_resolves(
        kinds in prop::collection::vec(0usize..KINDS.len(), 2..12),
        wires in prop::collection::vec((0usize..32, 0usize..32, 0usize..4), 0..30),
    ) {
        let forward: Vec<_> = wires
            .into_iter()
            .map(|(a, b, s)| {
                let (a, b) = (a % kinds.len(), b % kinds.len());
                (a.min(b), a.max(b), s)
            })
            .collect();
        let graph = build(&kinds, &forward);
        let base = TimeBase::from_len(1000.0, 16).unwrap();
        let eval = Evaluator::new(&graph).evaluate(&base, &mut StdRng::seed_from_u64(0));
        prop_assert!(eval.is_complete());
        prop_assert!(eval.rounds <= 1);
        for block in graph.blocks() {
            for port in graph.ports_of(block.id()) {
                if port.direction() == PortDirection::Output {
                    prop_assert!(eval.buffer(block.id()).is_some());
                }
            }
        }
    }
}
