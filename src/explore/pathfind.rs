//! Shortest route to the nearest untested input
//!
//! The search runs Dijkstra over the discovered transition graph extended with a
//! synthetic `ORIGIN` node:
//!
//! - each recorded transition is an edge of weight 1 (one clock);
//! - when resets are allowed, every state has a reset edge of weight `reset_cost`
//!   to `ORIGIN`;
//! - `ORIGIN` has a weight-0 edge to the power-on state.
//!
//! Costs are compared as `(cost, resets)`, so between equally expensive routes the
//! one with fewer resets wins. A route to state `S` ends by applying one of `S`'s
//! untested inputs, which adds 1 to its cost. The chosen target minimises
//! `(total cost, resets, state index)` and the applied input is the lowest
//! untested input of that state.

use crate::table::{StateId, TruthTable};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// One action of a [`Plan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Reset the device to its power-on state
    Reset,
    /// Apply an input whose outcome is already recorded
    Apply {
        /// State the input is applied in
        from: StateId,
        /// The input vector
        input: u32,
        /// State the device is known to move to
        to: StateId,
    },
}

/// A route to an untested `(state, input)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Actions that bring the device into `target`
    pub steps: Vec<Step>,
    /// The state whose untested input will be probed
    pub target: StateId,
    /// The untested input to apply once in `target`
    pub input: u32,
    /// Total cost, including the final probe
    pub cost: u64,
    /// Number of resets on the route
    pub resets: u32,
}

impl Plan {
    /// Whether the route resets the device
    pub fn uses_reset(&self) -> bool {
        self.resets > 0
    }
}

/// Cost model for the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Costs {
    /// Cost of a reset, `None` when the device cannot be reset
    pub reset: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: usize,
    weight: u64,
    step: Option<Step>,
}

/// Find the cheapest route from `live` to any state with an untested input
///
/// Returns `None` when no such state is reachable.
pub fn plan(table: &TruthTable, live: StateId, origin: StateId, costs: Costs) -> Option<Plan> {
    let n = table.num_states();
    if live.index() >= n {
        return None;
    }
    let origin_node = n;

    let edges = |node: usize| -> Vec<Edge> {
        if node == origin_node {
            return vec![Edge {
                to: origin.index(),
                weight: 0,
                step: None,
            }];
        }
        let from = StateId::new(node);
        let mut out: Vec<Edge> = table
            .transitions(from)
            .map(|(input, outcome)| Edge {
                to: outcome.next.index(),
                weight: 1,
                step: Some(Step::Apply {
                    from,
                    input,
                    to: outcome.next,
                }),
            })
            .collect();
        if let Some(cost) = costs.reset {
            out.push(Edge {
                to: origin_node,
                weight: u64::from(cost),
                step: Some(Step::Reset),
            });
        }
        out
    };

    let mut best: Vec<Option<(u64, u32)>> = vec![None; n + 1];
    let mut prev: Vec<Option<(usize, Option<Step>)>> = vec![None; n + 1];
    let mut heap = BinaryHeap::new();

    best[live.index()] = Some((0, 0));
    heap.push(Reverse((0u64, 0u32, live.index())));

    while let Some(Reverse((cost, resets, node))) = heap.pop() {
        if best[node] != Some((cost, resets)) {
            continue;
        }
        for edge in edges(node) {
            let is_reset = matches!(edge.step, Some(Step::Reset));
            let candidate = (cost + edge.weight, resets + u32::from(is_reset));
            if best[edge.to].map_or(true, |b| candidate < b) {
                best[edge.to] = Some(candidate);
                prev[edge.to] = Some((node, edge.step));
                heap.push(Reverse((candidate.0, candidate.1, edge.to)));
            }
        }
    }

    let (target, (cost, resets)) = table
        .states()
        .filter(|&s| table.has_untested(s))
        .filter_map(|s| best[s.index()].map(|(c, r)| (s, (c + 1, r))))
        .min_by_key(|&(s, key)| (key, s))?;
    let input = table.untested_inputs(target).next()?;

    let mut steps = Vec::new();
    let mut node = target.index();
    while node != live.index() {
        let (parent, step) = prev[node]?;
        if let Some(step) = step {
            steps.push(step);
        }
        node = parent;
    }
    steps.reverse();

    Some(Plan {
        steps,
        target,
        input,
        cost,
        resets,
    })
}
