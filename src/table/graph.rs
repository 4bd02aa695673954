//! Discovered state graph, exported for external rendering

use super::{StateId, TruthTable};

/// A discovered state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateNode {
    /// Stable discovery index
    pub id: StateId,
    /// Observed flip-flop values
    pub signature: u64,
    /// Inputs never applied in this state
    pub untested: usize,
}

/// A recorded transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    /// Source state
    pub from: StateId,
    /// Input vector that triggers the transition
    pub input: u32,
    /// Outputs observed while taking it
    pub outputs: u64,
    /// Destination state
    pub to: StateId,
}

/// Nodes and edges of the discovered state-transition graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateGraph {
    /// States in discovery order
    pub nodes: Vec<StateNode>,
    /// Transitions by source state, then input
    pub edges: Vec<GraphEdge>,
}

impl StateGraph {
    /// Edges leaving `state`
    pub fn edges_from(&self, state: StateId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.from == state)
    }
}

impl TruthTable {
    /// Snapshot of the discovered graph
    pub fn graph(&self) -> StateGraph {
        let nodes = self
            .states
            .iter()
            .enumerate()
            .map(|(index, record)| StateNode {
                id: StateId::new(index),
                signature: record.signature,
                untested: record.untested,
            })
            .collect();
        let edges = self
            .rows()
            .map(|row| GraphEdge {
                from: row.state,
                input: row.input,
                outputs: row.outputs,
                to: row.next,
            })
            .collect();
        StateGraph { nodes, edges }
    }
}
