//! Sparse truth-table store for observed circuit behaviour
//!
//! The [`TruthTable`] maps `(state, input)` pairs to the [`Outcome`] observed when that
//! input was applied in that state. States are discovered at run time and kept in an
//! arena addressed by [`StateId`]; each state owns one slot per input value. A slot is
//! either *untested* (`None`) or *tested* (`Some(outcome)`). Rows of states that were
//! never reached do not exist at all and are treated as don't-cares downstream.
//!
//! # Example
//!
//! ```
//! use logic_probe::table::{Dimensions, Recorded, TruthTable};
//!
//! # fn main() -> Result<(), logic_probe::table::TableError> {
//! let dims = Dimensions::new(1, 1, 1)?;
//! let mut table = TruthTable::new(dims);
//!
//! let (s0, _) = table.intern_state(0b0)?;
//! let (s1, _) = table.intern_state(0b1)?;
//!
//! assert_eq!(table.record(s0, 1, 0b1, s1)?, Recorded::New);
//! assert_eq!(table.record(s0, 1, 0b1, s1)?, Recorded::Unchanged);
//! assert!(table.record(s0, 1, 0b0, s1).is_err());
//!
//! assert_eq!(table.untested_inputs(s0).collect::<Vec<_>>(), vec![0]);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod graph;

pub use error::{ConsistencyError, TableError};
pub use graph::{GraphEdge, StateGraph, StateNode};

use std::collections::HashMap;
use std::fmt;

/// Largest supported number of primary inputs
pub const MAX_INPUTS: usize = 16;
/// Largest supported number of flip-flops
pub const MAX_FLIP_FLOPS: usize = 16;
/// Largest supported number of primary outputs
pub const MAX_OUTPUTS: usize = 64;

/// Bit widths of the device under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    inputs: usize,
    outputs: usize,
    flip_flops: usize,
}

impl Dimensions {
    /// Create dimensions, rejecting widths the store cannot index
    pub fn new(inputs: usize, outputs: usize, flip_flops: usize) -> Result<Self, TableError> {
        let checks = [
            ("inputs", inputs, MAX_INPUTS),
            ("outputs", outputs, MAX_OUTPUTS),
            ("flip-flops", flip_flops, MAX_FLIP_FLOPS),
        ];
        for (what, requested, max) in checks {
            if requested > max {
                return Err(TableError::InvalidDimensions {
                    what,
                    requested,
                    max,
                });
            }
        }
        Ok(Dimensions {
            inputs,
            outputs,
            flip_flops,
        })
    }

    /// Number of primary inputs
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Number of primary outputs
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Number of flip-flops
    pub fn flip_flops(&self) -> usize {
        self.flip_flops
    }

    /// Number of distinct input vectors (`2^inputs`)
    pub fn input_values(&self) -> u32 {
        1 << self.inputs
    }

    fn check(what: &'static str, value: u64, width: usize) -> Result<(), TableError> {
        if width < 64 && value >> width != 0 {
            Err(TableError::ValueOutOfRange { what, value, width })
        } else {
            Ok(())
        }
    }
}

/// Stable index of a discovered state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    /// Wrap a raw index
    pub fn new(index: usize) -> Self {
        StateId(index)
    }

    /// The raw arena index (discovery order)
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// What happened when an input was applied in a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    /// Output vector, bit `i` is output `i`
    pub outputs: u64,
    /// State the device moved to
    pub next: StateId,
}

/// One tested row of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row {
    /// Source state
    pub state: StateId,
    /// Applied input vector, bit `i` is input `i`
    pub input: u32,
    /// Observed output vector
    pub outputs: u64,
    /// Destination state
    pub next: StateId,
}

/// Result of a successful [`TruthTable::record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// The slot was untested and now holds the outcome
    New,
    /// The slot already held exactly this outcome
    Unchanged,
}

#[derive(Debug, Clone)]
struct StateRecord {
    signature: u64,
    slots: Vec<Option<Outcome>>,
    untested: usize,
}

/// Sparse table of observed `(state, input) -> (outputs, next state)` transitions
#[derive(Debug, Clone)]
pub struct TruthTable {
    dims: Dimensions,
    states: Vec<StateRecord>,
    by_signature: HashMap<u64, StateId>,
}

impl TruthTable {
    /// Create an empty table for a device of the given dimensions
    pub fn new(dims: Dimensions) -> Self {
        TruthTable {
            dims,
            states: Vec::new(),
            by_signature: HashMap::new(),
        }
    }

    /// Dimensions of the device this table describes
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of discovered states
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Iterate over discovered states in discovery order
    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.states.len()).map(StateId)
    }

    /// The observed flip-flop values of a state
    pub fn signature(&self, state: StateId) -> Option<u64> {
        self.states.get(state.0).map(|s| s.signature)
    }

    /// Look up a state by its observed flip-flop values
    pub fn find_state(&self, signature: u64) -> Option<StateId> {
        self.by_signature.get(&signature).copied()
    }

    /// Return the state with this signature, creating it if it was never seen
    ///
    /// The boolean is `true` when the state was created by this call.
    pub fn intern_state(&mut self, signature: u64) -> Result<(StateId, bool), TableError> {
        Dimensions::check("state", signature, self.dims.flip_flops)?;
        if let Some(id) = self.find_state(signature) {
            return Ok((id, false));
        }
        let id = StateId(self.states.len());
        let slots = self.dims.input_values() as usize;
        self.states.push(StateRecord {
            signature,
            slots: vec![None; slots],
            untested: slots,
        });
        self.by_signature.insert(signature, id);
        Ok((id, true))
    }

    fn slot(&self, state: StateId, input: u32) -> Result<Option<Outcome>, TableError> {
        Dimensions::check("input", u64::from(input), self.dims.inputs)?;
        let record = self
            .states
            .get(state.0)
            .ok_or(TableError::UnknownState { state })?;
        Ok(record.slots[input as usize])
    }

    /// Record the outcome of applying `input` in `state`
    ///
    /// Fails with [`TableError::Consistency`] when the pair was already recorded with a
    /// different outcome. Recording the identical outcome again is accepted.
    pub fn record(
        &mut self,
        state: StateId,
        input: u32,
        outputs: u64,
        next: StateId,
    ) -> Result<Recorded, TableError> {
        Dimensions::check("outputs", outputs, self.dims.outputs)?;
        let next_signature = self
            .signature(next)
            .ok_or(TableError::UnknownState { state: next })?;
        let outcome = Outcome { outputs, next };

        match self.slot(state, input)? {
            Some(existing) if existing == outcome => Ok(Recorded::Unchanged),
            Some(existing) => Err(ConsistencyError {
                state,
                input,
                recorded: (existing.outputs, self.states[existing.next.0].signature),
                observed: (outputs, next_signature),
            }
            .into()),
            None => {
                let record = &mut self.states[state.0];
                record.slots[input as usize] = Some(outcome);
                record.untested -= 1;
                Ok(Recorded::New)
            }
        }
    }

    /// Record a raw device observation, interning the destination state
    ///
    /// A contradiction with an existing row is detected before any new state is
    /// created, so a failed observation leaves the table untouched.
    pub fn observe(
        &mut self,
        state: StateId,
        input: u32,
        outputs: u64,
        next_signature: u64,
    ) -> Result<(StateId, Recorded), TableError> {
        if let Some(existing) = self.slot(state, input)? {
            let recorded_signature = self.states[existing.next.0].signature;
            if existing.outputs != outputs || recorded_signature != next_signature {
                return Err(ConsistencyError {
                    state,
                    input,
                    recorded: (existing.outputs, recorded_signature),
                    observed: (outputs, next_signature),
                }
                .into());
            }
            return Ok((existing.next, Recorded::Unchanged));
        }
        let (next, _) = self.intern_state(next_signature)?;
        let recorded = self.record(state, input, outputs, next)?;
        Ok((next, recorded))
    }

    /// The recorded outcome for `(state, input)`, if tested
    pub fn outcome(&self, state: StateId, input: u32) -> Option<Outcome> {
        self.slot(state, input).ok().flatten()
    }

    /// Whether `(state, input)` has been tested
    pub fn is_tested(&self, state: StateId, input: u32) -> bool {
        self.outcome(state, input).is_some()
    }

    /// Whether the state still has at least one untested input
    pub fn has_untested(&self, state: StateId) -> bool {
        self.states.get(state.0).is_some_and(|s| s.untested > 0)
    }

    /// Untested inputs of a state in ascending order
    pub fn untested_inputs(&self, state: StateId) -> impl Iterator<Item = u32> + '_ {
        self.states.get(state.0).into_iter().flat_map(|record| {
            record
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_none())
                .map(|(input, _)| input as u32)
        })
    }

    /// Tested transitions leaving a state, by ascending input
    pub fn transitions(&self, state: StateId) -> impl Iterator<Item = (u32, Outcome)> + '_ {
        self.states.get(state.0).into_iter().flat_map(|record| {
            record
                .slots
                .iter()
                .enumerate()
                .filter_map(|(input, slot)| slot.map(|outcome| (input as u32, outcome)))
        })
    }

    /// All tested rows, by state then input
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.states().flat_map(move |state| {
            self.transitions(state).map(move |(input, outcome)| Row {
                state,
                input,
                outputs: outcome.outputs,
                next: outcome.next,
            })
        })
    }

    /// Number of tested rows
    pub fn num_tested(&self) -> usize {
        self.states
            .iter()
            .map(|s| s.slots.len() - s.untested)
            .sum()
    }

    /// Number of untested rows among discovered states
    pub fn num_untested(&self) -> usize {
        self.states.iter().map(|s| s.untested).sum()
    }
}
