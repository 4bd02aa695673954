//! Black-box exploration of a synchronous circuit
//!
//! The [`Explorer`] drives a [`Device`] until every `(state, input)` pair reachable
//! from the power-on state has been probed once, recording what it sees in a
//! [`TruthTable`]. It alternates between two phases:
//!
//! - **Walk**: while the live state has an untested input, apply the lowest one.
//!   Every walk step discovers a new row.
//! - **Pathfind**: the live state is exhausted; plan the cheapest route (clock
//!   edges cost 1, a reset costs [`ExploreConfig::reset_cost`]) to the nearest state
//!   that still has an untested input, replay it, and probe that input.
//!
//! Exploration is **done** when no state with untested inputs can be reached.
//! With resets allowed that means the table is complete; without resets some states
//! may be stranded, which is reported through [`Coverage::Partial`].
//!
//! Replayed transitions are checked against the table, so a non-deterministic or
//! mis-wired device is caught as soon as it contradicts itself.

pub mod device;
pub mod error;
pub mod pathfind;

pub use device::{Device, Observation};
pub use error::ExploreError;
pub use pathfind::{Costs, Plan, Step};

use crate::table::{Recorded, StateId, TruthTable};
use log::{debug, info, trace, warn};
use std::fmt;

/// Exploration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreConfig {
    /// Cost of a reset relative to a single clock edge
    pub reset_cost: u32,
    /// Whether the planner may reset the device at all
    pub allow_reset: bool,
    /// Reset the device once before reading the power-on state
    pub reset_on_start: bool,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        ExploreConfig {
            reset_cost: 5,
            allow_reset: true,
            reset_on_start: true,
        }
    }
}

impl ExploreConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cost of a reset
    pub fn with_reset_cost(mut self, cost: u32) -> Self {
        self.reset_cost = cost;
        self
    }

    /// Forbid resets after the initial one
    pub fn without_reset(mut self) -> Self {
        self.allow_reset = false;
        self
    }

    /// Whether to reset once before reading the power-on state
    pub fn with_reset_on_start(mut self, reset: bool) -> Self {
        self.reset_on_start = reset;
        self
    }

    /// The cost model handed to the planner
    pub fn costs(&self) -> Costs {
        Costs {
            reset: self.allow_reset.then_some(self.reset_cost),
        }
    }
}

/// Where the explorer is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Probing untested inputs of the live state
    Walk,
    /// Looking for a route to the next untested input
    Pathfind,
    /// Nothing reachable is left to probe
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Walk => "WALK",
            Phase::Pathfind => "PATHFIND",
            Phase::Done => "DONE",
        };
        write!(f, "{}", name)
    }
}

/// Counters collected while exploring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExploreStats {
    /// Inputs applied to the device
    pub probes: usize,
    /// Probes that filled an untested row
    pub new_rows: usize,
    /// Probes that replayed a known transition
    pub replays: usize,
    /// Resets issued, including the one at start
    pub resets: usize,
    /// Routes planned
    pub plans: usize,
}

/// How much of the state space was covered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coverage {
    /// Every discovered state has all inputs tested
    Complete,
    /// Some discovered states could not be returned to
    Partial {
        /// States that still have untested inputs
        stranded: Vec<StateId>,
    },
}

impl Coverage {
    /// Whether exploration tested every discovered state fully
    pub fn is_complete(&self) -> bool {
        matches!(self, Coverage::Complete)
    }
}

/// Result of a finished exploration
#[derive(Debug, Clone)]
pub struct Exploration {
    /// Everything that was observed
    pub table: TruthTable,
    /// The power-on state
    pub origin: StateId,
    /// Counters
    pub stats: ExploreStats,
    /// Whether the table is complete
    pub coverage: Coverage,
}

/// Drives a device through the walk/pathfind loop
pub struct Explorer<D: Device> {
    device: D,
    config: ExploreConfig,
    table: TruthTable,
    origin: StateId,
    origin_signature: u64,
    live: StateId,
    phase: Phase,
    stats: ExploreStats,
}

impl<D: Device> Explorer<D> {
    /// Connect to a device and record its power-on state
    pub fn new(mut device: D, config: ExploreConfig) -> Result<Self, ExploreError> {
        let mut table = TruthTable::new(device.dimensions());
        let mut stats = ExploreStats::default();

        if config.reset_on_start {
            device.reset().map_err(ExploreError::device)?;
            stats.resets += 1;
        }
        let origin_signature = device.observe_state().map_err(ExploreError::device)?;
        let (origin, _) = table.intern_state(origin_signature)?;

        let dims = table.dimensions();
        info!(
            "Exploring device with {} input(s), {} output(s), {} flip-flop(s); power-on state {:#b}",
            dims.inputs(),
            dims.outputs(),
            dims.flip_flops(),
            origin_signature
        );

        Ok(Explorer {
            device,
            config,
            table,
            origin,
            origin_signature,
            live: origin,
            phase: Phase::Walk,
            stats,
        })
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Observations so far
    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    /// The state the device is in right now
    pub fn live(&self) -> StateId {
        self.live
    }

    /// The power-on state
    pub fn origin(&self) -> StateId {
        self.origin
    }

    /// Counters so far
    pub fn stats(&self) -> ExploreStats {
        self.stats
    }

    /// Settings in use
    pub fn config(&self) -> &ExploreConfig {
        &self.config
    }

    /// Advance the loop by one phase action and return the new phase
    ///
    /// A walk step probes one input; a pathfind step replays a whole route and
    /// probes its target.
    pub fn step(&mut self) -> Result<Phase, ExploreError> {
        self.phase = match self.phase {
            Phase::Walk => {
                let untested = self.table.untested_inputs(self.live).next();
                match untested {
                    Some(input) => {
                        self.apply(input)?;
                        Phase::Walk
                    }
                    None => Phase::Pathfind,
                }
            }
            Phase::Pathfind => {
                let plan = pathfind::plan(&self.table, self.live, self.origin, self.config.costs());
                match plan {
                    Some(plan) => {
                        self.execute(plan)?;
                        Phase::Walk
                    }
                    None => Phase::Done,
                }
            }
            Phase::Done => Phase::Done,
        };
        Ok(self.phase)
    }

    /// Run until done
    pub fn explore(mut self) -> Result<Exploration, ExploreError> {
        while self.step()? != Phase::Done {}

        let stranded: Vec<StateId> = self
            .table
            .states()
            .filter(|&s| self.table.has_untested(s))
            .collect();
        let coverage = if stranded.is_empty() {
            Coverage::Complete
        } else {
            warn!(
                "{} state(s) still have untested inputs and cannot be reached without a reset: {}",
                stranded.len(),
                stranded
                    .iter()
                    .map(StateId::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Coverage::Partial { stranded }
        };

        info!(
            "Exploration finished: {} state(s), {} row(s), {} probe(s), {} reset(s)",
            self.table.num_states(),
            self.table.num_tested(),
            self.stats.probes,
            self.stats.resets
        );

        Ok(Exploration {
            table: self.table,
            origin: self.origin,
            stats: self.stats,
            coverage,
        })
    }

    /// Replay a route and probe its target input
    fn execute(&mut self, plan: Plan) -> Result<(), ExploreError> {
        self.stats.plans += 1;
        debug!(
            "Route from {} to {} input {:#b}: {} step(s), cost {}, {} reset(s)",
            self.live,
            plan.target,
            plan.input,
            plan.steps.len(),
            plan.cost,
            plan.resets
        );
        for step in &plan.steps {
            match *step {
                Step::Reset => self.reset()?,
                Step::Apply { input, .. } => {
                    self.apply(input)?;
                }
            }
        }
        self.apply(plan.input)?;
        Ok(())
    }

    /// Apply one input in the live state and record the outcome
    fn apply(&mut self, input: u32) -> Result<StateId, ExploreError> {
        let from = self.live;
        let observation = self.device.apply_input(input).map_err(ExploreError::device)?;
        self.stats.probes += 1;

        let (next, recorded) =
            self.table
                .observe(from, input, observation.outputs, observation.state)?;
        match recorded {
            Recorded::New => {
                self.stats.new_rows += 1;
                debug!(
                    "{} --{:#b}/{:#b}--> {} ({:#b})",
                    from, input, observation.outputs, next, observation.state
                );
            }
            Recorded::Unchanged => {
                self.stats.replays += 1;
                trace!("replayed {} --{:#b}--> {}", from, input, next);
            }
        }
        self.live = next;
        Ok(next)
    }

    /// Reset the device and check it came back to the power-on state
    fn reset(&mut self) -> Result<(), ExploreError> {
        self.device.reset().map_err(ExploreError::device)?;
        self.stats.resets += 1;
        let observed = self.device.observe_state().map_err(ExploreError::device)?;
        if observed != self.origin_signature {
            return Err(ExploreError::ResetDiverged {
                expected: self.origin_signature,
                observed,
            });
        }
        trace!("reset to {}", self.origin);
        self.live = self.origin;
        Ok(())
    }
}

/// Explore a device with the given settings
pub fn explore<D: Device>(device: D, config: ExploreConfig) -> Result<Exploration, ExploreError> {
    Explorer::new(device, config)?.explore()
}

#[cfg(test)]
mod tests;
