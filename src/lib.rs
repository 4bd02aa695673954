//! # Logic Probe
//!
//! This crate characterises a black-box synchronous circuit built from primary
//! inputs, primary outputs and JK flip-flops. It probes the circuit until every
//! reachable `(state, input)` combination has been observed, then derives minimal
//! boolean equations for every output and every flip-flop's J and K inputs.
//!
//! ## Overview
//!
//! The pipeline has four stages, each in its own module:
//!
//! - [`explore`]: drives a [`Device`] with a walk/pathfind loop, using a shortest
//!   path search (clock edges cost 1, resets cost [`ExploreConfig::reset_cost`]) to
//!   reach states that still have untested inputs;
//! - [`table`]: the sparse [`TruthTable`] of observed transitions;
//! - [`minimize`]: Quine–McCluskey minimization with don't-cares, and the JK
//!   excitation rules that turn state transitions into J/K columns;
//! - [`expression`]: the [`Expr`] tree, its display, and algebraic factoring of a
//!   sum of products.
//!
//! [`solve`] ties the table to the minimizer, and [`sim`] provides a software
//! [`Device`] parsed from a small circuit description language.
//!
//! ## Quick start
//!
//! ```
//! use logic_probe::{analyze, ExploreConfig, SimCircuit, SolverConfig};
//!
//! # fn main() -> Result<(), logic_probe::ProbeError> {
//! let circuit = SimCircuit::parse(
//!     "input t;
//!      state q;
//!      output y = q;
//!      jk q = t, t;",
//! )?;
//! let labels = circuit.labels();
//!
//! let analysis = analyze(circuit, &ExploreConfig::default(), &SolverConfig::default())?;
//! assert!(analysis.exploration.coverage.is_complete());
//!
//! let solver = analysis.solver().with_labels(labels);
//! for equation in &analysis.equations {
//!     println!("{}", solver.format_equation(equation));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Prints:
//!
//! ```text
//! y = q
//! q.J = t
//! q.K = t
//! ```
//!
//! ## Working with hardware
//!
//! Implement [`Device`] for whatever drives the real circuit. The explorer only
//! needs to read the flip-flops, clock one input vector, and reset:
//!
//! ```
//! use logic_probe::{Device, Dimensions, Observation};
//! use std::io;
//!
//! struct Rig { state: u64 }
//!
//! impl Device for Rig {
//!     type Error = io::Error;
//!
//!     fn dimensions(&self) -> Dimensions {
//!         Dimensions::new(1, 1, 1).expect("small enough")
//!     }
//!     fn observe_state(&mut self) -> io::Result<u64> {
//!         Ok(self.state)
//!     }
//!     fn apply_input(&mut self, input: u32) -> io::Result<Observation> {
//!         let outputs = self.state;
//!         self.state ^= u64::from(input);
//!         Ok(Observation { outputs, state: self.state })
//!     }
//!     fn reset(&mut self) -> io::Result<()> {
//!         self.state = 0;
//!         Ok(())
//!     }
//! }
//! ```

// Public modules
pub mod error;
pub mod explore;
pub mod expression;
pub mod minimize;
pub mod sim;
pub mod solve;
pub mod table;

// Re-export high-level public API
pub use error::ProbeError;
pub use explore::{Coverage, Device, Exploration, ExploreConfig, Explorer, Observation};
pub use expression::{Expr, Literal};
pub use minimize::{Function, MinimalCover};
pub use sim::SimCircuit;
pub use solve::{Column, Equation, Labels, Solver, SolverConfig, StateEncoding};
pub use table::{Dimensions, StateId, TruthTable};

use log::info;

/// Result of [`analyze`]
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The explored table and its statistics
    pub exploration: Exploration,
    /// One equation per output, then J and K per state bit
    pub equations: Vec<Equation>,
    solver_config: SolverConfig,
}

impl Analysis {
    /// A solver over the explored table with the configuration used for the equations
    pub fn solver(&self) -> Solver<'_> {
        Solver::new(&self.exploration.table, self.solver_config.clone())
    }
}

/// Explore `device` and solve every column of the resulting table
pub fn analyze<D: Device>(
    device: D,
    explore_config: &ExploreConfig,
    solver_config: &SolverConfig,
) -> Result<Analysis, ProbeError> {
    let exploration = explore::explore(device, explore_config.clone())?;
    let equations = Solver::new(&exploration.table, solver_config.clone()).solve_all()?;
    info!(
        "Solved {} equation(s) over {} state(s)",
        equations.len(),
        exploration.table.num_states()
    );
    Ok(Analysis {
        exploration,
        equations,
        solver_config: solver_config.clone(),
    })
}
