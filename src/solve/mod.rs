//! Next-state and output equations from an explored truth table
//!
//! The [`Solver`] turns the rows of a [`TruthTable`] into one partially specified
//! boolean function per *column*:
//!
//! - [`Column::Output`]: the value of a primary output;
//! - [`Column::J`] / [`Column::K`]: the excitation of a JK flip-flop, derived from
//!   the current and next value of its state bit (see [`crate::minimize::excitation`]).
//!
//! Each function is over the primary inputs followed by the state bits. Minterm
//! `input | code << num_inputs` is labelled from the row of state `code` and input
//! `input`; every row that was never observed is a don't-care. The function is
//! minimized to a sum of products and, unless disabled, factored.
//!
//! # State encodings
//!
//! With [`StateEncoding::Observed`] (the default) the state bits are the device's
//! flip-flop values as read back during exploration. With
//! [`StateEncoding::DiscoveryOrder`] states are numbered in the order they were
//! found, using the fewest bits that can tell them apart; the equations then
//! describe an equivalent machine rather than the physical flip-flops.

pub mod error;
pub mod labels;
mod pla;

pub use error::SolveError;
pub use labels::{LabelSet, Labels};

use crate::expression::{factor_with, Expr, FactorOptions};
use crate::minimize::{required_input, Function, JkInput, MinimalCover};
use crate::table::{StateId, TruthTable};
use log::debug;
use std::fmt;
use std::sync::Arc;

/// How discovered states are numbered in the equations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StateEncoding {
    /// Use the observed flip-flop values
    #[default]
    Observed,
    /// Number states in discovery order with `ceil(log2(states))` bits
    DiscoveryOrder,
}

/// Solver settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// State numbering
    pub encoding: StateEncoding,
    /// Factoring settings, `None` to keep the minimal sum of products
    pub factor: Option<FactorOptions>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            encoding: StateEncoding::default(),
            factor: Some(FactorOptions::default()),
        }
    }
}

/// One column of the state table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    /// Primary output `i`
    Output(usize),
    /// J input of state bit `i`
    J(usize),
    /// K input of state bit `i`
    K(usize),
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Output(i) => write!(f, "output {}", i),
            Column::J(i) => write!(f, "J{}", i),
            Column::K(i) => write!(f, "K{}", i),
        }
    }
}

/// A solved column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// Which column this solves
    pub column: Column,
    /// Left-hand side name, e.g. `y0` or `q1.J`
    pub name: String,
    /// Minimal sum of products
    pub minimal: Expr,
    /// Factored form (equal to `minimal` when factoring is disabled)
    pub factored: Expr,
}

/// Derives equations from a truth table
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    table: &'a TruthTable,
    config: SolverConfig,
    state_bits: usize,
    codes: Vec<u64>,
    labels: Labels,
}

impl<'a> Solver<'a> {
    /// Create a solver with generated signal names
    pub fn new(table: &'a TruthTable, config: SolverConfig) -> Self {
        let dims = table.dimensions();
        let (state_bits, codes) = match config.encoding {
            StateEncoding::Observed => (
                dims.flip_flops(),
                table
                    .states()
                    .map(|s| table.signature(s).unwrap_or_default())
                    .collect(),
            ),
            StateEncoding::DiscoveryOrder => (
                bits_for(table.num_states()),
                (0..table.num_states() as u64).collect(),
            ),
        };
        let labels = Labels::generated(dims.inputs(), state_bits, dims.outputs());
        Solver {
            table,
            config,
            state_bits,
            codes,
            labels,
        }
    }

    /// Use the given signal names, padding or cutting each group to fit
    pub fn with_labels(mut self, mut labels: Labels) -> Self {
        let dims = self.table.dimensions();
        labels.fit(dims.inputs(), self.state_bits, dims.outputs());
        self.labels = labels;
        self
    }

    /// The table being solved
    pub fn table(&self) -> &TruthTable {
        self.table
    }

    /// Settings in use
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Signal names in use
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Number of state bits in the equations
    pub fn state_bits(&self) -> usize {
        self.state_bits
    }

    /// Number of function variables (inputs, then state bits)
    pub fn num_variables(&self) -> usize {
        self.table.dimensions().inputs() + self.state_bits
    }

    /// Names of the function variables
    pub fn variable_names(&self) -> Vec<Arc<str>> {
        self.labels.variables()
    }

    /// Code of a state under the configured encoding
    pub fn state_code(&self, state: StateId) -> Option<u64> {
        self.codes.get(state.index()).copied()
    }

    /// Every column: outputs first, then `J`, `K` per state bit
    pub fn columns(&self) -> Vec<Column> {
        let outputs = (0..self.table.dimensions().outputs()).map(Column::Output);
        let excitations = (0..self.state_bits).flat_map(|i| [Column::J(i), Column::K(i)]);
        outputs.chain(excitations).collect()
    }

    /// Left-hand side name of a column
    pub fn column_name(&self, column: Column) -> String {
        match column {
            Column::Output(i) => label_or(self.labels.outputs.get(i), 'y', i),
            Column::J(i) => format!("{}.J", label_or(self.labels.states.get(i), 'q', i)),
            Column::K(i) => format!("{}.K", label_or(self.labels.states.get(i), 'q', i)),
        }
    }

    fn check_column(&self, column: Column) -> Result<(), SolveError> {
        let in_range = match column {
            Column::Output(i) => i < self.table.dimensions().outputs(),
            Column::J(i) | Column::K(i) => i < self.state_bits,
        };
        if in_range {
            Ok(())
        } else {
            Err(SolveError::UnknownColumn { column })
        }
    }

    /// Minterm index of a row, or `None` if the state is unknown
    fn minterm(&self, state: StateId, input: u32) -> Option<u64> {
        let code = self.state_code(state)?;
        Some(u64::from(input) | code << self.table.dimensions().inputs())
    }

    /// The label a row gives a column, `None` for a don't-care
    fn row_label(&self, column: Column, outputs: u64, state: StateId, next: StateId) -> Option<bool> {
        match column {
            Column::Output(i) => Some(outputs >> i & 1 == 1),
            Column::J(i) | Column::K(i) => {
                let current = self.state_code(state)? >> i & 1 == 1;
                let next = self.state_code(next)? >> i & 1 == 1;
                let input = if matches!(column, Column::J(_)) {
                    JkInput::J
                } else {
                    JkInput::K
                };
                required_input(current, next, input)
            }
        }
    }

    /// The partially specified function of a column
    pub fn function(&self, column: Column) -> Result<Function, SolveError> {
        self.check_column(column)?;
        let mut function = Function::new(self.num_variables())?;
        for row in self.table.rows() {
            let Some(value) = self.row_label(column, row.outputs, row.state, row.next) else {
                continue;
            };
            if let Some(minterm) = self.minterm(row.state, row.input) {
                // Function::new bounds the variable count, so the minterm fits in u32
                function.set(minterm as u32, value)?;
            }
        }
        Ok(function)
    }

    /// Minimal cover of a column
    pub fn cover(&self, column: Column) -> Result<MinimalCover, SolveError> {
        Ok(self.function(column)?.minimize())
    }

    /// Minimal sum-of-products expression of a column
    pub fn minimize(&self, column: Column) -> Result<Expr, SolveError> {
        Ok(self.cover(column)?.to_expr())
    }

    /// Minimize and, if configured, factor a column
    pub fn solve(&self, column: Column) -> Result<Equation, SolveError> {
        let minimal = self.minimize(column)?;
        let factored = match &self.config.factor {
            Some(options) => factor_with(&minimal, options),
            None => minimal.clone(),
        };
        let name = self.column_name(column);
        debug!(
            "{}: {} literal(s) minimal, {} factored",
            name,
            minimal.literal_count(),
            factored.literal_count()
        );
        Ok(Equation {
            column,
            name,
            minimal,
            factored,
        })
    }

    /// Solve every column
    pub fn solve_all(&self) -> Result<Vec<Equation>, SolveError> {
        self.columns().into_iter().map(|c| self.solve(c)).collect()
    }

    /// Format an equation with this solver's signal names
    pub fn format_equation(&self, equation: &Equation) -> String {
        let names = self.variable_names();
        format!(
            "{} = {}",
            self.column_name(equation.column),
            equation.factored.display_with(&names)
        )
    }
}

fn label_or(label: Option<&Arc<str>>, prefix: char, index: usize) -> String {
    label.map_or_else(|| format!("{}{}", prefix, index), |l| l.to_string())
}

/// Bits needed to give `count` items distinct codes
fn bits_for(count: usize) -> usize {
    if count <= 1 {
        0
    } else {
        (usize::BITS - (count - 1).leading_zeros()) as usize
    }
}
