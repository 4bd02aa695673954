//! Simulated JK flip-flop circuits
//!
//! A [`SimCircuit`] is a [`Device`] built from a small text description, used to
//! try the explorer without hardware and to test it against a known answer:
//!
//! ```text
//! # 2-bit counter with enable
//! input en;
//! state q0;          # initial value 0
//! state q1 = 0;
//! output carry = en * q0 * q1;
//! jk q0 = en, en;
//! jk q1 = en * q0, en * q0;
//! ```
//!
//! Statements end with `;`. Operators are `+`/`|` (OR), `*`/`&` (AND), prefix
//! `~`/`!` and postfix `'` (NOT), with parentheses and the constants `0` and `1`.
//! Outputs are sampled before the clock edge; on the edge every flip-flop takes its
//! JK next value. Every state needs exactly one `jk` statement.

pub(crate) mod ast;
pub mod error;
mod parser;

pub use error::{ParseCircuitError, SimError};

use crate::expression::Expr;
use crate::explore::{Device, Observation};
use crate::minimize::JkPair;
use crate::solve::Labels;
use crate::table::Dimensions;
use ast::{SignalExpr, Statement};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// A JK flip-flop circuit evaluated in software
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCircuit {
    dims: Dimensions,
    input_names: Vec<String>,
    state_names: Vec<String>,
    output_names: Vec<String>,
    outputs: Vec<Expr>,
    excitations: Vec<(Expr, Expr)>,
    init: u64,
    state: u64,
}

/// Where a declared name lives
#[derive(Debug, Clone, Copy)]
enum Signal {
    Input(usize),
    State(usize),
    Output,
}

struct Builder {
    names: HashMap<String, Signal>,
    input_names: Vec<String>,
    state_names: Vec<String>,
    init: u64,
}

impl Builder {
    fn declare(&mut self, name: &str, at: usize, signal: Signal) -> Result<(), ParseCircuitError> {
        if self.names.insert(name.to_string(), signal).is_some() {
            return Err(ParseCircuitError::DuplicateSignal {
                name: name.to_string(),
                position: at,
            });
        }
        Ok(())
    }

    fn lower(&self, expr: &SignalExpr) -> Result<Expr, ParseCircuitError> {
        Ok(match expr {
            SignalExpr::Signal(name, at) => match self.names.get(name) {
                Some(Signal::Input(i)) => Expr::literal(*i, true),
                Some(Signal::State(f)) => Expr::literal(self.input_names.len() + f, true),
                Some(Signal::Output) | None => {
                    return Err(ParseCircuitError::UnknownSignal {
                        name: name.clone(),
                        position: *at,
                    })
                }
            },
            SignalExpr::Const(value) => Expr::constant(*value),
            SignalExpr::Not(inner) => self.lower(inner)?.not(),
            SignalExpr::And(l, r) => Expr::and(vec![self.lower(l)?, self.lower(r)?]),
            SignalExpr::Or(l, r) => Expr::or(vec![self.lower(l)?, self.lower(r)?]),
        })
    }
}

impl SimCircuit {
    /// Parse a circuit description
    pub fn parse(input: &str) -> Result<Self, ParseCircuitError> {
        let statements = parser::parse_statements(input)?;

        // Inputs and states first, so expressions may refer to them in any order
        let mut builder = Builder {
            names: HashMap::new(),
            input_names: Vec::new(),
            state_names: Vec::new(),
            init: 0,
        };
        for statement in &statements {
            match statement {
                Statement::Inputs(names) => {
                    for (name, at) in names {
                        let index = builder.input_names.len();
                        builder.declare(name, *at, Signal::Input(index))?;
                        builder.input_names.push(name.clone());
                    }
                }
                Statement::State { name, at, init } => {
                    let index = builder.state_names.len();
                    builder.declare(name, *at, Signal::State(index))?;
                    builder.state_names.push(name.clone());
                    if *init && index < 64 {
                        builder.init |= 1 << index;
                    }
                }
                Statement::Output { .. } | Statement::Jk { .. } => {}
            }
        }

        let mut output_names = Vec::new();
        let mut outputs = Vec::new();
        let mut excitations: Vec<Option<(Expr, Expr)>> = vec![None; builder.state_names.len()];
        for statement in &statements {
            match statement {
                Statement::Output { name, at, expr } => {
                    builder.declare(name, *at, Signal::Output)?;
                    output_names.push(name.clone());
                    outputs.push(builder.lower(expr)?);
                }
                Statement::Jk { name, j, k, .. } => {
                    let index = match builder.names.get(name) {
                        Some(Signal::State(f)) => *f,
                        _ => {
                            return Err(ParseCircuitError::Excitation {
                                name: name.clone(),
                                problem: "is not a declared state",
                            })
                        }
                    };
                    if excitations[index].is_some() {
                        return Err(ParseCircuitError::Excitation {
                            name: name.clone(),
                            problem: "has more than one jk statement",
                        });
                    }
                    excitations[index] = Some((builder.lower(j)?, builder.lower(k)?));
                }
                Statement::Inputs(_) | Statement::State { .. } => {}
            }
        }

        let excitations = excitations
            .into_iter()
            .zip(&builder.state_names)
            .map(|(jk, name)| {
                jk.ok_or_else(|| ParseCircuitError::Excitation {
                    name: name.clone(),
                    problem: "has no jk statement",
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let dims = Dimensions::new(
            builder.input_names.len(),
            output_names.len(),
            builder.state_names.len(),
        )?;
        debug!(
            "Parsed circuit: inputs {:?}, states {:?}, outputs {:?}",
            builder.input_names, builder.state_names, output_names
        );

        Ok(SimCircuit {
            dims,
            input_names: builder.input_names,
            state_names: builder.state_names,
            output_names,
            outputs,
            excitations,
            init: builder.init,
            state: builder.init,
        })
    }

    /// Read and parse a circuit description file
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(SimCircuit::parse(&text)?)
    }

    /// Declared input names, in bit order
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// Declared state names, in bit order
    pub fn state_names(&self) -> &[String] {
        &self.state_names
    }

    /// Declared output names, in bit order
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    /// Signal names for the solver
    pub fn labels(&self) -> Labels {
        Labels::from_names(&self.input_names, &self.state_names, &self.output_names)
            .unwrap_or_else(|_| {
                Labels::generated(self.dims.inputs(), self.dims.flip_flops(), self.dims.outputs())
            })
    }

    /// Output equation `i` over inputs then states
    pub fn output(&self, i: usize) -> Option<&Expr> {
        self.outputs.get(i)
    }

    /// J and K equations of state `i`
    pub fn excitation(&self, i: usize) -> Option<(&Expr, &Expr)> {
        self.excitations.get(i).map(|(j, k)| (j, k))
    }

    /// Initial flip-flop values
    pub fn initial_state(&self) -> u64 {
        self.init
    }

    /// Current flip-flop values
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Outputs and next state for `input` in `state`, without clocking
    pub fn step(&self, state: u64, input: u32) -> Observation {
        let assignment = u64::from(input) | state << self.dims.inputs();
        let outputs = self
            .outputs
            .iter()
            .enumerate()
            .filter(|(_, expr)| expr.evaluate(assignment))
            .fold(0u64, |acc, (i, _)| acc | 1 << i);
        let next = self
            .excitations
            .iter()
            .enumerate()
            .filter(|(f, (j, k))| {
                let pair = JkPair {
                    j: j.evaluate(assignment),
                    k: k.evaluate(assignment),
                };
                pair.next_state(state >> f & 1 == 1)
            })
            .fold(0u64, |acc, (f, _)| acc | 1 << f);
        Observation {
            outputs,
            state: next,
        }
    }
}

impl FromStr for SimCircuit {
    type Err = ParseCircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimCircuit::parse(s)
    }
}

impl Device for SimCircuit {
    type Error = SimError;

    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn observe_state(&mut self) -> Result<u64, SimError> {
        Ok(self.state)
    }

    fn apply_input(&mut self, input: u32) -> Result<Observation, SimError> {
        if input >= self.dims.input_values() {
            return Err(SimError::InputOutOfRange {
                input,
                inputs: self.dims.inputs(),
            });
        }
        let observation = self.step(self.state, input);
        self.state = observation.state;
        Ok(observation)
    }

    fn reset(&mut self) -> Result<(), SimError> {
        self.state = self.init;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
