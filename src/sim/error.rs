//! Error types for circuit descriptions

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::table::TableError;

/// Errors raised while reading a circuit description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCircuitError {
    /// The text does not follow the grammar
    InvalidSyntax {
        /// Parser message
        message: Arc<str>,
        /// Byte offset of the problem, if known
        position: Option<usize>,
    },
    /// An expression refers to a signal that is neither an input nor a state
    UnknownSignal {
        /// The name used
        name: String,
        /// Byte offset of the reference
        position: usize,
    },
    /// A name was declared twice
    DuplicateSignal {
        /// The repeated name
        name: String,
        /// Byte offset of the second declaration
        position: usize,
    },
    /// A state has no `jk` statement, or a `jk` statement names no state
    Excitation {
        /// The state name
        name: String,
        /// What is wrong with it
        problem: &'static str,
    },
    /// The circuit is wider than the explorer supports
    Dimensions(TableError),
}

impl fmt::Display for ParseCircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCircuitError::InvalidSyntax { message, position } => {
                if let Some(pos) = position {
                    write!(f, "Failed to parse circuit at position {}: {}", pos, message)
                } else {
                    write!(f, "Failed to parse circuit: {}", message)
                }
            }
            ParseCircuitError::UnknownSignal { name, position } => {
                write!(f, "Unknown signal '{}' at position {}", name, position)
            }
            ParseCircuitError::DuplicateSignal { name, position } => {
                write!(f, "Signal '{}' declared twice (position {})", name, position)
            }
            ParseCircuitError::Excitation { name, problem } => {
                write!(f, "State '{}' {}", name, problem)
            }
            ParseCircuitError::Dimensions(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseCircuitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseCircuitError::Dimensions(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for ParseCircuitError {
    fn from(err: TableError) -> Self {
        ParseCircuitError::Dimensions(err)
    }
}

impl From<ParseCircuitError> for io::Error {
    fn from(err: ParseCircuitError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors raised by a running [`SimCircuit`](super::SimCircuit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The input vector has bits beyond the declared inputs
    InputOutOfRange {
        /// The applied input
        input: u32,
        /// Number of declared inputs
        inputs: usize,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InputOutOfRange { input, inputs } => write!(
                f,
                "Input {:#b} does not fit the circuit's {} input(s)",
                input, inputs
            ),
        }
    }
}

impl std::error::Error for SimError {}
