//! Error types for the truth-table store

use super::StateId;
use std::fmt;
use std::io;

/// Two probes of the same (state, input) pair disagreed
///
/// The device is assumed deterministic, so this is always fatal: it means the
/// device is non-deterministic, mis-wired, or its state is not fully observable.
/// Both conflicting rows are carried so the caller can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyError {
    /// Source state of the conflicting transition
    pub state: StateId,
    /// Input value applied in that state
    pub input: u32,
    /// Outputs and next-state signature that were already recorded
    pub recorded: (u64, u64),
    /// Outputs and next-state signature seen by the latest probe
    pub observed: (u64, u64),
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inconsistent transition from {} on input {:#b}: recorded outputs {:#b} -> state {:#b}, \
             observed outputs {:#b} -> state {:#b}",
            self.state,
            self.input,
            self.recorded.0,
            self.recorded.1,
            self.observed.0,
            self.observed.1
        )
    }
}

impl std::error::Error for ConsistencyError {}

/// Errors raised by [`TruthTable`](super::TruthTable) operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Requested dimensions exceed what the store can index
    InvalidDimensions {
        /// Which dimension was rejected
        what: &'static str,
        /// The requested size
        requested: usize,
        /// The largest supported size
        max: usize,
    },
    /// A value does not fit in the declared bit width
    ValueOutOfRange {
        /// Which kind of value (input, outputs, state)
        what: &'static str,
        /// The offending value
        value: u64,
        /// The declared width in bits
        width: usize,
    },
    /// A state index that was never discovered
    UnknownState {
        /// The unknown state
        state: StateId,
    },
    /// The same (state, input) pair was recorded with a different outcome
    Consistency(ConsistencyError),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidDimensions {
                what,
                requested,
                max,
            } => write!(
                f,
                "Invalid number of {}: {} (at most {} supported)",
                what, requested, max
            ),
            TableError::ValueOutOfRange { what, value, width } => write!(
                f,
                "{} value {:#b} does not fit in {} bit(s)",
                what, value, width
            ),
            TableError::UnknownState { state } => write!(f, "Unknown state {}", state),
            TableError::Consistency(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Consistency(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConsistencyError> for TableError {
    fn from(err: ConsistencyError) -> Self {
        TableError::Consistency(err)
    }
}

impl From<TableError> for io::Error {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Consistency(_) => io::Error::new(io::ErrorKind::InvalidData, err),
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
