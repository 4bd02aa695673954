//! Error types for equation solving

use super::Column;
use crate::minimize::MinimizeError;
use std::fmt;
use std::io;

/// Errors raised by the [`Solver`](super::Solver)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The column does not exist for this circuit
    UnknownColumn {
        /// The requested column
        column: Column,
    },
    /// A signal name was given twice
    DuplicateLabel {
        /// The repeated name
        name: String,
    },
    /// Building or minimizing the column's function failed
    Minimize(MinimizeError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::UnknownColumn { column } => write!(f, "No such column: {}", column),
            SolveError::DuplicateLabel { name } => write!(f, "Duplicate signal name '{}'", name),
            SolveError::Minimize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Minimize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MinimizeError> for SolveError {
    fn from(err: MinimizeError) -> Self {
        SolveError::Minimize(err)
    }
}

impl From<SolveError> for io::Error {
    fn from(err: SolveError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
