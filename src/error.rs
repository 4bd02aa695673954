//! Crate-level error type
//!
//! Each subsystem has its own error enum; [`ProbeError`] wraps them for callers that run
//! the whole characterisation pipeline and only want to match on the stage that failed.

use std::fmt;
use std::io;

use crate::explore::ExploreError;
use crate::sim::ParseCircuitError;
use crate::solve::SolveError;

/// Any error the analysis pipeline can raise
#[derive(Debug)]
pub enum ProbeError {
    /// Exploration of the device failed
    Explore(ExploreError),

    /// Deriving equations from the table failed
    Solve(SolveError),

    /// A circuit description could not be read
    Circuit(ParseCircuitError),

    /// IO error wrapper
    ///
    /// Raised when reading circuit files or writing PLA output.
    Io(io::Error),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Explore(err) => write!(f, "Exploration failed: {}", err),
            ProbeError::Solve(err) => write!(f, "Solving failed: {}", err),
            ProbeError::Circuit(err) => write!(f, "Invalid circuit: {}", err),
            ProbeError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Explore(err) => Some(err),
            ProbeError::Solve(err) => Some(err),
            ProbeError::Circuit(err) => Some(err),
            ProbeError::Io(err) => Some(err),
        }
    }
}

impl From<ExploreError> for ProbeError {
    fn from(err: ExploreError) -> Self {
        ProbeError::Explore(err)
    }
}

impl From<SolveError> for ProbeError {
    fn from(err: SolveError) -> Self {
        ProbeError::Solve(err)
    }
}

impl From<ParseCircuitError> for ProbeError {
    fn from(err: ParseCircuitError) -> Self {
        ProbeError::Circuit(err)
    }
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        ProbeError::Io(err)
    }
}

// So that `?` works in functions returning io::Result
impl From<ProbeError> for io::Error {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Io(io_err) => io_err,
            ProbeError::Circuit(err) => err.into(),
            other => io::Error::other(other),
        }
    }
}
