//! Error types for two-level minimization

use std::fmt;
use std::io;

/// Errors raised while building or minimizing a [`Function`](super::Function)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
    /// More variables than exhaustive prime generation can handle
    TooManyVariables {
        /// Requested number of variables
        requested: usize,
        /// Largest supported number
        max: usize,
    },
    /// A minterm index does not fit in the function's variable count
    MintermOutOfRange {
        /// The offending minterm
        minterm: u32,
        /// Number of variables of the function
        num_vars: usize,
    },
    /// The same minterm was labelled both 1 and 0
    ConflictingLabel {
        /// The doubly labelled minterm
        minterm: u32,
    },
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::TooManyVariables { requested, max } => write!(
                f,
                "Cannot minimize a function of {} variables (at most {} supported)",
                requested, max
            ),
            MinimizeError::MintermOutOfRange { minterm, num_vars } => write!(
                f,
                "Minterm {} out of range for a function of {} variables",
                minterm, num_vars
            ),
            MinimizeError::ConflictingLabel { minterm } => {
                write!(f, "Minterm {} is labelled both 1 and 0", minterm)
            }
        }
    }
}

impl std::error::Error for MinimizeError {}

impl From<MinimizeError> for io::Error {
    fn from(err: MinimizeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
