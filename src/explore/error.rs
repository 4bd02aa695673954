//! Error types for exploration

use crate::table::{ConsistencyError, TableError};
use std::fmt;
use std::io;

/// Errors raised while exploring a device
#[derive(Debug)]
pub enum ExploreError {
    /// The device transport failed
    Device(Box<dyn std::error::Error + Send + Sync>),
    /// The device contradicted an earlier observation
    Consistency(ConsistencyError),
    /// The device reported values the table cannot store
    Table(TableError),
    /// After a reset the device was not in its power-on state
    ResetDiverged {
        /// Flip-flop values observed at the first power-on
        expected: u64,
        /// Flip-flop values observed after this reset
        observed: u64,
    },
}

impl ExploreError {
    pub(crate) fn device<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        ExploreError::Device(Box::new(err))
    }
}

impl fmt::Display for ExploreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExploreError::Device(e) => write!(f, "Device error: {}", e),
            ExploreError::Consistency(e) => write!(f, "Device is not deterministic: {}", e),
            ExploreError::Table(e) => write!(f, "{}", e),
            ExploreError::ResetDiverged { expected, observed } => write!(
                f,
                "Reset led to state {:#b} instead of the power-on state {:#b}",
                observed, expected
            ),
        }
    }
}

impl std::error::Error for ExploreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExploreError::Device(e) => Some(e.as_ref()),
            ExploreError::Consistency(e) => Some(e),
            ExploreError::Table(e) => Some(e),
            ExploreError::ResetDiverged { .. } => None,
        }
    }
}

impl From<TableError> for ExploreError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Consistency(e) => ExploreError::Consistency(e),
            other => ExploreError::Table(other),
        }
    }
}

impl From<ExploreError> for io::Error {
    fn from(err: ExploreError) -> Self {
        match err {
            ExploreError::Table(_) => io::Error::new(io::ErrorKind::InvalidInput, err),
            _ => io::Error::other(err),
        }
    }
}
