//! Errors produced while building or stepping a simulation.  Construction-time problems are reported as
//! `InvalidArgument` so that a loader can reject a bad configuration before any step runs; the remaining variants
//! are raised while the simulation is live and are handed back to whoever is driving it.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A constructor or configuration value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A cell was asked to take on a state that doesn't exist for the running simulation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A cell's auxiliary payload isn't the kind the kernel works with.
    #[error("payload type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// No rule kernel is registered under the requested name.
    #[error("no rule kernel registered under `{0}`")]
    UnknownKernel(String),
}

impl SimError {
    pub(crate) fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SimError::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_state<S: Into<String>>(msg: S) -> Self {
        SimError::InvalidState(msg.into())
    }
}
