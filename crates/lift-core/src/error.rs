//! Error type shared by the deviate sources and anything that reads them.
//!
//! Every variant is fatal to a run.  Nothing in the simulator retries a read:
//! results are a pure function of the deviate sequence, so a missing value
//! cannot be papered over without changing the answer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiftError {
    /// The deviate source ran out after `drawn` successful reads.
    #[error("deviate source exhausted after {drawn} values")]
    Exhausted { drawn: u64 },

    #[error("deviate parse error at value {index}: {message}")]
    Parse { index: u64, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
