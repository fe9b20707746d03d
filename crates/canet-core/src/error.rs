//! Error types raised while stepping a simulation.
//!
//! Configuration and geometry errors live next to the code that validates
//! them (`canet-engine` and `canet-space`); this module holds the runtime
//! errors of the step loop.

use std::error::Error;
use std::fmt;

/// Errors from the simulation clock during `step()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The configured step budget has already been consumed.
    BudgetExhausted {
        /// The configured number of steps.
        step_count: u32,
    },
    /// A worker thread panicked while updating a chunk of particles.
    WorkerPanicked {
        /// Index of the chunk whose worker failed.
        chunk: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetExhausted { step_count } => {
                write!(f, "step budget of {step_count} steps exhausted")
            }
            Self::WorkerPanicked { chunk } => {
                write!(f, "worker for particle chunk {chunk} panicked")
            }
        }
    }
}

impl Error for StepError {}
