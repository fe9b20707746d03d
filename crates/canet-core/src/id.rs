//! Strongly-typed identifiers.

use std::fmt;

/// Zero-based index of a simulation step.
///
/// `StepId(0)` is the state before any step has run. After the clock
/// executes step `k` (which reads environmental terms for index `k`),
/// the published state carries `StepId(k + 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u32);

impl StepId {
    /// The step after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StepId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
