//! Per-step metrics for the simulation clock.
//!
//! [`StepMetrics`] counts the transitions a step produced and how long it
//! took, for telemetry and for renderers that annotate frames.

use canet_core::StepId;
use canet_propagators::UpdateTally;

/// Timing and outcome counts for a single step.
///
/// Transition counts cover only particles that changed status during this
/// step; cumulative totals come from the snapshot's
/// [`counts()`](canet_core::PopulationView::counts).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Step index after the step was applied (1 for the first step).
    pub step: StepId,
    /// Wall-clock time for the step, in microseconds.
    pub total_us: u64,
    /// Time spent publishing the shared snapshot, in microseconds.
    pub snapshot_publish_us: u64,
    /// Particles recruited this step.
    pub newly_recruited: usize,
    /// Particles stranded on solid barrier this step.
    pub stranded_on_barrier: usize,
    /// Particles stranded on the coast side this step.
    pub stranded_on_coast: usize,
    /// Particles lost on the coast side this step.
    pub lost_beyond_barrier: usize,
    /// Particles lost outside the domain bounds this step.
    pub lost_out_of_bounds: usize,
    /// Particles lost to a non-finite position this step.
    pub lost_non_finite: usize,
    /// Floating particles whose dwell depth grew (including recruits).
    pub dwell_increments: usize,
    /// Recruited particles that received settled jitter.
    pub jittered: usize,
    /// Particles still floating after the step.
    pub floating: usize,
}

impl StepMetrics {
    pub(crate) fn from_tally(step: StepId, tally: &UpdateTally) -> Self {
        Self {
            step,
            newly_recruited: tally.recruited,
            stranded_on_barrier: tally.stranded_on_barrier,
            stranded_on_coast: tally.stranded_on_coast,
            lost_beyond_barrier: tally.lost_beyond_barrier,
            lost_out_of_bounds: tally.lost_out_of_bounds,
            lost_non_finite: tally.lost_non_finite,
            dwell_increments: tally.settling + tally.recruited,
            jittered: tally.jittered,
            floating: tally.floating,
            ..Self::default()
        }
    }

    /// Particles that left `Floating` this step.
    pub fn transitions(&self) -> usize {
        self.newly_recruited
            + self.stranded_on_barrier
            + self.stranded_on_coast
            + self.lost_beyond_barrier
            + self.lost_out_of_bounds
            + self.lost_non_finite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.step, StepId(0));
        assert_eq!(m.total_us, 0);
        assert_eq!(m.transitions(), 0);
        assert_eq!(m.floating, 0);
    }

    #[test]
    fn tally_maps_onto_metrics() {
        let tally = UpdateTally {
            floating: 7,
            settling: 3,
            recruited: 2,
            stranded_on_barrier: 1,
            stranded_on_coast: 1,
            lost_beyond_barrier: 0,
            lost_out_of_bounds: 4,
            lost_non_finite: 1,
            jittered: 5,
        };
        let m = StepMetrics::from_tally(StepId(9), &tally);
        assert_eq!(m.step, StepId(9));
        assert_eq!(m.dwell_increments, 5);
        assert_eq!(m.transitions(), tally.transitions());
        assert_eq!(m.jittered, 5);
        assert_eq!(m.floating, 7);
    }
}
