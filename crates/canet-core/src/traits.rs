//! Read-only access to a population at a completed step.

use crate::id::StepId;
use crate::particle::{Particle, ParticleStatus, StatusCounts};
use crate::point::Point;

/// Read-only view of a population after a completed step.
///
/// Implemented by the live world snapshot (borrowed) and by owned
/// snapshots handed to renderer threads. Renderers draw from
/// [`positions`](Self::positions) and [`statuses`](Self::statuses);
/// neither ever observes a half-applied step.
pub trait PopulationView {
    /// Step index this view was taken at.
    fn step_id(&self) -> StepId;

    /// The particles, in cohort order.
    fn particles(&self) -> &[Particle];

    /// Cohort size.
    fn len(&self) -> usize {
        self.particles().len()
    }

    /// Whether the cohort is empty.
    fn is_empty(&self) -> bool {
        self.particles().is_empty()
    }

    /// Positions in cohort order.
    fn positions(&self) -> Vec<Point> {
        self.particles().iter().map(|p| p.position).collect()
    }

    /// Statuses in cohort order.
    fn statuses(&self) -> Vec<ParticleStatus> {
        self.particles().iter().map(|p| p.status).collect()
    }

    /// Per-status tallies.
    fn counts(&self) -> StatusCounts {
        StatusCounts::tally(self.particles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<Particle>);

    impl PopulationView for Fixed {
        fn step_id(&self) -> StepId {
            StepId(3)
        }
        fn particles(&self) -> &[Particle] {
            &self.0
        }
    }

    #[test]
    fn provided_methods_follow_particles() {
        let mut a = Particle::floating(Point::new(1.0, 2.0));
        a.status = ParticleStatus::Lost;
        let b = Particle::floating(Point::new(3.0, 4.0));
        let view = Fixed(vec![a, b]);
        assert_eq!(view.len(), 2);
        assert!(!view.is_empty());
        assert_eq!(view.positions(), vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(
            view.statuses(),
            vec![ParticleStatus::Lost, ParticleStatus::Floating]
        );
        assert_eq!(view.counts().lost, 1);
        assert_eq!(view.step_id(), StepId(3));
    }
}
