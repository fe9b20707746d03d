//! The per-particle update applied uniformly by the clock.
//!
//! Motion and classification stay together in [`advance`] so a single
//! particle's step can be exercised in isolation. The clock calls it once
//! per particle per step, with the step's shared [`Displacement`] and a
//! particle-specific RNG.

use canet_core::{Particle, ParticleStatus};
use canet_space::DomainGeometry;
use rand::Rng;

use crate::classifier::{BoundaryClassifier, Classification};
use crate::motion::{Displacement, MotionModel};

/// What one step did to one particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// A floating particle drifted and was classified.
    Drifted(Classification),
    /// A recruited particle received settled jitter.
    Jittered,
    /// The particle did not move.
    Frozen,
}

/// Advance `particle` by one step.
///
/// The status at entry decides the branch: floating particles drift then
/// classify; recruited particles jitter (if enabled); stranded and lost
/// particles are frozen. A particle recruited during this call is not
/// jittered until the next step.
pub fn advance<R: Rng + ?Sized>(
    particle: &mut Particle,
    displacement: &Displacement,
    motion: &MotionModel,
    classifier: &BoundaryClassifier,
    geometry: &DomainGeometry,
    rng: &mut R,
) -> Update {
    match particle.status {
        ParticleStatus::Floating => {
            motion.drift(particle, displacement, rng);
            Update::Drifted(classifier.classify(particle, geometry))
        }
        ParticleStatus::Recruited => {
            if motion.jitter(particle, rng) {
                Update::Jittered
            } else {
                Update::Frozen
            }
        }
        ParticleStatus::Stranded | ParticleStatus::Lost => Update::Frozen,
    }
}

/// Counts of per-particle outcomes over one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateTally {
    /// Floating particles still floating after the step (includes settling).
    pub floating: usize,
    /// Floating particles that gained dwell depth without recruiting.
    pub settling: usize,
    /// Newly recruited particles.
    pub recruited: usize,
    /// Newly stranded on solid barrier.
    pub stranded_on_barrier: usize,
    /// Newly stranded on the coast side.
    pub stranded_on_coast: usize,
    /// Newly lost on the coast side ([`OutsideBarrierRule::Lose`](crate::OutsideBarrierRule::Lose)).
    pub lost_beyond_barrier: usize,
    /// Newly lost outside the bounds.
    pub lost_out_of_bounds: usize,
    /// Newly lost through a non-finite position.
    pub lost_non_finite: usize,
    /// Recruited particles jittered.
    pub jittered: usize,
}

impl UpdateTally {
    /// Count one update.
    pub fn record(&mut self, update: Update) {
        match update {
            Update::Drifted(c) => match c {
                Classification::Inactive => {}
                Classification::Floating => self.floating += 1,
                Classification::Settling => {
                    self.floating += 1;
                    self.settling += 1;
                }
                Classification::Recruited => self.recruited += 1,
                Classification::StrandedOnBarrier => self.stranded_on_barrier += 1,
                Classification::StrandedOnCoast => self.stranded_on_coast += 1,
                Classification::LostBeyondBarrier => self.lost_beyond_barrier += 1,
                Classification::LostOutOfBounds => self.lost_out_of_bounds += 1,
                Classification::LostNonFinite => self.lost_non_finite += 1,
            },
            Update::Jittered => self.jittered += 1,
            Update::Frozen => {}
        }
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: &UpdateTally) {
        self.floating += other.floating;
        self.settling += other.settling;
        self.recruited += other.recruited;
        self.stranded_on_barrier += other.stranded_on_barrier;
        self.stranded_on_coast += other.stranded_on_coast;
        self.lost_beyond_barrier += other.lost_beyond_barrier;
        self.lost_out_of_bounds += other.lost_out_of_bounds;
        self.lost_non_finite += other.lost_non_finite;
        self.jittered += other.jittered;
    }

    /// Particles that changed status this step.
    pub fn transitions(&self) -> usize {
        self.recruited
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
    use crate::classifier::OutsideBarrierRule;
    use crate::motion::Diffusion;
    use crate::noise::particle_rng;
    use canet_core::{Point, StepId};
    use canet_test_utils::geometry::square_lagoon_geometry;

    fn still() -> MotionModel {
        MotionModel::builder()
            .diffusion(Diffusion::NONE)
            .settled_jitter(None)
            .build()
            .unwrap()
    }

    fn classifier() -> BoundaryClassifier {
        BoundaryClassifier::new(2, OutsideBarrierRule::Strand).unwrap()
    }

    #[test]
    fn floating_particle_drifts_then_classifies() {
        let g = square_lagoon_geometry();
        // Wind from the east at 10: one unit west per step, into the barrier.
        let motion = MotionModel::builder()
            .wind_direction_deg(90.0)
            .wind_speed(10.0)
            .diffusion(Diffusion::NONE)
            .build()
            .unwrap();
        let mut p = Particle::floating(Point::new(12.5, 40.0));
        let d = motion.displacement(StepId(0));
        let u = advance(&mut p, &d, &motion, &classifier(), &g, &mut particle_rng(0, StepId(0), 0));
        assert_eq!(u, Update::Drifted(Classification::StrandedOnBarrier));
        assert!((p.position.x - 11.5).abs() < 1e-12);
    }

    #[test]
    fn stranded_and_lost_are_frozen() {
        let g = square_lagoon_geometry();
        let motion = MotionModel::builder().wind_speed(25.0).build().unwrap();
        for status in [ParticleStatus::Stranded, ParticleStatus::Lost] {
            let mut p = Particle::floating(Point::new(40.0, 40.0));
            p.status = status;
            let d = motion.displacement(StepId(2));
            let u = advance(&mut p, &d, &motion, &classifier(), &g, &mut particle_rng(3, StepId(2), 0));
            assert_eq!(u, Update::Frozen);
            assert_eq!(p.position, Point::new(40.0, 40.0));
        }
    }

    #[test]
    fn recruited_particle_jitters_only_when_enabled() {
        let g = square_lagoon_geometry();
        let d = Displacement::default();
        let mut p = Particle::floating(Point::new(5.0, 5.0));
        p.status = ParticleStatus::Recruited;

        let u = advance(&mut p, &d, &still(), &classifier(), &g, &mut particle_rng(0, StepId(0), 0));
        assert_eq!(u, Update::Frozen);
        assert_eq!(p.position, Point::new(5.0, 5.0));

        let jittery = MotionModel::builder().build().unwrap();
        let u = advance(&mut p, &d, &jittery, &classifier(), &g, &mut particle_rng(0, StepId(0), 0));
        assert_eq!(u, Update::Jittered);
        assert_ne!(p.position, Point::new(5.0, 5.0));
        assert_eq!(p.status, ParticleStatus::Recruited);
    }

    #[test]
    fn newly_recruited_particle_is_not_jittered_in_same_step() {
        let g = square_lagoon_geometry();
        let motion = MotionModel::builder().diffusion(Diffusion::NONE).build().unwrap();
        let c = BoundaryClassifier::new(1, OutsideBarrierRule::Strand).unwrap();
        let mut p = Particle::floating(Point::new(5.0, 5.0));
        let u = advance(&mut p, &Displacement::default(), &motion, &c, &g, &mut particle_rng(0, StepId(0), 0));
        assert_eq!(u, Update::Drifted(Classification::Recruited));
        assert_eq!(p.position, Point::new(5.0, 5.0));
    }

    #[test]
    fn tally_records_and_merges() {
        let mut a = UpdateTally::default();
        a.record(Update::Drifted(Classification::Settling));
        a.record(Update::Drifted(Classification::Recruited));
        a.record(Update::Drifted(Classification::LostNonFinite));
        a.record(Update::Jittered);
        a.record(Update::Frozen);
        let mut b = UpdateTally::default();
        b.record(Update::Drifted(Classification::StrandedOnCoast));
        b.record(Update::Drifted(Classification::Floating));
        a.merge(&b);
        assert_eq!(a.floating, 2);
        assert_eq!(a.settling, 1);
        assert_eq!(a.recruited, 1);
        assert_eq!(a.stranded_on_coast, 1);
        assert_eq!(a.lost_non_finite, 1);
        assert_eq!(a.jittered, 1);
        assert_eq!(a.transitions(), 3);
    }
}
