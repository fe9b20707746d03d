//! The mutable particle cohort owned by a run.

use canet_core::{Particle, Point, PopulationView, StepId};
use canet_propagators::noise::{gaussian, seeding_rng};

use crate::config::SourceConfig;

/// Fixed-size, index-addressed cohort.
///
/// Particles are never added, removed or reordered after construction;
/// only [`DriftWorld`](crate::DriftWorld) mutates them, one step at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    step: StepId,
    particles: Vec<Particle>,
}

impl Population {
    /// `count` floating particles released around `source`, drawn from the
    /// seeding stream of `seed`.
    pub fn seeded(count: usize, source: &SourceConfig, seed: u64) -> Self {
        let mut rng = seeding_rng(seed);
        let particles = (0..count)
            .map(|_| {
                let x = source.centre.x + gaussian(&mut rng, source.sigma_x);
                let y = source.centre.y + gaussian(&mut rng, source.sigma_y);
                Particle::floating(Point::new(x, y))
            })
            .collect();
        Self {
            step: StepId(0),
            particles,
        }
    }

    /// Floating particles at explicit positions.
    pub fn from_positions(positions: impl IntoIterator<Item = Point>) -> Self {
        Self::from_particles(positions.into_iter().map(Particle::floating).collect())
    }

    /// An explicit cohort, in any state, at step 0.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self {
            step: StepId(0),
            particles,
        }
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub(crate) fn set_step(&mut self, step: StepId) {
        self.step = step;
    }

    /// Consume the population, returning its particles.
    pub fn into_particles(self) -> Vec<Particle> {
        self.particles
    }
}

impl PopulationView for Population {
    fn step_id(&self) -> StepId {
        self.step
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
