//! Test fixtures and mock types for Canet development.
//!
//! Provides small hand-checkable geometries ([`geometry`]) and a
//! [`MockPopulation`] implementing [`PopulationView`] for exercising
//! code that only reads a cohort.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod geometry;

use canet_core::{Particle, ParticleStatus, Point, PopulationView, StepId};

/// Fixed cohort implementing [`PopulationView`].
///
/// Build with [`at`](MockPopulation::at) and adjust individual
/// particles with [`with_status`](MockPopulation::with_status).
#[derive(Clone, Debug, Default)]
pub struct MockPopulation {
    step: StepId,
    particles: Vec<Particle>,
}

impl MockPopulation {
    /// Floating particles at the given coordinates, step 0.
    pub fn at(points: &[(f64, f64)]) -> Self {
        Self {
            step: StepId(0),
            particles: floating_at(points),
        }
    }

    /// Set the reported step index.
    pub fn with_step(mut self, step: StepId) -> Self {
        self.step = step;
        self
    }

    /// Force the status of particle `index`.
    pub fn with_status(mut self, index: usize, status: ParticleStatus) -> Self {
        self.particles[index].status = status;
        self
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

impl PopulationView for MockPopulation {
    fn step_id(&self) -> StepId {
        self.step
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Floating particles at the given coordinates.
pub fn floating_at(points: &[(f64, f64)]) -> Vec<Particle> {
    points
        .iter()
        .map(|&(x, y)| Particle::floating(Point::new(x, y)))
        .collect()
}

/// `n` floating particles evenly spaced on a circle.
pub fn ring(centre: Point, radius: f64, n: usize) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / n.max(1) as f64;
            Particle::floating(centre.offset(radius * a.cos(), radius * a.sin()))
        })
        .collect()
}
