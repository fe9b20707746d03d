//! Boundary classification of floating particles.
//!
//! After a floating particle moves, its new position is tested against
//! the domain geometry in a fixed priority order; the first matching rule
//! wins:
//!
//! 1. inside the lagoon: dwell depth +1, recruited at the threshold
//! 2. on solid barrier (band x-range, outside every breach): stranded
//! 3. on the coast side of the band: stranded, or lost under
//!    [`OutsideBarrierRule::Lose`]
//! 4. outside the domain bounds (or non-finite): lost
//! 5. otherwise still floating
//!
//! The lagoon is tested first because it overlaps the band's x-range near
//! the breach; a settling particle there must not be stranded.

use canet_core::{Particle, ParticleStatus};
use canet_space::DomainGeometry;

/// What happens to a floating particle that ends a step on the coast
/// side of the barrier band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutsideBarrierRule {
    /// Washed onto the coast: `Stranded`.
    #[default]
    Strand,
    /// Treated as leaving the system: `Lost`.
    Lose,
}

/// Result of classifying one particle for one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The particle was not floating; nothing was evaluated.
    Inactive,
    /// Rule 5: still drifting.
    Floating,
    /// Rule 1 below the threshold: inside the lagoon, dwell increased.
    Settling,
    /// Rule 1 at the threshold.
    Recruited,
    /// Rule 2.
    StrandedOnBarrier,
    /// Rule 3 under [`OutsideBarrierRule::Strand`].
    StrandedOnCoast,
    /// Rule 3 under [`OutsideBarrierRule::Lose`].
    LostBeyondBarrier,
    /// Rule 4 with a finite position.
    LostOutOfBounds,
    /// Rule 4 reached by a non-finite position.
    LostNonFinite,
}

impl Classification {
    /// Status the particle holds after this classification, if it was
    /// evaluated.
    pub fn status(self) -> Option<ParticleStatus> {
        match self {
            Self::Inactive => None,
            Self::Floating | Self::Settling => Some(ParticleStatus::Floating),
            Self::Recruited => Some(ParticleStatus::Recruited),
            Self::StrandedOnBarrier | Self::StrandedOnCoast => Some(ParticleStatus::Stranded),
            Self::LostBeyondBarrier | Self::LostOutOfBounds | Self::LostNonFinite => {
                Some(ParticleStatus::Lost)
            }
        }
    }

    /// Whether this classification changed the particle's status.
    pub fn is_transition(self) -> bool {
        matches!(self.status(), Some(s) if s.is_terminal())
    }
}

/// The ordered boundary rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryClassifier {
    dwell_threshold: u32,
    outside_barrier: OutsideBarrierRule,
}

impl BoundaryClassifier {
    /// Create a classifier recruiting after `dwell_threshold` lagoon steps.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `dwell_threshold` is zero.
    pub fn new(dwell_threshold: u32, outside_barrier: OutsideBarrierRule) -> Result<Self, String> {
        if dwell_threshold == 0 {
            return Err("dwell_threshold must be at least 1".to_string());
        }
        Ok(Self {
            dwell_threshold,
            outside_barrier,
        })
    }

    /// Lagoon steps needed for recruitment.
    pub fn dwell_threshold(&self) -> u32 {
        self.dwell_threshold
    }

    /// Rule applied to particles on the coast side of the band.
    pub fn outside_barrier(&self) -> OutsideBarrierRule {
        self.outside_barrier
    }

    /// Classify `particle` at its current position, updating its dwell
    /// depth and status in place.
    ///
    /// Non-floating particles are left untouched ([`Classification::Inactive`]).
    pub fn classify(&self, particle: &mut Particle, geometry: &DomainGeometry) -> Classification {
        if particle.status != ParticleStatus::Floating {
            return Classification::Inactive;
        }
        let p = particle.position;

        if geometry.lagoon().contains(p) {
            particle.dwell_depth = particle.dwell_depth.saturating_add(1);
            if particle.dwell_depth >= self.dwell_threshold {
                particle.transition(ParticleStatus::Recruited);
                return Classification::Recruited;
            }
            return Classification::Settling;
        }

        let barrier = geometry.barrier();
        if barrier.blocks(p) {
            particle.transition(ParticleStatus::Stranded);
            return Classification::StrandedOnBarrier;
        }

        if barrier.is_coastward(p) {
            return match self.outside_barrier {
                OutsideBarrierRule::Strand => {
                    particle.transition(ParticleStatus::Stranded);
                    Classification::StrandedOnCoast
                }
                OutsideBarrierRule::Lose => {
                    particle.transition(ParticleStatus::Lost);
                    Classification::LostBeyondBarrier
                }
            };
        }

        if !geometry.bounds().contains(p) {
            particle.transition(ParticleStatus::Lost);
            return if p.is_finite() {
                Classification::LostOutOfBounds
            } else {
                Classification::LostNonFinite
            };
        }

        Classification::Floating
    }
}
