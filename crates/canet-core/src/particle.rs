//! The particle record and its status state machine.
//!
//! A particle starts [`Floating`](ParticleStatus::Floating) and moves to
//! exactly one terminal status. Transitions are one-way: once a particle
//! leaves `Floating` its status never changes again.

use std::fmt;

use crate::point::Point;

/// Outcome class of a propagule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticleStatus {
    /// Still drifting; subject to wind, tide and diffusion.
    #[default]
    Floating,
    /// Settled inside the lagoon after sufficient dwell.
    Recruited,
    /// Deposited on the barrier or the coast.
    Stranded,
    /// Left the modelled domain (or reached a non-finite state).
    Lost,
}

impl ParticleStatus {
    /// All statuses in code order.
    pub const ALL: [ParticleStatus; 4] = [
        ParticleStatus::Floating,
        ParticleStatus::Recruited,
        ParticleStatus::Stranded,
        ParticleStatus::Lost,
    ];

    /// Whether this status is final for pre-settlement dynamics.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Floating)
    }

    /// Numeric code used by renderers: 0 floating, 1 recruited,
    /// 2 stranded, 3 lost.
    pub fn code(self) -> u8 {
        match self {
            Self::Floating => 0,
            Self::Recruited => 1,
            Self::Stranded => 2,
            Self::Lost => 3,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl fmt::Display for ParticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Floating => "floating",
            Self::Recruited => "recruited",
            Self::Stranded => "stranded",
            Self::Lost => "lost",
        };
        f.write_str(s)
    }
}

/// One propagule in a fixed-size cohort.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    /// Current planar position.
    pub position: Point,
    /// Current status. Never reverts to `Floating`.
    pub status: ParticleStatus,
    /// Number of steps this particle has been found inside the lagoon
    /// while floating. Never decremented, not reset on exit.
    pub dwell_depth: u32,
}

impl Particle {
    /// A fresh floating particle at `position`.
    pub fn floating(position: Point) -> Self {
        Self {
            position,
            status: ParticleStatus::Floating,
            dwell_depth: 0,
        }
    }

    /// Move to `status`.
    ///
    /// Returns `false` (and leaves the particle unchanged) if the particle
    /// is already terminal or `status` is `Floating`; terminal statuses
    /// are sticky.
    pub fn transition(&mut self, status: ParticleStatus) -> bool {
        if self.status.is_terminal() || !status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }
}

/// Per-status tallies for a population.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Particles still drifting.
    pub floating: usize,
    /// Particles settled in the lagoon.
    pub recruited: usize,
    /// Particles deposited on the barrier or coast.
    pub stranded: usize,
    /// Particles that left the domain.
    pub lost: usize,
}

impl StatusCounts {
    /// Tally the statuses of `particles`.
    pub fn tally<'a>(particles: impl IntoIterator<Item = &'a Particle>) -> Self {
        let mut counts = Self::default();
        for p in particles {
            counts.record(p.status);
        }
        counts
    }

    /// Count one particle with `status`.
    pub fn record(&mut self, status: ParticleStatus) {
        match status {
            ParticleStatus::Floating => self.floating += 1,
            ParticleStatus::Recruited => self.recruited += 1,
            ParticleStatus::Stranded => self.stranded += 1,
            ParticleStatus::Lost => self.lost += 1,
        }
    }

    /// Count for a single status.
    pub fn get(&self, status: ParticleStatus) -> usize {
        match status {
            ParticleStatus::Floating => self.floating,
            ParticleStatus::Recruited => self.recruited,
            ParticleStatus::Stranded => self.stranded,
            ParticleStatus::Lost => self.lost,
        }
    }

    /// Sum over all statuses; equals the population size.
    pub fn total(&self) -> usize {
        self.floating + self.recruited + self.stranded + self.lost
    }

    /// `recruited / total`, or `0.0` for an empty population.
    pub fn recruitment_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.recruited as f64 / total as f64
        }
    }
}

impl fmt::Display for StatusCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "floating={} recruited={} stranded={} lost={}",
            self.floating, self.recruited, self.stranded, self.lost
        )
    }
}
