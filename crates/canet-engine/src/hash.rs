//! FNV-1a fingerprints of population state.
//!
//! Cheap determinism checks: two runs with equal seed and configuration
//! must produce equal per-step hashes. Floats are hashed by bit pattern,
//! so `-0.0` and `0.0` differ and every NaN payload is distinct.

use canet_core::{Particle, PopulationView};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Incremental FNV-1a hasher over successive population states.
#[derive(Clone, Debug)]
pub struct TrajectoryHasher {
    state: u64,
    steps: u32,
}

impl Default for TrajectoryHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectoryHasher {
    /// Start an empty trajectory.
    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET,
            steps: 0,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_particle(&mut self, p: &Particle) {
        self.write(&p.position.x.to_bits().to_le_bytes());
        self.write(&p.position.y.to_bits().to_le_bytes());
        self.write(&[p.status.code()]);
        self.write(&p.dwell_depth.to_le_bytes());
    }

    /// Fold one population state into the trajectory.
    pub fn record(&mut self, view: &impl PopulationView) {
        self.write(&view.step_id().0.to_le_bytes());
        self.write(&(view.len() as u64).to_le_bytes());
        for p in view.particles() {
            self.write_particle(p);
        }
        self.steps += 1;
    }

    /// Number of states recorded.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Current hash value.
    pub fn finish(&self) -> u64 {
        self.state
    }
}

/// Hash a single population state.
pub fn population_hash(view: &impl PopulationView) -> u64 {
    let mut h = TrajectoryHasher::new();
    h.record(view);
    h.finish()
}
