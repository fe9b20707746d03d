//! Seeded Gaussian noise.
//!
//! Every particle draws from its own ChaCha8 stream keyed by
//! `(seed, step, particle index)`. Streams never overlap, so a step
//! produces identical results whether particles are updated in order,
//! in reverse, or split across threads.

use canet_core::StepId;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Stream reserved for seeding the initial population.
pub const SEEDING_STREAM: u64 = u64::MAX;

/// Odd 64-bit constant used to spread step indices across the key space.
const STEP_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// RNG for particle `index` during step `step`.
pub fn particle_rng(seed: u64, step: StepId, index: usize) -> ChaCha8Rng {
    let key = seed ^ (u64::from(step.0) + 1).wrapping_mul(STEP_MIX);
    let mut rng = ChaCha8Rng::seed_from_u64(key);
    rng.set_stream(index as u64);
    rng
}

/// RNG used to place the initial population.
pub fn seeding_rng(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(SEEDING_STREAM);
    rng
}

/// Standard normal sample via the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Zero-mean Gaussian sample with standard deviation `sigma`.
///
/// A zero `sigma` returns exactly `0.0` without drawing.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    if sigma == 0.0 {
        0.0
    } else {
        sigma * standard_normal(rng)
    }
}
