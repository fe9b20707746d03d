//! Per-particle dynamics for Canet drift simulations.
//!
//! - [`motion`]: wind advection, tidal onshore bias and diffusion
//! - [`noise`]: seeded per-particle Gaussian streams
//! - [`classifier`]: the ordered boundary rules that settle, strand or
//!   lose a floating particle
//! - [`update`]: the single per-particle update the clock applies to
//!   every particle each step
//!
//! Everything here is stateless between steps. Randomness is injected:
//! callers hand in an RNG per particle per step, normally from
//! [`noise::particle_rng`], so results do not depend on the order (or
//! the thread) in which particles are updated.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod motion;
pub mod noise;
pub mod update;

pub use classifier::{BoundaryClassifier, Classification, OutsideBarrierRule};
pub use motion::{
    displacement, tide_term, Diffusion, Displacement, MotionModel, SettledJitter, WindForcing,
};
pub use update::{advance, Update, UpdateTally};
