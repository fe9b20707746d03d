//! Core types and traits for the Canet propagule drift engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the rest of the workspace:
//! planar points, step IDs, the particle record and its status machine,
//! error types, and the read-only population view used by renderers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod particle;
pub mod point;
pub mod traits;

pub use error::StepError;
pub use id::StepId;
pub use particle::{Particle, ParticleStatus, StatusCounts};
pub use point::Point;
pub use traits::PopulationView;
