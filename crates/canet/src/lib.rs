//! Canet: propagule drift and lagoon recruitment simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Canet sub-crates. For most users, adding `canet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use canet::prelude::*;
//!
//! let geometry = DomainGeometry::canet(CurveMode::Smooth).unwrap();
//! let config = DriftConfig {
//!     seed: Some(42),
//!     particle_count: 200,
//!     ..DriftConfig::default()
//! };
//! let mut world = DriftWorld::new(config, geometry).unwrap();
//! let result = world.step().unwrap();
//! assert_eq!(result.snapshot.step_id(), StepId(1));
//!
//! let outcome = world.run(&mut NullObserver).unwrap();
//! assert_eq!(outcome.counts.total(), 200);
//! println!("recruited {:.1}%", outcome.recruitment_rate * 100.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `canet-core` | Points, particles, statuses, step ids, errors |
//! | [`space`] | `canet-space` | Lagoon, barrier and domain geometry |
//! | [`propagators`] | `canet-propagators` | Motion model, classifier, seeded noise |
//! | [`engine`] | `canet-engine` | Simulation clock, snapshots, observers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`canet-core`).
///
/// [`types::Particle`], [`types::ParticleStatus`], [`types::Point`] and the
/// read-only [`types::PopulationView`] trait renderers consume.
pub use canet_core as types;

/// Domain geometry (`canet-space`).
///
/// [`space::LagoonBoundary`], [`space::BarrierBand`],
/// [`space::DomainBounds`] and the bundled [`space::DomainGeometry`].
pub use canet_space as space;

/// Per-particle dynamics (`canet-propagators`).
///
/// [`propagators::MotionModel`] and [`propagators::BoundaryClassifier`],
/// combined by [`propagators::advance`].
pub use canet_propagators as propagators;

/// Simulation clock (`canet-engine`).
///
/// [`engine::DriftWorld`] for stepping a run, [`engine::SnapshotSlot`] and
/// [`engine::ChannelObserver`] for renderers on other threads.
pub use canet_engine as engine;

/// Common imports for typical Canet usage.
///
/// ```rust
/// use canet::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use canet_core::{
        Particle, ParticleStatus, Point, PopulationView, StatusCounts, StepError, StepId,
    };

    // Geometry
    pub use canet_space::{
        BarrierBand, Breach, CurveMode, DomainBounds, DomainGeometry, GeometryError,
        LagoonBoundary,
    };

    // Dynamics
    pub use canet_propagators::{Diffusion, OutsideBarrierRule, SettledJitter};

    // Engine
    pub use canet_engine::{
        CancelToken, ChannelObserver, ConfigError, DriftConfig, DriftWorld, NullObserver,
        OwnedSnapshot, Population, RunOutcome, Snapshot, SnapshotSlot, SourceConfig,
        StepMetrics, StepObserver, StepResult,
    };
}
