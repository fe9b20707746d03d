//! Simulation clock for Canet propagule drift runs.
//!
//! [`DriftWorld`] owns one cohort of particles and advances it a fixed
//! number of steps, applying the motion model and boundary classifier to
//! every particle per step. After each step a read-only [`Snapshot`] is
//! available to renderers, either borrowed from the world, pushed through
//! a [`StepObserver`], or published to a shared [`SnapshotSlot`] for
//! readers on other threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod hash;
pub mod metrics;
pub mod observer;
pub mod population;
pub mod snapshot;
pub mod world;

pub use cancel::CancelToken;
pub use config::{ConfigError, DriftConfig, SourceConfig};
pub use hash::{population_hash, TrajectoryHasher};
pub use metrics::StepMetrics;
pub use observer::{ChannelObserver, Frame, NullObserver, StepObserver};
pub use population::Population;
pub use snapshot::{OwnedSnapshot, Snapshot, SnapshotSlot};
pub use world::{run_to_completion, DriftWorld, RunError, RunOutcome, StepResult};

pub use canet_propagators::{Diffusion, OutsideBarrierRule, SettledJitter};
