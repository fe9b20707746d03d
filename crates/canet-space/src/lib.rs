//! Domain geometry for Canet drift simulations.
//!
//! The modelled coast is three pieces of immutable geometry, built once
//! per configuration and shared read-only by every step:
//!
//! - [`LagoonBoundary`]: closed settlement region, straight or smooth
//!   ([`CurveMode`]), with an inclusive point-in-region test
//! - [`BarrierBand`]: the sand barrier between open sea and lagoon, with
//!   passable [`Breach`] intervals
//! - [`DomainBounds`]: the rectangle of the simulated world
//!
//! [`DomainGeometry`] bundles and cross-validates the three.
//!
//! Every predicate fails closed: a non-finite point is never inside the
//! lagoon, never blocked by the barrier and never within bounds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod barrier;
pub mod bounds;
pub mod domain;
pub mod error;
pub mod lagoon;

pub use barrier::{BarrierBand, Breach};
pub use bounds::DomainBounds;
pub use domain::{DomainGeometry, CANET_BARRIER, CANET_BOUNDS, CANET_BREACH, CANET_LAGOON};
pub use error::GeometryError;
pub use lagoon::{CurveMode, LagoonBoundary};
