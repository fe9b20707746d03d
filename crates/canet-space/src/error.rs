//! Error types for geometry construction.

use canet_core::Point;
use std::fmt;

/// Errors arising from geometry construction.
///
/// Geometry is validated once, before any step runs; queries on a
/// successfully built geometry never fail.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A lagoon needs at least three control points.
    TooFewControlPoints {
        /// Number of points supplied.
        got: usize,
    },
    /// A control point has a NaN or infinite coordinate.
    NonFiniteControlPoint {
        /// Index of the offending point.
        index: usize,
    },
    /// The lagoon encloses no area (all points collinear or coincident).
    DegenerateLagoon,
    /// Part of the lagoon lies outside the domain bounds.
    LagoonOutsideBounds {
        /// First boundary vertex found outside the bounds.
        vertex: Point,
    },
    /// The domain rectangle is empty or non-finite.
    InvalidBounds {
        /// What went wrong.
        reason: String,
    },
    /// The barrier band or one of its breaches is malformed.
    InvalidBarrier {
        /// What went wrong.
        reason: String,
    },
    /// The barrier band's x-range is not inside the domain bounds.
    BarrierOutsideBounds,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewControlPoints { got } => {
                write!(f, "lagoon needs at least 3 control points, got {got}")
            }
            Self::NonFiniteControlPoint { index } => {
                write!(f, "control point {index} is not finite")
            }
            Self::DegenerateLagoon => write!(f, "lagoon boundary encloses no area"),
            Self::LagoonOutsideBounds { vertex } => {
                write!(f, "lagoon vertex {vertex} lies outside the domain bounds")
            }
            Self::InvalidBounds { reason } => write!(f, "invalid domain bounds: {reason}"),
            Self::InvalidBarrier { reason } => write!(f, "invalid barrier: {reason}"),
            Self::BarrierOutsideBounds => {
                write!(f, "barrier band lies outside the domain bounds")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
