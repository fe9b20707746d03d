//! The complete, cross-validated domain geometry.

use canet_core::Point;

use crate::barrier::{BarrierBand, Breach};
use crate::bounds::DomainBounds;
use crate::error::GeometryError;
use crate::lagoon::{CurveMode, LagoonBoundary};

/// Lagoon control points of the Canet layout.
pub const CANET_LAGOON: [(f64, f64); 10] = [
    (15.0, 30.0),
    (12.0, 45.0),
    (15.0, 70.0),
    (30.0, 85.0),
    (45.0, 75.0),
    (51.5, 59.0),
    (51.5, 41.0),
    (42.0, 30.0),
    (25.0, 15.0),
    (15.0, 30.0),
];

/// Barrier band of the Canet layout, `(x_min, x_max)`.
pub const CANET_BARRIER: (f64, f64) = (48.5, 51.5);

/// The single breach of the Canet layout, `(y_min, y_max)`.
pub const CANET_BREACH: (f64, f64) = (41.0, 59.0);

/// Domain rectangle of the Canet layout, `(x_min, x_max, y_min, y_max)`.
pub const CANET_BOUNDS: (f64, f64, f64, f64) = (-5.0, 140.0, -10.0, 110.0);

/// Lagoon, barrier and bounds, validated together.
///
/// Immutable after construction; the engine shares it behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainGeometry {
    lagoon: LagoonBoundary,
    barrier: BarrierBand,
    bounds: DomainBounds,
}

impl DomainGeometry {
    /// Bundle the three pieces.
    ///
    /// # Errors
    ///
    /// Fails if any lagoon vertex lies outside `bounds`, or if the
    /// barrier's x-range is not inside `bounds`.
    pub fn new(
        lagoon: LagoonBoundary,
        barrier: BarrierBand,
        bounds: DomainBounds,
    ) -> Result<Self, GeometryError> {
        if let Some(&vertex) = lagoon.vertices().iter().find(|v| !bounds.contains(**v)) {
            return Err(GeometryError::LagoonOutsideBounds { vertex });
        }
        if barrier.x_min() < bounds.x_min() || barrier.x_max() > bounds.x_max() {
            return Err(GeometryError::BarrierOutsideBounds);
        }
        Ok(Self {
            lagoon,
            barrier,
            bounds,
        })
    }

    /// The Canet lagoon layout in the given curve mode.
    pub fn canet(mode: CurveMode) -> Result<Self, GeometryError> {
        let nodes: Vec<Point> = CANET_LAGOON.iter().map(|&p| p.into()).collect();
        let lagoon = LagoonBoundary::build(&nodes, mode)?;
        let barrier = BarrierBand::new(
            CANET_BARRIER.0,
            CANET_BARRIER.1,
            [Breach::new(CANET_BREACH.0, CANET_BREACH.1)],
        )?;
        let (x_min, x_max, y_min, y_max) = CANET_BOUNDS;
        let bounds = DomainBounds::new(x_min, x_max, y_min, y_max)?;
        Self::new(lagoon, barrier, bounds)
    }

    /// The settlement region.
    pub fn lagoon(&self) -> &LagoonBoundary {
        &self.lagoon
    }

    /// The barrier band.
    pub fn barrier(&self) -> &BarrierBand {
        &self.barrier
    }

    /// The world rectangle.
    pub fn bounds(&self) -> &DomainBounds {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canet_layout_builds_in_both_modes() {
        for mode in [CurveMode::Straight, CurveMode::Smooth] {
            let g = DomainGeometry::canet(mode).unwrap();
            assert_eq!(g.lagoon().mode(), mode);
            assert!(g.lagoon().contains(Point::new(30.0, 50.0)));
            assert!(g.bounds().contains(Point::new(70.0, 50.0)));
        }
    }

    #[test]
    fn lagoon_must_fit_in_bounds() {
        let lagoon = LagoonBoundary::build(
            &[
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(20.0, 20.0),
            ],
            CurveMode::Straight,
        )
        .unwrap();
        let barrier = BarrierBand::new(5.0, 6.0, [Breach::new(0.0, 1.0)]).unwrap();
        let bounds = DomainBounds::new(-1.0, 10.0, -1.0, 30.0).unwrap();
        match DomainGeometry::new(lagoon, barrier, bounds) {
            Err(GeometryError::LagoonOutsideBounds { vertex }) => {
                assert_eq!(vertex, Point::new(20.0, 0.0));
            }
            other => panic!("expected LagoonOutsideBounds, got {other:?}"),
        }
    }

    #[test]
    fn barrier_must_fit_in_bounds() {
        let lagoon = LagoonBoundary::build(
            &[Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, 2.0)],
            CurveMode::Straight,
        )
        .unwrap();
        let barrier = BarrierBand::new(8.0, 12.0, [Breach::new(0.0, 1.0)]).unwrap();
        let bounds = DomainBounds::new(-1.0, 10.0, -1.0, 10.0).unwrap();
        assert_eq!(
            DomainGeometry::new(lagoon, barrier, bounds),
            Err(GeometryError::BarrierOutsideBounds)
        );
    }
}
