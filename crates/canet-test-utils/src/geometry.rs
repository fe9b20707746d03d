//! Hand-checkable domain layouts.
//!
//! The square layout mirrors the Canet arrangement at a scale where every
//! region can be hit with round coordinates:
//!
//! ```text
//!   y
//!  100 ┌──────────────────────────────────────────────┐
//!      │ coast      ║ barrier (x 10..12)              │
//!   20 │            ╟─ breach y 10..20                │
//!   10 │ ┌──────────╫┐                  open water    │
//!      │ │ lagoon   ║│                                │
//!  -10 │ └──────────╫┘                                │
//! -100 └──────────────────────────────────────────────┘
//!     -20        0  10 12                            100  x
//! ```

use canet_core::Point;
use canet_space::{BarrierBand, Breach, CurveMode, DomainBounds, DomainGeometry, LagoonBoundary};

/// Square lagoon `[-10, 12] x [-10, 10]` overlapping a barrier band at
/// `x` in `[10, 12]` with one breach `y` in `[10, 20]`, inside bounds
/// `[-20, 100] x [-100, 100]`.
pub fn square_lagoon_geometry() -> DomainGeometry {
    let lagoon = LagoonBoundary::build(
        &[
            Point::new(-10.0, -10.0),
            Point::new(12.0, -10.0),
            Point::new(12.0, 10.0),
            Point::new(-10.0, 10.0),
        ],
        CurveMode::Straight,
    )
    .expect("square lagoon is valid");
    let barrier =
        BarrierBand::new(10.0, 12.0, [Breach::new(10.0, 20.0)]).expect("square barrier is valid");
    let bounds = DomainBounds::new(-20.0, 100.0, -100.0, 100.0).expect("square bounds are valid");
    DomainGeometry::new(lagoon, barrier, bounds).expect("square layout is consistent")
}

/// The Canet layout with smooth lagoon edges.
pub fn canet_geometry() -> DomainGeometry {
    DomainGeometry::canet(CurveMode::Smooth).expect("Canet layout is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_regions_are_where_the_diagram_says() {
        let g = square_lagoon_geometry();
        assert!(g.lagoon().contains(Point::new(5.0, 5.0)));
        assert!(g.lagoon().contains(Point::new(11.0, -5.0)));
        assert!(!g.lagoon().contains(Point::new(11.0, 15.0)));
        assert!(g.barrier().blocks(Point::new(11.0, 30.0)));
        assert!(!g.barrier().blocks(Point::new(11.0, 15.0)));
        assert!(g.barrier().is_coastward(Point::new(-5.0, 30.0)));
        assert!(g.bounds().contains(Point::new(50.0, 10.0)));
        assert!(!g.bounds().contains(Point::new(101.0, 10.0)));
    }

    #[test]
    fn canet_fixture_builds() {
        let g = canet_geometry();
        assert!(g.lagoon().contains(Point::new(30.0, 50.0)));
    }
}
