//! The coastal barrier band and its breaches.
//!
//! The barrier occupies `x_min..=x_max` across the whole along-shore axis
//! except inside breach intervals, where it is absent. Water on the
//! `x > x_max` side is open sea; `x < x_min` is the coast side that holds
//! the lagoon.

use smallvec::SmallVec;

use canet_core::Point;

use crate::error::GeometryError;

/// A passable gap in the barrier, `y_min..=y_max` along-shore.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breach {
    /// Lower along-shore limit (inclusive).
    pub y_min: f64,
    /// Upper along-shore limit (inclusive).
    pub y_max: f64,
}

impl Breach {
    /// Construct a breach interval.
    pub const fn new(y_min: f64, y_max: f64) -> Self {
        Self { y_min, y_max }
    }

    /// Whether `y` lies in the gap (limits inclusive).
    pub fn contains(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }
}

/// The barrier band with its breaches.
#[derive(Clone, Debug, PartialEq)]
pub struct BarrierBand {
    x_min: f64,
    x_max: f64,
    breaches: SmallVec<[Breach; 2]>,
}

impl BarrierBand {
    /// Build a barrier spanning `x_min..=x_max` with at least one breach.
    ///
    /// # Errors
    ///
    /// Fails on non-finite limits, an empty band, no breaches, or an
    /// inverted or non-finite breach.
    pub fn new(
        x_min: f64,
        x_max: f64,
        breaches: impl IntoIterator<Item = Breach>,
    ) -> Result<Self, GeometryError> {
        if !x_min.is_finite() || !x_max.is_finite() || x_min >= x_max {
            return Err(GeometryError::InvalidBarrier {
                reason: format!("band x=[{x_min}, {x_max}] must be finite and non-empty"),
            });
        }
        let breaches: SmallVec<[Breach; 2]> = breaches.into_iter().collect();
        if breaches.is_empty() {
            return Err(GeometryError::InvalidBarrier {
                reason: "at least one breach is required".to_string(),
            });
        }
        for (i, b) in breaches.iter().enumerate() {
            if !b.y_min.is_finite() || !b.y_max.is_finite() || b.y_min > b.y_max {
                return Err(GeometryError::InvalidBarrier {
                    reason: format!("breach {i} y=[{}, {}] is invalid", b.y_min, b.y_max),
                });
            }
        }
        Ok(Self {
            x_min,
            x_max,
            breaches,
        })
    }

    /// Coast-side limit of the band.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Sea-side limit of the band.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// The breach intervals.
    pub fn breaches(&self) -> &[Breach] {
        &self.breaches
    }

    /// Whether `x` lies across the band (inclusive).
    pub fn spans(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    /// Whether `y` falls inside any breach.
    pub fn is_breached(&self, y: f64) -> bool {
        self.breaches.iter().any(|b| b.contains(y))
    }

    /// Whether `p` sits on solid barrier: inside the band and outside
    /// every breach. Non-finite points are never blocked.
    pub fn blocks(&self, p: Point) -> bool {
        p.is_finite() && self.spans(p.x) && !self.is_breached(p.y)
    }

    /// Whether `p` is on the coast side of the band (`x < x_min`).
    /// Non-finite points are on neither side.
    pub fn is_coastward(&self, p: Point) -> bool {
        p.is_finite() && p.x < self.x_min
    }
}
