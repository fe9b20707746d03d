//! The axis-aligned rectangle of the simulated world.

use canet_core::Point;

use crate::error::GeometryError;

/// Axis-aligned domain rectangle. Edges are inside the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl DomainBounds {
    /// Build a rectangle. Requires finite limits with `min < max` on both axes.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, GeometryError> {
        let limits = [x_min, x_max, y_min, y_max];
        if limits.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidBounds {
                reason: format!("limits must be finite, got {limits:?}"),
            });
        }
        if x_min >= x_max || y_min >= y_max {
            return Err(GeometryError::InvalidBounds {
                reason: format!(
                    "empty rectangle x=[{x_min}, {x_max}] y=[{y_min}, {y_max}]"
                ),
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Lower x limit.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Upper x limit.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Lower y limit.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Upper y limit.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Whether `p` is inside the rectangle (edges inclusive).
    ///
    /// Non-finite points are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.is_finite()
            && p.x >= self.x_min
            && p.x <= self.x_max
            && p.y >= self.y_min
            && p.y <= self.y_max
    }
}
