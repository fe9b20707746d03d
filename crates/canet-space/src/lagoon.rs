//! The lagoon boundary: a closed curve with an inclusive containment test.
//!
//! Control points are joined either by straight edges or, in smooth mode,
//! by Bézier segments following the `CURVE4` path convention: after the
//! initial point, points are consumed three at a time as
//! `(handle, handle, end)`. A trailing pair forms a quadratic segment and a
//! trailing single point a straight edge. The curve is closed by an
//! implicit edge from the last point back to the first.
//!
//! Curved segments are flattened into [`CHORDS_PER_SEGMENT`] chords at
//! construction, so [`LagoonBoundary::contains`] is always a polygon test.

use canet_core::Point;

use crate::error::GeometryError;

/// Chords used to flatten one Bézier segment.
pub const CHORDS_PER_SEGMENT: usize = 24;

/// Distance within which a point counts as lying on an edge.
pub const EDGE_TOLERANCE: f64 = 1e-9;

/// How control points are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveMode {
    /// Straight line segments between consecutive points.
    Straight,
    /// Cubic Bézier segments (`CURVE4` convention).
    #[default]
    Smooth,
}

/// A closed settlement region.
#[derive(Clone, Debug, PartialEq)]
pub struct LagoonBoundary {
    mode: CurveMode,
    /// Flattened closed polygon; the closing edge is implicit.
    vertices: Vec<Point>,
    min: Point,
    max: Point,
}

impl LagoonBoundary {
    /// Build a boundary from ordered control points.
    ///
    /// # Errors
    ///
    /// Fails with fewer than three points, any non-finite point, or a
    /// curve that encloses no area.
    pub fn build(control_points: &[Point], mode: CurveMode) -> Result<Self, GeometryError> {
        if control_points.len() < 3 {
            return Err(GeometryError::TooFewControlPoints {
                got: control_points.len(),
            });
        }
        if let Some(index) = control_points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteControlPoint { index });
        }

        let mut vertices = match mode {
            CurveMode::Straight => control_points.to_vec(),
            CurveMode::Smooth => flatten(control_points),
        };
        // Drop an explicit closing point; the closing edge is implicit.
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        if shoelace_area(&vertices).abs() < EDGE_TOLERANCE {
            return Err(GeometryError::DegenerateLagoon);
        }

        let mut min = vertices[0];
        let mut max = vertices[0];
        for v in &vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }

        Ok(Self {
            mode,
            vertices,
            min,
            max,
        })
    }

    /// The mode this boundary was built with.
    pub fn mode(&self) -> CurveMode {
        self.mode
    }

    /// Flattened polygon vertices (closing edge implicit).
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Lower-left corner of the bounding box.
    pub fn min(&self) -> Point {
        self.min
    }

    /// Upper-right corner of the bounding box.
    pub fn max(&self) -> Point {
        self.max
    }

    /// Enclosed area (absolute value, flattened polygon).
    pub fn area(&self) -> f64 {
        shoelace_area(&self.vertices).abs()
    }

    /// Whether `p` lies inside the region or on its boundary.
    ///
    /// Points within [`EDGE_TOLERANCE`] of an edge are contained.
    /// Interior classification uses the even-odd crossing rule, which is
    /// correct for non-convex shapes. Non-finite points are never
    /// contained.
    pub fn contains(&self, p: Point) -> bool {
        if !p.is_finite() {
            return false;
        }
        if p.x < self.min.x - EDGE_TOLERANCE
            || p.x > self.max.x + EDGE_TOLERANCE
            || p.y < self.min.y - EDGE_TOLERANCE
            || p.y > self.max.y + EDGE_TOLERANCE
        {
            return false;
        }

        let n = self.vertices.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if on_segment(p, a, b) {
                return true;
            }
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Flatten control points into a polyline using the `CURVE4` grouping.
fn flatten(points: &[Point]) -> Vec<Point> {
    let mut out = Vec::with_capacity(1 + (points.len() / 3 + 1) * CHORDS_PER_SEGMENT);
    let mut start = points[0];
    out.push(start);
    for group in points[1..].chunks(3) {
        match *group {
            [h1, h2, end] => {
                for k in 1..=CHORDS_PER_SEGMENT {
                    let t = k as f64 / CHORDS_PER_SEGMENT as f64;
                    out.push(cubic(start, h1, h2, end, t));
                }
                start = end;
            }
            [h, end] => {
                for k in 1..=CHORDS_PER_SEGMENT {
                    let t = k as f64 / CHORDS_PER_SEGMENT as f64;
                    out.push(quadratic(start, h, end, t));
                }
                start = end;
            }
            [end] => {
                out.push(end);
                start = end;
            }
            _ => unreachable!("chunks(3) yields 1..=3 points"),
        }
    }
    out
}

fn cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

fn quadratic(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    // De Casteljau keeps the endpoints exact.
    p0.lerp(p1, t).lerp(p1.lerp(p2, t), t)
}

fn shoelace_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let mut twice = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice / 2.0
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    };
    let closest = a.lerp(b, t);
    (p.x - closest.x).hypot(p.y - closest.y) <= EDGE_TOLERANCE
}
