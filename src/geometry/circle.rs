use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{angle_about, arc_interior_points, directed_sweep};
use crate::math::{Point2, TOLERANCE};

/// A circle in the plane, used while building turn arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not a positive finite number.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "circle radius must be positive, got {radius}"
            ))
            .into());
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Point on this circle on the ray from its center toward `other`'s
    /// center. For two tangent circles this is the point of tangency.
    #[must_use]
    pub fn tangent_point(&self, other: &Self) -> Point2 {
        tangent_point(&self.center, self.radius, &other.center)
    }

    /// Samples `count` points strictly between the angular positions of
    /// `from` and `to`, travelling clockwise or counter-clockwise.
    ///
    /// Returns no points when `from` and `to` coincide.
    #[must_use]
    pub fn interpolate_arc(
        &self,
        from: &Point2,
        to: &Point2,
        count: usize,
        clockwise: bool,
    ) -> Vec<Point2> {
        interpolate_arc(self, from, to, count, clockwise)
    }
}

/// Point on circle `(c1, r1)` at distance `r1` along the line toward `c2`.
///
/// Falls back to `c1` itself when the centers coincide.
#[must_use]
pub fn tangent_point(c1: &Point2, r1: f64, c2: &Point2) -> Point2 {
    let d = c2 - c1;
    let len = d.norm();
    if len < TOLERANCE {
        return *c1;
    }
    c1 + d * (r1 / len)
}

/// Samples `count` points strictly inside the arc of `circle` that starts
/// at the angular position of `from` and ends at that of `to`.
#[must_use]
pub fn interpolate_arc(
    circle: &Circle,
    from: &Point2,
    to: &Point2,
    count: usize,
    clockwise: bool,
) -> Vec<Point2> {
    // Near-equal endpoints would unwrap into a full turn.
    if (to - from).norm() < 1e-9 * circle.radius.max(1.0) {
        return Vec::new();
    }
    let c = circle.center;
    let start = angle_about(c.x, c.y, from.x, from.y);
    let end = angle_about(c.x, c.y, to.x, to.y);
    let sweep = directed_sweep(start, end, clockwise);
    arc_interior_points(c.x, c.y, circle.radius, start, sweep, count)
        .into_iter()
        .map(|(x, y)| Point2::new(x, y))
        .collect()
}
