use crate::error::{PlanningError, Result};
use crate::geometry::Line;
use crate::math::polygon_2d::vertex_average;
use crate::math::Point2;

/// Corners of the quad bounded by four edge lines, in vertex order:
/// `3∩0`, `0∩1`, `1∩2`, `2∩3`.
///
/// # Errors
///
/// Returns `GeometryError::ParallelLines` if two adjacent lines are parallel.
pub fn quad_corners(lines: &[Line; 4]) -> Result<[Point2; 4]> {
    Ok([
        lines[3].intersect(&lines[0])?,
        lines[0].intersect(&lines[1])?,
        lines[1].intersect(&lines[2])?,
        lines[2].intersect(&lines[3])?,
    ])
}

/// Moves every edge line of a convex quad inward by a fixed distance.
///
/// The inward side of each line is the side holding the vertex average of
/// the quad the lines currently bound, or an explicitly given interior
/// point, so the result does not depend on slope signs or vertex winding. A sloped line's intercept moves by
/// `distance / cos(inclination)`, a vertical line's x by `distance`.
#[derive(Debug)]
pub struct InwardOffset<'a> {
    lines: &'a [Line; 4],
    distance: f64,
    interior: Option<Point2>,
}

impl<'a> InwardOffset<'a> {
    /// Offset by the full working width: one ring of lane spacing.
    #[must_use]
    pub fn full(lines: &'a [Line; 4], width: f64) -> Self {
        Self {
            lines,
            distance: width,
            interior: None,
        }
    }

    /// Offset by half the working width, so a lane driven on the result
    /// reaches exactly to the original boundary.
    #[must_use]
    pub fn half(lines: &'a [Line; 4], width: f64) -> Self {
        Self {
            lines,
            distance: width * 0.5,
            interior: None,
        }
    }

    /// Uses `interior` to pick each line's inward side instead of the
    /// corners' vertex average. Needed once a line no longer bounds the
    /// region, where the four raw corners may average to a point outside.
    #[must_use]
    pub fn with_interior(mut self, interior: Point2) -> Self {
        self.interior = Some(interior);
        self
    }

    /// Returns the offset distance.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for a non-positive distance, or
    /// `GeometryError::ParallelLines` if adjacent lines do not meet.
    pub fn execute(&self) -> Result<[Line; 4]> {
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "offset distance must be positive, got {}",
                self.distance
            ))
            .into());
        }
        let interior = match self.interior {
            Some(interior) => interior,
            None => vertex_average(&quad_corners(self.lines)?),
        };
        Ok(self
            .lines
            .map(|line| line.shifted_toward(self.distance, &interior)))
    }
}
