use geo::{Area, BooleanOps, LineString, MultiPolygon, Polygon};
use tracing::debug;

use crate::error::{PlanningError, Result};
use crate::geometry::{Quad, WaypointPath};
use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, TOLERANCE};

/// How much of a field a path covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageReport {
    /// Exact field area.
    pub field_area: f64,
    /// Area of the swept region inside the field.
    pub covered_area: f64,
    /// `covered_area / field_area`, in percent.
    pub percentage: f64,
}

/// Measures the share of a field swept by a vehicle driving a path.
///
/// Each path segment sweeps a `width`-wide rectangle without end caps. The
/// rectangles are merged with a polygon union, the union is clipped to the
/// field, and the clipped area is compared with the field's area.
pub struct Coverage<'a> {
    field: &'a Quad,
    path: &'a WaypointPath,
    width: f64,
}

impl<'a> Coverage<'a> {
    /// Creates a new `Coverage` query.
    #[must_use]
    pub fn new(field: &'a Quad, path: &'a WaypointPath, width: f64) -> Self {
        Self { field, path, width }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for a non-positive width.
    pub fn execute(&self) -> Result<CoverageReport> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "working width must be positive, got {}",
                self.width
            ))
            .into());
        }

        let half = self.width * 0.5;
        let bands: Vec<MultiPolygon<f64>> = self
            .path
            .segments()
            .filter_map(|(a, b)| swept_band(a, b, half))
            .map(|band| MultiPolygon::new(vec![band]))
            .collect();
        let swept = union_all(bands);

        let field = MultiPolygon::new(vec![to_polygon(self.field.vertices())]);
        let covered_area = swept.intersection(&field).unsigned_area();
        let field_area = self.field.area();
        debug!(
            segments = self.path.len().saturating_sub(1),
            covered_area, field_area, "coverage measured"
        );

        Ok(CoverageReport {
            field_area,
            covered_area,
            percentage: covered_area / field_area * 100.0,
        })
    }
}

/// Flat-ended rectangle `half` to either side of segment `a → b`, or `None`
/// for a zero-length segment.
fn swept_band(a: &Point2, b: &Point2, half: f64) -> Option<Polygon<f64>> {
    let along = b - a;
    let length = along.norm();
    if length < TOLERANCE {
        return None;
    }
    let side = left_normal(&(along / length)) * half;
    Some(to_polygon(&[a - side, b - side, b + side, a + side]))
}

fn to_polygon(points: &[Point2]) -> Polygon<f64> {
    let ring: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    Polygon::new(LineString::from(ring), Vec::new())
}

/// Unions the parts pairwise, halving their number every pass so each
/// union works on operands of similar size.
fn union_all(mut parts: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    while parts.len() > 1 {
        let mut merged = Vec::with_capacity(parts.len().div_ceil(2));
        let mut iter = parts.into_iter();
        while let Some(first) = iter.next() {
            merged.push(match iter.next() {
                Some(second) => first.union(&second),
                None => first,
            });
        }
        parts = merged;
    }
    parts.pop().unwrap_or_else(|| MultiPolygon::new(Vec::new()))
}
