use crate::math::{Point2, TOLERANCE};

/// An ordered, open sequence of waypoints in drive order.
///
/// Stages may append to or rewrite points in place, but never reorder them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaypointPath {
    pub points: Vec<Point2>,
}

impl WaypointPath {
    /// Creates a path from points in drive order.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Creates a path from `(x, y)` tuples.
    #[must_use]
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the path has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point2, &Point2)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Total polyline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Drops points that repeat their predecessor (within [`TOLERANCE`]).
    pub fn dedup(&mut self) {
        self.points.dedup_by(|b, a| (*b - *a).norm() < TOLERANCE);
    }

    /// Points as `(x, y)` tuples.
    #[must_use]
    pub fn to_xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    /// Consumes the path, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }
}

impl From<Vec<Point2>> for WaypointPath {
    fn from(points: Vec<Point2>) -> Self {
        Self { points }
    }
}
