use tracing::debug;

use crate::error::{PlanningError, Result};
use crate::geometry::Line;
use crate::math::Point2;

/// Edge indices in a canonical quad's line set.
const RIGHT_EDGE: usize = 1;
const TOP_EDGE: usize = 2;
const LEFT_EDGE: usize = 3;

/// Relative tolerance under which two sweep limits count as the same height.
const LIMIT_TOLERANCE: f64 = 1e-9;

/// Which side edge outlives the other as the sweep climbs.
///
/// Selected once per sweep: the side whose top vertex sits higher keeps
/// producing lane ends after the other side has handed over to the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongSide {
    Left,
    Right,
}

impl LongSide {
    /// `Left` when vertex 2 sits strictly below vertex 3, `Right` otherwise.
    #[must_use]
    pub fn select(limit3: f64, limit4: f64) -> Self {
        if limit3 < limit4 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// `(long edge, short edge)` line indices.
    #[must_use]
    pub fn edges(self) -> (usize, usize) {
        match self {
            Self::Left => (LEFT_EDGE, RIGHT_EDGE),
            Self::Right => (RIGHT_EDGE, LEFT_EDGE),
        }
    }

    /// `(long limit, short limit)` from the y of vertex 2 and vertex 3.
    #[must_use]
    pub fn limits(self, limit3: f64, limit4: f64) -> (f64, f64) {
        match self {
            Self::Left => (limit4, limit3),
            Self::Right => (limit3, limit4),
        }
    }

    /// Whether the top edge has crossed over the long side at this height.
    #[must_use]
    pub fn crossed(self, x_top: f64, x_long: f64) -> bool {
        match self {
            Self::Left => x_top < x_long,
            Self::Right => x_top > x_long,
        }
    }
}

/// Lane end points produced by a [`LaneSweep`], one list per boundary edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepLanes {
    /// Points on edge 1-2.
    pub right: Vec<Point2>,
    /// Points on edge 2-3, the closing list.
    pub top: Vec<Point2>,
    /// Points on edge 3-0.
    pub left: Vec<Point2>,
}

impl SweepLanes {
    /// Returns `true` if no lane was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.right.is_empty() && self.left.is_empty() && self.top.is_empty()
    }

    fn long_and_short(&mut self, side: LongSide) -> (&mut Vec<Point2>, &mut Vec<Point2>) {
        match side {
            LongSide::Left => (&mut self.left, &mut self.right),
            LongSide::Right => (&mut self.right, &mut self.left),
        }
    }
}

/// Sweeps a canonical quad's line set with horizontal lanes.
///
/// Starting at `y_start`, every `width` step samples the long side edge.
/// Below the short side's limit the short side edge is sampled too; above
/// it, the top edge takes over until its x crosses the long side, at which
/// point the long side's x closes both the top and the long lists.
///
/// The lines are sampled as given; insetting them is the caller's job.
///
/// Limits within a relative `1e-9` of each other are treated as one height,
/// and a lane is only started strictly below a limit. Rotation noise on a
/// rectangle's top vertices therefore neither samples its horizontal top
/// edge nor adds a lane on the boundary.
#[derive(Debug)]
pub struct LaneSweep<'a> {
    lines: &'a [Line; 4],
    width: f64,
    y_start: f64,
    limit3: f64,
    limit4: f64,
}

impl<'a> LaneSweep<'a> {
    /// Creates a sweep.
    ///
    /// * `limit3` - canonical y of vertex 2.
    /// * `limit4` - canonical y of vertex 3.
    #[must_use]
    pub fn new(lines: &'a [Line; 4], width: f64, y_start: f64, limit3: f64, limit4: f64) -> Self {
        Self {
            lines,
            width,
            y_start,
            limit3,
            limit4,
        }
    }

    /// Executes the sweep.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for a non-positive width, and
    /// propagates `GeometryError::HorizontalLine` if a sampled edge is
    /// horizontal.
    pub fn execute(&self) -> Result<SweepLanes> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "sweep width must be positive, got {}",
                self.width
            ))
            .into());
        }

        let tolerance = LIMIT_TOLERANCE * self.limit3.abs().max(self.limit4.abs()).max(1.0);
        let (limit3, limit4) = if (self.limit3 - self.limit4).abs() <= tolerance {
            let top = self.limit3.max(self.limit4);
            (top, top)
        } else {
            (self.limit3, self.limit4)
        };

        let side = LongSide::select(limit3, limit4);
        let (long_edge, short_edge) = side.edges();
        let (long_limit, short_limit) = side.limits(limit3, limit4);
        let long_line = &self.lines[long_edge];
        let short_line = &self.lines[short_edge];
        let top_line = &self.lines[TOP_EDGE];

        let mut lanes = SweepLanes::default();
        let mut y = self.y_start;
        while y < long_limit - tolerance {
            let x_long = long_line.x_at(y)?;
            if y < short_limit - tolerance {
                let x_short = short_line.x_at(y)?;
                lanes.long_and_short(side).1.push(Point2::new(x_short, y));
            } else {
                let x_top = top_line.x_at(y)?;
                if side.crossed(x_top, x_long) {
                    let closing = Point2::new(x_long, y);
                    lanes.top.push(closing);
                    lanes.long_and_short(side).0.push(closing);
                    break;
                }
                lanes.top.push(Point2::new(x_top, y));
            }
            lanes.long_and_short(side).0.push(Point2::new(x_long, y));
            y += self.width;
        }

        debug!(
            ?side,
            right = lanes.right.len(),
            top = lanes.top.len(),
            left = lanes.left.len(),
            "lane sweep finished"
        );
        Ok(lanes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Quad;

    fn lines_of(points: [(f64, f64); 4]) -> [Line; 4] {
        Quad::from_xy(points).unwrap().line_equations()
    }

    #[test]
    fn square_lanes_are_boundary_aligned() {
        let lines = lines_of([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let lanes = LaneSweep::new(&lines, 2.0, 1.0, 10.0, 10.0).execute().unwrap();

        let ys: Vec<f64> = lanes.right.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
        assert_eq!(lanes.left.len(), 5);
        assert!(lanes.top.is_empty());
        for (r, l) in lanes.right.iter().zip(&lanes.left) {
            assert!((r.x - 10.0).abs() < 1e-12, "right x={}", r.x);
            assert!(l.x.abs() < 1e-12, "left x={}", l.x);
            assert!((r.y - l.y).abs() < 1e-12);
        }
    }

    #[test]
    fn long_side_selection() {
        assert_eq!(LongSide::select(5.0, 8.0), LongSide::Left);
        assert_eq!(LongSide::select(8.0, 5.0), LongSide::Right);
        assert_eq!(LongSide::select(5.0, 5.0), LongSide::Right);
        assert_eq!(LongSide::Left.edges(), (3, 1));
        assert_eq!(LongSide::Right.limits(8.0, 5.0), (8.0, 5.0));
    }

    #[test]
    fn left_long_hands_right_side_over_to_top() {
        // v2 lower than v3: the left edge outlives the right one.
        let lines = lines_of([(0.0, 0.0), (10.0, 0.0), (10.0, 4.0), (0.0, 10.0)]);
        let lanes = LaneSweep::new(&lines, 2.0, 1.0, 4.0, 10.0).execute().unwrap();

        // Right edge sampled at y = 1, 3; top edge from y = 5.
        assert_eq!(lanes.right.len(), 2);
        assert!(!lanes.top.is_empty());
        assert!(lanes.left.len() > lanes.right.len());
        // Top edge y = 10 - 0.6x: at y = 5, x ≈ 8.33.
        assert!((lanes.top[0].x - 25.0 / 3.0).abs() < 1e-9, "x={}", lanes.top[0].x);
        assert!(lanes.left.iter().all(|p| p.x.abs() < 1e-12));
    }

    #[test]
    fn crossing_detected_with_inset_left_edge() {
        // Left edge at x = 3 and a top edge sloping down to the right:
        // y = 10 - 0.6x crosses x = 3 at y = 8.2.
        let lines = [
            Line::Sloped { slope: 0.0, intercept: 0.0 },
            Line::Vertical { x: 10.0 },
            Line::Sloped { slope: -0.6, intercept: 10.0 },
            Line::Vertical { x: 3.0 },
        ];
        let lanes = LaneSweep::new(&lines, 2.0, 1.0, 4.0, 10.0).execute().unwrap();
        // y = 9 is above the crossing: the closing point is (3, 9).
        let closing = Point2::new(3.0, 9.0);
        assert_eq!(lanes.top.last(), Some(&closing));
        assert_eq!(lanes.left.last(), Some(&closing));
        assert_eq!(lanes.left.len(), lanes.right.len() + lanes.top.len());
    }

    #[test]
    fn right_long_mirror_case() {
        let lines = lines_of([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 4.0)]);
        let lanes = LaneSweep::new(&lines, 2.0, 1.0, 10.0, 4.0).execute().unwrap();
        assert_eq!(lanes.left.len(), 2);
        assert!(lanes.right.len() > lanes.left.len());
        assert!(lanes.right.iter().all(|p| (p.x - 10.0).abs() < 1e-12));
    }

    #[test]
    fn nearly_equal_limits_never_sample_a_flat_top() {
        // Top edge a hair off horizontal, as left behind by a rotation.
        let lines = [
            Line::Sloped { slope: 0.0, intercept: 1.0 },
            Line::Vertical { x: 9.0 },
            Line::Sloped { slope: 1e-16, intercept: 8.0 },
            Line::Vertical { x: 1.0 },
        ];
        for (limit3, limit4) in [(9.0, 9.0 + 4e-15), (9.0 + 4e-15, 9.0), (9.0, 9.0)] {
            let lanes = LaneSweep::new(&lines, 2.0, 1.0, limit3, limit4)
                .execute()
                .unwrap();
            assert!(lanes.top.is_empty());
            assert_eq!(lanes.right.len(), 4, "limits {limit3}, {limit4}");
            assert_eq!(lanes.left.len(), 4, "limits {limit3}, {limit4}");
        }
    }

    #[test]
    fn non_positive_width_is_rejected() {
        let lines = lines_of([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(LaneSweep::new(&lines, 0.0, 1.0, 10.0, 10.0).execute().is_err());
    }
}
