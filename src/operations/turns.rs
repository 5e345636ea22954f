use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::debug;

use crate::error::{PlanningError, Result};
use crate::geometry::{Circle, WaypointPath};
use crate::math::polygon_2d::{cross_2d, left_normal};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Fewest samples placed on the smaller arc of a turn.
const MIN_ARC_SAMPLES: usize = 4;

/// Multiplier applied to the sample count of the larger arc.
const LARGE_ARC_FACTOR: usize = 4;

/// Slack on the right-angle branch test so exact 90° turns take the
/// obtuse construction.
const RIGHT_ANGLE_SLACK: f64 = 1e-9;

/// Two internally tangent arcs replacing the corner `A → B` of a turn.
///
/// `first` passes through `A` and is tangent to the incoming lane there,
/// `second` passes through `B` and is tangent to the outgoing lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnGeometry {
    pub first: Circle,
    pub second: Circle,
    /// Point where the two arcs meet.
    pub tangent: Point2,
    pub clockwise: bool,
}

/// Replaces lane-reversal corners with smooth dual-arc turns.
///
/// The input path alternates lanes and turns: `(0, 1)` is a lane, `(1, 2)`
/// the first turn, `(2, 3)` the next lane and so on. For every turn the
/// smoother looks at the window `(C, A, B)` where `C → A` is the lane just
/// driven and `A → B` the reversal, and emits `A`, the first arc, the
/// tangent point, the second arc and `B`.
#[derive(Debug, Clone)]
pub struct TurnSmoother {
    width: f64,
    samples: Option<usize>,
}

impl TurnSmoother {
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width,
            samples: None,
        }
    }

    /// Overrides the sample count of the smaller arc. The larger arc
    /// always gets four times as many.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Samples on the smaller arc: the configured count, or half the
    /// working width rounded down but never fewer than four, so narrow
    /// implements still get a visibly round turn.
    fn base_samples(&self) -> usize {
        self.samples.unwrap_or_else(|| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let half = (self.width * 0.5).floor() as usize;
            half.max(MIN_ARC_SAMPLES)
        })
    }

    /// Smooths every turn in the path.
    ///
    /// Paths with fewer than three points are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for a non-positive width, and
    /// `GeometryError::Degenerate` if a turn produces an unusable circle.
    pub fn execute(&self, path: &WaypointPath) -> Result<WaypointPath> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "working width must be positive, got {}",
                self.width
            ))
            .into());
        }
        let pts = &path.points;
        if pts.len() < 3 {
            return Ok(path.clone());
        }

        let base = self.base_samples();
        let mut out = Vec::with_capacity(pts.len() * (base * (LARGE_ARC_FACTOR + 1) + 2));
        out.push(pts[0]);

        let mut tail_start = 1;
        let mut turns = 0usize;
        for i in (0..pts.len() - 2).step_by(2) {
            let (c, a, b) = (pts[i], pts[i + 1], pts[i + 2]);
            out.push(a);
            if let Some(turn) = self.turn_geometry(&c, &a, &b)? {
                let (n_first, n_second) = if turn.first.radius() >= turn.second.radius() {
                    (base * LARGE_ARC_FACTOR, base)
                } else {
                    (base, base * LARGE_ARC_FACTOR)
                };
                out.extend(
                    turn.first
                        .interpolate_arc(&a, &turn.tangent, n_first, turn.clockwise),
                );
                if (turn.tangent - a).norm() > TOLERANCE && (turn.tangent - b).norm() > TOLERANCE
                {
                    out.push(turn.tangent);
                }
                out.extend(
                    turn.second
                        .interpolate_arc(&turn.tangent, &b, n_second, turn.clockwise),
                );
                turns += 1;
            }
            out.push(b);
            tail_start = i + 3;
        }
        out.extend_from_slice(&pts[tail_start..]);

        debug!(turns, waypoints = out.len(), "turns smoothed");
        Ok(WaypointPath::new(out))
    }

    /// Builds the arc pair for the corner at `a`, entered from `c` and
    /// leaving toward `b`.
    ///
    /// Returns `None` for a degenerate corner (a zero-length leg or a
    /// straight or folded-back angle), which is passed through unsmoothed.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if a computed radius is not a
    /// positive finite number.
    pub fn turn_geometry(
        &self,
        c: &Point2,
        a: &Point2,
        b: &Point2,
    ) -> Result<Option<TurnGeometry>> {
        let ab = b - a;
        let ac = c - a;
        if ab.norm() < TOLERANCE || ac.norm() < TOLERANCE {
            return Ok(None);
        }

        let mut angle = (ab.y.atan2(ab.x) - ac.y.atan2(ac.x)).abs();
        if angle > PI {
            angle = TAU - angle;
        }
        let sin = angle.sin();
        if sin < TOLERANCE {
            return Ok(None);
        }

        // Unit normal of the incoming lane, on B's side.
        let travel = -ac / ac.norm();
        let turn = cross_2d(&travel, &ab);
        let clockwise = turn < 0.0;
        let normal = if clockwise {
            -left_normal(&travel)
        } else {
            left_normal(&travel)
        };

        let small = 0.25 * self.width * sin;
        let geometry = if angle >= FRAC_PI_2 - RIGHT_ANGLE_SLACK {
            let center_b = b - normal * small;
            let r_a = tangent_radius(&(center_b - a), &normal, small);
            let first = Circle::new(a + normal * r_a, r_a)?;
            let second = Circle::new(center_b, small)?;
            TurnGeometry {
                first,
                second,
                tangent: first.tangent_point(&second),
                clockwise,
            }
        } else {
            let center_a = a + normal * small;
            let r_b = tangent_radius(&(center_a - b), &-normal, small);
            let first = Circle::new(center_a, small)?;
            let second = Circle::new(b - normal * r_b, r_b)?;
            TurnGeometry {
                first,
                second,
                tangent: second.tangent_point(&first),
                clockwise,
            }
        };
        Ok(Some(geometry))
    }
}

/// Radius of the circle through a lane end, centered on the lane normal,
/// that is internally tangent to a circle of radius `r_other` whose center
/// sits at `offset` from that lane end.
///
/// `φ` is the angle between the offset chord and the normal axis.
fn tangent_radius(offset: &Vector2, normal: &Vector2, r_other: f64) -> f64 {
    let l_c = offset.norm();
    if l_c < TOLERANCE {
        return r_other;
    }
    let cos_phi = offset.dot(normal).abs() / l_c;
    ((l_c * l_c - r_other * r_other) / (2.0 * (l_c * cos_phi - r_other))).abs()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::arc_2d::angle_about;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn on_circle(q: &Point2, circle: &Circle) -> f64 {
        ((q - circle.center()).norm() - circle.radius()).abs()
    }

    #[test]
    fn right_angle_turn_radii() {
        let smoother = TurnSmoother::new(6.0);
        let turn = smoother
            .turn_geometry(&p(10.0, 0.0), &p(0.0, 0.0), &p(0.0, 6.0))
            .unwrap()
            .unwrap();
        // Narrow arc: 0.25 * 6 * sin(90°).
        assert!((turn.second.radius() - 1.5).abs() < 1e-12, "r_b={}", turn.second.radius());
        assert!((turn.first.radius() - 3.0).abs() < 1e-12, "r_a={}", turn.first.radius());
        assert!(turn.clockwise);
        assert!((turn.tangent - p(0.0, 6.0)).norm() < 1e-12);
    }

    #[test]
    fn right_angle_arc_points_lie_on_their_circle_in_order() {
        let c = p(10.0, 0.0);
        let a = p(0.0, 0.0);
        let b = p(0.0, 6.0);
        let smoother = TurnSmoother::new(6.0);
        let turn = smoother.turn_geometry(&c, &a, &b).unwrap().unwrap();
        let smoothed = smoother
            .execute(&WaypointPath::new(vec![c, a, b]))
            .unwrap();

        // c, a, 16 samples on the 3.0 arc, b. The tangent point is b itself.
        assert_eq!(smoothed.len(), 4 * 4 + 3);
        let arc = &smoothed.points[2..smoothed.len() - 1];
        let center = turn.first.center();
        let mut last = angle_about(center.x, center.y, a.x, a.y);
        for q in arc {
            assert!(on_circle(q, &turn.first) < 1e-9, "{q:?} off the arc");
            let mut ang = angle_about(center.x, center.y, q.x, q.y);
            // Clockwise from -π/2 through π: unwrap below the start.
            if ang > last {
                ang -= TAU;
            }
            assert!(ang < last, "points must advance clockwise");
            last = ang;
        }
        // The turn bulges away from the field, left of x = 0.
        assert!(arc.iter().all(|q| q.x < 0.0));
    }

    #[test]
    fn counter_clockwise_when_turning_left() {
        let turn = TurnSmoother::new(4.0)
            .turn_geometry(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, 4.0))
            .unwrap()
            .unwrap();
        assert!(!turn.clockwise);
        assert!(turn.first.center().x > 10.0 - 1e-12);
        assert!((turn.first.center().y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn acute_turn_arcs_meet_at_the_tangent_point() {
        let c = p(10.0, 0.0);
        let a = p(0.0, 0.0);
        let b = p(1.0, 2.0);
        let turn = TurnSmoother::new(2.0)
            .turn_geometry(&c, &a, &b)
            .unwrap()
            .unwrap();
        let sin = (2.0f64).atan2(1.0).sin();
        assert!((turn.first.radius() - 0.5 * sin).abs() < 1e-12);
        assert!(on_circle(&a, &turn.first) < 1e-9);
        assert!(on_circle(&b, &turn.second) < 1e-9);
        assert!(on_circle(&turn.tangent, &turn.first) < 1e-9);
        assert!(on_circle(&turn.tangent, &turn.second) < 1e-9);
        assert!(turn.clockwise);
    }

    #[test]
    fn acute_turn_output_is_continuous() {
        let path = WaypointPath::new(vec![p(10.0, 0.0), p(0.0, 0.0), p(1.0, 2.0), p(11.0, 2.0)]);
        let smoothed = TurnSmoother::new(2.0).with_samples(8).execute(&path).unwrap();
        assert_eq!(smoothed.points.first(), Some(&p(10.0, 0.0)));
        assert_eq!(smoothed.points.last(), Some(&p(11.0, 2.0)));
        // Arc steps stay small compared with the lanes.
        let turn_part = &smoothed.points[1..smoothed.len() - 1];
        for w in turn_part.windows(2) {
            assert!((w[1] - w[0]).norm() < 1.0, "gap between {:?} and {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn boustrophedon_turns_alternate_direction() {
        let path = WaypointPath::from_xy(&[
            (9.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (9.0, 3.0),
            (9.0, 5.0),
            (1.0, 5.0),
        ]);
        let smoother = TurnSmoother::new(2.0);
        let first = smoother
            .turn_geometry(&path.points[0], &path.points[1], &path.points[2])
            .unwrap()
            .unwrap();
        let second = smoother
            .turn_geometry(&path.points[2], &path.points[3], &path.points[4])
            .unwrap()
            .unwrap();
        assert!(first.clockwise);
        assert!(!second.clockwise);

        let smoothed = smoother.execute(&path).unwrap();
        // Two semicircles of radius 1 with 16 interior samples each.
        assert_eq!(smoothed.len(), path.len() + 2 * 16);
        assert!(smoothed.points.iter().all(|q| q.x >= -TOLERANCE && q.x <= 10.0 + TOLERANCE));
        assert_eq!(smoothed.points.last(), Some(&p(1.0, 5.0)));
    }

    #[test]
    fn degenerate_corners_pass_through() {
        let smoother = TurnSmoother::new(2.0);
        // Straight continuation.
        assert!(smoother
            .turn_geometry(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0))
            .unwrap()
            .is_none());
        // Zero-length leg.
        assert!(smoother
            .turn_geometry(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0))
            .unwrap()
            .is_none());

        let path = WaypointPath::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(smoother.execute(&path).unwrap(), path);
    }

    #[test]
    fn short_paths_are_unchanged() {
        let path = WaypointPath::from_xy(&[(0.0, 0.0), (5.0, 0.0)]);
        assert_eq!(TurnSmoother::new(2.0).execute(&path).unwrap(), path);
    }

    #[test]
    fn odd_length_path_keeps_its_last_turn() {
        let path = WaypointPath::from_xy(&[(9.0, 1.0), (1.0, 1.0), (1.0, 3.0)]);
        let smoothed = TurnSmoother::new(2.0).execute(&path).unwrap();
        assert!(smoothed.len() > path.len());
        assert_eq!(smoothed.points.last(), Some(&p(1.0, 3.0)));
    }

    #[test]
    fn base_sample_count_has_a_floor_of_four() {
        assert_eq!(TurnSmoother::new(2.0).base_samples(), 4);
        assert_eq!(TurnSmoother::new(9.5).base_samples(), 4);
        assert_eq!(TurnSmoother::new(12.0).base_samples(), 6);
        assert_eq!(TurnSmoother::new(12.0).with_samples(2).base_samples(), 2);
    }

    #[test]
    fn tangent_point_is_shared_by_both_circles() {
        let smoother = TurnSmoother::new(6.0);
        for b in [p(0.0, 6.0), p(-3.0, 6.0), p(2.0, 6.0)] {
            let turn = smoother
                .turn_geometry(&p(10.0, 0.0), &p(0.0, 0.0), &b)
                .unwrap()
                .unwrap();
            assert!(on_circle(&turn.tangent, &turn.first) < 1e-9, "b={b:?}");
            assert!(on_circle(&turn.tangent, &turn.second) < 1e-9, "b={b:?}");
        }
    }

    #[test]
    fn non_positive_width_is_rejected() {
        let path = WaypointPath::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(TurnSmoother::new(-1.0).execute(&path).is_err());
    }
}
