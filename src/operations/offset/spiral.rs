use tracing::{debug, warn};

use super::inward::{quad_corners, InwardOffset};
use super::ring::{edge_directions, RingCorners};
use crate::error::{PlanningError, Result};
use crate::geometry::Line;
use crate::math::polygon_2d::vertex_average;
use crate::math::Point2;

/// Default cap on the number of inward rings.
pub const DEFAULT_MAX_ROUNDS: usize = 20;

/// How a spiral run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiralStatus {
    /// The interior was consumed before the round cap.
    Converged,
    /// The round cap was hit while rings were still being produced.
    Partial,
}

/// Result of [`Spiral::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralRun {
    /// Ring waypoints in drive order, in the frame of the input lines.
    pub points: Vec<Point2>,
    /// Number of offset rounds performed.
    pub rounds: usize,
    pub status: SpiralStatus,
}

/// Inward ring-by-ring contour generation over a convex quad's edge lines.
///
/// Every round offsets the current lines inward by the full width and emits
/// the new ring's corners. A short edge that the offset pushes past its
/// neighbours' meeting point drops out, and the rings continue as triangles.
/// The loop ends when the offset lines bound no area, when the next ring is
/// too narrow for another one (only its first side is driven), or at the
/// round cap.
#[derive(Debug, Clone)]
pub struct Spiral {
    lines: [Line; 4],
    width: f64,
    max_rounds: usize,
}

impl Spiral {
    /// Creates a spiral over the given edge lines, ordered as a
    /// counter-clockwise quad's edges.
    #[must_use]
    pub fn new(lines: [Line; 4], width: f64) -> Self {
        Self {
            lines,
            width,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Sets the round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Runs the spiral, reporting a capped run as [`SpiralStatus::Partial`].
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for a non-positive width or a
    /// zero round cap, and propagates geometry errors from the ring
    /// construction.
    pub fn run(&self) -> Result<SpiralRun> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "working width must be positive, got {}",
                self.width
            ))
            .into());
        }
        if self.max_rounds == 0 {
            return Err(
                PlanningError::InvalidInput("spiral round cap must be at least 1".to_owned())
                    .into(),
            );
        }

        let mut lines = self.lines;
        let field = quad_corners(&lines)?;
        let directions = edge_directions(&field);
        let mut interior = vertex_average(&field);
        let mut points = Vec::new();

        for round in 1..=self.max_rounds {
            let next = InwardOffset::full(&lines, self.width)
                .with_interior(interior)
                .execute()?;
            let Some(corners) = RingCorners::new(&next, self.width).compute_trimmed(&directions)?
            else {
                debug!(round, "offset region is empty, spiral converged");
                return Ok(SpiralRun {
                    points,
                    rounds: round,
                    status: SpiralStatus::Converged,
                });
            };

            if is_narrow(&corners, self.width) {
                points.extend_from_slice(&corners[..2]);
                debug!(round, "ring narrower than the working width, spiral converged");
                return Ok(SpiralRun {
                    points,
                    rounds: round,
                    status: SpiralStatus::Converged,
                });
            }

            points.extend_from_slice(&corners);
            debug!(round, waypoints = points.len(), "spiral ring added");
            lines = next;
            interior = vertex_average(&corners[..4]);
        }

        warn!(
            rounds = self.max_rounds,
            waypoints = points.len(),
            "spiral hit its round cap before converging"
        );
        Ok(SpiralRun {
            points,
            rounds: self.max_rounds,
            status: SpiralStatus::Partial,
        })
    }

    /// Runs the spiral, treating a capped run as an error.
    ///
    /// # Errors
    ///
    /// Everything [`Spiral::run`] returns, plus `PlanningError::Incomplete`
    /// when the round cap is hit.
    pub fn execute(&self) -> Result<SpiralRun> {
        let run = self.run()?;
        match run.status {
            SpiralStatus::Converged => Ok(run),
            SpiralStatus::Partial => Err(PlanningError::Incomplete {
                rounds: run.rounds,
                waypoints: run.points.len(),
            }
            .into()),
        }
    }
}

/// Too narrow for another full ring, along x or along y.
fn is_narrow(corners: &[Point2; 5], width: f64) -> bool {
    let narrow_x =
        corners[3].x - corners[0].x <= width && corners[2].x - corners[1].x < width;
    let narrow_y =
        corners[1].y - corners[0].y < width && corners[2].y - corners[3].y < width;
    narrow_x || narrow_y
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FurrowError;
    use crate::geometry::Quad;
    use crate::math::TOLERANCE;

    fn square_lines(side: f64) -> [Line; 4] {
        Quad::from_xy([(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)])
            .unwrap()
            .line_equations()
    }

    fn half_diagonal(ring: &[Point2]) -> f64 {
        (ring[2] - ring[0]).norm() * 0.5
    }

    #[test]
    fn square_rings_shrink_and_converge() {
        let run = Spiral::new(square_lines(10.0), 2.0).execute().unwrap();
        assert_eq!(run.status, SpiralStatus::Converged);
        assert!(run.rounds <= DEFAULT_MAX_ROUNDS);
        // Two full rings of five points, the third collapses.
        assert_eq!(run.points.len(), 10);
        assert_eq!(run.rounds, 3);

        let rings: Vec<&[Point2]> = run.points.chunks(5).collect();
        assert!((rings[0][0] - Point2::new(2.0, 2.0)).norm() < TOLERANCE);
        assert!((rings[1][0] - Point2::new(4.0, 4.0)).norm() < TOLERANCE);
        for pair in rings.windows(2) {
            assert!(
                half_diagonal(pair[1]) < half_diagonal(pair[0]),
                "rings must strictly shrink"
            );
        }
    }

    #[test]
    fn first_ring_runs_up_the_left_side() {
        let run = Spiral::new(square_lines(10.0), 2.0).execute().unwrap();
        let expected = [(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0), (4.0, 2.0)];
        for (got, (x, y)) in run.points.iter().zip(expected) {
            assert!((got.x - x).abs() < TOLERANCE && (got.y - y).abs() < TOLERANCE, "{got:?}");
        }
    }

    #[test]
    fn narrow_ring_drives_only_its_first_side() {
        // 12 x 9, width 2: ring 2 spans x 4..8 but only y 4..5.
        let lines = Quad::from_xy([(0.0, 0.0), (12.0, 0.0), (12.0, 9.0), (0.0, 9.0)])
            .unwrap()
            .line_equations();
        let run = Spiral::new(lines, 2.0).execute().unwrap();
        assert_eq!(run.status, SpiralStatus::Converged);
        assert_eq!(run.rounds, 2);
        assert_eq!(run.points.len(), 7);
        assert!((run.points[5] - Point2::new(4.0, 4.0)).norm() < TOLERANCE);
        assert!((run.points[6] - Point2::new(4.0, 5.0)).norm() < TOLERANCE);
    }

    #[test]
    fn short_top_edge_drops_out_and_rings_continue_as_triangles() {
        // The 2 m top edge is overtaken by its neighbours in the first round.
        let lines = Quad::from_xy([(0.0, 0.0), (40.0, 0.0), (21.0, 30.0), (19.0, 30.0)])
            .unwrap()
            .line_equations();
        let run = Spiral::new(lines, 2.0).execute().unwrap();
        assert_eq!(run.status, SpiralStatus::Converged);
        assert_eq!(run.rounds, 6);
        assert_eq!(run.points.len(), 25);

        for (k, ring) in run.points.chunks(5).enumerate() {
            // Both corners of the dropped edge sit on the apex above the
            // middle of the base.
            assert!((ring[1] - ring[2]).norm() < TOLERANCE, "ring {k}: {ring:?}");
            assert!((ring[1].x - 20.0).abs() < 1e-9, "ring {k}: {ring:?}");
            #[allow(clippy::cast_precision_loss)]
            let base = 2.0 * (k + 1) as f64;
            assert!((ring[0].y - base).abs() < 1e-9);
            assert!((ring[3].y - base).abs() < 1e-9);
            assert!(ring[3].x > ring[0].x);
        }
        assert!((run.points[1].y - 27.840_993_493_775_855).abs() < 1e-9);
    }

    #[test]
    fn field_too_small_for_a_ring_yields_no_points() {
        let run = Spiral::new(square_lines(3.0), 2.0).execute().unwrap();
        assert_eq!(run.status, SpiralStatus::Converged);
        assert!(run.points.is_empty());
    }

    #[test]
    fn round_cap_is_reported_as_partial() {
        let spiral = Spiral::new(square_lines(100.0), 2.0).with_max_rounds(3);
        let run = spiral.run().unwrap();
        assert_eq!(run.status, SpiralStatus::Partial);
        assert_eq!(run.rounds, 3);
        assert_eq!(run.points.len(), 15);

        let err = spiral.execute().unwrap_err();
        assert!(matches!(
            err,
            FurrowError::Planning(PlanningError::Incomplete {
                rounds: 3,
                waypoints: 15
            })
        ));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(Spiral::new(square_lines(10.0), 0.0).run().is_err());
        assert!(Spiral::new(square_lines(10.0), 2.0)
            .with_max_rounds(0)
            .run()
            .is_err());
    }
}
