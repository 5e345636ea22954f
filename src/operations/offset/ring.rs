use tracing::debug;

use super::inward::quad_corners;
use crate::error::{GeometryError, Result};
use crate::geometry::Line;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, Vector2, TOLERANCE};

/// Edge vectors `v[i] → v[i+1]` of a quad's corners in vertex order.
#[must_use]
pub fn edge_directions(corners: &[Point2; 4]) -> [Vector2; 4] {
    std::array::from_fn(|i| corners[(i + 1) % 4] - corners[i])
}

/// Waypoints of one spiral ring.
///
/// The four corners are visited against the quad's vertex order, starting
/// at the corner between edges 3 and 0, and a fifth lead-out point steps
/// along edge 0 into the next ring.
#[derive(Debug)]
pub struct RingCorners<'a> {
    lines: &'a [Line; 4],
    width: f64,
}

impl<'a> RingCorners<'a> {
    #[must_use]
    pub fn new(lines: &'a [Line; 4], width: f64) -> Self {
        Self { lines, width }
    }

    /// Computes `[3∩0, 2∩3, 1∩2, 0∩1, lead-out]`.
    ///
    /// The lead-out sits on the line of edge 0, `|width / sin(θ₃)|` to the
    /// right of the first corner, where `θ₃` is edge 3's inclination.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParallelLines` if adjacent lines do not meet,
    /// or `GeometryError::Degenerate` if edge 3 is horizontal.
    pub fn compute(&self) -> Result<[Point2; 5]> {
        let l = self.lines;
        let c01 = l[0].intersect(&l[1])?;
        let c12 = l[1].intersect(&l[2])?;
        let c23 = l[2].intersect(&l[3])?;
        let c30 = l[3].intersect(&l[0])?;
        let lead_out = self.lead_out(&c30, &l[3])?;
        Ok([c30, c23, c12, c01, lead_out])
    }

    /// Like [`RingCorners::compute`], for lines that may have been offset
    /// past one of their edges.
    ///
    /// `directions` are the edge vectors of the quad the lines were offset
    /// from. An edge whose corners now run against its direction has been
    /// pushed beyond the meeting point of its two neighbours: the ring is a
    /// triangle, and both of that edge's corners move onto the apex. A
    /// collapsed edge 3 hands the lead-out over to edge 2, and after a
    /// collapsed edge 0 the ring starts at its apex with no lead-out step.
    ///
    /// Returns `None` once the lines bound no area: two or more edges
    /// reversed, the apex lines parallel, or a surviving edge reversed.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParallelLines` if adjacent lines do not meet,
    /// or `GeometryError::Degenerate` if the lead-out edge is horizontal.
    pub fn compute_trimmed(&self, directions: &[Vector2; 4]) -> Result<Option<[Point2; 5]>> {
        let l = self.lines;
        let mut ring = quad_corners(l)?;
        let reversed: Vec<usize> = (0..4)
            .filter(|&i| (ring[(i + 1) % 4] - ring[i]).dot(&directions[i]) < 0.0)
            .collect();

        let mut lead_edge = &l[3];
        let mut collapsed = None;
        match reversed[..] {
            [] => {}
            [edge] => {
                let Ok(apex) = l[(edge + 3) % 4].intersect(&l[(edge + 1) % 4]) else {
                    return Ok(None);
                };
                ring[edge] = apex;
                ring[(edge + 1) % 4] = apex;
                if edge == 3 {
                    lead_edge = &l[2];
                }
                debug!(edge, "ring edge collapsed, continuing with a triangle");
                collapsed = Some(edge);
            }
            _ => return Ok(None),
        }

        let still_reversed = (0..4).any(|i| {
            let edge = ring[(i + 1) % 4] - ring[i];
            edge.norm() > TOLERANCE && edge.dot(&directions[i]) < 0.0
        });
        if still_reversed || signed_area_2d(&ring) <= TOLERANCE {
            return Ok(None);
        }

        let c30 = ring[0];
        let lead_out = if collapsed == Some(0) {
            c30
        } else {
            self.lead_out(&c30, lead_edge)?
        };
        Ok(Some([c30, ring[3], ring[2], ring[1], lead_out]))
    }

    /// Point on the horizontal through `corner`, `|width / sin(θ)|` to its
    /// right, where `θ` is the inclination of `edge`.
    fn lead_out(&self, corner: &Point2, edge: &Line) -> Result<Point2> {
        let sin = edge.inclination().sin();
        if sin.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "lead-out edge is horizontal, no step into the next ring".to_owned(),
            )
            .into());
        }
        Ok(Point2::new(corner.x + (self.width / sin).abs(), corner.y))
    }
}
