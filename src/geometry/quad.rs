use crate::error::Result;
use crate::math::polygon_2d::{convex_winding, point_in_convex_2d, signed_area_2d, vertex_average};
use crate::math::Point2;

use super::Line;

/// A convex quadrilateral field boundary.
///
/// Edges run `(v0,v1)`, `(v1,v2)`, `(v2,v3)`, `(v3,v0)`. Vertex order fixes
/// the rotation sign of the canonical frame and the edge indexing used by
/// every planner stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    vertices: [Point2; 4],
}

impl Quad {
    /// Creates a quad from four vertices in drive order.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the vertices do not form a
    /// strictly convex, non-self-intersecting quadrilateral.
    pub fn new(vertices: [Point2; 4]) -> Result<Self> {
        convex_winding(&vertices)?;
        Ok(Self { vertices })
    }

    /// Creates a quad from `(x, y)` tuples.
    ///
    /// # Errors
    ///
    /// See [`Quad::new`].
    pub fn from_xy(points: [(f64, f64); 4]) -> Result<Self> {
        Self::new(points.map(|(x, y)| Point2::new(x, y)))
    }

    /// Builds a quad without checking convexity. Used for shapes derived
    /// from an already validated quad.
    pub(crate) fn from_vertices_unchecked(vertices: [Point2; 4]) -> Self {
        Self { vertices }
    }

    /// Returns the four vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2; 4] {
        &self.vertices
    }

    /// Returns vertex `i` (0..4).
    #[must_use]
    pub fn vertex(&self, i: usize) -> &Point2 {
        &self.vertices[i % 4]
    }

    /// Signed area, positive for counter-clockwise winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    /// Absolute area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Returns `true` if the vertices wind counter-clockwise.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns the quad wound counter-clockwise, keeping vertex 0 first.
    ///
    /// A clockwise quad `[v0, v1, v2, v3]` becomes `[v0, v3, v2, v1]`.
    #[must_use]
    pub fn counter_clockwise(&self) -> Self {
        if self.is_counter_clockwise() {
            return *self;
        }
        let [v0, v1, v2, v3] = self.vertices;
        Self {
            vertices: [v0, v3, v2, v1],
        }
    }

    /// Average of the four vertices, always inside a convex quad.
    #[must_use]
    pub fn interior_point(&self) -> Point2 {
        vertex_average(&self.vertices)
    }

    /// Tests whether `p` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        let winding = if self.is_counter_clockwise() { 1.0 } else { -1.0 };
        point_in_convex_2d(&self.vertices, winding, p)
    }

    /// One line per edge, index-aligned with the edges:
    /// `(0-1)`, `(1-2)`, `(2-3)`, `(3-0)`.
    #[must_use]
    pub fn line_equations(&self) -> [Line; 4] {
        let v = &self.vertices;
        [
            Line::through(&v[0], &v[1]),
            Line::through(&v[1], &v[2]),
            Line::through(&v[2], &v[3]),
            Line::through(&v[3], &v[0]),
        ]
    }
}
