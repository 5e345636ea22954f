use crate::geometry::Quad;
use crate::math::{Point2, Vector2};

/// The canonical frame of a field: vertex 0 at the origin and edge 0 along
/// the positive X axis.
///
/// `angle` is the rotation applied by [`CanonicalFrame::transform`],
/// `-atan2(dy01, dx01)`. `origin` is the original position of vertex 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalFrame {
    origin: Point2,
    angle: f64,
}

impl CanonicalFrame {
    /// Maps a field into its canonical frame.
    ///
    /// Vertex 0 lands exactly on `(0, 0)` and vertex 1 exactly on `(d, 0)`,
    /// where `d = |v0 v1|`.
    #[must_use]
    pub fn transform(field: &Quad) -> (Quad, Self) {
        let v = field.vertices();
        let d = v[1] - v[0];
        let frame = Self {
            origin: v[0],
            angle: -d.y.atan2(d.x),
        };

        let mut canonical = v.map(|p| frame.to_canonical(&p));
        canonical[0] = Point2::origin();
        canonical[1] = Point2::new(d.norm(), 0.0);
        (Quad::from_vertices_unchecked(canonical), frame)
    }

    /// Rotates points in place, undoing the rotation that
    /// [`CanonicalFrame::transform`] applied for the same `angle`.
    ///
    /// This is a pure rotation about the origin: the vertex-0 offset is not
    /// re-added. Use [`CanonicalFrame::to_field`] for the full inverse.
    pub fn back_transform(points: &mut [Point2], angle: f64) {
        let (sin, cos) = (-angle).sin_cos();
        for p in points.iter_mut() {
            *p = Point2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
        }
    }

    /// Returns the original position of vertex 0.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the rotation angle applied by the forward transform.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Maps a single field-frame point into the canonical frame.
    #[must_use]
    pub fn to_canonical(&self, p: &Point2) -> Point2 {
        let (sin, cos) = self.angle.sin_cos();
        let r = p - self.origin;
        Point2::new(r.x * cos - r.y * sin, r.x * sin + r.y * cos)
    }

    /// Maps canonical points back into the field frame in place: inverse
    /// rotation, then the vertex-0 translation.
    pub fn to_field(&self, points: &mut [Point2]) {
        Self::back_transform(points, self.angle);
        let offset: Vector2 = self.origin.coords;
        for p in points.iter_mut() {
            *p += offset;
        }
    }
}
