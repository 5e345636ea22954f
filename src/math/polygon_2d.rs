use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Z component of the cross product of two 2D vectors.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Average of the polygon's vertices. Lies inside any convex polygon.
#[must_use]
pub fn vertex_average(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / n)
}

/// Checks that a closed polygon is strictly convex and returns its winding
/// sign (`1.0` for counter-clockwise, `-1.0` for clockwise).
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the polygon has fewer than 3
/// vertices, a zero-length edge, collinear consecutive edges, or turns in
/// both directions.
pub fn convex_winding(points: &[Point2]) -> Result<f64> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::Degenerate(format!(
            "polygon needs at least 3 vertices, got {n}"
        ))
        .into());
    }

    let mut sign: Option<f64> = None;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let ab = b - a;
        let bc = c - b;
        if ab.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "zero-length edge at vertex {i} ({}, {})",
                a.x, a.y
            ))
            .into());
        }
        let turn = cross_2d(&ab, &bc);
        if turn.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "collinear edges at vertex {}",
                (i + 1) % n
            ))
            .into());
        }
        match sign {
            None => sign = Some(turn.signum()),
            Some(s) if turn * s < 0.0 => {
                return Err(GeometryError::Degenerate("polygon is not convex".to_owned()).into());
            }
            Some(_) => {}
        }
    }
    let sign = sign.unwrap_or(1.0);

    // A pentagram-like star turns consistently but winds twice.
    let area = signed_area_2d(points);
    if area * sign < TOLERANCE {
        return Err(GeometryError::Degenerate("polygon is self-intersecting".to_owned()).into());
    }
    Ok(sign)
}

/// Tests whether `p` lies inside (or on the boundary of) a convex polygon
/// with the given winding sign.
#[must_use]
pub fn point_in_convex_2d(points: &[Point2], winding: f64, p: &Point2) -> bool {
    let n = points.len();
    (0..n).all(|i| {
        let a = points[i];
        let b = points[(i + 1) % n];
        cross_2d(&(b - a), &(p - a)) * winding >= -TOLERANCE
    })
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}
