use std::f64::consts::FRAC_PI_2;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};

/// An infinite boundary line in slope-intercept form.
///
/// Vertical lines carry their own variant so they are never approximated
/// by a very large slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl Line {
    /// Builds the line through two points.
    ///
    /// Returns `Line::Vertical` when the points share an x coordinate
    /// (within [`TOLERANCE`]).
    #[must_use]
    pub fn through(p1: &Point2, p2: &Point2) -> Self {
        let dx = p2.x - p1.x;
        if dx.abs() < TOLERANCE {
            return Self::Vertical { x: p1.x };
        }
        let slope = (p2.y - p1.y) / dx;
        Self::Sloped {
            slope,
            intercept: p1.y - slope * p1.x,
        }
    }

    /// Solves the line for x at the given y.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::HorizontalLine` if the line has zero slope.
    pub fn x_at(&self, y: f64) -> Result<f64> {
        match *self {
            Self::Vertical { x } => Ok(x),
            Self::Sloped { slope, intercept } => {
                if slope.abs() < TOLERANCE {
                    return Err(GeometryError::HorizontalLine { y: intercept }.into());
                }
                Ok((y - intercept) / slope)
            }
        }
    }

    /// Solves the line for y at the given x.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::VerticalLine` for a vertical line.
    pub fn y_at(&self, x: f64) -> Result<f64> {
        match *self {
            Self::Vertical { x: vx } => Err(GeometryError::VerticalLine { x: vx }.into()),
            Self::Sloped { slope, intercept } => Ok(slope * x + intercept),
        }
    }

    /// Intersects two lines.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParallelLines` if the lines have equal slopes
    /// or are both vertical.
    pub fn intersect(&self, other: &Self) -> Result<Point2> {
        match (*self, *other) {
            (
                Self::Sloped { slope: m1, intercept: b1 },
                Self::Sloped { slope: m2, intercept: b2 },
            ) => {
                if (m1 - m2).abs() < TOLERANCE {
                    return Err(GeometryError::ParallelLines { slope: m1 }.into());
                }
                let x = (b2 - b1) / (m1 - m2);
                Ok(Point2::new(x, m1 * x + b1))
            }
            (Self::Sloped { slope, intercept }, Self::Vertical { x })
            | (Self::Vertical { x }, Self::Sloped { slope, intercept }) => {
                Ok(Point2::new(x, slope * x + intercept))
            }
            (Self::Vertical { .. }, Self::Vertical { .. }) => {
                Err(GeometryError::ParallelLines { slope: f64::INFINITY }.into())
            }
        }
    }

    /// Angle of the line to the +X axis, in `(-π/2, π/2]`.
    #[must_use]
    pub fn inclination(&self) -> f64 {
        match *self {
            Self::Vertical { .. } => FRAC_PI_2,
            Self::Sloped { slope, .. } => slope.atan(),
        }
    }

    /// Signed side of `p`: positive above a sloped line or right of a
    /// vertical one, zero on the line.
    #[must_use]
    pub fn side_of(&self, p: &Point2) -> f64 {
        match *self {
            Self::Vertical { x } => p.x - x,
            Self::Sloped { slope, intercept } => p.y - (slope * p.x + intercept),
        }
    }

    /// Moves the line perpendicular to itself by `distance` toward the side
    /// containing `interior`.
    ///
    /// A sloped line's intercept changes by `distance / cos(inclination)`.
    #[must_use]
    pub fn shifted_toward(&self, distance: f64, interior: &Point2) -> Self {
        let sign = if self.side_of(interior) >= 0.0 { 1.0 } else { -1.0 };
        match *self {
            Self::Vertical { x } => Self::Vertical {
                x: x + sign * distance,
            },
            Self::Sloped { slope, intercept } => Self::Sloped {
                slope,
                intercept: intercept + sign * (distance / slope.atan().cos()).abs(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FurrowError;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn through_sloped_points() {
        let line = Line::through(&p(0.0, 1.0), &p(2.0, 5.0));
        match line {
            Line::Sloped { slope, intercept } => {
                assert!((slope - 2.0).abs() < TOLERANCE);
                assert!((intercept - 1.0).abs() < TOLERANCE);
            }
            Line::Vertical { .. } => panic!("expected sloped line"),
        }
    }

    #[test]
    fn through_vertical_points() {
        let line = Line::through(&p(3.0, 0.0), &p(3.0, 7.0));
        assert_eq!(line, Line::Vertical { x: 3.0 });
        assert!((line.x_at(42.0).unwrap() - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn x_at_and_y_at() {
        let line = Line::Sloped { slope: 2.0, intercept: 1.0 };
        assert!((line.x_at(5.0).unwrap() - 2.0).abs() < TOLERANCE);
        assert!((line.y_at(3.0).unwrap() - 7.0).abs() < TOLERANCE);
    }

    #[test]
    fn x_at_horizontal_is_invalid_geometry() {
        let line = Line::Sloped { slope: 0.0, intercept: 4.0 };
        let err = line.x_at(4.0).unwrap_err();
        assert!(err.is_invalid_geometry());
        assert!(matches!(
            err,
            FurrowError::Geometry(GeometryError::HorizontalLine { .. })
        ));
    }

    #[test]
    fn y_at_vertical_is_invalid_geometry() {
        assert!(Line::Vertical { x: 1.0 }.y_at(0.0).unwrap_err().is_invalid_geometry());
    }

    #[test]
    fn intersect_sloped_lines() {
        let a = Line::Sloped { slope: 1.0, intercept: 0.0 };
        let b = Line::Sloped { slope: -1.0, intercept: 4.0 };
        let x = a.intersect(&b).unwrap();
        assert!((x.x - 2.0).abs() < TOLERANCE);
        assert!((x.y - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn intersect_with_vertical() {
        let a = Line::Sloped { slope: 0.5, intercept: 1.0 };
        let v = Line::Vertical { x: 4.0 };
        let x = v.intersect(&a).unwrap();
        assert!((x.x - 4.0).abs() < TOLERANCE);
        assert!((x.y - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn intersect_parallel_is_invalid_geometry() {
        let a = Line::Sloped { slope: 1.0, intercept: 0.0 };
        let b = Line::Sloped { slope: 1.0, intercept: 3.0 };
        assert!(a.intersect(&b).unwrap_err().is_invalid_geometry());
        let v1 = Line::Vertical { x: 0.0 };
        let v2 = Line::Vertical { x: 1.0 };
        assert!(v1.intersect(&v2).unwrap_err().is_invalid_geometry());
    }

    #[test]
    fn shift_horizontal_toward_interior() {
        let line = Line::Sloped { slope: 0.0, intercept: 0.0 };
        let up = line.shifted_toward(2.0, &p(5.0, 5.0));
        assert_eq!(up, Line::Sloped { slope: 0.0, intercept: 2.0 });
        let down = line.shifted_toward(2.0, &p(5.0, -5.0));
        assert_eq!(down, Line::Sloped { slope: 0.0, intercept: -2.0 });
    }

    #[test]
    fn shift_vertical_toward_interior() {
        let line = Line::Vertical { x: 10.0 };
        assert_eq!(line.shifted_toward(1.0, &p(5.0, 5.0)), Line::Vertical { x: 9.0 });
        assert_eq!(line.shifted_toward(1.0, &p(15.0, 5.0)), Line::Vertical { x: 11.0 });
    }

    #[test]
    fn shift_sloped_keeps_perpendicular_distance() {
        // y = x shifted by √2 toward (0, 10) becomes y = x + 2.
        let line = Line::Sloped { slope: 1.0, intercept: 0.0 };
        let shifted = line.shifted_toward(2.0_f64.sqrt(), &p(0.0, 10.0));
        match shifted {
            Line::Sloped { slope, intercept } => {
                assert!((slope - 1.0).abs() < TOLERANCE);
                assert!((intercept - 2.0).abs() < 1e-9, "intercept={intercept}");
            }
            Line::Vertical { .. } => panic!("expected sloped line"),
        }
    }

    #[test]
    fn inclination_of_vertical_is_right_angle() {
        assert!((Line::Vertical { x: 0.0 }.inclination() - FRAC_PI_2).abs() < TOLERANCE);
        let diag = Line::Sloped { slope: -1.0, intercept: 0.0 };
        assert!((diag.inclination() + std::f64::consts::FRAC_PI_4).abs() < TOLERANCE);
    }
}
