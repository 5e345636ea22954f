/// 2D arc math utilities.
///
/// Angles are radians measured counter-clockwise from +X. A sweep is signed:
/// - `sweep > 0`: counter-clockwise arc
/// - `sweep < 0`: clockwise arc
use std::f64::consts::TAU;

/// Polar angle of `(x, y)` around center `(cx, cy)`.
#[must_use]
pub fn angle_about(cx: f64, cy: f64, x: f64, y: f64) -> f64 {
    (y - cy).atan2(x - cx)
}

/// Signed sweep from `start_angle` to `end_angle` travelling in the given
/// direction.
///
/// The end angle is unwrapped by one full turn when it lies on the wrong
/// side of the start, so the result is in `(-2π, 0]` for clockwise travel
/// and `[0, 2π)` for counter-clockwise travel.
#[must_use]
pub fn directed_sweep(start_angle: f64, end_angle: f64, clockwise: bool) -> f64 {
    let mut end = end_angle;
    if clockwise {
        if end > start_angle {
            end -= TAU;
        }
    } else if end < start_angle {
        end += TAU;
    }
    end - start_angle
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(
    cx: f64, cy: f64,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    t: f64,
) -> (f64, f64) {
    let angle = start_angle + sweep * t;
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Samples `count` points strictly inside an arc (endpoints excluded),
/// evenly spaced in angle.
#[must_use]
pub fn arc_interior_points(
    cx: f64, cy: f64,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    count: usize,
) -> Vec<(f64, f64)> {
    #[allow(clippy::cast_precision_loss)]
    let denom = (count + 1) as f64;
    (1..=count)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / denom;
            arc_point_at(cx, cy, radius, start_angle, sweep, t)
        })
        .collect()
}
