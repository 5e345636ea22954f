use crate::error::{PlanningError, Result};
use crate::math::Point2;

/// Interleaves two lane-boundary sequences into one zig-zag drive order.
///
/// Starts at `primary[0]`, then for `i = 1, 3, 5, …` takes
/// `secondary[i-1..=i]` followed by `primary[i..=i+1]`. An odd-length
/// primary ends on the secondary's last point.
///
/// # Errors
///
/// Returns `PlanningError::InternalInconsistency` if the primary is empty
/// or the secondary is more than one point shorter than the primary.
pub fn interleave(primary: &[Point2], secondary: &[Point2]) -> Result<Vec<Point2>> {
    let Some(&first) = primary.first() else {
        return Err(PlanningError::InternalInconsistency(
            "cannot stitch lanes: primary lane list is empty".to_owned(),
        )
        .into());
    };
    if secondary.len() + 1 < primary.len() {
        return Err(PlanningError::InternalInconsistency(format!(
            "cannot stitch lanes: secondary has {} points for {} primary points",
            secondary.len(),
            primary.len()
        ))
        .into());
    }

    let mut path = Vec::with_capacity(primary.len() + secondary.len());
    path.push(first);
    for i in (1..primary.len()).step_by(2) {
        path.extend_from_slice(&secondary[i - 1..(i + 1).min(secondary.len())]);
        path.extend_from_slice(&primary[i..(i + 2).min(primary.len())]);
    }
    if primary.len() % 2 == 1 {
        if let Some(&last) = secondary.last() {
            path.push(last);
        }
    }
    Ok(path)
}
