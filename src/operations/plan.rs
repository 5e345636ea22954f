use tracing::info;

use crate::config::{CoveragePattern, PlannerConfig};
use crate::error::{GeometryError, PlanningError, Result};
use crate::geometry::{Quad, WaypointPath};
use crate::operations::lanes::{interleave, LaneSweep};
use crate::operations::offset::{InwardOffset, Spiral, DEFAULT_MAX_ROUNDS};
use crate::operations::transform::CanonicalFrame;
use crate::operations::turns::TurnSmoother;

fn check_width(width: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(
            PlanningError::InvalidInput(format!("working width must be positive, got {width}"))
                .into(),
        );
    }
    Ok(())
}

/// A path in a field's canonical frame, together with the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPlan {
    pub path: WaypointPath,
    pub frame: CanonicalFrame,
}

impl CanonicalPlan {
    /// Rotation the canonical frame applied to the field, `-atan2` of the
    /// edge that was laid on the x axis.
    ///
    /// For a counter-clockwise field that is edge `v0 → v1`. A clockwise
    /// field is re-wound to `[v0, v3, v2, v1]` first, so its angle is
    /// measured along the caller's `v0 → v3` instead.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.frame.angle()
    }

    /// Maps the path back into the field frame.
    #[must_use]
    pub fn into_field_path(self) -> WaypointPath {
        let mut path = self.path;
        self.frame.to_field(&mut path.points);
        path
    }
}

/// Boustrophedon lane planning.
///
/// Lanes run parallel to edge 0, the first one half a width inside it. The
/// lane ends alternate between the two side edges (and the top edge once
/// the shorter side runs out), so the resulting path reverses at every
/// lane end. Turns are left sharp; see [`TurnSmoother`].
///
/// Clockwise fields are re-wound with vertex 0 kept in place, which makes
/// the caller's edge `v0 → v3` the base edge the lanes run along. The
/// returned [`CanonicalPlan::angle`] refers to that edge.
#[derive(Debug, Clone)]
pub struct PlanS {
    field: Quad,
    width: f64,
}

impl PlanS {
    #[must_use]
    pub fn new(field: Quad, width: f64) -> Self {
        Self { field, width }
    }

    /// Executes the plan, returning the path in the canonical frame.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for a non-positive width,
    /// `GeometryError` if the field is narrower than one lane or its edges
    /// cannot be sampled, and `PlanningError::InternalInconsistency` if the
    /// lane lists cannot be stitched.
    pub fn execute(&self) -> Result<CanonicalPlan> {
        check_width(self.width)?;
        let (canonical, frame) = CanonicalFrame::transform(&self.field.counter_clockwise());
        let lines = canonical.line_equations();
        let inset = InwardOffset::half(&lines, self.width).execute()?;

        let v = canonical.vertices();
        let lanes =
            LaneSweep::new(&inset, self.width, self.width * 0.5, v[2].y, v[3].y).execute()?;
        if lanes.is_empty() {
            return Err(GeometryError::Degenerate(format!(
                "field narrower than one lane of width {}",
                self.width
            ))
            .into());
        }

        let (primary, secondary) = if lanes.left.len() > lanes.right.len() {
            (lanes.left, [lanes.right, lanes.top].concat())
        } else {
            (lanes.right, [lanes.left, lanes.top].concat())
        };
        let mut path = WaypointPath::new(interleave(&primary, &secondary)?);
        path.dedup();

        Ok(CanonicalPlan { path, frame })
    }
}

/// Spiral ring planning, returned in the field frame.
#[derive(Debug, Clone)]
pub struct PlanO {
    field: Quad,
    width: f64,
    max_rounds: usize,
}

impl PlanO {
    #[must_use]
    pub fn new(field: Quad, width: f64) -> Self {
        Self {
            field,
            width,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Sets the spiral round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Executes the plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::Incomplete` if the spiral hits its round cap,
    /// `GeometryError::Degenerate` if offsetting the field by one width
    /// leaves no area, and any error raised while building the rings.
    pub fn execute(&self) -> Result<WaypointPath> {
        check_width(self.width)?;
        let (canonical, frame) = CanonicalFrame::transform(&self.field.counter_clockwise());
        let run = Spiral::new(canonical.line_equations(), self.width)
            .with_max_rounds(self.max_rounds)
            .execute()?;
        if run.points.is_empty() {
            return Err(GeometryError::Degenerate(format!(
                "field too small for a spiral ring of width {}",
                self.width
            ))
            .into());
        }

        let mut path = WaypointPath::new(run.points);
        path.dedup();
        frame.to_field(&mut path.points);
        Ok(path)
    }
}

/// Full field-frame coverage pipeline driven by a [`PlannerConfig`].
#[derive(Debug, Clone)]
pub struct PlanCoverage {
    field: Quad,
    config: PlannerConfig,
}

impl PlanCoverage {
    #[must_use]
    pub fn new(field: Quad, config: PlannerConfig) -> Self {
        Self { field, config }
    }

    /// Plans the configured pattern and returns the path in the field frame.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for an invalid config, plus
    /// anything [`PlanS`], [`TurnSmoother`] or [`PlanO`] return.
    pub fn execute(&self) -> Result<WaypointPath> {
        self.config.validate()?;
        let width = self.config.working_width;

        let path = match self.config.pattern {
            CoveragePattern::Boustrophedon => {
                let mut plan = PlanS::new(self.field, width).execute()?;
                if self.config.smooth_turns {
                    let mut smoother = TurnSmoother::new(width);
                    if let Some(samples) = self.config.arc_samples {
                        smoother = smoother.with_samples(samples);
                    }
                    plan.path = smoother.execute(&plan.path)?;
                }
                plan.into_field_path()
            }
            CoveragePattern::Spiral => PlanO::new(self.field, width)
                .with_max_rounds(self.config.max_spiral_rounds)
                .execute()?,
        };

        info!(
            pattern = ?self.config.pattern,
            width,
            waypoints = path.len(),
            length = path.length(),
            "coverage path planned"
        );
        Ok(path)
    }
}
