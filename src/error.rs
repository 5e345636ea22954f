use thiserror::Error;

/// Top-level error type for the furrow planner.
#[derive(Debug, Error)]
pub enum FurrowError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Planning(#[from] PlanningError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] serde_json::Error),
}

/// Invalid field geometry: every variant is a division-by-zero or
/// degenerate-shape condition that cannot be planned around.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("lines are parallel (slope {slope}) and do not intersect")]
    ParallelLines { slope: f64 },

    #[error("horizontal line y = {y} has no unique x")]
    HorizontalLine { y: f64 },

    #[error("vertical line x = {x} has no unique y")]
    VerticalLine { x: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by the planning pipeline itself.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("spiral did not converge within {rounds} rounds ({waypoints} waypoints collected)")]
    Incomplete { rounds: usize, waypoints: usize },

    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FurrowError {
    /// Returns `true` for the invalid-geometry class of failures.
    #[must_use]
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }
}

/// Convenience type alias for results using [`FurrowError`].
pub type Result<T> = std::result::Result<T, FurrowError>;
