pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;

pub use config::{CoveragePattern, PlannerConfig};
pub use error::{FurrowError, Result};
pub use geometry::{Quad, WaypointPath};
pub use operations::{PlanCoverage, PlanO, PlanS, TurnSmoother};
