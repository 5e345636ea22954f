pub mod lanes;
pub mod offset;
pub mod plan;
pub mod query;
pub mod transform;
pub mod turns;

pub use plan::{CanonicalPlan, PlanCoverage, PlanO, PlanS};
pub use turns::{TurnGeometry, TurnSmoother};
