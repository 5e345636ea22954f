mod coverage;

pub use coverage::{Coverage, CoverageReport};
