//! Plans coverage paths for a sample field and reports how much they cover.
//!
//! Usage:
//! ```text
//! cargo run --example plan                       # both patterns, width 6
//! cargo run --example plan -- spiral 4.5         # one pattern, custom width
//! cargo run --example plan -- boustrophedon 6 a.yaml
//! ```
//!
//! With an output file the last planned path is saved in the bracketed
//! `[x, y]` format and echoed to stdout as a JSON-lines path message.

use furrow::io::{publish_once, save_path, JsonLinePublisher};
use furrow::operations::query::Coverage;
use furrow::{CoveragePattern, FurrowError, PlanCoverage, PlannerConfig, Quad, WaypointPath};

const FIELD: [(f64, f64); 4] = [(50.7, 5.3), (120.1, 21.2), (150.2, 46.0), (10.7, 80.46)];

fn parse_pattern(arg: &str) -> Option<CoveragePattern> {
    match arg {
        "s" | "boustrophedon" => Some(CoveragePattern::Boustrophedon),
        "o" | "spiral" => Some(CoveragePattern::Spiral),
        _ => None,
    }
}

fn main() -> Result<(), FurrowError> {
    // Default: WARN for everything, INFO for furrow.
    // Override with RUST_LOG env var (e.g. RUST_LOG=furrow=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("plan=info".parse().unwrap_or_default())
        .add_directive("furrow=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let patterns = match args.first().and_then(|a| parse_pattern(a)) {
        Some(pattern) => vec![pattern],
        None => vec![CoveragePattern::Boustrophedon, CoveragePattern::Spiral],
    };
    let width = args
        .get(1)
        .and_then(|w| w.parse::<f64>().ok())
        .unwrap_or(6.0);
    let output = args.get(2);

    let field = Quad::from_xy(FIELD)?;
    let mut last = WaypointPath::default();
    for pattern in patterns {
        let config = PlannerConfig::new(width).with_pattern(pattern);
        let path = PlanCoverage::new(field, config).execute()?;
        let report = Coverage::new(&field, &path, width).execute()?;
        println!(
            "{pattern:?}: {} waypoints, {:.1} m driven, {:.1}% of {:.1} m² covered",
            path.len(),
            path.length(),
            report.percentage,
            report.field_area
        );
        last = path;
    }

    if let Some(file) = output {
        save_path(file, &last)?;
        let mut publisher = JsonLinePublisher::new(std::io::stdout().lock());
        publish_once(&mut publisher, "/path", &last, "map")?;
    }
    Ok(())
}
