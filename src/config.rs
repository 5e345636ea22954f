use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};
use crate::operations::offset::DEFAULT_MAX_ROUNDS;

/// Lane layout used to cover a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePattern {
    /// Back-and-forth parallel lanes ("S").
    #[default]
    Boustrophedon,
    /// Inward-shrinking rings ("O").
    Spiral,
}

/// Planner settings.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Effective swath of the vehicle, used as lane spacing and turn scale.
    pub working_width: f64,
    pub pattern: CoveragePattern,
    pub max_spiral_rounds: usize,
    /// Samples on the smaller turn arc. `None` derives it from the width.
    pub arc_samples: Option<usize>,
    pub smooth_turns: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            working_width: 6.0,
            pattern: CoveragePattern::default(),
            max_spiral_rounds: DEFAULT_MAX_ROUNDS,
            arc_samples: None,
            smooth_turns: true,
        }
    }
}

impl PlannerConfig {
    #[must_use]
    pub fn new(working_width: f64) -> Self {
        Self {
            working_width,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: CoveragePattern) -> Self {
        self.pattern = pattern;
        self
    }

    #[must_use]
    pub fn with_max_spiral_rounds(mut self, rounds: usize) -> Self {
        self.max_spiral_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_arc_samples(mut self, samples: usize) -> Self {
        self.arc_samples = Some(samples);
        self
    }

    #[must_use]
    pub fn with_smooth_turns(mut self, smooth: bool) -> Self {
        self.smooth_turns = smooth;
        self
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns `FurrowError::Format` for malformed JSON and
    /// `PlanningError::InvalidInput` if the values fail [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the width and the round cap.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::InvalidInput` for a non-finite or
    /// non-positive width, or a zero round cap.
    pub fn validate(&self) -> Result<()> {
        if !self.working_width.is_finite() || self.working_width <= 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "working width must be positive, got {}",
                self.working_width
            ))
            .into());
        }
        if self.max_spiral_rounds == 0 {
            return Err(
                PlanningError::InvalidInput("spiral round cap must be at least 1".to_owned())
                    .into(),
            );
        }
        Ok(())
    }
}
