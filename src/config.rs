//! Tunable settings for a rotation analysis.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive bounds on the snapshot scores that are tallied and reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: u64,
    pub max: u64,
}

impl ScoreRange {
    pub fn new(min: u64, max: u64) -> ScoreRange {
        ScoreRange { min, max }
    }

    pub fn contains(&self, score: u64) -> bool {
        self.min <= score && score <= self.max
    }

    /// Rejects ranges that could never match.
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(Error::InvalidScoreRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for ScoreRange {
    fn default() -> ScoreRange {
        ScoreRange::new(0, 99_999_999)
    }
}

/// Settings for `RotationMatrixAnalyzer`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Only snapshots scoring inside this range are counted.
    pub score_filter: ScoreRange,
    /// Emit a detail record per counted snapshot instead of a progress line.
    pub report_details: bool,
}
