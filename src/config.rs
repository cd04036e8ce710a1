//! Tunable scoring parameters.
//!
//! The defaults reproduce the reference scoring exactly; a TOML file may
//! override any subset of them:
//!
//! ```toml
//! catchment_km = 2.5
//! top_k = 4
//!
//! [weights]
//! phase1 = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Weight applied to each admission phase's registered/vacancy percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseWeights {
    pub phase1: f64,
    pub phase2b: f64,
    pub phase2c: f64,
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self {
            phase1: 0.4,
            phase2b: 0.2,
            phase2c: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    pub weights: PhaseWeights,
    pub earth_radius_km: f64,
    /// Schools further than this from a house are ignored.
    pub catchment_km: f64,
    /// Schools at or within this distance earn `near_points`.
    pub near_km: f64,
    pub near_points: u32,
    pub far_points: u32,
    /// Number of best-ranked nearby schools that contribute to a score.
    pub top_k: usize,
    pub school_weight: f64,
    pub location_weight: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            weights: PhaseWeights::default(),
            earth_radius_km: 6371.0,
            catchment_km: 2.0,
            near_km: 1.0,
            near_points: 20,
            far_points: 10,
            top_k: 3,
            school_weight: 0.7,
            location_weight: 0.3,
        }
    }
}

impl ScoringParams {
    /// Read parameters from a TOML file, filling unspecified fields with defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ScoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScoreError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = toml::from_str(&text).map_err(|source| ScoreError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        let invalid = |reason: &str| {
            Err(ScoreError::InvalidConfig {
                reason: reason.to_owned(),
            })
        };

        if !(self.earth_radius_km > 0.0) {
            return invalid("earth_radius_km must be positive");
        }
        if !(self.catchment_km > 0.0) {
            return invalid("catchment_km must be positive");
        }
        if !(self.near_km >= 0.0) || self.near_km > self.catchment_km {
            return invalid("near_km must lie between 0 and catchment_km");
        }
        if self.top_k == 0 {
            return invalid("top_k must be at least 1");
        }
        Ok(())
    }
}
