//! Experiment configuration
//!
//! The historical experiment scripts hardcoded their parameters at the top
//! of each file; here they live in explicit structs with defaults matching
//! those runs.

use crate::error::{Error, Result};
use crate::pca::Preprocess;
use serde::{Deserialize, Serialize};

/// How the per-trial point count grows with the swept dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointGrowth {
    /// Same point count for every dimension
    Constant,
    /// base + step * (dimension - 1)
    Linear { step: usize },
    /// base * 2^(dimension - 1)
    Doubling,
}

impl PointGrowth {
    /// Point count for one trial at `dimension`, given the base count.
    pub fn points_for(&self, base: usize, dimension: usize) -> Result<usize> {
        if dimension == 0 {
            return Err(Error::InvalidParameter(
                "dimension must be at least 1".to_string(),
            ));
        }

        let points = match self {
            PointGrowth::Constant => Some(base),
            PointGrowth::Linear { step } => step
                .checked_mul(dimension - 1)
                .and_then(|extra| base.checked_add(extra)),
            PointGrowth::Doubling => 2usize
                .checked_pow((dimension - 1) as u32)
                .and_then(|factor| base.checked_mul(factor)),
        };

        points.ok_or_else(|| {
            Error::InvalidParameter(format!(
                "point count overflows at dimension {}",
                dimension
            ))
        })
    }
}

/// What the sweep driver does when one dimension value fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the whole sweep on the first error
    Abort,
    /// Record the failure and continue with the next dimension
    Skip,
}

/// Parameters for one dimension sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Dimension values to sweep, in order
    pub dimensions: Vec<usize>,
    /// Independent trials per dimension value
    pub trials: usize,
    /// Point count per trial at dimension 1
    pub base_points: usize,
    /// Point-count growth across dimensions
    pub growth: PointGrowth,
    /// Sampling box, every coordinate uniform in [bounds.0, bounds.1]
    pub bounds: (f64, f64),
    /// Radius of the reference hypersphere, centered in the box
    pub radius: f64,
    /// RNG seed; None seeds from entropy
    pub seed: Option<u64>,
    /// Per-dimension failure handling
    pub on_error: ErrorPolicy,
}

impl SweepConfig {
    /// The hypersphere fill-ratio run: radius 10 inside [0, 20]^d,
    /// 100 trials, 1000 points doubled per dimension, d = 1..=10.
    pub fn hypersphere_default() -> Self {
        Self {
            dimensions: (1..=10).collect(),
            trials: 100,
            base_points: 1000,
            growth: PointGrowth::Doubling,
            bounds: (0.0, 20.0),
            radius: 10.0,
            seed: None,
            on_error: ErrorPolicy::Abort,
        }
    }

    /// The replication fill-ratio run: same geometry as
    /// `hypersphere_default` but 200 trials over d = 2..=12, CSV-oriented.
    pub fn hypersphere_replication_default() -> Self {
        Self {
            dimensions: (2..=12).collect(),
            trials: 200,
            base_points: 1000,
            growth: PointGrowth::Doubling,
            bounds: (0.0, 20.0),
            radius: 10.0,
            seed: None,
            on_error: ErrorPolicy::Abort,
        }
    }

    /// The pairwise-distance concentration run: unit box, 10 trials,
    /// 100 points plus 50 per extra dimension, d = 1..=25.
    pub fn pairwise_default() -> Self {
        Self {
            dimensions: (1..=25).collect(),
            trials: 10,
            base_points: 100,
            growth: PointGrowth::Linear { step: 50 },
            bounds: (0.0, 1.0),
            radius: 0.5,
            seed: None,
            on_error: ErrorPolicy::Abort,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dimensions.is_empty() {
            return Err(Error::InvalidParameter(
                "dimension list is empty".to_string(),
            ));
        }
        if self.dimensions.iter().any(|&d| d == 0) {
            return Err(Error::InvalidParameter(
                "dimensions must be at least 1".to_string(),
            ));
        }
        if self.trials == 0 {
            return Err(Error::InvalidParameter(
                "trial count must be at least 1".to_string(),
            ));
        }
        if self.base_points == 0 {
            return Err(Error::InvalidParameter(
                "base point count must be at least 1".to_string(),
            ));
        }
        if !self.bounds.0.is_finite() || !self.bounds.1.is_finite() || self.bounds.0 > self.bounds.1
        {
            return Err(Error::InvalidParameter(format!(
                "invalid sampling bounds [{}, {}]",
                self.bounds.0, self.bounds.1
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Parameters for one PCA projection experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Original dimension, must exceed 2
    pub dimension: usize,
    /// Points in the sample
    pub points: usize,
    /// Sampling box bounds
    pub bounds: (f64, f64),
    /// Radius of the reference hypersphere, centered in the box
    pub radius: f64,
    /// Column preprocessing before the covariance step
    pub preprocess: Preprocess,
    /// RNG seed; None seeds from entropy
    pub seed: Option<u64>,
}

impl ProjectionConfig {
    /// The historical projection run: 1000 points in [0, 20]^5,
    /// radius-10 sphere, centered columns.
    pub fn legacy_default() -> Self {
        Self {
            dimension: 5,
            points: 1000,
            bounds: (0.0, 20.0),
            radius: 10.0,
            preprocess: Preprocess::Center,
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dimension <= 2 {
            return Err(Error::InvalidParameter(format!(
                "projection needs dimension > 2, got {}",
                self.dimension
            )));
        }
        if self.points < 2 {
            return Err(Error::InvalidParameter(
                "projection needs at least 2 points".to_string(),
            ));
        }
        if !self.bounds.0.is_finite() || !self.bounds.1.is_finite() || self.bounds.0 > self.bounds.1
        {
            return Err(Error::InvalidParameter(format!(
                "invalid sampling bounds [{}, {}]",
                self.bounds.0, self.bounds.1
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_growth() {
        assert_eq!(PointGrowth::Constant.points_for(100, 7).unwrap(), 100);
        assert_eq!(
            PointGrowth::Linear { step: 50 }.points_for(100, 1).unwrap(),
            100
        );
        assert_eq!(
            PointGrowth::Linear { step: 50 }.points_for(100, 5).unwrap(),
            300
        );
        assert_eq!(PointGrowth::Doubling.points_for(1000, 1).unwrap(), 1000);
        assert_eq!(PointGrowth::Doubling.points_for(1000, 4).unwrap(), 8000);
    }

    #[test]
    fn test_point_growth_overflow() {
        assert!(PointGrowth::Doubling.points_for(1000, 200).is_err());
        assert!(PointGrowth::Constant.points_for(1000, 0).is_err());
    }

    #[test]
    fn test_default_configs_validate() {
        assert!(SweepConfig::hypersphere_default().validate().is_ok());
        assert!(SweepConfig::hypersphere_replication_default().validate().is_ok());
        assert!(SweepConfig::pairwise_default().validate().is_ok());
        assert!(ProjectionConfig::legacy_default().validate().is_ok());
    }

    #[test]
    fn test_replication_run_parameters() {
        let cfg = SweepConfig::hypersphere_replication_default();
        assert_eq!(cfg.dimensions.first(), Some(&2));
        assert_eq!(cfg.dimensions.last(), Some(&12));
        assert_eq!(cfg.trials, 200);
        assert_eq!(cfg.growth, PointGrowth::Doubling);
        assert_eq!(cfg.radius, 10.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut cfg = SweepConfig::hypersphere_default();
        cfg.radius = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = SweepConfig::hypersphere_default();
        cfg.dimensions.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = SweepConfig::pairwise_default();
        cfg.bounds = (1.0, 0.0);
        assert!(cfg.validate().is_err());

        let mut cfg = ProjectionConfig::legacy_default();
        cfg.dimension = 2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg = SweepConfig::pairwise_default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SweepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
