//! Dimension sweep drivers
//!
//! Each driver repeats an independent trial per dimension value and
//! aggregates the per-trial results into one `DimensionRecord`. The swept
//! dimension list comes from the caller; nothing is implicit.

use crate::classify::{pairwise_distances, SphereClassifier};
use crate::config::{ErrorPolicy, ProjectionConfig, SweepConfig};
use crate::error::{Error, Result};
use crate::pca::{project_labeled, ProjectionRecord};
use crate::sample::{make_rng, uniform_sample};
use crate::stats::{dispersion_ratio, mean, std_dev};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Aggregated result for one dimension value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub dimension: usize,
    pub points_per_trial: usize,
    /// Mean of the per-trial values
    pub mean: f64,
    /// Population standard deviation of the per-trial values
    pub std_dev: f64,
    /// Raw per-trial values, one per trial
    pub trials: Vec<f64>,
}

/// Outcome of a full sweep. `skipped` is only populated under
/// `ErrorPolicy::Skip`; under `Abort` the first error ends the sweep.
#[derive(Debug)]
pub struct SweepReport {
    pub records: Vec<DimensionRecord>,
    pub skipped: Vec<(usize, Error)>,
}

/// Fill-ratio sweep: fraction of uniform points falling inside the
/// hypersphere centered in the sampling box.
pub fn run_fill_sweep(
    config: &SweepConfig,
    mut on_dimension: impl FnMut(&DimensionRecord),
) -> Result<SweepReport> {
    run_sweep(config, fill_trial, &mut on_dimension)
}

/// Distance-concentration sweep: per trial, the ratio of the population
/// standard deviation to the mean over all pairwise distances.
pub fn run_distance_sweep(
    config: &SweepConfig,
    mut on_dimension: impl FnMut(&DimensionRecord),
) -> Result<SweepReport> {
    run_sweep(config, distance_trial, &mut on_dimension)
}

fn run_sweep(
    config: &SweepConfig,
    trial: fn(usize, usize, &SweepConfig, &mut StdRng) -> Result<f64>,
    on_dimension: &mut impl FnMut(&DimensionRecord),
) -> Result<SweepReport> {
    config.validate()?;

    let mut rng = make_rng(config.seed);
    let mut records = Vec::with_capacity(config.dimensions.len());
    let mut skipped = Vec::new();

    for &dim in &config.dimensions {
        match run_dimension(config, dim, trial, &mut rng) {
            Ok(record) => {
                on_dimension(&record);
                records.push(record);
            }
            Err(err) => match config.on_error {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::Skip => skipped.push((dim, err)),
            },
        }
    }

    Ok(SweepReport { records, skipped })
}

fn run_dimension(
    config: &SweepConfig,
    dimension: usize,
    trial: fn(usize, usize, &SweepConfig, &mut StdRng) -> Result<f64>,
    rng: &mut StdRng,
) -> Result<DimensionRecord> {
    let points = config.growth.points_for(config.base_points, dimension)?;

    let mut trials = Vec::with_capacity(config.trials);
    for _ in 0..config.trials {
        trials.push(trial(dimension, points, config, rng)?);
    }

    Ok(DimensionRecord {
        dimension,
        points_per_trial: points,
        mean: mean(&trials),
        std_dev: std_dev(&trials, 0),
        trials,
    })
}

fn fill_trial(
    dimension: usize,
    points: usize,
    config: &SweepConfig,
    rng: &mut StdRng,
) -> Result<f64> {
    let (lo, hi) = config.bounds;
    let sample = uniform_sample(points, dimension, lo, hi, rng)?;
    let classifier = SphereClassifier::centered_in_box(dimension, lo, hi, config.radius)?;
    classifier.fill_ratio(&sample)
}

fn distance_trial(
    dimension: usize,
    points: usize,
    config: &SweepConfig,
    rng: &mut StdRng,
) -> Result<f64> {
    if points < 2 {
        return Err(Error::InvalidParameter(
            "pairwise distances need at least 2 points per trial".to_string(),
        ));
    }

    let (lo, hi) = config.bounds;
    let sample = uniform_sample(points, dimension, lo, hi, rng)?;
    let distances = pairwise_distances(&sample);

    if mean(&distances) == 0.0 {
        return Err(Error::DegenerateInput(
            "pairwise distances have zero mean".to_string(),
        ));
    }
    Ok(dispersion_ratio(&distances))
}

/// Sample, classify against the centered hypersphere (3-way, with the box
/// corner threshold), then project onto the top-2 principal components.
pub fn run_projection(config: &ProjectionConfig) -> Result<ProjectionRecord> {
    config.validate()?;

    let mut rng = make_rng(config.seed);
    let (lo, hi) = config.bounds;
    let sample = uniform_sample(config.points, config.dimension, lo, hi, &mut rng)?;

    let classifier = SphereClassifier::centered_in_box(config.dimension, lo, hi, config.radius)?
        .with_corner_threshold(SphereClassifier::corner_threshold_for_box(hi));
    let labels = classifier.classify_sample(&sample)?;

    project_labeled(&sample, &labels, config.preprocess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointGrowth;

    fn small_config() -> SweepConfig {
        SweepConfig {
            dimensions: vec![1, 2, 3],
            trials: 5,
            base_points: 50,
            growth: PointGrowth::Constant,
            bounds: (0.0, 2.0),
            radius: 1.0,
            seed: Some(1234),
            on_error: ErrorPolicy::Abort,
        }
    }

    #[test]
    fn test_fill_sweep_shape() {
        let config = small_config();
        let mut seen = 0;
        let report = run_fill_sweep(&config, |_| seen += 1).unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(seen, 3);
        assert!(report.skipped.is_empty());

        for record in &report.records {
            assert_eq!(record.trials.len(), 5);
            assert_eq!(record.points_per_trial, 50);
            assert!(record.trials.iter().all(|&f| (0.0..=1.0).contains(&f)));
            assert!(record.mean >= 0.0 && record.mean <= 1.0);
            assert!(record.std_dev >= 0.0);
        }
    }

    #[test]
    fn test_fill_ratio_shrinks_with_dimension() {
        let mut config = small_config();
        config.dimensions = vec![1, 5];
        config.trials = 20;
        config.base_points = 400;

        let report = run_fill_sweep(&config, |_| {}).unwrap();

        // In d=1 the inscribed "sphere" covers the whole interval; by d=5
        // the inscribed ball holds well under half the box volume.
        assert!(report.records[0].mean > 0.95);
        assert!(report.records[1].mean < report.records[0].mean);
    }

    #[test]
    fn test_distance_sweep_concentration() {
        let mut config = small_config();
        config.dimensions = vec![1, 16];
        config.bounds = (0.0, 1.0);
        config.trials = 8;
        config.base_points = 60;

        let report = run_distance_sweep(&config, |_| {}).unwrap();

        // Relative spread of pairwise distances shrinks as d grows.
        let low_d = report.records[0].mean;
        let high_d = report.records[1].mean;
        assert!(high_d < low_d, "expected {} < {}", high_d, low_d);
        assert!(high_d > 0.0);
    }

    #[test]
    fn test_seeded_sweeps_reproduce() {
        let config = small_config();
        let a = run_fill_sweep(&config, |_| {}).unwrap();
        let b = run_fill_sweep(&config, |_| {}).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_skip_policy_records_failures() {
        let mut config = small_config();
        // Doubling growth overflows usize at dimension 500; Skip keeps
        // the sweep alive.
        config.dimensions = vec![1, 500, 2];
        config.growth = PointGrowth::Doubling;
        config.on_error = ErrorPolicy::Skip;

        let report = run_fill_sweep(&config, |_| {}).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, 500);
    }

    #[test]
    fn test_abort_policy_stops() {
        let mut config = small_config();
        config.dimensions = vec![1, 500, 2];
        config.growth = PointGrowth::Doubling;

        assert!(run_fill_sweep(&config, |_| {}).is_err());
    }

    #[test]
    fn test_projection_experiment() {
        let config = ProjectionConfig {
            dimension: 5,
            points: 200,
            bounds: (0.0, 20.0),
            radius: 10.0,
            preprocess: crate::pca::Preprocess::Center,
            seed: Some(99),
        };

        let record = run_projection(&config).unwrap();
        assert_eq!(record.points.len(), 200);
        assert_eq!(record.eigenvectors[0].len(), 5);
        assert!(record.eigenvalues[0].abs() >= record.eigenvalues[1].abs());
    }
}
