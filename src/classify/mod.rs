//! Distance computation and hypersphere membership classification

use crate::error::{Error, Result};
use crate::sample::Sample;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a point falls relative to the reference hypersphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Strictly closer to the center than the radius
    Inside,
    /// On or beyond the sphere boundary
    Outside,
    /// Beyond the corner threshold of the enclosing box (3-way variant only)
    Corner,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Inside => write!(f, "inside"),
            Region::Outside => write!(f, "outside"),
            Region::Corner => write!(f, "corner"),
        }
    }
}

/// Euclidean distance between two points of equal dimension.
pub fn euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let sum_sq: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).powi(2))
        .sum();
    Ok(sum_sq.sqrt())
}

/// All n(n-1)/2 unordered pairwise distances between sample rows.
///
/// O(n²) by construction; the experiments keep n modest on purpose.
pub fn pairwise_distances(sample: &Sample) -> Vec<f64> {
    let n = sample.nrows();
    let mut distances = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    for i in 0..n {
        for j in (i + 1)..n {
            let sum_sq: f64 = sample
                .row(i)
                .iter()
                .zip(sample.row(j).iter())
                .map(|(&x, &y)| (x - y).powi(2))
                .sum();
            distances.push(sum_sq.sqrt());
        }
    }

    distances
}

/// Classifies points against a fixed center and radius.
///
/// Membership is strict: a point exactly on the boundary is `Outside`.
#[derive(Debug, Clone)]
pub struct SphereClassifier {
    center: Array1<f64>,
    radius: f64,
    corner_threshold: Option<f64>,
}

impl SphereClassifier {
    pub fn new(center: Array1<f64>, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "radius must be positive and finite, got {}",
                radius
            )));
        }

        Ok(Self {
            center,
            radius,
            corner_threshold: None,
        })
    }

    /// Center the sphere in the box `[lo, hi]^dim`.
    pub fn centered_in_box(dim: usize, lo: f64, hi: f64, radius: f64) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidParameter(
                "dimension must be at least 1".to_string(),
            ));
        }
        let mid = (lo + hi) / 2.0;
        Self::new(Array1::from_elem(dim, mid), radius)
    }

    /// Enable the 3-way variant: distances beyond `threshold` are `Corner`.
    pub fn with_corner_threshold(mut self, threshold: f64) -> Self {
        self.corner_threshold = Some(threshold);
        self
    }

    /// Corner threshold used by the stricter classifier for a box with
    /// upper bound `hi`: (hi * sqrt(2)) / 2 - 1.
    pub fn corner_threshold_for_box(hi: f64) -> f64 {
        hi * std::f64::consts::SQRT_2 / 2.0 - 1.0
    }

    pub fn dim(&self) -> usize {
        self.center.len()
    }

    /// Euclidean distance from a point to the sphere center.
    pub fn distance_to_center(&self, point: ArrayView1<f64>) -> Result<f64> {
        euclidean_distance(point, self.center.view())
    }

    pub fn classify(&self, point: ArrayView1<f64>) -> Result<Region> {
        let dist = self.distance_to_center(point)?;

        if dist < self.radius {
            return Ok(Region::Inside);
        }
        if let Some(threshold) = self.corner_threshold {
            if dist > threshold {
                return Ok(Region::Corner);
            }
        }
        Ok(Region::Outside)
    }

    /// Classify every row of a sample.
    pub fn classify_sample(&self, sample: &Sample) -> Result<Vec<Region>> {
        sample
            .rows()
            .into_iter()
            .map(|row| self.classify(row))
            .collect()
    }

    /// Fraction of sample points falling inside the sphere, in [0, 1].
    pub fn fill_ratio(&self, sample: &Sample) -> Result<f64> {
        let regions = self.classify_sample(sample)?;
        let inside = regions.iter().filter(|r| **r == Region::Inside).count();
        Ok(inside as f64 / sample.nrows() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_euclidean_distance() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];
        assert!((euclidean_distance(a.view(), b.view()).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = array![0.0, 0.0];
        let b = array![1.0, 2.0, 3.0];
        assert!(matches!(
            euclidean_distance(a.view(), b.view()),
            Err(Error::DimensionMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn test_unit_square_corners_inside() {
        // Corners of a 2x2 square all sit sqrt(2) from its center,
        // which is inside a radius-2 sphere.
        let points = array![[0.0, 0.0], [2.0, 0.0], [0.0, 2.0], [2.0, 2.0]];
        let classifier = SphereClassifier::new(array![1.0, 1.0], 2.0).unwrap();

        let regions = classifier.classify_sample(&points).unwrap();
        assert!(regions.iter().all(|r| *r == Region::Inside));
        assert_eq!(classifier.fill_ratio(&points).unwrap(), 1.0);
    }

    #[test]
    fn test_distance_to_center() {
        let classifier = SphereClassifier::new(array![1.0, 1.0], 2.0).unwrap();

        let dist = classifier
            .distance_to_center(array![4.0, 5.0].view())
            .unwrap();
        assert!((dist - 5.0).abs() < 1e-12);

        assert!(matches!(
            classifier.distance_to_center(array![1.0].view()),
            Err(Error::DimensionMismatch { left: 1, right: 2 })
        ));
    }

    #[test]
    fn test_boundary_is_outside() {
        let classifier = SphereClassifier::new(array![0.0, 0.0], 5.0).unwrap();
        let on_boundary = array![3.0, 4.0];
        assert_eq!(
            classifier.classify(on_boundary.view()).unwrap(),
            Region::Outside
        );
    }

    #[test]
    fn test_corner_classification() {
        // Box [0, 20]^2: threshold = 20 * sqrt(2) / 2 - 1 ~= 13.14.
        let hi = 20.0;
        let threshold = SphereClassifier::corner_threshold_for_box(hi);
        let classifier = SphereClassifier::centered_in_box(2, 0.0, hi, 10.0)
            .unwrap()
            .with_corner_threshold(threshold);

        assert_eq!(
            classifier.classify(array![10.0, 10.0].view()).unwrap(),
            Region::Inside
        );
        // Distance 10 from center: outside the sphere, below the threshold.
        assert_eq!(
            classifier.classify(array![20.0, 10.0].view()).unwrap(),
            Region::Outside
        );
        // Box corner sits 10 * sqrt(2) ~= 14.14 from the center.
        assert_eq!(
            classifier.classify(array![20.0, 20.0].view()).unwrap(),
            Region::Corner
        );
    }

    #[test]
    fn test_pairwise_distances() {
        let points = array![[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]];
        let distances = pairwise_distances(&points);

        assert_eq!(distances.len(), 3);
        assert!((distances[0] - 5.0).abs() < 1e-12);
        assert!((distances[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_count() {
        let points = Sample::zeros((6, 3));
        assert_eq!(pairwise_distances(&points).len(), 15);
    }

    #[test]
    fn test_invalid_radius() {
        assert!(matches!(
            SphereClassifier::new(array![0.0], -1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            SphereClassifier::new(array![0.0], 0.0),
            Err(Error::InvalidParameter(_))
        ));
    }
}
