//! PCA reducer: fit, project, reconstruct

use super::decomposition::{covariance_matrix, EigenDecomposition};
use crate::classify::Region;
use crate::error::{Error, Result};
use crate::sample::Sample;
use ndarray::{s, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Column preprocessing applied before the covariance step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preprocess {
    /// Subtract the column mean
    Center,
    /// Subtract the column mean and divide by the column standard deviation
    Standardize,
}

/// Fitted PCA basis
#[derive(Debug, Clone)]
pub struct Pca {
    /// Number of components retained
    pub n_components: usize,
    /// Principal components, one eigenvector per column (d x k)
    pub components: Array2<f64>,
    /// Eigenvalues for the retained components, largest magnitude first
    pub eigenvalues: Array1<f64>,
    /// Share of total variance carried by each retained component
    pub explained_variance_ratio: Array1<f64>,
    /// Column means of the fitted sample
    pub mean: Array1<f64>,
    /// Column standard deviations, present when standardized
    pub scale: Option<Array1<f64>>,
}

impl Pca {
    /// Fit a PCA basis with `n_components` retained directions.
    ///
    /// Fails with `DegenerateInput` on fewer than 2 points or a sample with
    /// zero variance in every column.
    pub fn fit(sample: &Sample, n_components: usize, preprocess: Preprocess) -> Result<Self> {
        let (n, d) = sample.dim();
        if n < 2 {
            return Err(Error::DegenerateInput(format!(
                "PCA needs at least 2 points, got {}",
                n
            )));
        }
        if n_components == 0 || n_components > d {
            return Err(Error::InvalidParameter(format!(
                "component count must be in 1..={}, got {}",
                d, n_components
            )));
        }

        let mean = sample
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::DegenerateInput("empty sample".to_string()))?;
        let std = sample.std_axis(Axis(0), 0.0);

        if std.iter().all(|&s| s < 1e-12) {
            return Err(Error::DegenerateInput(
                "all points are identical, zero variance in every dimension".to_string(),
            ));
        }

        let scale = match preprocess {
            Preprocess::Center => None,
            // Zero-variance columns stay unscaled.
            Preprocess::Standardize => {
                Some(std.mapv(|s| if s > 1e-12 { s } else { 1.0 }))
            }
        };

        let prepared = prepare(sample, &mean, scale.as_ref());
        let cov = covariance_matrix(&prepared)?;
        let eigen = EigenDecomposition::from_symmetric(&cov)?;

        let components = eigen.eigenvectors.slice(s![.., ..n_components]).to_owned();
        let eigenvalues = eigen.eigenvalues.slice(s![..n_components]).to_owned();

        let total_variance: f64 = eigen.eigenvalues.iter().map(|v| v.abs()).sum();
        let explained_variance_ratio = if total_variance > 0.0 {
            eigenvalues.mapv(|v| v.abs() / total_variance)
        } else {
            Array1::zeros(n_components)
        };

        Ok(Self {
            n_components,
            components,
            eigenvalues,
            explained_variance_ratio,
            mean,
            scale,
        })
    }

    /// Project a sample onto the retained basis: (n, d) -> (n, k).
    pub fn transform(&self, sample: &Sample) -> Result<Array2<f64>> {
        if sample.ncols() != self.mean.len() {
            return Err(Error::DimensionMismatch {
                left: sample.ncols(),
                right: self.mean.len(),
            });
        }

        let prepared = prepare(sample, &self.mean, self.scale.as_ref());
        Ok(prepared.dot(&self.components))
    }

    /// Map projected points back to the original space, undoing the
    /// preprocessing. Exact only when all d components were retained.
    pub fn inverse_transform(&self, projected: &Array2<f64>) -> Result<Array2<f64>> {
        if projected.ncols() != self.n_components {
            return Err(Error::DimensionMismatch {
                left: projected.ncols(),
                right: self.n_components,
            });
        }

        let mut restored = projected.dot(&self.components.t());
        if let Some(scale) = &self.scale {
            restored = restored * scale;
        }
        Ok(restored + &self.mean)
    }
}

fn prepare(sample: &Sample, mean: &Array1<f64>, scale: Option<&Array1<f64>>) -> Array2<f64> {
    let centered = sample - mean;
    match scale {
        Some(s) => centered / s,
        None => centered,
    }
}

/// One labeled point in the projected plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub label: Region,
}

/// Result of projecting a classified sample onto its top-2 components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub points: Vec<ProjectedPoint>,
    pub eigenvalues: [f64; 2],
    pub eigenvectors: [Vec<f64>; 2],
}

/// Reduce a labeled sample of dimension d > 2 to the plane spanned by the
/// two largest-eigenvalue directions, carrying labels over unchanged.
pub fn project_labeled(
    sample: &Sample,
    labels: &[Region],
    preprocess: Preprocess,
) -> Result<ProjectionRecord> {
    if labels.len() != sample.nrows() {
        return Err(Error::InvalidParameter(format!(
            "{} labels for {} points",
            labels.len(),
            sample.nrows()
        )));
    }
    if sample.ncols() <= 2 {
        return Err(Error::InvalidParameter(format!(
            "projection needs dimension > 2, got {}",
            sample.ncols()
        )));
    }

    let pca = Pca::fit(sample, 2, preprocess)?;
    let projected = pca.transform(sample)?;

    let points = projected
        .rows()
        .into_iter()
        .zip(labels.iter())
        .map(|(row, &label)| ProjectedPoint {
            x: row[0],
            y: row[1],
            label,
        })
        .collect();

    Ok(ProjectionRecord {
        points,
        eigenvalues: [pca.eigenvalues[0], pca.eigenvalues[1]],
        eigenvectors: [
            pca.components.column(0).to_vec(),
            pca.components.column(1).to_vec(),
        ],
    })
}
