//! Covariance and symmetric eigendecomposition for the PCA reducer

use crate::error::{Error, Result};
use ndarray::{Array1, Array2, Axis};

const MAX_POWER_ITERATIONS: usize = 1000;
const CONVERGENCE_TOL: f64 = 1e-12;
const RESIDUAL_TOL: f64 = 1e-6;

/// Covariance matrix of sample columns, sample convention (n - 1 denominator).
///
/// Columns [1,2,3] and [2,4,6] give [[1, 2], [2, 4]].
pub fn covariance_matrix(data: &Array2<f64>) -> Result<Array2<f64>> {
    let n = data.nrows();
    if n < 2 {
        return Err(Error::DegenerateInput(format!(
            "covariance needs at least 2 points, got {}",
            n
        )));
    }

    let mean = data
        .mean_axis(Axis(0))
        .ok_or_else(|| Error::DegenerateInput("covariance of an empty sample".to_string()))?;
    let centered = data - &mean;

    Ok(centered.t().dot(&centered) / (n - 1) as f64)
}

/// Eigenvalue decomposition of a real symmetric matrix
///
/// Pairs are sorted by eigenvalue magnitude, descending; equal magnitudes
/// keep their extraction order.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Eigenvalues, largest magnitude first
    pub eigenvalues: Array1<f64>,
    /// Eigenvectors as columns, aligned with `eigenvalues`
    pub eigenvectors: Array2<f64>,
}

impl EigenDecomposition {
    /// Decompose via power iteration with deflation. Adequate for the
    /// dimensions these experiments sweep (d up to a few dozen).
    pub fn from_symmetric(matrix: &Array2<f64>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(Error::InvalidParameter(format!(
                "eigendecomposition needs a square matrix, got {}x{}",
                rows, cols
            )));
        }
        if matrix.iter().any(|x| !x.is_finite()) {
            return Err(Error::NumericalError(
                "matrix contains non-finite entries".to_string(),
            ));
        }

        let n = rows;
        let mut eigenvalues = Array1::zeros(n);
        let mut eigenvectors = Array2::zeros((n, n));
        let mut deflated = matrix.clone();

        for i in 0..n {
            let (eigenvalue, eigenvector) = power_iteration(&deflated)?;

            eigenvalues[i] = eigenvalue;
            for j in 0..n {
                eigenvectors[[j, i]] = eigenvector[j];
            }

            // Deflate: A <- A - lambda * v * v^T
            for r in 0..n {
                for c in 0..n {
                    deflated[[r, c]] -= eigenvalue * eigenvector[r] * eigenvector[c];
                }
            }
        }

        // Sort by |eigenvalue| descending; stable sort keeps the
        // first-extracted pair ahead on ties.
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            eigenvalues[b]
                .abs()
                .partial_cmp(&eigenvalues[a].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let sorted_eigenvalues =
            Array1::from_vec(indices.iter().map(|&i| eigenvalues[i]).collect());
        let mut sorted_eigenvectors = Array2::zeros((n, n));
        for (new_idx, &old_idx) in indices.iter().enumerate() {
            for j in 0..n {
                sorted_eigenvectors[[j, new_idx]] = eigenvectors[[j, old_idx]];
            }
        }

        Ok(Self {
            eigenvalues: sorted_eigenvalues,
            eigenvectors: sorted_eigenvectors,
        })
    }
}

/// Power iteration for the dominant eigenpair of a symmetric matrix.
///
/// A single start vector stalls on a sub-dominant pair whenever it is
/// orthogonal to the dominant eigenvector, so the uniform direction and
/// every basis vector are tried and the largest-magnitude converged pair
/// wins. The winner must also pass a residual check: a stabilized value
/// that is not an actual eigenpair is a `NumericalError`, never a silent
/// result.
fn power_iteration(matrix: &Array2<f64>) -> Result<(f64, Array1<f64>)> {
    let matrix_norm = matrix.iter().map(|x| x * x).sum::<f64>().sqrt();

    let mut best: Option<(f64, Array1<f64>)> = None;
    for start in start_vectors(matrix.nrows()) {
        if let Some((eigenvalue, eigenvector)) = iterate_from(matrix, start)? {
            let better = best
                .as_ref()
                .map_or(true, |(lambda, _)| eigenvalue.abs() > lambda.abs());
            if better {
                best = Some((eigenvalue, eigenvector));
            }
        }
    }

    let (eigenvalue, eigenvector) = best.ok_or_else(|| {
        Error::NumericalError(format!(
            "power iteration did not converge within {} iterations from any start vector",
            MAX_POWER_ITERATIONS
        ))
    })?;

    let residual: f64 = matrix
        .dot(&eigenvector)
        .iter()
        .zip(eigenvector.iter())
        .map(|(&av, &v)| (av - eigenvalue * v).powi(2))
        .sum::<f64>()
        .sqrt();
    if residual > RESIDUAL_TOL * matrix_norm.max(1.0) {
        return Err(Error::NumericalError(format!(
            "power iteration accepted a non-eigenpair, residual {:.3e}",
            residual
        )));
    }

    Ok((eigenvalue, eigenvector))
}

/// The uniform direction plus every standard basis vector; at least one
/// has nonzero overlap with the dominant eigenvector.
fn start_vectors(n: usize) -> Vec<Array1<f64>> {
    let mut starts = Vec::with_capacity(n + 1);
    starts.push(Array1::from_elem(n, 1.0 / (n as f64).sqrt()));
    for i in 0..n {
        let mut basis = Array1::zeros(n);
        basis[i] = 1.0;
        starts.push(basis);
    }
    starts
}

/// One power-iteration run; `Ok(None)` when this start does not converge.
fn iterate_from(matrix: &Array2<f64>, mut v: Array1<f64>) -> Result<Option<(f64, Array1<f64>)>> {
    let mut eigenvalue = f64::INFINITY;

    for _ in 0..MAX_POWER_ITERATIONS {
        let av = matrix.dot(&v);

        // Rayleigh quotient; v stays unit-norm between iterations.
        let new_eigenvalue: f64 = v.iter().zip(av.iter()).map(|(&a, &b)| a * b).sum();
        if !new_eigenvalue.is_finite() {
            return Err(Error::NumericalError(
                "power iteration produced a non-finite eigenvalue".to_string(),
            ));
        }

        let norm = av.iter().map(|x| x * x).sum::<f64>().sqrt();
        let new_v = if norm > CONVERGENCE_TOL {
            av / norm
        } else {
            v.clone()
        };

        if (new_eigenvalue - eigenvalue).abs() < CONVERGENCE_TOL {
            return Ok(Some((new_eigenvalue, new_v)));
        }

        eigenvalue = new_eigenvalue;
        v = new_v;
    }

    Ok(None)
}
