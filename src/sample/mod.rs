//! Uniform random sampling in d-dimensional boxes

use crate::error::{Error, Result};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A batch of points for one trial: shape (n, d), one point per row.
pub type Sample = Array2<f64>;

/// Create the process RNG. `seed` of `None` seeds from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Draw `n` independent points of dimension `dim`, every coordinate
/// i.i.d. uniform over `[lo, hi]`.
pub fn uniform_sample<R: Rng>(
    n: usize,
    dim: usize,
    lo: f64,
    hi: f64,
    rng: &mut R,
) -> Result<Sample> {
    if dim == 0 {
        return Err(Error::InvalidParameter(
            "dimension must be at least 1".to_string(),
        ));
    }
    if n == 0 {
        return Err(Error::InvalidParameter(
            "point count must be at least 1".to_string(),
        ));
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "bounds must be finite, got [{}, {}]",
            lo, hi
        )));
    }
    if lo > hi {
        return Err(Error::InvalidParameter(format!(
            "lower bound {} exceeds upper bound {}",
            lo, hi
        )));
    }

    let width = hi - lo;
    let mut points = Array2::zeros((n, dim));
    for i in 0..n {
        for j in 0..dim {
            points[[i, j]] = lo + rng.gen::<f64>() * width;
        }
    }

    Ok(points)
}
