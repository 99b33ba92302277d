//! Statistical utility functions
//!
//! Trial aggregation uses the population convention (ddof = 0) throughout:
//! std of a single value is 0, not NaN. The PCA covariance matrix uses the
//! sample convention (n - 1) instead; see `pca::decomposition`.

/// Arithmetic mean. Empty input yields NaN.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (0 = population, 1 = sample).
///
/// Returns 0.0 when fewer than `ddof + 1` values are supplied.
pub fn variance(data: &[f64], ddof: usize) -> f64 {
    let n = data.len();
    if n <= ddof {
        return 0.0;
    }

    let m = mean(data);
    let sum_sq: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    sum_sq / (n - ddof) as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
pub fn std_dev(data: &[f64], ddof: usize) -> f64 {
    variance(data, ddof).sqrt()
}

/// Ratio of population standard deviation to mean (coefficient of variation).
pub fn dispersion_ratio(data: &[f64]) -> f64 {
    std_dev(data, 0) / mean(data)
}

/// Round to `digits` significant digits. Display-boundary helper only;
/// aggregation always runs at full f64 precision.
pub fn round_sig(x: f64, digits: u32) -> f64 {
    if x == 0.0 || !x.is_finite() || digits == 0 {
        return x;
    }

    let magnitude = x.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits as i32 - 1 - magnitude);
    (x * factor).round() / factor
}
