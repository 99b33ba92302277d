//! Error types for the experiment core

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Bad sampler bounds, dimension, or experiment configuration
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Distance between points of incompatible dimension
    #[error("dimension mismatch: {left} vs {right} coordinates")]
    DimensionMismatch { left: usize, right: usize },

    /// PCA on too few or identical points
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Eigensolver failed to converge or produced non-finite values
    #[error("numerical error: {0}")]
    NumericalError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
