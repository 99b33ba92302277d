//! Principal Component Analysis: covariance, eigendecomposition, projection

mod decomposition;
mod projection;

pub use decomposition::{covariance_matrix, EigenDecomposition};
pub use projection::{project_labeled, Pca, Preprocess, ProjectedPoint, ProjectionRecord};
