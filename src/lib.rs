//! # Curse of Dim - Monte Carlo experiments on high-dimensional geometry
//!
//! This library generates uniform random points in d-dimensional boxes,
//! classifies them against a reference hypersphere, aggregates fill ratios
//! and pairwise-distance statistics across repeated trials, and optionally
//! projects classified samples onto their top-2 principal components.
//!
//! ## Modules
//!
//! - `sample` - uniform random point generation
//! - `classify` - Euclidean distances and hypersphere membership
//! - `stats` - mean / standard deviation aggregation
//! - `pca` - covariance, eigendecomposition, and 2D projection
//! - `sweep` - dimension sweep drivers producing per-dimension records
//! - `report` - CSV, plot-trace JSON, and console sinks
//! - `config` - experiment parameters with historical defaults

pub mod classify;
pub mod config;
pub mod error;
pub mod pca;
pub mod report;
pub mod sample;
pub mod stats;
pub mod sweep;

pub use classify::{Region, SphereClassifier};
pub use config::{ErrorPolicy, PointGrowth, ProjectionConfig, SweepConfig};
pub use error::{Error, Result};
pub use pca::{Pca, Preprocess, ProjectionRecord};
pub use sweep::{DimensionRecord, SweepReport};
