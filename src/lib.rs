/// Distributions summarized by a mean vector and a covariance matrix: multivariate
/// normals, exact observations (points), their affine transformations, and a
/// sampler built from the eigen-decomposition of the covariance.
pub mod distr;

/// Uncertainty-aware principal component analysis (fit/transform) and the
/// factor tracer used to draw projected uncertainty ellipsoids.
pub mod pca;

/// Symmetric eigen-decomposition helpers shared by sampling and fitting.
pub mod linalg;

mod error;

pub use error::{UaPcaError, Result};

pub use distr::{Distribution, Affine, MultiNormal, Point, Observation, Sampler};

pub use pca::{UaPca, FactorTracer, factor_tracer};
