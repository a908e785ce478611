use nalgebra::{DMatrix, DVector, SymmetricEigen};
use super::*;
use serde::{Serialize, Deserialize};
use std::fmt::{self, Display};
use crate::error::{check_dim, UaPcaError, Result};
use crate::linalg;

/// Multivariate normal parametrized by μ (px1) and Σ (pxp). Values are immutable
/// after construction: affine transformations and projections build a new
/// MultiNormal, following the Gaussian propagation law
/// N(A μ + b, A Σ A^T).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiNormal {

    mu : DVector<f64>,

    sigma : DMatrix<f64>

}

impl MultiNormal {

    /// Builds a new multivariate distribution from a mu vector and a positive
    /// semi-definite covariance matrix sigma. A zero sigma is valid and
    /// represents a value known with certainty.
    pub fn new(mu : DVector<f64>, sigma : DMatrix<f64>) -> Result<Self> {
        check_dim(sigma.nrows(), sigma.ncols())?;
        check_dim(mu.nrows(), sigma.nrows())?;
        if mu.iter().chain(sigma.iter()).any(|v| !v.is_finite() ) {
            return Err(UaPcaError::NonFinite);
        }
        if !linalg::is_symmetric(&sigma) {
            return Err(UaPcaError::NotSymmetric);
        }
        if sigma.nrows() > 0 {
            let eigen = SymmetricEigen::new(linalg::build_symmetric(&sigma));
            linalg::clamp_eigenvalues(&eigen.eigenvalues)?;
        }
        Ok(Self { mu, sigma })
    }

    /// Builds a multinormal from raw data: the mean entries and the covariance
    /// entries in row-major order (mean.len() squared values).
    pub fn from_slices(mean : &[f64], cov : &[f64]) -> Result<Self> {
        let n = mean.len();
        check_dim(n * n, cov.len())?;
        Self::new(DVector::from_column_slice(mean), DMatrix::from_row_slice(n, n, cov))
    }

    /// Creates a centered multinormal with identity covariance of size n.
    pub fn standard(n : usize) -> Self {
        Self { mu : DVector::zeros(n), sigma : DMatrix::identity(n, n) }
    }

    /// Creates a non-centered multinormal with a diagonal covariance with all
    /// entries equal to var.
    pub fn new_homoscedastic(mu : DVector<f64>, var : f64) -> Result<Self> {
        let n = mu.nrows();
        let mut sigma = DMatrix::zeros(n, n);
        sigma.set_diagonal(&DVector::from_element(n, var));
        Self::new(mu, sigma)
    }

}

impl Distribution for MultiNormal {

    fn mean(&self) -> &DVector<f64> {
        &self.mu
    }

    fn cov(&self) -> DMatrix<f64> {
        self.sigma.clone()
    }

}

impl Affine for MultiNormal {

    fn affine_transformation(&self, scale : &DMatrix<f64>, shift : &DVector<f64>) -> Result<Self> {
        check_affine(self, scale, shift)?;
        let mu = scale * &self.mu + shift;
        let sigma = scale * &self.sigma * scale.transpose();
        Ok(Self { mu, sigma })
    }

}

impl Display for MultiNormal {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiNormal({})", self.mu.nrows())
    }

}
