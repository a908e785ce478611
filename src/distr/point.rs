use nalgebra::{DMatrix, DVector};
use super::*;
use serde::{Serialize, Deserialize};
use std::fmt::{self, Display};
use std::convert::TryFrom;
use crate::error::{UaPcaError, Result};

/// An exact observation: a degenerate distribution that has all its mass at
/// the mean vector. Its covariance is always the zero matrix of matching size,
/// which is also what projecting an equivalent zero-covariance MultiNormal yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    mu : DVector<f64>
}

impl Point {

    /// Builds a point at mu, which must hold only finite entries.
    pub fn new(mu : DVector<f64>) -> Result<Self> {
        if mu.iter().any(|v| !v.is_finite() ) {
            return Err(UaPcaError::NonFinite);
        }
        Ok(Self { mu })
    }

    pub fn from_slice(mu : &[f64]) -> Result<Self> {
        Self::new(DVector::from_column_slice(mu))
    }

    /// The equivalent MultiNormal with zero covariance.
    pub fn to_normal(&self) -> Result<MultiNormal> {
        MultiNormal::new(self.mu.clone(), self.cov())
    }

}

impl Distribution for Point {

    fn mean(&self) -> &DVector<f64> {
        &self.mu
    }

    fn cov(&self) -> DMatrix<f64> {
        let n = self.mu.nrows();
        DMatrix::zeros(n, n)
    }

}

impl Affine for Point {

    /// The image of a point under scale * x + shift is again a point.
    fn affine_transformation(&self, scale : &DMatrix<f64>, shift : &DVector<f64>) -> Result<Self> {
        check_affine(self, scale, shift)?;
        Point::new(scale * &self.mu + shift)
    }

}

impl TryFrom<DVector<f64>> for Point {

    type Error = UaPcaError;

    fn try_from(mu : DVector<f64>) -> Result<Self> {
        Point::new(mu)
    }

}

impl Display for Point {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", self.mu.nrows())
    }

}
