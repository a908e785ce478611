use nalgebra::{DMatrix, DVector};
use serde::{Serialize, Deserialize};
use std::fmt::{self, Debug, Display};
use crate::error::{check_dim, Result};

mod multinormal;

pub use multinormal::*;

mod point;

pub use point::*;

mod sampler;

pub use sampler::*;

/// Trait shared by anything summarized by a mean vector and a covariance matrix.
/// The covariance is always positive semi-definite; a zero covariance
/// represents a value known with certainty.
pub trait Distribution
    where Self : Debug + Display
{

    /// Returns the expected value of the distribution.
    fn mean(&self) -> &DVector<f64>;

    /// Returns the dim x dim covariance matrix.
    fn cov(&self) -> DMatrix<f64>;

    /// Dimensionality of the sample space.
    fn dim(&self) -> usize {
        self.mean().nrows()
    }

    /// Returns the diagonal of the covariance matrix.
    fn var(&self) -> DVector<f64> {
        self.cov().diagonal()
    }

}

/// Distributions closed under affine maps. Both methods take self by reference and
/// return a new value; the source distribution is never modified.
pub trait Affine
    where Self : Distribution + Sized
{

    /// Returns the distribution of scale * x + shift, where x is distributed as self:
    /// the mean becomes scale * mean + shift and the covariance becomes
    /// scale * cov * scale^T. The number of columns of scale must match self.dim()
    /// and its number of rows must match the shift length; both are verified before
    /// any arithmetic.
    fn affine_transformation(&self, scale : &DMatrix<f64>, shift : &DVector<f64>) -> Result<Self>;

    /// Affine transformation with a zero shift.
    fn project(&self, proj : &DMatrix<f64>) -> Result<Self> {
        self.affine_transformation(proj, &DVector::zeros(proj.nrows()))
    }

}

/// Verifies scale (k x d) and shift (k) are conformant with a d-dimensional distribution.
pub(crate) fn check_affine<D>(distr : &D, scale : &DMatrix<f64>, shift : &DVector<f64>) -> Result<()>
where
    D : Distribution
{
    check_dim(distr.dim(), scale.ncols())?;
    check_dim(scale.nrows(), shift.nrows())
}

/// Either an uncertain observation (carrying its own covariance) or an exact one.
/// Useful when a single collection mixes both kinds; affine maps preserve the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Observation {
    Normal(MultiNormal),
    Exact(Point)
}

impl Distribution for Observation {

    fn mean(&self) -> &DVector<f64> {
        match self {
            Observation::Normal(n) => n.mean(),
            Observation::Exact(p) => p.mean()
        }
    }

    fn cov(&self) -> DMatrix<f64> {
        match self {
            Observation::Normal(n) => n.cov(),
            Observation::Exact(p) => p.cov()
        }
    }

}

impl Affine for Observation {

    fn affine_transformation(&self, scale : &DMatrix<f64>, shift : &DVector<f64>) -> Result<Self> {
        match self {
            Observation::Normal(n) => n.affine_transformation(scale, shift).map(Observation::Normal),
            Observation::Exact(p) => p.affine_transformation(scale, shift).map(Observation::Exact)
        }
    }

}

impl From<MultiNormal> for Observation {

    fn from(n : MultiNormal) -> Self {
        Observation::Normal(n)
    }

}

impl From<Point> for Observation {

    fn from(p : Point) -> Self {
        Observation::Exact(p)
    }

}

impl Display for Observation {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::Normal(n) => write!(f, "{}", n),
            Observation::Exact(p) => write!(f, "{}", p)
        }
    }

}
