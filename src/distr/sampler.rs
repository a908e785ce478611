use nalgebra::{DMatrix, DVector};
use rand::Rng;
use super::*;
use crate::error::{check_dim, Result};
use crate::linalg;

/// Draws samples from a distribution by coloring standard normal vectors:
/// each draw z (dim x 1) is mapped to S^T z + mean, where S is the eigen-based
/// transformation matrix of the covariance (S^T S = cov). Mean and S are computed
/// once at construction.
#[derive(Debug, Clone)]
pub struct Sampler {

    mean : DVector<f64>,

    transf : DMatrix<f64>

}

impl Sampler {

    pub fn new<D>(distr : &D) -> Result<Self>
    where
        D : Distribution
    {
        let transf = linalg::transformation_matrix(&distr.cov())?;
        Ok(Self { mean : distr.mean().clone(), transf })
    }

    pub fn dim(&self) -> usize {
        self.mean.nrows()
    }

    /// Maps the standard normal draws at the rows of z (n x dim) to samples of
    /// the distribution, also laid over rows.
    pub fn map_standard(&self, z : &DMatrix<f64>) -> Result<DMatrix<f64>> {
        check_dim(self.dim(), z.ncols())?;
        Ok(self.color(z))
    }

    fn color(&self, z : &DMatrix<f64>) -> DMatrix<f64> {
        let mut samples = z * &self.transf;
        for mut row in samples.row_iter_mut() {
            row += self.mean.transpose();
        }
        samples
    }

    /// Draws count independent samples using the informed random number generator.
    /// Samples are returned over the rows of a count x dim matrix.
    pub fn sample_n_with<R>(&self, rng : &mut R, count : usize) -> DMatrix<f64>
    where
        R : Rng
    {
        let z : DMatrix<f64> = DMatrix::from_fn(count, self.dim(), |_, _| rng.sample(rand_distr::StandardNormal) );
        self.color(&z)
    }

    /// Draws count independent samples using the thread-local generator.
    pub fn sample_n(&self, count : usize) -> DMatrix<f64> {
        self.sample_n_with(&mut rand::thread_rng(), count)
    }

}
