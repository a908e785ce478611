use nalgebra::{DMatrix, DVector};
use serde::{Serialize, Deserialize};
use crate::distr::{Distribution, Affine};
use crate::error::{check_dim, UaPcaError, Result};
use crate::linalg;

mod tracer;

pub use tracer::*;

/// Uncertainty-aware principal component analysis. Each input is a distribution
/// rather than a point, and the aggregate second-moment matrix
///
/// M = (1/n) sum_i [ mu_i mu_i^T + scale^2 Sigma_i - mu_bar mu_bar^T ]
///   = (1/n) sum_i [ (mu_i - mu_bar)(mu_i - mu_bar)^T + scale^2 Sigma_i ]
///
/// (evaluated in the centered form) mixes the spread between the distribution
/// means with the spread each distribution carries on its own (weighted by
/// scale). When all inputs are points this reduces to the usual (biased) sample
/// covariance, and UaPca to the usual PCA.
///
/// The eigenvalues of M are kept in lengths (descending) and the matching unit
/// eigenvectors over the rows of vectors. The fitted value is never modified, so a
/// single basis can be used to transform any number of distribution sets, at any
/// number of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UaPca {

    lengths : DVector<f64>,

    vectors : DMatrix<f64>,

    scale : f64

}

impl UaPca {

    /// Fits the principal components of a non-empty set of distributions with
    /// the same dimensionality. The scale (1.0 if None) weights the contribution
    /// of each distribution covariance relative to the spread of the means.
    pub fn fit<D>(distrs : &[D], scale : Option<f64>) -> Result<Self>
    where
        D : Distribution
    {
        let first = distrs.first().ok_or(UaPcaError::EmptyInput)?;
        let dim = first.dim();
        if dim == 0 {
            return Err(UaPcaError::EmptyInput);
        }
        for d in distrs.iter() {
            check_dim(dim, d.dim())?;
        }
        let scale = scale.unwrap_or(1.0);
        if !scale.is_finite() {
            return Err(UaPcaError::NonFinite);
        }
        log::debug!("Fitting UaPCA over {} distributions (dim = {}; scale = {})", distrs.len(), dim, scale);

        let n = distrs.len() as f64;
        let mut mean_bar = DVector::zeros(dim);
        for d in distrs.iter() {
            mean_bar += d.mean();
        }
        mean_bar.unscale_mut(n);

        // Centered before the outer product: the fit does not depend on a shared offset.
        let mut moments = DMatrix::zeros(dim, dim);
        for d in distrs.iter() {
            let centered = d.mean() - &mean_bar;
            moments += linalg::outer(&centered) + d.cov().scale(scale.powi(2));
        }
        moments.unscale_mut(n);
        if moments.iter().any(|m| !m.is_finite() ) {
            return Err(UaPcaError::NonFinite);
        }

        let (lengths, vectors) = linalg::sorted_eigen(&moments);
        log::trace!("UaPCA eigenvalues: {:?}", lengths.as_slice());
        Ok(Self { lengths, vectors, scale })
    }

    /// Fits the basis over distrs and immediately transforms them to k components.
    pub fn fit_transform<D>(distrs : &[D], scale : Option<f64>, k : usize) -> Result<(Self, Vec<D>)>
    where
        D : Affine
    {
        let pca = Self::fit(distrs, scale)?;
        let transformed = pca.transform(distrs, k)?;
        Ok((pca, transformed))
    }

    /// Projects each distribution onto the first k principal components. Output
    /// follows input order; each output has dimension k. The informed distributions
    /// need not be the ones the basis was fitted with, but must share its dimension.
    pub fn transform<D>(&self, distrs : &[D], k : usize) -> Result<Vec<D>>
    where
        D : Affine
    {
        let proj = self.projection(k)?;
        log::debug!("Projecting {} distributions onto {} components", distrs.len(), k);
        distrs.iter().map(|d| d.project(&proj) ).collect()
    }

    /// The k x dim matrix holding the first k principal directions over its rows.
    pub fn projection(&self, k : usize) -> Result<DMatrix<f64>> {
        if k < 1 || k > self.dim() {
            return Err(UaPcaError::InvalidComponentCount { requested : k, available : self.dim() });
        }
        Ok(self.vectors.rows(0, k).clone_owned())
    }

    /// Eigenvalues of the aggregate moment matrix, in descending order.
    pub fn lengths(&self) -> &DVector<f64> {
        &self.lengths
    }

    /// Principal directions (unit norm, mutually orthogonal) over rows, in the
    /// same order as lengths. Only the direction up to sign is determined.
    pub fn vectors(&self) -> &DMatrix<f64> {
        &self.vectors
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn dim(&self) -> usize {
        self.lengths.nrows()
    }

    /// Share of the total (clamped) eigenvalue mass carried by each component.
    /// All zeros when every input is the same point.
    pub fn explained_variance_ratio(&self) -> Result<DVector<f64>> {
        let clamped = linalg::clamp_eigenvalues(&self.lengths)?;
        let total = clamped.sum();
        if total > 0.0 {
            Ok(clamped.unscale(total))
        } else {
            Ok(DVector::zeros(clamped.nrows()))
        }
    }

}
