use nalgebra::{DMatrix, DVector};
use super::UaPca;
use crate::distr::Distribution;
use crate::error::Result;
use crate::linalg;

/// Traces the principal axes of the uncertainty ellipsoid of a set of distributions
/// in the reduced space. For a scale s, the i-th traced point is the projection of
/// s * sqrt(λ_i) * v_i onto the first k principal directions, for i in 0..k, in
/// descending eigenvalue order.
///
/// The basis is fitted once, when the tracer is built, and the tracer only holds
/// immutable copies of the first k eigenvalues and eigenvectors. Calling trace(.)
/// never re-fits and always returns fresh points.
#[derive(Debug, Clone)]
pub struct FactorTracer {

    /// Square roots of the first k eigenvalues.
    radii : DVector<f64>,

    /// k x dim projection matrix (principal directions over rows).
    proj : DMatrix<f64>

}

impl FactorTracer {

    /// Fits a UaPca basis over distrs with scale 1 (each distribution covariance
    /// weighted the same as the spread of the means) and keeps its first k
    /// components. The scale informed to trace(.) is independent of this fit,
    /// and only stretches the traced axes.
    pub fn new<D>(distrs : &[D], k : usize) -> Result<Self>
    where
        D : Distribution
    {
        let pca = UaPca::fit(distrs, None)?;
        Self::from_basis(&pca, k)
    }

    /// Builds a tracer over the first k components of an already-fitted basis,
    /// using whatever scale the basis was fitted with.
    pub fn from_basis(pca : &UaPca, k : usize) -> Result<Self> {
        let proj = pca.projection(k)?;
        let radii = linalg::clamp_eigenvalues(pca.lengths())?
            .rows(0, k)
            .map(|l| l.sqrt() );
        Ok(Self { radii, proj })
    }

    /// Number of components (and dimension of each traced point).
    pub fn k(&self) -> usize {
        self.radii.nrows()
    }

    /// Eigenvalues of the traced components, rebuilt as the squared radii. These
    /// are the clamped eigenvalues: rounding noise below zero reads as 0.0 here,
    /// while UaPca::lengths() keeps the raw values, and squaring a square root may
    /// differ from the raw eigenvalue in the last bits.
    pub fn lengths(&self) -> DVector<f64> {
        self.radii.map(|r| r.powi(2) )
    }

    /// Returns the k projected, scaled principal axes.
    pub fn trace(&self, scale : f64) -> Vec<DVector<f64>> {
        self.proj.row_iter()
            .zip(self.radii.iter())
            .map(|(v, r)| {
                let axis = v.transpose().scale(scale * r);
                &self.proj * axis
            })
            .collect()
    }

}

/// Builds a tracer of the first k components fitted over distrs (see FactorTracer::new).
pub fn factor_tracer<D>(distrs : &[D], k : usize) -> Result<FactorTracer>
where
    D : Distribution
{
    FactorTracer::new(distrs, k)
}
