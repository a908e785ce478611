use nalgebra::*;
use crate::error::{UaPcaError, Result};

/// Relative tolerance applied to eigenvalues and to the symmetry check of
/// informed covariance matrices. Scaled by max(1, max |λ|) (or max |m_ij|).
pub const EIGEN_TOL : f64 = 1E-10;

/// Outer product v v^T.
pub fn outer(v : &DVector<f64>) -> DMatrix<f64> {
    v * v.transpose()
}

/// Builds a symmetric matrix from M as (1/2)*(M + M^T)
pub fn build_symmetric(m : &DMatrix<f64>) -> DMatrix<f64> {
    (m + m.transpose()).scale(0.5)
}

pub fn is_symmetric(m : &DMatrix<f64>) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let tol = EIGEN_TOL * m.amax().max(1.0);
    (m - m.transpose()).amax() <= tol
}

/// Negative eigenvalues are impossible for a positive semi-definite matrix, but
/// near-singular covariances (points, rank-deficient projections) produce them
/// as rounding noise. Any value within -EIGEN_TOL * max(1, magnitude) of zero is
/// clamped to exactly zero, so that square roots never yield NaN; anything more
/// negative is reported as NumericalDegeneracy.
pub fn clamp_eigenvalue(lambda : f64, magnitude : f64) -> Result<f64> {
    if !lambda.is_finite() {
        return Err(UaPcaError::NonFinite);
    }
    if lambda >= 0.0 {
        return Ok(lambda);
    }
    if lambda < -EIGEN_TOL * magnitude.max(1.0) {
        return Err(UaPcaError::NumericalDegeneracy { eigenvalue : lambda });
    }
    log::trace!("Clamping eigenvalue {} to zero", lambda);
    Ok(0.0)
}

/// Applies clamp_eigenvalue to all entries, using the largest absolute
/// eigenvalue as magnitude.
pub fn clamp_eigenvalues(values : &DVector<f64>) -> Result<DVector<f64>> {
    let magnitude = values.amax();
    let mut clamped = DVector::zeros(values.nrows());
    for (c, l) in clamped.iter_mut().zip(values.iter()) {
        *c = clamp_eigenvalue(*l, magnitude)?;
    }
    Ok(clamped)
}

/// Eigen-decomposition of the symmetric matrix m, with pairs sorted by eigenvalue
/// in descending order. Returns the eigenvalues and a matrix holding the matching
/// unit eigenvectors over its rows. The sort is stable: equal eigenvalues keep the
/// order in which the decomposition produced them, and are not otherwise
/// disambiguated. Eigenvector signs are whatever the decomposition yields.
pub fn sorted_eigen(m : &DMatrix<f64>) -> (DVector<f64>, DMatrix<f64>) {
    let n = m.nrows();
    if n == 0 {
        return (DVector::zeros(0), DMatrix::zeros(0, 0));
    }
    let eigen = SymmetricEigen::new(build_symmetric(m));
    let mut order : Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| eigen.eigenvalues[*b].total_cmp(&eigen.eigenvalues[*a]) );
    let values = DVector::from_iterator(n, order.iter().map(|i| eigen.eigenvalues[*i] ));
    let vectors = DMatrix::from_fn(n, n, |i, j| eigen.eigenvectors[(j, order[i])] );
    (values, vectors)
}

/// Returns S = diag(sqrt(λ)) V^T for the covariance matrix cov = V diag(λ) V^T,
/// so that S^T S reconstructs cov. Rows of S are the eigenvectors of cov, scaled by
/// the square root of their eigenvalues (which are clamped as in clamp_eigenvalue).
/// No particular ordering of the rows is implied.
pub fn transformation_matrix(cov : &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if cov.nrows() != cov.ncols() {
        return Err(UaPcaError::DimensionMismatch { expected : cov.nrows(), found : cov.ncols() });
    }
    if cov.iter().any(|c| !c.is_finite() ) {
        return Err(UaPcaError::NonFinite);
    }
    let n = cov.nrows();
    if n == 0 {
        return Ok(DMatrix::zeros(0, 0));
    }
    let eigen = SymmetricEigen::new(build_symmetric(cov));
    let root = clamp_eigenvalues(&eigen.eigenvalues)?.map(|l| l.sqrt() );
    Ok(DMatrix::from_fn(n, n, |i, j| root[i] * eigen.eigenvectors[(j, i)] ))
}
