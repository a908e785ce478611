use thiserror::Error;

/// Failures surfaced by distribution construction, affine maps, fitting
/// and tracing. Nothing is retried or silently recovered: the only
/// intentional recovery is clamping tiny negative eigenvalues to zero
/// (see crate::linalg::clamp_eigenvalue).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UaPcaError {

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected : usize, found : usize },

    #[error("At least one distribution is required")]
    EmptyInput,

    #[error("Invalid component count {requested} (must be between 1 and {available})")]
    InvalidComponentCount { requested : usize, available : usize },

    #[error("Matrix is not positive semi-definite (eigenvalue {eigenvalue})")]
    NumericalDegeneracy { eigenvalue : f64 },

    #[error("Covariance matrix is not symmetric")]
    NotSymmetric,

    #[error("Informed value is not finite")]
    NonFinite

}

pub type Result<T> = std::result::Result<T, UaPcaError>;

/// Fails with DimensionMismatch unless found == expected.
pub(crate) fn check_dim(expected : usize, found : usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(UaPcaError::DimensionMismatch { expected, found })
    }
}
