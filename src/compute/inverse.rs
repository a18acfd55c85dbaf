use super::error::{ModelError, ModelResult};
use crate::store::ModelKind;
use nalgebra::DMatrix;
use tracing::debug;

/// (I - C)^-1 for one model kind.
#[derive(Debug, Clone, PartialEq)]
pub struct LeontiefInverse {
    pub kind: ModelKind,
    pub matrix: DMatrix<f64>,
}

impl LeontiefInverse {
    #[inline(always)]
    pub fn dimension(&self) -> usize { self.matrix.nrows() }

    /// Column sums: total output generated per unit of final demand.
    pub fn column_sums(&self) -> Vec<f64> {
        self.matrix.column_iter().map(|c| c.sum()).collect()
    }
}

/// Inverts (I - C) by LU decomposition with partial pivoting.
///
/// A pivot at or below `n * eps * max|I - C|` counts as singular, so nearly
/// unit economies fail the same way on every platform instead of returning
/// a matrix of huge, meaningless multipliers.
pub fn leontief_inverse(coefficients: &DMatrix<f64>, kind: ModelKind) -> ModelResult<LeontiefInverse> {
    let n = kind.dimension();
    if coefficients.nrows() != n || coefficients.ncols() != n {
        return Err(ModelError::mismatch(format!(
            "{:?} expects a {}x{} coefficient matrix, got {}x{}",
            kind, n, n, coefficients.nrows(), coefficients.ncols()
        )));
    }

    let system = DMatrix::<f64>::identity(n, n) - coefficients;
    let scale = system.amax();
    let tolerance = n as f64 * f64::EPSILON * scale;

    let lu = system.lu();
    let singular = ModelError::SingularMatrix { dimension: n };
    if lu.u().diagonal().iter().any(|p| !p.is_finite() || p.abs() <= tolerance) {
        return Err(singular);
    }
    let matrix = lu.try_inverse().ok_or_else(|| singular.clone())?;
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(singular);
    }

    debug!(dimension = n, induced = kind.is_induced(), "computed Leontief inverse");
    Ok(LeontiefInverse { kind, matrix })
}
