use crate::compute::error::{ModelError, ModelResult};
use nalgebra::DVector;

/// An exogenous change in final demand, one entry per sector.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandShock(Vec<f64>);

impl DemandShock {
    pub fn new(values: Vec<f64>) -> Self { Self(values) }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn values(&self) -> &[f64] { &self.0 }

    /// An all-zero shock means no scenario has been entered yet.
    pub fn is_zero(&self) -> bool { self.0.iter().all(|&v| v == 0.0) }

    /// Shock as a column vector of length `dimension`, zero-padding the
    /// household entry of an induced model.
    pub(crate) fn to_vector(&self, dimension: usize, induced: bool) -> ModelResult<DVector<f64>> {
        let n = self.0.len();
        if n == dimension {
            return Ok(DVector::from_column_slice(&self.0));
        }
        if induced && n + 1 == dimension {
            let mut padded = DVector::zeros(dimension);
            for (i, &v) in self.0.iter().enumerate() {
                padded[i] = v;
            }
            return Ok(padded);
        }
        Err(ModelError::mismatch(format!(
            "shock has {} entries, multiplier matrix has dimension {}", n, dimension
        )))
    }
}

impl From<Vec<f64>> for DemandShock {
    fn from(values: Vec<f64>) -> Self { Self(values) }
}
