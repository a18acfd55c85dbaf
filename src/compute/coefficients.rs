//! Technical coefficients and the household extension used by the induced model.
use super::error::{ModelError, ModelResult};
use crate::config::GdhiPolicy;
use nalgebra::DMatrix;
use tracing::{debug, warn};

/// C(i,j) = IO(i,j) / output(j): what sector `j` buys from sector `i` per unit
/// of its own output.
pub fn technical_coefficients(io: &DMatrix<f64>, output: &[f64]) -> ModelResult<DMatrix<f64>> {
    let n = output.len();
    if io.nrows() != n || io.ncols() != n {
        return Err(ModelError::mismatch(format!(
            "IO matrix is {}x{} but output vector has {} entries", io.nrows(), io.ncols(), n
        )));
    }
    check_divisors(output)?;

    let coefficients = DMatrix::from_fn(n, n, |i, j| io[(i, j)] / output[j]);

    for (j, col) in coefficients.column_iter().enumerate() {
        let total: f64 = col.sum();
        if total > 1.0 {
            warn!(column = j, total, "coefficient column sums above 1");
        }
    }
    Ok(coefficients)
}

/// Household consumption per unit of household income.
pub fn household_coefficients(household: &[f64], gdhi: GdhiPolicy) -> ModelResult<Vec<f64>> {
    let denominator = gdhi.resolve(household);
    if denominator == 0.0 {
        return Err(ModelError::DivisionByZero { divisor: "GDHI".to_string() });
    }
    debug!(gdhi = denominator, "household coefficient denominator");
    Ok(household.iter().map(|h| h / denominator).collect())
}

/// Labour income generated per unit of each sector's output.
pub fn labour_coefficients(labour: &[f64], output: &[f64]) -> ModelResult<Vec<f64>> {
    if labour.len() != output.len() {
        return Err(ModelError::mismatch(format!(
            "labour income row has {} entries, output vector has {}", labour.len(), output.len()
        )));
    }
    check_divisors(output)?;
    Ok(labour.iter().zip(output).map(|(l, o)| l / o).collect())
}

/// Builds the (n+1)x(n+1) coefficient matrix with households as the last
/// sector: consumption coefficients down the last column, labour income
/// coefficients along the last row, zero in the corner.
pub fn extended_coefficients(
    io: &DMatrix<f64>,
    output: &[f64],
    household: &[f64],
    labour: &[f64],
    gdhi: GdhiPolicy,
) -> ModelResult<DMatrix<f64>> {
    let n = output.len();
    if household.len() != n {
        return Err(ModelError::mismatch(format!(
            "household demand has {} entries, expected {}", household.len(), n
        )));
    }
    let base = technical_coefficients(io, output)?;
    let consumption = household_coefficients(household, gdhi)?;
    let income = labour_coefficients(labour, output)?;

    let mut extended = base.resize(n + 1, n + 1, 0.0);
    for i in 0..n {
        extended[(i, n)] = consumption[i];
        extended[(n, i)] = income[i];
    }
    Ok(extended)
}

fn check_divisors(output: &[f64]) -> ModelResult<()> {
    match output.iter().position(|&o| o == 0.0) {
        Some(j) => Err(ModelError::DivisionByZero { divisor: format!("total output of sector {}", j) }),
        None => Ok(()),
    }
}
