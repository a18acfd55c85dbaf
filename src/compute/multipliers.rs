use super::coefficients::{extended_coefficients, technical_coefficients};
use super::error::{ModelError, ModelResult};
use super::inverse::{leontief_inverse, LeontiefInverse};
use crate::config::{GdhiPolicy, ModelConfig};
use crate::store::{ExtractedTable, ModelKind};
use nalgebra::DMatrix;
use serde::Serialize;

/// Multipliers together with the inverse they were summed from. The inverse
/// is what scenarios are projected through.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierSet {
    pub multipliers: Vec<f64>,
    pub inverse: LeontiefInverse,
}

impl MultiplierSet {
    fn from_inverse(inverse: LeontiefInverse) -> Self {
        Self { multipliers: inverse.column_sums(), inverse }
    }

    pub fn kind(&self) -> ModelKind { self.inverse.kind }
    pub fn matrix(&self) -> &DMatrix<f64> { &self.inverse.matrix }

    /// Row-major copy of the multiplier matrix for export.
    pub fn matrix_rows(&self) -> Vec<Vec<f64>> {
        self.inverse.matrix.row_iter().map(|r| r.iter().copied().collect()).collect()
    }

    pub fn summary(&self) -> MultiplierSummary {
        MultiplierSummary {
            model_type: self.kind().type_number(),
            multipliers: self.multipliers.clone(),
            matrix: self.matrix_rows(),
        }
    }
}

/// Serializable view of a `MultiplierSet`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiplierSummary {
    pub model_type: u8,
    pub multipliers: Vec<f64>,
    pub matrix: Vec<Vec<f64>>,
}

/// Production-only multipliers.
pub fn type1_multipliers(io: &DMatrix<f64>, output: &[f64]) -> ModelResult<MultiplierSet> {
    let coefficients = technical_coefficients(io, output)?;
    let kind = ModelKind::Standard { sectors: output.len() };
    Ok(MultiplierSet::from_inverse(leontief_inverse(&coefficients, kind)?))
}

/// Multipliers with households folded in as an extra endogenous sector.
/// The result has one more entry than there are sectors.
pub fn type2_multipliers(
    io: &DMatrix<f64>,
    output: &[f64],
    household: &[f64],
    labour: &[f64],
    gdhi: GdhiPolicy,
) -> ModelResult<MultiplierSet> {
    let coefficients = extended_coefficients(io, output, household, labour, gdhi)?;
    let kind = ModelKind::Induced { sectors: output.len() };
    Ok(MultiplierSet::from_inverse(leontief_inverse(&coefficients, kind)?))
}

/// Picks Type I or Type II from the induced-effects flag.
pub fn multipliers(table: &ExtractedTable, config: &ModelConfig) -> ModelResult<MultiplierSet> {
    if !config.include_induced {
        return type1_multipliers(&table.io_matrix, &table.output);
    }
    match (&table.household_demand, &table.labour_income) {
        (Some(household), Some(labour)) => type2_multipliers(
            &table.io_matrix, &table.output, household, labour, config.gdhi_policy(),
        ),
        _ => Err(ModelError::invalid(
            "induced effects need both a household demand column and a labour income row",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::extract::tests::{full_config, two_sector_table};
    use crate::store::TableExtractor;

    fn two_sector() -> (DMatrix<f64>, Vec<f64>) {
        (DMatrix::from_row_slice(2, 2, &[10.0, 5.0, 20.0, 10.0]), vec![100.0, 50.0])
    }

    #[test]
    fn test_type1_two_sector() {
        let (io, output) = two_sector();
        let set = type1_multipliers(&io, &output).unwrap();
        assert_eq!(set.kind(), ModelKind::Standard { sectors: 2 });
        assert_eq!(set.multipliers.len(), 2);
        for m in &set.multipliers {
            assert!((m - 1.0 / 0.7).abs() < 1e-9);
        }
        assert_eq!(set.matrix_rows().len(), 2);
    }

    #[test]
    fn test_type2_exceeds_type1() {
        let (io, output) = two_sector();
        let t1 = type1_multipliers(&io, &output).unwrap();
        let t2 = type2_multipliers(&io, &output, &[30.0, 20.0], &[40.0, 10.0], GdhiPolicy::Fixed(100.0)).unwrap();

        assert_eq!(t2.kind(), ModelKind::Induced { sectors: 2 });
        assert_eq!(t2.multipliers.len(), 3);
        assert_eq!(t2.matrix().shape(), (3, 3));
        for j in 0..2 {
            assert!(t2.multipliers[j] > t1.multipliers[j], "sector {}: {:?} vs {:?}", j, t2.multipliers, t1.multipliers);
        }
    }

    #[test]
    fn test_flag_selects_model() {
        let table = TableExtractor::new(&full_config()).extract(&two_sector_table()).unwrap();
        let t1 = multipliers(&table, &ModelConfig::type1()).unwrap();
        let t2 = multipliers(&table, &ModelConfig::type2(0.0)).unwrap();
        assert_eq!(t1.kind().dimension(), 2);
        assert_eq!(t2.kind().dimension(), 3);

        let json = serde_json::to_value(t2.summary()).unwrap();
        assert_eq!(json["model_type"], 2);
        assert_eq!(json["matrix"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_induced_without_household_data() {
        let mut table = TableExtractor::new(&full_config()).extract(&two_sector_table()).unwrap();
        table.labour_income = None;
        let result = multipliers(&table, &ModelConfig::type2(0.0));
        assert!(matches!(result, Err(ModelError::InvalidSelection(_))));
    }
}
