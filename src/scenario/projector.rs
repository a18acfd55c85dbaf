use super::shock::DemandShock;
use crate::compute::error::{ModelError, ModelResult};
use crate::compute::LeontiefInverse;
use crate::store::ModelKind;
use serde::Serialize;
use tracing::debug;

/// Multiplier matrix times shock. The result has the matrix's dimension, so
/// an induced projection carries the household pseudo-sector as its last
/// entry.
///
/// A zero shock is rejected: it means no scenario has been entered, not a
/// scenario with no effect.
pub fn project(inverse: &LeontiefInverse, shock: &DemandShock) -> ModelResult<Vec<f64>> {
    if shock.is_zero() {
        return Err(ModelError::ZeroShock);
    }
    let v = shock.to_vector(inverse.dimension(), inverse.kind.is_induced())?;
    Ok((&inverse.matrix * v).iter().copied().collect())
}

/// Per-sector effects of one demand shock. Every vector except `modelled`
/// has one entry per sector, in sector order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub kind: ModelKind,
    pub original_output: Vec<f64>,
    pub direct: Vec<f64>,
    pub indirect: Vec<f64>,
    /// Present only for induced (Type II) models.
    pub induced: Option<Vec<f64>>,
    /// Raw projection, including the household entry for induced models.
    pub modelled: Vec<f64>,
    /// Household income generated by the shock (induced models only).
    pub household_income: Option<f64>,
}

impl ScenarioResult {
    pub fn sector_count(&self) -> usize { self.direct.len() }

    /// Induced effect per sector, zero-filled for Type I results.
    pub fn induced_or_zero(&self) -> Vec<f64> {
        self.induced.clone().unwrap_or_else(|| vec![0.0; self.sector_count()])
    }

    /// Direct + indirect + induced per sector; equals the first n entries of
    /// `modelled` up to rounding.
    pub fn total(&self) -> Vec<f64> {
        let induced = self.induced_or_zero();
        (0..self.sector_count())
            .map(|i| self.direct[i] + self.indirect[i] + induced[i])
            .collect()
    }
}

/// Applies shocks through a Type I inverse and, for induced scenarios, a
/// Type II inverse built from the same table.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioProjector<'a> {
    type1: &'a LeontiefInverse,
    type2: Option<&'a LeontiefInverse>,
    original_output: &'a [f64],
}

impl<'a> ScenarioProjector<'a> {
    pub fn new(
        type1: &'a LeontiefInverse,
        type2: Option<&'a LeontiefInverse>,
        original_output: &'a [f64],
    ) -> ModelResult<Self> {
        let n = original_output.len();
        if type1.kind != (ModelKind::Standard { sectors: n }) {
            return Err(ModelError::mismatch(format!(
                "expected a Type I inverse over {} sectors, got {:?}", n, type1.kind
            )));
        }
        if let Some(t2) = type2 {
            if t2.kind != (ModelKind::Induced { sectors: n }) {
                return Err(ModelError::mismatch(format!(
                    "expected a Type II inverse over {} sectors, got {:?}", n, t2.kind
                )));
            }
        }
        Ok(Self { type1, type2, original_output })
    }

    pub fn kind(&self) -> ModelKind {
        self.type2.map_or(self.type1.kind, |t2| t2.kind)
    }

    /// Models one shock.
    ///
    /// Type I: indirect = modelled - direct.
    /// Type II: the same shock is also run through the Type I inverse, then
    /// indirect = type1 - direct and induced = modelled - type1. That second
    /// projection is what separates the inter-industry ripple from the
    /// household feedback.
    pub fn model(&self, shock: &DemandShock) -> ModelResult<ScenarioResult> {
        let n = self.original_output.len();
        if shock.len() != n {
            return Err(ModelError::mismatch(format!(
                "shock has {} entries for {} sectors", shock.len(), n
            )));
        }
        let direct = shock.values().to_vec();
        let type1_modelled = project(self.type1, shock)?;
        let indirect: Vec<f64> = (0..n).map(|i| type1_modelled[i] - direct[i]).collect();

        let (modelled, induced, household_income) = match self.type2 {
            None => (type1_modelled, None, None),
            Some(t2) => {
                let modelled = project(t2, shock)?;
                let induced = (0..n).map(|i| modelled[i] - type1_modelled[i]).collect();
                let income = modelled[n];
                (modelled, Some(induced), Some(income))
            }
        };

        debug!(sectors = n, induced = induced.is_some(), "modelled scenario");
        Ok(ScenarioResult {
            kind: self.kind(),
            original_output: self.original_output.to_vec(),
            direct,
            indirect,
            induced,
            modelled,
            household_income,
        })
    }
}
