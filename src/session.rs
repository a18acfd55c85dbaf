//! One modelling session: an extracted table, its configuration and the
//! inverses derived from them.
use crate::compute::error::{ModelError, ModelResult};
use crate::compute::{multipliers, type1_multipliers, MultiplierSet};
use crate::config::{ExtractionConfig, ModelConfig};
use crate::scenario::{model_many, DemandShock, ScenarioProjector, ScenarioResult};
use crate::store::{ExtractedTable, ModelKind, RawTable, Sectors, TableExtractor};
use tracing::{debug, info_span};

/// Owns everything a scenario needs. Inverses are computed once per
/// table/model-type pair; switching the induced flag goes through
/// [`IoModel::with_config`], which reuses the table and Type I inverse.
///
/// Sessions share nothing, so parallel what-if sessions are just separate
/// values.
#[derive(Debug, Clone)]
pub struct IoModel {
    table: ExtractedTable,
    config: ModelConfig,
    type1: MultiplierSet,
    type2: Option<MultiplierSet>,
}

impl IoModel {
    pub fn from_raw(raw: &RawTable, extraction: &ExtractionConfig, config: ModelConfig) -> ModelResult<Self> {
        let table = TableExtractor::new(extraction).extract(raw)?;
        Self::new(table, config)
    }

    pub fn new(table: ExtractedTable, config: ModelConfig) -> ModelResult<Self> {
        let _span = info_span!("io_model", sectors = table.sector_count()).entered();
        let type1 = type1_multipliers(&table.io_matrix, &table.output)?;
        let type2 = Self::induced_set(&table, &config)?;
        Ok(Self { table, config, type1, type2 })
    }

    /// Same table under a different model configuration.
    pub fn with_config(&self, config: ModelConfig) -> ModelResult<Self> {
        let type2 = Self::induced_set(&self.table, &config)?;
        Ok(Self { table: self.table.clone(), config, type1: self.type1.clone(), type2 })
    }

    fn induced_set(table: &ExtractedTable, config: &ModelConfig) -> ModelResult<Option<MultiplierSet>> {
        if !config.include_induced {
            return Ok(None);
        }
        let set = multipliers(table, config)?;
        debug!(dimension = set.kind().dimension(), "induced multipliers ready");
        Ok(Some(set))
    }

    pub fn table(&self) -> &ExtractedTable { &self.table }
    pub fn sectors(&self) -> &Sectors { &self.table.sectors }
    pub fn config(&self) -> &ModelConfig { &self.config }
    pub fn induced_available(&self) -> bool { self.table.induced_available() }

    pub fn kind(&self) -> ModelKind {
        self.multipliers().kind()
    }

    /// Multipliers for the configured model type.
    pub fn multipliers(&self) -> &MultiplierSet {
        self.type2.as_ref().unwrap_or(&self.type1)
    }

    pub fn projector(&self) -> ModelResult<ScenarioProjector<'_>> {
        ScenarioProjector::new(
            &self.type1.inverse,
            self.type2.as_ref().map(|s| &s.inverse),
            &self.table.output,
        )
    }

    /// Models a shock, or returns `None` while the shock is still all zeros.
    pub fn model_scenario(&self, shock: &DemandShock) -> ModelResult<Option<ScenarioResult>> {
        if shock.is_zero() {
            return Ok(None);
        }
        self.projector()?.model(shock).map(Some)
    }

    /// Models many shocks in parallel. Zero shocks come back as
    /// `Err(ZeroShock)` in their slot.
    pub fn model_scenarios(&self, shocks: &[DemandShock]) -> ModelResult<Vec<ModelResult<ScenarioResult>>> {
        Ok(model_many(&self.projector()?, shocks))
    }

    /// Shock with `value` in the named sector and zero elsewhere.
    pub fn sector_shock(&self, sector: &str, value: f64) -> ModelResult<DemandShock> {
        let idx = self.sectors().position(sector)
            .ok_or_else(|| ModelError::invalid(format!("unknown sector '{}'", sector)))?;
        let mut values = vec![0.0; self.sectors().len()];
        values[idx] = value;
        Ok(DemandShock::new(values))
    }
}
