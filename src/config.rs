//! Immutable configuration values passed explicitly into extraction and
//! modelling. Nothing here is global: each session owns its own copies.
use crate::compute::error::{ModelError, ModelResult};
use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Where the model's inputs live inside a raw table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Column holding the sector names/codes.
    pub names_column: String,
    /// Column holding total intermediate demand per sector.
    pub demand_column: String,
    /// Row label (in the names column) holding total output per sector.
    pub output_row: String,
    #[serde(default)]
    pub household_column: Option<String>,
    #[serde(default)]
    pub labour_income_row: Option<String>,
}

impl ExtractionConfig {
    pub fn new(names_column: &str, demand_column: &str, output_row: &str) -> Self {
        Self {
            names_column: names_column.to_string(),
            demand_column: demand_column.to_string(),
            output_row: output_row.to_string(),
            household_column: None,
            labour_income_row: None,
        }
    }

    pub fn with_induced(mut self, household_column: &str, labour_income_row: &str) -> Self {
        self.household_column = Some(household_column.to_string());
        self.labour_income_row = Some(labour_income_row.to_string());
        self
    }

    pub fn from_json_str(s: &str) -> ModelResult<Self> { parse_json(s) }
    pub fn from_path(path: impl AsRef<Path>) -> ModelResult<Self> { read_json(path.as_ref()) }
}

/// Denominator used for household consumption coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GdhiPolicy {
    /// Sum of the household demand vector.
    SumOfHouseholdDemand,
    Fixed(f64),
}

impl GdhiPolicy {
    /// Maps the host's numeric input onto a policy. Exactly zero means the
    /// user left the field unset.
    pub fn from_override(value: f64) -> Self {
        if value == 0.0 { GdhiPolicy::SumOfHouseholdDemand } else { GdhiPolicy::Fixed(value) }
    }

    pub fn resolve(&self, household_demand: &[f64]) -> f64 {
        match self {
            GdhiPolicy::SumOfHouseholdDemand => household_demand.iter().sum(),
            GdhiPolicy::Fixed(v) => *v,
        }
    }
}

/// Model selection for one session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Include induced (Type II) effects.
    pub include_induced: bool,
    /// GDHI constant; 0 leaves it to the household demand total.
    pub gdhi_override: f64,
}

impl ModelConfig {
    pub fn type1() -> Self { Self::default() }

    pub fn type2(gdhi_override: f64) -> Self {
        Self { include_induced: true, gdhi_override }
    }

    pub fn gdhi_policy(&self) -> GdhiPolicy { GdhiPolicy::from_override(self.gdhi_override) }

    pub fn from_json_str(s: &str) -> ModelResult<Self> { parse_json(s) }
    pub fn from_path(path: impl AsRef<Path>) -> ModelResult<Self> { read_json(path.as_ref()) }
}

fn parse_json<T: DeserializeOwned>(s: &str) -> ModelResult<T> {
    serde_json::from_str(s).map_err(|e| ModelError::Config(e.to_string()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ModelResult<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ModelError::Config(format!("{}: {}", path.display(), e)))?;
    parse_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_zero_gdhi_means_unset() {
        let policy = GdhiPolicy::from_override(0.0);
        assert_eq!(policy, GdhiPolicy::SumOfHouseholdDemand);
        assert_eq!(policy.resolve(&[30.0, 20.0]), 50.0);
        assert_eq!(GdhiPolicy::from_override(80.0).resolve(&[30.0, 20.0]), 80.0);
    }

    #[test]
    fn test_model_config_defaults() {
        let cfg = ModelConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ModelConfig::type1());
        let cfg = ModelConfig::from_json_str(r#"{"include_induced": true}"#).unwrap();
        assert!(cfg.include_induced);
        assert_eq!(cfg.gdhi_policy(), GdhiPolicy::SumOfHouseholdDemand);
    }

    #[test]
    fn test_extraction_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"names_column":"Sector","demand_column":"Total intermediate use","output_row":"Total output"}}"#
        ).unwrap();

        let cfg = ExtractionConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg, ExtractionConfig::new("Sector", "Total intermediate use", "Total output"));
        assert!(cfg.household_column.is_none());
    }

    #[test]
    fn test_malformed_config_reported() {
        let err = ExtractionConfig::from_json_str(r#"{"names_column": 3}"#).unwrap_err();
        assert!(matches!(err, ModelError::Config(_)));
    }
}
