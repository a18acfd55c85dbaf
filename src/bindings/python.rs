use crate::compute::ModelError;
use crate::config::{ExtractionConfig, ModelConfig};
use crate::display::report;
use crate::scenario::{DemandShock, ScenarioResult};
use crate::session::IoModel;
use crate::store::RawTable;
use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

create_exception!(_core, InvalidSelectionError, PyValueError);
create_exception!(_core, DivisionByZeroError, PyValueError);
create_exception!(_core, SingularMatrixError, PyValueError);

pub(crate) fn to_py_err(e: ModelError) -> PyErr {
    let msg = e.to_string();
    match e {
        ModelError::InvalidSelection(_) => InvalidSelectionError::new_err(msg),
        ModelError::DivisionByZero { .. } => DivisionByZeroError::new_err(msg),
        ModelError::SingularMatrix { .. } => SingularMatrixError::new_err(msg),
        _ => PyValueError::new_err(msg),
    }
}

#[pyclass(name = "_ScenarioResult")]
#[derive(Debug, Clone)]
pub struct PyScenarioResult {
    pub(crate) inner: ScenarioResult,
}

#[pymethods]
impl PyScenarioResult {
    #[getter]
    pub fn original_output(&self) -> Vec<f64> { self.inner.original_output.clone() }
    #[getter]
    pub fn direct(&self) -> Vec<f64> { self.inner.direct.clone() }
    #[getter]
    pub fn indirect(&self) -> Vec<f64> { self.inner.indirect.clone() }
    #[getter]
    pub fn induced(&self) -> Vec<f64> { self.inner.induced_or_zero() }
    #[getter]
    pub fn modelled(&self) -> Vec<f64> { self.inner.modelled.clone() }
    #[getter]
    pub fn household_income(&self) -> Option<f64> { self.inner.household_income }

    pub fn proportional(&self) -> (Vec<f64>, Vec<f64>, Option<Vec<f64>>) {
        let view = report::proportional(&self.inner);
        (view.direct, view.indirect, view.induced)
    }

    pub fn changed_sectors(&self) -> Vec<usize> { report::changed_sectors(&self.inner) }

    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

#[pyclass(name = "_IoModel")]
#[derive(Debug, Clone)]
pub struct PyIoModel {
    inner: IoModel,
}

#[pymethods]
impl PyIoModel {
    #[new]
    #[pyo3(signature = (
        names_column, labels, value_columns, values, demand_column, output_row,
        household_column=None, labour_income_row=None, include_induced=false, gdhi=0.0
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        names_column: String,
        labels: Vec<String>,
        value_columns: Vec<String>,
        values: Vec<Vec<f64>>,
        demand_column: String,
        output_row: String,
        household_column: Option<String>,
        labour_income_row: Option<String>,
        include_induced: bool,
        gdhi: f64,
    ) -> PyResult<Self> {
        let raw = RawTable::from_labeled(&names_column, labels, value_columns, values).map_err(to_py_err)?;
        let extraction = ExtractionConfig {
            names_column,
            demand_column,
            output_row,
            household_column,
            labour_income_row,
        };
        let config = ModelConfig { include_induced, gdhi_override: gdhi };
        let inner = IoModel::from_raw(&raw, &extraction, config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    pub fn sectors(&self) -> Vec<String> { self.inner.sectors().as_slice().to_vec() }

    pub fn induced_available(&self) -> bool { self.inner.induced_available() }

    pub fn include_induced(&self) -> bool { self.inner.config().include_induced }

    /// (labels, multipliers); induced models end with a "Households" entry.
    pub fn multipliers(&self) -> (Vec<String>, Vec<f64>) {
        report::multiplier_table(self.inner.sectors(), self.inner.multipliers())
            .into_iter()
            .map(|row| (row.label, row.multiplier))
            .unzip()
    }

    pub fn multiplier_matrix(&self) -> Vec<Vec<f64>> { self.inner.multipliers().matrix_rows() }

    pub fn with_induced(&self, include_induced: bool, gdhi: f64) -> PyResult<Self> {
        let config = ModelConfig { include_induced, gdhi_override: gdhi };
        let inner = self.inner.with_config(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Returns None while `demand` is all zeros.
    pub fn model_scenario(&self, demand: Vec<f64>) -> PyResult<Option<PyScenarioResult>> {
        let result = self.inner.model_scenario(&DemandShock::new(demand)).map_err(to_py_err)?;
        Ok(result.map(|inner| PyScenarioResult { inner }))
    }

    pub fn model_scenarios(&self, py: Python<'_>, demands: Vec<Vec<f64>>) -> PyResult<Vec<Option<PyScenarioResult>>> {
        let shocks: Vec<DemandShock> = demands.into_iter().map(DemandShock::new).collect();
        let results = py.detach(|| self.inner.model_scenarios(&shocks)).map_err(to_py_err)?;
        results.into_iter()
            .map(|r| match r {
                Ok(inner) => Ok(Some(PyScenarioResult { inner })),
                Err(ModelError::ZeroShock) => Ok(None),
                Err(e) => Err(to_py_err(e)),
            })
            .collect()
    }

    /// Indices of the named sectors, for filtered comparison views.
    pub fn select_sectors(&self, names: Vec<String>) -> PyResult<Vec<usize>> {
        report::select_sectors(self.inner.sectors(), &names).map_err(to_py_err)
    }

    pub fn format_scenario(&self, result: &PyScenarioResult) -> String {
        report::format_scenario(self.inner.sectors(), &result.inner)
    }
}
