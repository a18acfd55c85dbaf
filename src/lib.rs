//! Leontief input-output modelling: technical coefficients, the Leontief
//! inverse, Type I/II multipliers and demand-shock scenarios decomposed into
//! direct, indirect and induced effects.

pub mod compute;
pub mod config;
pub mod display;
pub mod scenario;
pub mod session;
pub mod store;

#[cfg(feature = "python")]
pub mod bindings;

pub use compute::{ModelError, ModelResult, MultiplierSet};
pub use config::{ExtractionConfig, GdhiPolicy, ModelConfig};
pub use scenario::{DemandShock, ScenarioProjector, ScenarioResult};
pub use session::IoModel;
pub use store::{ExtractedTable, ModelKind, RawTable, TableExtractor};

#[cfg(test)]
mod properties;

// --- Python Module Definition ---
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Reports the compiled core's version to the Python side.
#[cfg(feature = "python")]
#[pyfunction]
fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// This function defines the `_core` Python module.
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use bindings::python::{
        DivisionByZeroError, InvalidSelectionError, PyIoModel, PyScenarioResult, SingularMatrixError,
    };

    m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
    m.add_class::<PyIoModel>()?;
    m.add_class::<PyScenarioResult>()?;
    let py = m.py();
    m.add("InvalidSelectionError", py.get_type::<InvalidSelectionError>())?;
    m.add("DivisionByZeroError", py.get_type::<DivisionByZeroError>())?;
    m.add("SingularMatrixError", py.get_type::<SingularMatrixError>())?;
    Ok(())
}
