//! pyo3 bindings for the Python host.
pub mod python;
