//! Host-facing views of multipliers and scenario results.
pub mod report;

pub use report::{changed_sectors, format_scenario, multiplier_table, proportional, select_sectors, MultiplierRow, ProportionalView};
