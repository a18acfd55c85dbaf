use crate::compute::error::{ModelError, ModelResult};
use crate::compute::MultiplierSet;
use crate::scenario::ScenarioResult;
use crate::store::Sectors;
use serde::Serialize;
use std::fmt::Write;

/// One labelled multiplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiplierRow {
    pub label: String,
    pub multiplier: f64,
}

/// Multipliers paired with their sector labels; induced models get a
/// trailing "Households" row.
pub fn multiplier_table(sectors: &Sectors, set: &MultiplierSet) -> Vec<MultiplierRow> {
    sectors.labels_for(set.kind()).into_iter()
        .zip(&set.multipliers)
        .map(|(label, &multiplier)| MultiplierRow { label, multiplier })
        .collect()
}

/// The components of a scenario as a percentage of each sector's original
/// output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionalView {
    pub direct: Vec<f64>,
    pub indirect: Vec<f64>,
    pub induced: Option<Vec<f64>>,
}

pub fn proportional(result: &ScenarioResult) -> ProportionalView {
    let pct = |values: &[f64]| -> Vec<f64> {
        values.iter().zip(&result.original_output).map(|(v, o)| 100.0 * v / o).collect()
    };
    ProportionalView {
        direct: pct(&result.direct),
        indirect: pct(&result.indirect),
        induced: result.induced.as_deref().map(pct),
    }
}

/// Indices of sectors the scenario actually moved (modelled output > 0).
pub fn changed_sectors(result: &ScenarioResult) -> Vec<usize> {
    (0..result.sector_count()).filter(|&i| result.modelled[i] > 0.0).collect()
}

/// Indices of the named sectors, in the order given, for a comparison view
/// restricted to a user's choice of sectors.
pub fn select_sectors<S: AsRef<str>>(sectors: &Sectors, names: &[S]) -> ModelResult<Vec<usize>> {
    names.iter()
        .map(|name| {
            let name = name.as_ref();
            sectors.position(name)
                .ok_or_else(|| ModelError::invalid(format!("unknown sector '{}'", name)))
        })
        .collect()
}

/// Renders a scenario as an aligned text table.
pub fn format_scenario(sectors: &Sectors, result: &ScenarioResult) -> String {
    let mut out = String::new();
    let width = sectors.as_slice().iter().map(String::len).max().unwrap_or(0).max("Sector".len());
    let induced = result.induced_or_zero();

    let _ = writeln!(out, "SCENARIO (Type {} model)", result.kind.type_number());
    let _ = writeln!(
        out, "{:<w$} {:>14} {:>12} {:>12} {:>12}",
        "Sector", "OriginalOutput", "Direct", "Indirect", "Induced", w = width
    );
    let _ = writeln!(out, "{}", "-".repeat(width + 54));
    for i in 0..result.sector_count() {
        let _ = writeln!(
            out, "{:<w$} {:>14.3} {:>12.3} {:>12.3} {:>12.3}",
            sectors.get(i).unwrap_or("?"),
            result.original_output[i], result.direct[i], result.indirect[i], induced[i],
            w = width
        );
    }
    if let Some(income) = result.household_income {
        let _ = writeln!(out, "Household income generated: {:.3}", income);
    }
    out
}
