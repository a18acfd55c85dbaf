use super::projector::{ScenarioProjector, ScenarioResult};
use super::shock::DemandShock;
use crate::compute::error::ModelResult;
use rayon::prelude::*;

/// Models independent what-if shocks in parallel. Results keep the order of
/// `shocks`; a zero shock fails only its own slot.
pub fn model_many(projector: &ScenarioProjector<'_>, shocks: &[DemandShock]) -> Vec<ModelResult<ScenarioResult>> {
    shocks.par_iter().map(|shock| projector.model(shock)).collect()
}
