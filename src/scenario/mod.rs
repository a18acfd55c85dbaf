//! Demand shocks and their projection through multiplier matrices.
pub mod batch;
pub mod projector;
pub mod shock;

pub use batch::model_many;
pub use projector::{project, ScenarioProjector, ScenarioResult};
pub use shock::DemandShock;
