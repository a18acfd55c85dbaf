//! The analytical core: coefficients, the Leontief inverse and multipliers.
pub mod coefficients;
pub mod error;
pub mod inverse;
pub mod multipliers;

pub use error::{ModelError, ModelResult};
pub use inverse::{leontief_inverse, LeontiefInverse};
pub use multipliers::{multipliers, type1_multipliers, type2_multipliers, MultiplierSet, MultiplierSummary};
