use serde::{Serialize, Deserialize};
use std::collections::HashSet;
use crate::compute::error::{ModelError, ModelResult};

/// Label used for the endogenous household row/column in induced models.
pub const HOUSEHOLDS_LABEL: &str = "Households";

/// Ordered, unique sector labels. Index `i` here is index `i` in every
/// vector and matrix derived from the same table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct Sectors(Vec<String>);

impl TryFrom<Vec<String>> for Sectors {
    type Error = ModelError;

    fn try_from(labels: Vec<String>) -> ModelResult<Self> { Sectors::new(labels) }
}

impl Sectors {
    pub fn new(labels: Vec<String>) -> ModelResult<Self> {
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(ModelError::invalid(format!("duplicate sector label '{}'", label)));
            }
        }
        Ok(Self(labels))
    }

    #[inline(always)]
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn get(&self, i: usize) -> Option<&str> { self.0.get(i).map(String::as_str) }
    pub fn as_slice(&self) -> &[String] { &self.0 }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|s| s == label)
    }

    /// Labels for the rows of a matrix of the given kind.
    pub fn labels_for(&self, kind: ModelKind) -> Vec<String> {
        let mut labels = self.0.clone();
        if kind.is_induced() {
            labels.push(HOUSEHOLDS_LABEL.to_string());
        }
        labels
    }
}

/// Which Leontief model a matrix belongs to.
///
/// `Induced` folds households in as an extra endogenous sector, so its
/// matrices carry one more row and column than there are sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Standard { sectors: usize },
    Induced { sectors: usize },
}

impl ModelKind {
    pub fn for_flag(include_induced: bool, sectors: usize) -> Self {
        if include_induced { ModelKind::Induced { sectors } } else { ModelKind::Standard { sectors } }
    }

    #[inline(always)]
    pub fn sectors(&self) -> usize {
        match self { ModelKind::Standard { sectors } | ModelKind::Induced { sectors } => *sectors }
    }

    #[inline(always)]
    pub fn dimension(&self) -> usize {
        match self {
            ModelKind::Standard { sectors } => *sectors,
            ModelKind::Induced { sectors } => sectors + 1,
        }
    }

    pub fn is_induced(&self) -> bool { matches!(self, ModelKind::Induced { .. }) }

    pub fn type_number(&self) -> u8 {
        if self.is_induced() { 2 } else { 1 }
    }
}
