use std::collections::BTreeSet;

use gaffer_core::Price;
use serde::{Deserialize, Serialize};

use crate::InputError;

/// Parameters of a fresh squad selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub budget: Price,
    /// Restricts the starting shape to one named formation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation: Option<String>,
}

impl SelectionConfig {
    #[must_use]
    pub fn new(budget: Price) -> Self {
        Self {
            budget,
            formation: None,
        }
    }

    #[must_use]
    pub fn with_formation(mut self, name: impl Into<String>) -> Self {
        self.formation = Some(name.into());
        self
    }
}

/// Parameters of a transfer decision for a held squad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Money that can be spent on top of what sales raise.
    pub available_budget: Price,
    pub free_transfers: usize,
    pub max_transfers: usize,
    /// Points deducted for every transfer beyond the free ones.
    pub penalty_per_excess_transfer: f64,
    #[serde(default)]
    pub must_remove: BTreeSet<String>,
    #[serde(default)]
    pub must_keep: BTreeSet<String>,
}

impl TransferConfig {
    /// One free transfer, at most six transfers, four points per extra transfer.
    #[must_use]
    pub fn new(available_budget: Price) -> Self {
        Self {
            available_budget,
            free_transfers: 1,
            max_transfers: 6,
            penalty_per_excess_transfer: 4.0,
            must_remove: BTreeSet::new(),
            must_keep: BTreeSet::new(),
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        let overlap: Vec<String> = self
            .must_remove
            .intersection(&self.must_keep)
            .cloned()
            .collect();
        if !overlap.is_empty() {
            return Err(InputError::ConflictingForcedSets { names: overlap });
        }
        let penalty = self.penalty_per_excess_transfer;
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(InputError::InvalidPenalty { value: penalty });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_defaults() {
        let config = TransferConfig::new(Price::from_tenths(5));
        assert_eq!(config.free_transfers, 1);
        assert_eq!(config.max_transfers, 6);
        assert!((config.penalty_per_excess_transfer - 4.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlap_is_rejected() {
        let mut config = TransferConfig::new(Price::ZERO);
        config.must_remove.extend(["Salah".to_owned(), "Haaland".to_owned()]);
        config.must_keep.insert("Salah".to_owned());
        assert_eq!(
            config.validate(),
            Err(InputError::ConflictingForcedSets {
                names: vec!["Salah".to_owned()]
            })
        );
    }

    #[test]
    fn test_negative_penalty_is_rejected() {
        let mut config = TransferConfig::new(Price::ZERO);
        config.penalty_per_excess_transfer = -1.0;
        assert!(matches!(
            config.validate(),
            Err(InputError::InvalidPenalty { .. })
        ));
    }
}
