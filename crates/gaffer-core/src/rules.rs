//! Squad composition rules.
//!
//! A [`RuleSet`] carries every structural parameter of the game: squad size,
//! starting size, per-position quotas, the per-club cap and the table of allowed
//! formations. Nothing about these numbers is hard-coded in the optimizer, so
//! alternative rule sets (smaller squads, extra formations) can be modelled and
//! tested directly.
//!
//! # Example
//!
//! ```
//! use gaffer_core::{Position, RuleSet};
//!
//! let rules = RuleSet::standard();
//! rules.validate().unwrap();
//! assert_eq!(rules.squad_size, 15);
//! assert_eq!(rules.position_quotas[Position::Defender], 5);
//! assert!(rules.formation("4-4-2").is_some());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Position, PositionTable};

/// A starting shape: outfield counts, goalkeepers are implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl Formation {
    #[must_use]
    pub fn new(name: impl Into<String>, defenders: usize, midfielders: usize, forwards: usize) -> Self {
        Self {
            name: name.into(),
            defenders,
            midfielders,
            forwards,
        }
    }

    /// Number of outfield starters; zero for goalkeepers.
    #[must_use]
    pub fn outfield_count(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => 0,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    #[must_use]
    pub fn outfield_total(&self) -> usize {
        self.defenders + self.midfielders + self.forwards
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub squad_size: usize,
    pub starting_size: usize,
    pub starting_goalkeepers: usize,
    pub max_per_club: usize,
    pub position_quotas: PositionTable<usize>,
    pub formations: Vec<Formation>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RuleSetError {
    #[display("rule set has no formations")]
    EmptyFormations,
    #[display("formation '{name}' is listed more than once")]
    DuplicateFormation { name: String },
    #[display("position quotas sum to {total}, expected squad size {squad_size}")]
    QuotaMismatch { total: usize, squad_size: usize },
    #[display("starting size {starting_size} exceeds squad size {squad_size}")]
    StartingSizeExceedsSquad {
        starting_size: usize,
        squad_size: usize,
    },
    #[display("formation '{name}' fields {total} players, expected {starting_size}")]
    FormationSizeMismatch {
        name: String,
        total: usize,
        starting_size: usize,
    },
    #[display("formation '{name}' starts {required} {position} players but the quota is {quota}")]
    FormationExceedsQuota {
        name: String,
        position: Position,
        required: usize,
        quota: usize,
    },
    #[display("club cap must allow at least one player")]
    ZeroClubCap,
}

impl RuleSet {
    /// Competition rules: 15-player squad, 11 starters, 3 per club.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            squad_size: 15,
            starting_size: 11,
            starting_goalkeepers: 1,
            max_per_club: 3,
            position_quotas: PositionTable::new(2, 5, 5, 3),
            formations: vec![
                Formation::new("3-4-3", 3, 4, 3),
                Formation::new("3-5-2", 3, 5, 2),
                Formation::new("4-4-2", 4, 4, 2),
                Formation::new("4-3-3", 4, 3, 3),
                Formation::new("5-3-2", 5, 3, 2),
            ],
        }
    }

    #[must_use]
    pub fn formation(&self, name: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn formation_names(&self) -> Vec<String> {
        self.formations.iter().map(|f| f.name.clone()).collect()
    }

    /// Number of starters required at `position` under `formation`.
    #[must_use]
    pub fn starting_count(&self, formation: &Formation, position: Position) -> usize {
        match position {
            Position::Goalkeeper => self.starting_goalkeepers,
            _ => formation.outfield_count(position),
        }
    }

    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.formations.is_empty() {
            return Err(RuleSetError::EmptyFormations);
        }
        if self.max_per_club == 0 {
            return Err(RuleSetError::ZeroClubCap);
        }
        let total = self.position_quotas.iter().map(|(_, n)| *n).sum::<usize>();
        if total != self.squad_size {
            return Err(RuleSetError::QuotaMismatch {
                total,
                squad_size: self.squad_size,
            });
        }
        if self.starting_size > self.squad_size {
            return Err(RuleSetError::StartingSizeExceedsSquad {
                starting_size: self.starting_size,
                squad_size: self.squad_size,
            });
        }

        let mut names = HashSet::new();
        for formation in &self.formations {
            if !names.insert(formation.name.as_str()) {
                return Err(RuleSetError::DuplicateFormation {
                    name: formation.name.clone(),
                });
            }
            let total = self.starting_goalkeepers + formation.outfield_total();
            if total != self.starting_size {
                return Err(RuleSetError::FormationSizeMismatch {
                    name: formation.name.clone(),
                    total,
                    starting_size: self.starting_size,
                });
            }
            for position in Position::ALL {
                let required = self.starting_count(formation, position);
                let quota = self.position_quotas[position];
                if required > quota {
                    return Err(RuleSetError::FormationExceedsQuota {
                        name: formation.name.clone(),
                        position,
                        required,
                        quota,
                    });
                }
            }
        }
        Ok(())
    }
}
