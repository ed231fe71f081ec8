//! Turning an optimal assignment back into players.

use gaffer_core::{ClubId, Formation, Player, Position, PositionTable, Price};
use gaffer_solver::Assignment;
use serde::{Deserialize, Serialize};

use crate::{ConstraintModel, OptimizeError};

/// A squad member ordered by metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub name: String,
    pub metric: f64,
    pub position: Position,
    pub club: ClubId,
    /// 1-based; ties keep pool order.
    pub rank: usize,
}

/// A legal 15-player squad with its starting lineup and captaincy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// In pool order.
    pub squad: Vec<Player>,
    pub starters: Vec<Player>,
    pub bench: Vec<Player>,
    pub captain: Player,
    pub vice_captain: Player,
    pub formation: Formation,
    pub total_cost: Price,
    /// Sum of the starters' metrics plus the captain's metric once more.
    pub expected_points: f64,
    pub ranking: Vec<RankedPlayer>,
}

impl Selection {
    pub(crate) fn extract(
        model: &ConstraintModel<'_>,
        assignment: &Assignment,
    ) -> Result<Self, OptimizeError> {
        let players = model.pool().players();
        let mut squad = vec![];
        let mut starters = vec![];
        let mut bench = vec![];
        let mut captains = vec![];
        let mut vices = vec![];
        for (player, vars) in players.iter().zip(model.player_vars()) {
            if !assignment.is_set(vars.in_squad) {
                continue;
            }
            squad.push(player.clone());
            if assignment.is_set(vars.starts) {
                starters.push(player.clone());
            } else {
                bench.push(player.clone());
            }
            if assignment.is_set(vars.captain) {
                captains.push(player.clone());
            }
            if assignment.is_set(vars.vice) {
                vices.push(player.clone());
            }
        }

        let captain = exactly_one(captains, "captain")?;
        let vice_captain = exactly_one(vices, "vice-captain")?;
        let formations = model
            .formations()
            .filter(|&(_, var)| assignment.is_set(var))
            .map(|(formation, _)| formation.clone())
            .collect();
        let formation = exactly_one(formations, "formation")?;

        let total_cost = squad.iter().map(|p| p.cost).sum();
        let starting_points: f64 = starters.iter().map(|p| p.metric).sum();
        let expected_points = starting_points + captain.metric;
        let ranking = rank_squad(&squad);

        Ok(Self {
            squad,
            starters,
            bench,
            captain,
            vice_captain,
            formation,
            total_cost,
            expected_points,
            ranking,
        })
    }

    #[must_use]
    pub fn starter_counts(&self) -> PositionTable<usize> {
        let mut counts = PositionTable::default();
        for player in &self.starters {
            counts[player.position] += 1;
        }
        counts
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.squad.iter().any(|p| p.name == name)
    }

    #[must_use]
    pub fn is_starter(&self, name: &str) -> bool {
        self.starters.iter().any(|p| p.name == name)
    }
}

fn exactly_one<T>(mut items: Vec<T>, role: &str) -> Result<T, OptimizeError> {
    if items.len() != 1 {
        return Err(OptimizeError::MalformedAssignment {
            detail: format!("expected exactly one {role}, found {}", items.len()),
        });
    }
    Ok(items.remove(0))
}

/// Orders a squad by metric, highest first, ranking it 1..=n.
///
/// The sort is stable, so equal metrics keep the order they had in `squad`.
#[must_use]
pub fn rank_squad(squad: &[Player]) -> Vec<RankedPlayer> {
    let mut sorted: Vec<&Player> = squad.iter().collect();
    sorted.sort_by(|a, b| b.metric.total_cmp(&a.metric));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, player)| RankedPlayer {
            name: player.name.clone(),
            metric: player.metric,
            position: player.position,
            club: player.club,
            rank: i + 1,
        })
        .collect()
}
