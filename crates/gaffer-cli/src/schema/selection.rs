use chrono::{DateTime, Utc};
use gaffer_core::{Metric, Player, Price};
use gaffer_evaluator::Lineup;
use gaffer_optimizer::{RankedPlayer, Selection};
use serde::{Deserialize, Serialize};

/// Saved result of `pick-team`, also the input of `value-team`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// When the selection was solved (ISO 8601)
    pub solved_at: DateTime<Utc>,
    /// Objective column the squad was optimized for
    pub metric: Metric,
    pub formation: String,
    pub squad: Vec<String>,
    pub starters: Vec<String>,
    pub bench: Vec<String>,
    pub captain: String,
    pub vice_captain: String,
    pub total_cost: Price,
    pub expected_points: f64,
    /// Squad ordered by metric, highest first
    pub ranking: Vec<RankedPlayer>,
}

impl SelectionRecord {
    pub fn new(selection: &Selection, metric: Metric, solved_at: DateTime<Utc>) -> Self {
        Self {
            solved_at,
            metric,
            formation: selection.formation.name.clone(),
            squad: names(&selection.squad),
            starters: names(&selection.starters),
            bench: names(&selection.bench),
            captain: selection.captain.name.clone(),
            vice_captain: selection.vice_captain.name.clone(),
            total_cost: selection.total_cost,
            expected_points: selection.expected_points,
            ranking: selection.ranking.clone(),
        }
    }
}

impl Lineup for SelectionRecord {
    fn starter_names(&self) -> Vec<&str> {
        self.starters.iter().map(String::as_str).collect()
    }

    fn captain_name(&self) -> &str {
        &self.captain
    }

    fn vice_captain_name(&self) -> &str {
        &self.vice_captain
    }
}

pub fn names(players: &[Player]) -> Vec<String> {
    players.iter().map(|p| p.name.clone()).collect()
}
