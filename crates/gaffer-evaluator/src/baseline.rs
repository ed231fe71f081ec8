//! The "most-selected" benchmark: the legal squad built from the players most
//! managers owned in a gameweek, scored on that gameweek's realized points.

use gaffer_core::{ClubId, Player, PlayerPool, Position, Price};
use gaffer_optimizer::{Selection, SelectionConfig, SquadOptimizer};
use gaffer_solver::Solver;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{BaselineError, RealizedPoints, TeamValuation, TeamValuator};

/// One player's row in a per-gameweek history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameweekRecord {
    #[serde(alias = "player_name")]
    pub name: String,
    pub round: u32,
    #[serde(alias = "value")]
    pub cost: Price,
    pub position: Position,
    #[serde(alias = "team")]
    pub club: ClubId,
    /// Number of managers owning the player that round.
    pub selected: f64,
    #[serde(alias = "round_points")]
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineResult {
    pub gameweek: u32,
    pub selection: Selection,
    pub valuation: TeamValuation,
}

#[derive(Debug, Clone, Copy)]
pub struct MostSelectedBaseline<'a> {
    history: &'a [GameweekRecord],
    gameweek: u32,
}

impl<'a> MostSelectedBaseline<'a> {
    #[must_use]
    pub fn new(history: &'a [GameweekRecord], gameweek: u32) -> Self {
        Self { history, gameweek }
    }

    pub fn round_records(&self) -> impl Iterator<Item = &'a GameweekRecord> + '_ {
        self.history.iter().filter(|r| r.round == self.gameweek)
    }

    /// Candidates for the gameweek, valued by ownership.
    pub fn pool(&self) -> Result<PlayerPool, BaselineError> {
        let players: Vec<Player> = self
            .round_records()
            .map(|r| Player::new(r.name.clone(), r.cost, r.selected, r.position, r.club))
            .collect();
        if players.is_empty() {
            return Err(BaselineError::EmptyRound {
                gameweek: self.gameweek,
            });
        }
        Ok(PlayerPool::from_players(players)?)
    }

    #[must_use]
    pub fn realized(&self) -> RealizedPoints {
        self.round_records()
            .map(|r| (r.name.clone(), r.points))
            .collect()
    }

    /// Picks the most-selected squad under `budget` and scores it.
    pub fn run<S>(
        &self,
        optimizer: &SquadOptimizer<S>,
        budget: Price,
    ) -> Result<BaselineResult, BaselineError>
    where
        S: Solver,
    {
        let pool = self.pool()?;
        let selection = optimizer.select(&pool, &SelectionConfig::new(budget))?;
        let valuation = TeamValuator.value(&selection, &self.realized());
        info!(
            "most-selected team for gameweek {} scored {} points",
            self.gameweek, valuation.total
        );
        Ok(BaselineResult {
            gameweek: self.gameweek,
            selection,
            valuation,
        })
    }
}
