//! Cheap checks that rule out impossible requests before a model is built.
//!
//! The solver would eventually report these cases as infeasible too, but only
//! as a bare status. The report names the position that is short of players or
//! the amount of money that is missing.

use gaffer_core::{PlayerPool, Position, Price, RuleSet};
use log::debug;
use serde::Serialize;

use crate::Infeasibility;

/// How many players a position needs and how many the pool offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionSupply {
    pub position: Position,
    pub required: usize,
    pub available: usize,
    /// Cost of the cheapest `required` players, when there are enough of them.
    pub cheapest_cost: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeasibilityReport {
    pub positions: Vec<PositionSupply>,
    /// Lower bound on the cost of any legal squad, ignoring the club cap.
    pub minimum_squad_cost: Option<Price>,
    pub budget: Option<Price>,
}

impl FeasibilityReport {
    /// Inspects `pool` against `rules`; `budget` is skipped when `None`.
    #[must_use]
    pub fn new(pool: &PlayerPool, rules: &RuleSet, budget: Option<Price>) -> Self {
        let positions: Vec<PositionSupply> = Position::ALL
            .into_iter()
            .map(|position| {
                let required = rules.position_quotas[position];
                let mut costs: Vec<Price> = pool.by_position(position).map(|p| p.cost).collect();
                costs.sort_unstable();
                let cheapest_cost =
                    (costs.len() >= required).then(|| costs[..required].iter().copied().sum());
                PositionSupply {
                    position,
                    required,
                    available: costs.len(),
                    cheapest_cost,
                }
            })
            .collect();
        let minimum_squad_cost = positions.iter().map(|s| s.cheapest_cost).sum();
        let report = Self {
            positions,
            minimum_squad_cost,
            budget,
        };
        debug!("feasibility: {report:?}");
        report
    }

    /// First reason no legal squad can exist, if any.
    pub fn check(&self) -> Result<(), Infeasibility> {
        if let Some(short) = self.positions.iter().find(|s| s.available < s.required) {
            return Err(Infeasibility::InsufficientPlayers {
                position: short.position,
                required: short.required,
                available: short.available,
            });
        }
        match (self.minimum_squad_cost, self.budget) {
            (Some(minimum_cost), Some(budget)) if minimum_cost > budget => {
                Err(Infeasibility::BudgetShortfall {
                    minimum_cost,
                    budget,
                    shortfall: minimum_cost - budget,
                })
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.check().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_exact_squad_is_feasible_at_its_cost() {
        let pool = fixtures::base_pool();
        let rules = RuleSet::standard();
        let report = FeasibilityReport::new(&pool, &rules, Some(Price::from_tenths(875)));
        assert_eq!(report.minimum_squad_cost, Some(Price::from_tenths(875)));
        assert!(report.is_feasible());
    }

    #[test]
    fn test_budget_shortfall() {
        let pool = fixtures::base_pool();
        let rules = RuleSet::standard();
        let report = FeasibilityReport::new(&pool, &rules, Some(Price::from_tenths(874)));
        assert_eq!(
            report.check(),
            Err(Infeasibility::BudgetShortfall {
                minimum_cost: Price::from_tenths(875),
                budget: Price::from_tenths(874),
                shortfall: Price::from_tenths(1),
            })
        );
    }

    #[test]
    fn test_missing_goalkeeper() {
        let players = fixtures::base_squad()
            .into_iter()
            .filter(|p| p.name != "GK B")
            .collect();
        let pool = PlayerPool::from_players(players).unwrap();
        let report = FeasibilityReport::new(&pool, &RuleSet::standard(), None);
        assert_eq!(report.minimum_squad_cost, None);
        assert_eq!(
            report.check(),
            Err(Infeasibility::InsufficientPlayers {
                position: Position::Goalkeeper,
                required: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_cheapest_players_per_position() {
        let mut players = fixtures::base_squad();
        players.push(fixtures::player("DEF Cheap", 35, 1.0, Position::Defender, 6));
        let pool = PlayerPool::from_players(players).unwrap();
        let report = FeasibilityReport::new(&pool, &RuleSet::standard(), None);
        let defenders = &report.positions[1];
        assert_eq!(defenders.available, 6);
        // 35 + 40 + 45 + 45 + 50
        assert_eq!(defenders.cheapest_cost, Some(Price::from_tenths(215)));
    }
}
