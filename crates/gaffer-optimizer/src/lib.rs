//! Squad selection and transfer planning as 0/1 integer programs.
//!
//! Two decisions are supported, both driven through [`SquadOptimizer`]:
//!
//! - [`SquadOptimizer::select`] - choose a legal squad, starting lineup,
//!   formation, captain and vice-captain from scratch under a budget
//! - [`SquadOptimizer::plan_transfers`] - starting from a [`HeldSquad`], choose
//!   which players to sell and buy, paying a points penalty for transfers
//!   beyond the free allowance
//!
//! # Pipeline
//!
//! ```text
//! PlayerPool + RuleSet + config
//!     ↓ validation, FeasibilityReport
//! ConstraintModel / TransferPlanner   (LinearModel over binary variables)
//!     ↓ Solver::solve
//! Assignment
//!     ↓ extraction
//! Selection / TransferPlan
//! ```
//!
//! Requests that cannot succeed (too few players at a position, a budget below
//! the cheapest legal squad, conflicting forced sets) are rejected before the
//! solver is invoked. Only an optimal solver status produces a result; every
//! other status is returned as [`OptimizeError::Solver`].
//!
//! # Example
//!
//! ```
//! use gaffer_core::{PlayerPool, Price, RuleSet, Metric, synthetic};
//! use gaffer_optimizer::{SelectionConfig, SquadOptimizer};
//! use gaffer_solver::MicroLpSolver;
//! use rand::SeedableRng as _;
//!
//! let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(1);
//! let records = synthetic::generate_records(&mut rng, 40, 10);
//! let pool = PlayerPool::from_records(&records, Metric::PredictedPoints).unwrap();
//!
//! let optimizer = SquadOptimizer::new(RuleSet::standard(), MicroLpSolver).unwrap();
//! let selection = optimizer
//!     .select(&pool, &SelectionConfig::new(Price::from_tenths(2100)))
//!     .unwrap();
//! assert_eq!(selection.squad.len(), 15);
//! assert_eq!(selection.starters.len(), 11);
//! ```

use gaffer_core::{PlayerPool, Price, RuleSet, RuleSetError};
use gaffer_solver::{Assignment, Solution, Solver};
use log::{info, warn};

pub use self::{
    config::*, constraint_model::*, error::*, extractor::*, feasibility::*, transfer::*,
};

mod config;
mod constraint_model;
mod error;
mod extractor;
mod feasibility;
#[cfg(test)]
mod fixtures;
mod transfer;

/// Entry point tying a rule set to a solver backend.
///
/// The optimizer holds no per-call state; concurrent calls on independent pools
/// are safe. With a [`gaffer_solver::TimeLimited`] backend a call returns once
/// the limit elapses, but the abandoned solve keeps running on its own thread
/// until the backend finishes, so repeated timeouts add up CPU load.
#[derive(Debug, Clone)]
pub struct SquadOptimizer<S> {
    rules: RuleSet,
    solver: S,
}

impl<S> SquadOptimizer<S>
where
    S: Solver,
{
    /// Fails when the rule set is internally inconsistent.
    pub fn new(rules: RuleSet, solver: S) -> Result<Self, RuleSetError> {
        rules.validate()?;
        Ok(Self { rules, solver })
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Diagnoses a pool without solving anything.
    #[must_use]
    pub fn check(&self, pool: &PlayerPool, budget: Option<Price>) -> FeasibilityReport {
        FeasibilityReport::new(pool, &self.rules, budget)
    }

    /// Picks the squad that maximizes expected points within the budget.
    pub fn select(
        &self,
        pool: &PlayerPool,
        config: &SelectionConfig,
    ) -> Result<Selection, OptimizeError> {
        let model = ConstraintModel::build(pool, &self.rules, config)?;
        let assignment = optimal_assignment(model.solve(&self.solver))?;
        let selection = model.extract(&assignment)?;
        info!(
            "selected {} squad costing {} with {:.1} expected points (captain {})",
            selection.formation.name,
            selection.total_cost,
            selection.expected_points,
            selection.captain.name
        );
        Ok(selection)
    }

    /// Finds the best transfers for a held squad.
    ///
    /// Held players missing from `pool` are added to it before the model is
    /// built, so a held player can always be kept even if the data source
    /// dropped the row.
    pub fn plan_transfers(
        &self,
        pool: &PlayerPool,
        held: &HeldSquad,
        config: &TransferConfig,
    ) -> Result<TransferPlan, OptimizeError> {
        let mut pool = pool.clone();
        pool.extend_missing(held.players().iter().map(|h| h.player.clone()))?;

        let planner = TransferPlanner::build(&pool, &self.rules, held, config)?;
        let assignment = optimal_assignment(planner.solve(&self.solver))?;
        let plan = planner.extract(&assignment)?;
        info!(
            "planned {} transfers ({} over the free allowance), net {:.1} expected points, {} left in the bank",
            plan.num_transfers,
            plan.excess_transfers,
            plan.net_expected_points,
            plan.remaining_budget
        );
        Ok(plan)
    }
}

fn optimal_assignment(solution: Solution) -> Result<Assignment, OptimizeError> {
    match solution.assignment {
        Some(assignment) if solution.status.is_optimal() => Ok(assignment),
        _ => {
            warn!("solver finished with status {}", solution.status);
            Err(OptimizeError::Solver {
                status: solution.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use gaffer_core::{Metric, Position, synthetic};
    use gaffer_solver::{LinearModel, MicroLpSolver, SolveStatus};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn optimizer() -> SquadOptimizer<MicroLpSolver> {
        SquadOptimizer::new(RuleSet::standard(), MicroLpSolver).unwrap()
    }

    #[derive(Debug)]
    struct StatusSolver(SolveStatus);

    impl Solver for StatusSolver {
        fn solve(&self, _model: &LinearModel) -> Solution {
            Solution::failed(self.0)
        }
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let mut rules = RuleSet::standard();
        rules.max_per_club = 0;
        assert!(SquadOptimizer::new(rules, MicroLpSolver).is_err());
    }

    #[test]
    fn test_selects_whole_exact_pool() {
        let pool = fixtures::base_pool();
        let selection = optimizer()
            .select(&pool, &SelectionConfig::new(Price::from_tenths(1000)))
            .unwrap();
        fixtures::assert_selection_is_legal(
            &selection,
            &RuleSet::standard(),
            Price::from_tenths(1000),
        );
        assert_eq!(selection.squad, pool.players());
        assert!((selection.expected_points - fixtures::BASE_EXPECTED_POINTS).abs() < 1e-6);
    }

    #[test]
    fn test_budget_shortfall_skips_solver() {
        let solver = fixtures::CountingSolver::default();
        let optimizer = SquadOptimizer::new(RuleSet::standard(), &solver).unwrap();
        let err = optimizer
            .select(&fixtures::base_pool(), &SelectionConfig::new(Price::from_tenths(874)))
            .unwrap_err();
        assert_eq!(
            err,
            OptimizeError::Infeasible(Infeasibility::BudgetShortfall {
                minimum_cost: Price::from_tenths(875),
                budget: Price::from_tenths(874),
                shortfall: Price::from_tenths(1),
            })
        );
        assert_eq!(solver.calls(), 0);
    }

    #[test]
    fn test_club_cap_excludes_fourth_player() {
        // FWD Z is the best player by far but club 1 already supplies three
        let pool = fixtures::pool_with(vec![fixtures::player(
            "FWD Z",
            40,
            20.0,
            Position::Forward,
            1,
        )]);
        let selection = optimizer()
            .select(&pool, &SelectionConfig::new(Price::from_tenths(1000)))
            .unwrap();
        fixtures::assert_selection_is_legal(
            &selection,
            &RuleSet::standard(),
            Price::from_tenths(1000),
        );
        assert!(!selection.contains("FWD Z"));
    }

    #[test]
    fn test_budget_decides_upgrade() {
        let pool = fixtures::pool_with(vec![fixtures::player(
            "MID Y",
            150,
            12.0,
            Position::Midfielder,
            6,
        )]);

        let tight = optimizer()
            .select(&pool, &SelectionConfig::new(Price::from_tenths(924)))
            .unwrap();
        assert!(!tight.contains("MID Y"));
        assert!((tight.expected_points - fixtures::BASE_EXPECTED_POINTS).abs() < 1e-6);

        let enough = optimizer()
            .select(&pool, &SelectionConfig::new(Price::from_tenths(925)))
            .unwrap();
        assert!(enough.contains("MID Y"));
        assert!(!enough.contains("MID A"));
        assert_eq!(enough.captain.name, "MID Y");
        assert_eq!(enough.total_cost, Price::from_tenths(925));
        assert!((enough.expected_points - 75.5).abs() < 1e-6);
    }

    #[test]
    fn test_pinned_formation() {
        let config = SelectionConfig::new(Price::from_tenths(1000)).with_formation("5-3-2");
        let selection = optimizer().select(&fixtures::base_pool(), &config).unwrap();
        assert_eq!(selection.formation.name, "5-3-2");
        assert_eq!(
            selection.starter_counts(),
            gaffer_core::PositionTable::new(1, 5, 3, 2)
        );
        assert!((selection.expected_points - 65.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_optimal_status_is_an_error() {
        for status in [
            SolveStatus::Infeasible,
            SolveStatus::Unbounded,
            SolveStatus::NotSolved,
        ] {
            let optimizer = SquadOptimizer::new(RuleSet::standard(), StatusSolver(status)).unwrap();
            let err = optimizer
                .select(&fixtures::base_pool(), &SelectionConfig::new(Price::from_tenths(1000)))
                .unwrap_err();
            assert_eq!(err, OptimizeError::Solver { status });
        }
    }

    #[test]
    fn test_check_reports_supply() {
        let report = optimizer().check(&fixtures::base_pool(), Some(Price::from_tenths(900)));
        assert!(report.is_feasible());
        assert_eq!(report.positions.len(), 4);
    }

    #[test]
    fn test_random_pools_are_solved_optimally() {
        let rules = RuleSet::standard();
        let budget = Price::from_tenths(1500);
        let mut solved = 0;
        for seed in 0..3 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let records = synthetic::generate_records(&mut rng, 30, 8);
            let pool = PlayerPool::from_records(&records, Metric::PredictedPoints).unwrap();
            let selection = match optimizer().select(&pool, &SelectionConfig::new(budget)) {
                Ok(selection) => selection,
                Err(OptimizeError::Infeasible(_) | OptimizeError::Solver { .. }) => continue,
                Err(err) => panic!("unexpected error: {err}"),
            };
            solved += 1;
            fixtures::assert_selection_is_legal(&selection, &rules, budget);
            // the lineup must be the best one available inside the chosen squad
            let best = fixtures::best_lineup_value(&selection.squad, &rules);
            assert!((selection.expected_points - best).abs() < 1e-6);
        }
        assert!(solved > 0);
    }

    #[test]
    fn test_repeated_solves_agree_on_totals() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let records = synthetic::generate_records(&mut rng, 40, 10);
        let pool = PlayerPool::from_records(&records, Metric::PredictedPoints).unwrap();
        let config = SelectionConfig::new(Price::from_tenths(1500));
        let first = optimizer().select(&pool, &config).unwrap();
        let second = optimizer().select(&pool, &config).unwrap();
        assert!((first.expected_points - second.expected_points).abs() < 1e-9);
    }
}
