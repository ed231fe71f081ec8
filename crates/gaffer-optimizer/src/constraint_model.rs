//! Translation of the squad rules into a 0/1 integer program.
//!
//! Every pool player `i` gets four binary variables:
//!
//! ```text
//! in_squad[i]  - player is one of the 15
//! starts[i]    - player is in the starting XI       (starts  <= in_squad)
//! captain[i]   - player's points count twice        (captain <= starts)
//! vice[i]      - stand-in captain                   (vice    <= starts, captain + vice <= 1)
//! ```
//!
//! plus one binary per allowed formation. The objective is
//! `Σ metric·starts + Σ metric·captain`, so the captain's metric is counted
//! twice. Squad composition, club caps, formation shape and the budget are
//! linear constraints over these variables.

use std::collections::BTreeMap;

use gaffer_core::{ClubId, Formation, PlayerPool, Position, Price, RuleSet};
use gaffer_solver::{
    Assignment, LinearExpr, LinearModel, Relation, Sense, Solution, Solver, VarId,
};
use log::debug;

use crate::{FeasibilityReport, InputError, OptimizeError, Selection, SelectionConfig};

/// Decision variables of one pool player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerVars {
    pub in_squad: VarId,
    pub starts: VarId,
    pub captain: VarId,
    pub vice: VarId,
}

/// The squad-selection program for one pool, ready to solve.
#[derive(Debug, Clone)]
pub struct ConstraintModel<'a> {
    pool: &'a PlayerPool,
    rules: &'a RuleSet,
    formations: Vec<&'a Formation>,
    model: LinearModel,
    players: Vec<PlayerVars>,
    formation_vars: Vec<VarId>,
}

impl<'a> ConstraintModel<'a> {
    /// Builds the full selection model, budget included.
    ///
    /// Unknown formations and requests the feasibility precheck rules out fail
    /// here, before anything is handed to a solver.
    pub fn build(
        pool: &'a PlayerPool,
        rules: &'a RuleSet,
        config: &SelectionConfig,
    ) -> Result<Self, OptimizeError> {
        let formations = resolve_formations(rules, config.formation.as_deref())?;
        FeasibilityReport::new(pool, rules, Some(config.budget)).check()?;

        let mut this = Self::squad_model("squad_selection", pool, rules, formations);
        this.add_budget_constraint(config.budget);
        debug!(
            "selection model: {} players, {} variables, {} constraints",
            pool.len(),
            this.model.num_vars(),
            this.model.num_constraints()
        );
        Ok(this)
    }

    /// Squad, lineup and captaincy rules without any money constraint.
    pub(crate) fn squad_model(
        name: &str,
        pool: &'a PlayerPool,
        rules: &'a RuleSet,
        formations: Vec<&'a Formation>,
    ) -> Self {
        let mut model = LinearModel::new(name, Sense::Maximize);
        let players: Vec<PlayerVars> = pool
            .players()
            .iter()
            .enumerate()
            .map(|(i, player)| PlayerVars {
                in_squad: model.add_binary(format!("in_squad[{i}]"), 0.0),
                starts: model.add_binary(format!("starts[{i}]"), player.metric),
                captain: model.add_binary(format!("captain[{i}]"), player.metric),
                vice: model.add_binary(format!("vice[{i}]"), 0.0),
            })
            .collect();
        let formation_vars: Vec<VarId> = formations
            .iter()
            .map(|f| model.add_binary(format!("formation[{}]", f.name), 0.0))
            .collect();

        let mut this = Self {
            pool,
            rules,
            formations,
            model,
            players,
            formation_vars,
        };
        this.add_squad_constraints();
        this.add_lineup_constraints();
        this.add_captaincy_constraints();
        this
    }

    fn sum_where<F>(&self, var: fn(&PlayerVars) -> VarId, mut filter: F) -> LinearExpr
    where
        F: FnMut(usize) -> bool,
    {
        self.players
            .iter()
            .enumerate()
            .filter(|&(i, _)| filter(i))
            .map(|(_, vars)| (var(vars), 1.0))
            .collect()
    }

    fn add_squad_constraints(&mut self) {
        let pool = self.pool;
        let rules = self.rules;

        let everyone = self.sum_where(|v| v.in_squad, |_| true);
        self.model.add_constraint(
            "squad_size",
            everyone,
            Relation::Equal,
            count(rules.squad_size),
        );

        for position in Position::ALL {
            let expr = self.sum_where(|v| v.in_squad, |i| pool.players()[i].position == position);
            self.model.add_constraint(
                format!("quota[{}]", position.short_name()),
                expr,
                Relation::Equal,
                count(rules.position_quotas[position]),
            );
        }

        let mut clubs: BTreeMap<ClubId, LinearExpr> = BTreeMap::new();
        for (player, vars) in pool.players().iter().zip(&self.players) {
            clubs.entry(player.club).or_default().add(vars.in_squad, 1.0);
        }
        for (club, expr) in clubs {
            self.model.add_constraint(
                format!("club_cap[{club}]"),
                expr,
                Relation::LessEq,
                count(rules.max_per_club),
            );
        }
    }

    fn add_lineup_constraints(&mut self) {
        let pool = self.pool;
        let rules = self.rules;

        let everyone = self.sum_where(|v| v.starts, |_| true);
        self.model.add_constraint(
            "starting_size",
            everyone,
            Relation::Equal,
            count(rules.starting_size),
        );

        for (i, vars) in self.players.iter().enumerate() {
            self.model.add_constraint(
                format!("starts_in_squad[{i}]"),
                LinearExpr::new().with(vars.starts, 1.0).with(vars.in_squad, -1.0),
                Relation::LessEq,
                0.0,
            );
        }

        let goalkeepers =
            self.sum_where(|v| v.starts, |i| pool.players()[i].position == Position::Goalkeeper);
        self.model.add_constraint(
            "starting_goalkeepers",
            goalkeepers,
            Relation::Equal,
            count(rules.starting_goalkeepers),
        );

        let one_formation: LinearExpr = self.formation_vars.iter().map(|&f| (f, 1.0)).collect();
        self.model
            .add_constraint("one_formation", one_formation, Relation::Equal, 1.0);

        // starters at each outfield position equal the chosen formation's count
        for position in Position::OUTFIELD {
            let mut expr =
                self.sum_where(|v| v.starts, |i| pool.players()[i].position == position);
            for (formation, &var) in self.formations.iter().zip(&self.formation_vars) {
                expr.add(var, -count(formation.outfield_count(position)));
            }
            self.model.add_constraint(
                format!("formation_shape[{}]", position.short_name()),
                expr,
                Relation::Equal,
                0.0,
            );
        }
    }

    fn add_captaincy_constraints(&mut self) {
        let captains = self.sum_where(|v| v.captain, |_| true);
        self.model
            .add_constraint("one_captain", captains, Relation::Equal, 1.0);
        let vices = self.sum_where(|v| v.vice, |_| true);
        self.model
            .add_constraint("one_vice", vices, Relation::Equal, 1.0);

        for (i, vars) in self.players.iter().enumerate() {
            self.model.add_constraint(
                format!("captain_starts[{i}]"),
                LinearExpr::new().with(vars.captain, 1.0).with(vars.starts, -1.0),
                Relation::LessEq,
                0.0,
            );
            self.model.add_constraint(
                format!("vice_starts[{i}]"),
                LinearExpr::new().with(vars.vice, 1.0).with(vars.starts, -1.0),
                Relation::LessEq,
                0.0,
            );
            self.model.add_constraint(
                format!("captain_not_vice[{i}]"),
                LinearExpr::new().with(vars.captain, 1.0).with(vars.vice, 1.0),
                Relation::LessEq,
                1.0,
            );
        }
    }

    fn add_budget_constraint(&mut self, budget: Price) {
        let expr: LinearExpr = self
            .pool
            .players()
            .iter()
            .zip(&self.players)
            .map(|(player, vars)| (vars.in_squad, tenths(player.cost)))
            .collect();
        self.model
            .add_constraint("budget", expr, Relation::LessEq, tenths(budget));
    }

    pub fn solve<S>(&self, solver: &S) -> Solution
    where
        S: Solver + ?Sized,
    {
        solver.solve(&self.model)
    }

    /// Reads a [`Selection`] out of an optimal assignment of this model.
    pub fn extract(&self, assignment: &Assignment) -> Result<Selection, OptimizeError> {
        Selection::extract(self, assignment)
    }

    #[must_use]
    pub fn linear_model(&self) -> &LinearModel {
        &self.model
    }

    #[must_use]
    pub fn pool(&self) -> &'a PlayerPool {
        self.pool
    }

    #[must_use]
    pub fn player_vars(&self) -> &[PlayerVars] {
        &self.players
    }

    pub(crate) fn formations(&self) -> impl Iterator<Item = (&'a Formation, VarId)> + '_ {
        self.formations
            .iter()
            .copied()
            .zip(self.formation_vars.iter().copied())
    }

    pub(crate) fn linear_model_mut(&mut self) -> &mut LinearModel {
        &mut self.model
    }
}

/// The formations a solve may choose from: all of them, or the pinned one.
pub(crate) fn resolve_formations<'a>(
    rules: &'a RuleSet,
    pinned: Option<&str>,
) -> Result<Vec<&'a Formation>, InputError> {
    match pinned {
        None => Ok(rules.formations.iter().collect()),
        Some(name) => {
            let formation = rules
                .formation(name)
                .ok_or_else(|| InputError::UnknownFormation {
                    name: name.to_owned(),
                    available: rules.formation_names(),
                })?;
            debug!("formation pinned to {}", formation.name);
            Ok(vec![formation])
        }
    }
}

#[expect(clippy::cast_precision_loss)]
pub(crate) fn count(n: usize) -> f64 {
    n as f64
}

/// Money enters the model in tenths so that coefficients stay integral.
pub(crate) fn tenths(price: Price) -> f64 {
    f64::from(price.tenths())
}

#[cfg(test)]
mod tests {
    use gaffer_solver::MicroLpSolver;

    use super::*;
    use crate::fixtures;

    #[test]
    fn test_model_dimensions() {
        let pool = fixtures::base_pool();
        let rules = RuleSet::standard();
        let model =
            ConstraintModel::build(&pool, &rules, &SelectionConfig::new(Price::from_tenths(1000)))
                .unwrap();
        let lp = model.linear_model();
        // 4 per player plus one per formation
        assert_eq!(lp.num_vars(), 15 * 4 + 5);
        assert_eq!(model.player_vars().len(), 15);
        assert!(lp.constraints().iter().any(|c| c.name == "budget"));
        assert!(lp.constraints().iter().any(|c| c.name == "club_cap[5]"));
    }

    #[test]
    fn test_optimal_assignment_satisfies_every_constraint() {
        let pool = fixtures::base_pool();
        let rules = RuleSet::standard();
        let model =
            ConstraintModel::build(&pool, &rules, &SelectionConfig::new(Price::from_tenths(1000)))
                .unwrap();
        let solution = model.solve(&MicroLpSolver);
        let assignment = solution.assignment.unwrap();
        assert!(model.linear_model().violated_constraints(&assignment, 1e-6).is_empty());
        assert!((solution.objective.unwrap() - fixtures::BASE_EXPECTED_POINTS).abs() < 1e-6);
    }

    #[test]
    fn test_pinned_formation_creates_one_variable() {
        let pool = fixtures::base_pool();
        let rules = RuleSet::standard();
        let config = SelectionConfig::new(Price::from_tenths(1000)).with_formation("4-4-2");
        let model = ConstraintModel::build(&pool, &rules, &config).unwrap();
        assert_eq!(model.linear_model().num_vars(), 15 * 4 + 1);
        let names: Vec<&str> = model.formations().map(|(f, _)| f.name.as_str()).collect();
        assert_eq!(names, ["4-4-2"]);
    }

    #[test]
    fn test_unknown_formation() {
        let pool = fixtures::base_pool();
        let rules = RuleSet::standard();
        let config = SelectionConfig::new(Price::from_tenths(1000)).with_formation("2-5-3");
        let err = ConstraintModel::build(&pool, &rules, &config).unwrap_err();
        assert!(matches!(
            err,
            OptimizeError::Input(InputError::UnknownFormation { ref name, ref available })
                if name == "2-5-3" && available.len() == 5
        ));
    }
}
