use log::{debug, warn};
use microlp::{ComparisonOp, OptimizationDirection, Problem};

use crate::{Assignment, LinearModel, Relation, Sense, Solution, SolveStatus, Solver, VarKind};

/// Backend built on the pure-Rust `microlp` simplex and branch-and-bound.
///
/// Suitable for pools of a few hundred players. The search is exact, so the
/// reported objective is the true optimum of the model.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroLpSolver;

impl Solver for MicroLpSolver {
    fn solve(&self, model: &LinearModel) -> Solution {
        debug!(
            "solving '{}' with microlp: {} variables, {} constraints",
            model.name(),
            model.num_vars(),
            model.num_constraints()
        );

        let direction = match model.sense() {
            Sense::Maximize => OptimizationDirection::Maximize,
            Sense::Minimize => OptimizationDirection::Minimize,
        };
        let mut problem = Problem::new(direction);
        let vars: Vec<microlp::Variable> = model
            .vars()
            .iter()
            .map(|def| match def.kind {
                VarKind::Binary => problem.add_binary_var(def.objective),
                VarKind::Integer { min, max } => problem.add_integer_var(def.objective, (min, max)),
            })
            .collect();

        for constraint in model.constraints() {
            let mut expr = microlp::LinearExpr::empty();
            for &(var, coefficient) in constraint.expr.terms() {
                expr.add(vars[var.index()], coefficient);
            }
            let op = match constraint.relation {
                Relation::LessEq => ComparisonOp::Le,
                Relation::Equal => ComparisonOp::Eq,
                Relation::GreaterEq => ComparisonOp::Ge,
            };
            problem.add_constraint(expr, op, constraint.rhs);
        }

        match problem.solve() {
            Ok(solution) => {
                let values = vars.iter().map(|&var| solution[var]).collect();
                let assignment = Assignment::new(values);
                let objective = model.objective_value(&assignment);
                Solution::optimal(assignment, objective)
            }
            Err(microlp::Error::Infeasible) => Solution::failed(SolveStatus::Infeasible),
            Err(microlp::Error::Unbounded) => Solution::failed(SolveStatus::Unbounded),
            Err(err) => {
                warn!("microlp failed on '{}': {err}", model.name());
                Solution::failed(SolveStatus::NotSolved)
            }
        }
    }
}
