//! Integer-programming capability consumed by the squad optimizer.
//!
//! The optimizer never talks to a concrete solver. It builds a [`LinearModel`]
//! (binary and bounded integer variables, linear constraints, linear objective)
//! and hands it to anything implementing [`Solver`]:
//!
//! ```text
//! LinearModel ──▶ Solver::solve ──▶ Solution { status, assignment }
//! ```
//!
//! Backends:
//!
//! - [`MicroLpSolver`] - pure-Rust simplex with branch-and-bound (`microlp`)
//! - [`TimeLimited`] - wraps any backend and reports [`SolveStatus::NotSolved`] once a
//!   wall-clock limit elapses
//!
//! # Example
//!
//! ```
//! use gaffer_solver::{LinearExpr, LinearModel, MicroLpSolver, Relation, Sense, Solver};
//!
//! let mut model = LinearModel::new("knapsack", Sense::Maximize);
//! let a = model.add_binary("a", 4.0);
//! let b = model.add_binary("b", 3.0);
//! let c = model.add_binary("c", 2.0);
//! let weight = LinearExpr::new().with(a, 3.0).with(b, 2.0).with(c, 2.0);
//! model.add_constraint("weight", weight, Relation::LessEq, 4.0);
//!
//! let solution = MicroLpSolver.solve(&model);
//! assert!(solution.status.is_optimal());
//! let assignment = solution.assignment.unwrap();
//! assert!(!assignment.is_set(a) && assignment.is_set(b) && assignment.is_set(c));
//! ```
//!
//! # Determinism
//!
//! When several assignments reach the same objective value, which one comes back
//! is up to the backend. Callers should compare objective totals, not the chosen
//! variables, across solves.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::{micro_lp::*, model::*, time_limit::*};

mod micro_lp;
mod model;
mod time_limit;

/// Outcome category of a solve.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    NotSolved,
}

/// A value for every variable of a model, indexed by [`VarId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Value of `var`; variables the backend did not report read as zero.
    #[must_use]
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }

    /// Whether a binary variable is set.
    #[must_use]
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) > 0.5
    }

    /// Value of an integer variable, rounded to the nearest integer.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn integer(&self, var: VarId) -> i64 {
        self.value(var).round() as i64
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolveStatus,
    /// Present exactly when `status` is [`SolveStatus::Optimal`].
    pub assignment: Option<Assignment>,
    pub objective: Option<f64>,
}

impl Solution {
    #[must_use]
    pub fn optimal(assignment: Assignment, objective: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            assignment: Some(assignment),
            objective: Some(objective),
        }
    }

    #[must_use]
    pub fn failed(status: SolveStatus) -> Self {
        debug_assert!(!status.is_optimal());
        Self {
            status,
            assignment: None,
            objective: None,
        }
    }
}

/// A 0/1 integer-programming backend.
///
/// Implementations must return [`SolveStatus::Optimal`] only with an assignment
/// that satisfies every constraint of the model and maximizes (or minimizes)
/// its objective.
pub trait Solver: fmt::Debug + Send + Sync {
    fn solve(&self, model: &LinearModel) -> Solution;
}

impl<S> Solver for &S
where
    S: Solver + ?Sized,
{
    fn solve(&self, model: &LinearModel) -> Solution {
        (**self).solve(model)
    }
}

impl<S> Solver for Box<S>
where
    S: Solver + ?Sized,
{
    fn solve(&self, model: &LinearModel) -> Solution {
        (**self).solve(model)
    }
}
