//! Solver-independent linear models over binary and bounded integer variables.

use std::fmt;

use crate::Assignment;

/// Handle to a variable of a [`LinearModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Binary,
    Integer { min: i32, max: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: String,
    pub kind: VarKind,
    /// Objective coefficient.
    pub objective: f64,
}

/// Sparse linear combination of variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, var: VarId, coefficient: f64) -> Self {
        self.add(var, coefficient);
        self
    }

    pub fn add(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    #[must_use]
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| assignment.value(var) * coefficient)
            .sum()
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEq,
    Equal,
    GreaterEq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LessEq => "<=",
            Self::Equal => "=",
            Self::GreaterEq => ">=",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment, tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(assignment);
        match self.relation {
            Relation::LessEq => lhs <= self.rhs + tolerance,
            Relation::Equal => (lhs - self.rhs).abs() <= tolerance,
            Relation::GreaterEq => lhs >= self.rhs - tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// A linear objective over integer variables plus linear constraints.
///
/// # Example
///
/// ```
/// use gaffer_solver::{LinearExpr, LinearModel, Relation, Sense};
///
/// // pick at most one of two items, preferring the heavier one
/// let mut model = LinearModel::new("choose_one", Sense::Maximize);
/// let a = model.add_binary("a", 3.0);
/// let b = model.add_binary("b", 5.0);
/// model.add_constraint("one", LinearExpr::new().with(a, 1.0).with(b, 1.0), Relation::LessEq, 1.0);
/// assert_eq!(model.num_vars(), 2);
/// assert_eq!(model.num_constraints(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    sense: Sense,
    vars: Vec<VarDef>,
    constraints: Vec<Constraint>,
}

impl LinearModel {
    #[must_use]
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Self {
            name: name.into(),
            sense,
            vars: vec![],
            constraints: vec![],
        }
    }

    pub fn add_binary(&mut self, name: impl Into<String>, objective: f64) -> VarId {
        self.push_var(name.into(), VarKind::Binary, objective)
    }

    pub fn add_integer(
        &mut self,
        name: impl Into<String>,
        objective: f64,
        min: i32,
        max: i32,
    ) -> VarId {
        assert!(min <= max, "integer variable bounds are inverted");
        self.push_var(name.into(), VarKind::Integer { min, max }, objective)
    }

    fn push_var(&mut self, name: String, kind: VarKind, objective: f64) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarDef {
            name,
            kind,
            objective,
        });
        id
    }

    /// Adds `coefficient` to the objective coefficient of `var`.
    pub fn add_objective(&mut self, var: VarId, coefficient: f64) {
        self.vars[var.0].objective += coefficient;
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr,
            relation,
            rhs,
        });
    }

    /// Pins a variable to a constant.
    pub fn fix(&mut self, name: impl Into<String>, var: VarId, value: f64) {
        self.add_constraint(
            name,
            LinearExpr::new().with(var, 1.0),
            Relation::Equal,
            value,
        );
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    #[must_use]
    pub fn vars(&self) -> &[VarDef] {
        &self.vars
    }

    #[must_use]
    pub fn var(&self, var: VarId) -> &VarDef {
        &self.vars[var.0]
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn objective_value(&self, assignment: &Assignment) -> f64 {
        self.vars
            .iter()
            .enumerate()
            .map(|(i, def)| def.objective * assignment.value(VarId(i)))
            .sum()
    }

    /// Names of the constraints violated by `assignment`.
    #[must_use]
    pub fn violated_constraints(&self, assignment: &Assignment, tolerance: f64) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(assignment, tolerance))
            .map(|c| c.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_and_constraint_evaluation() {
        let mut model = LinearModel::new("test", Sense::Maximize);
        let x = model.add_binary("x", 2.0);
        let y = model.add_integer("y", 1.0, 0, 5);
        model.add_objective(x, 1.0);
        model.add_constraint(
            "cap",
            LinearExpr::new().with(x, 4.0).with(y, 1.0),
            Relation::LessEq,
            6.0,
        );
        model.fix("y_fixed", y, 2.0);

        let ok = Assignment::new(vec![1.0, 2.0]);
        assert_eq!(model.objective_value(&ok), 5.0);
        assert!(model.violated_constraints(&ok, 1e-6).is_empty());

        let bad = Assignment::new(vec![1.0, 3.0]);
        assert_eq!(model.violated_constraints(&bad, 1e-6), ["cap", "y_fixed"]);
    }

    #[test]
    fn test_expr_from_iter() {
        let mut model = LinearModel::new("test", Sense::Minimize);
        let vars: Vec<_> = (0..3).map(|i| model.add_binary(format!("v{i}"), 0.0)).collect();
        let expr: LinearExpr = vars.iter().map(|&v| (v, 1.0)).collect();
        assert_eq!(expr.terms().len(), 3);
        assert_eq!(expr.evaluate(&Assignment::new(vec![1.0, 0.0, 1.0])), 2.0);
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::GreaterEq.to_string(), ">=");
    }
}
