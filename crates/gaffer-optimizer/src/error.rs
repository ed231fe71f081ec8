use gaffer_core::{PoolError, Position, Price};
use gaffer_solver::SolveStatus;

/// A request rejected before any model is built.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    #[display("malformed player table: {_0}")]
    Pool(PoolError),
    #[display("unknown formation '{name}', available formations: {available:?}")]
    UnknownFormation {
        name: String,
        available: Vec<String>,
    },
    #[display("players cannot be both removed and kept: {names:?}")]
    ConflictingForcedSets { names: Vec<String> },
    #[display("held squad has {actual} players, expected {expected}")]
    HeldSquadSize { expected: usize, actual: usize },
    #[display("player '{name}' appears more than once in the held squad")]
    DuplicateHeldPlayer { name: String },
    #[display("held player '{name}' is not in the player pool")]
    HeldPlayerNotInPool { name: String },
    #[display("transfer penalty {value} must be finite and non-negative")]
    InvalidPenalty { value: f64 },
}

impl From<PoolError> for InputError {
    fn from(err: PoolError) -> Self {
        Self::Pool(err)
    }
}

/// A request that cannot have any solution, diagnosed without the solver.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Infeasibility {
    #[display("need {required} {position} players but only {available} are available")]
    InsufficientPlayers {
        position: Position,
        required: usize,
        available: usize,
    },
    #[display(
        "cheapest possible squad costs {minimum_cost} but the budget is {budget} (short by {shortfall})"
    )]
    BudgetShortfall {
        minimum_cost: Price,
        budget: Price,
        shortfall: Price,
    },
    #[display("{forced} forced removals exceed the limit of {max_transfers} transfers")]
    TooManyForcedRemovals { forced: usize, max_transfers: usize },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum OptimizeError {
    #[display("invalid input: {_0}")]
    Input(InputError),
    #[display("infeasible request: {_0}")]
    Infeasible(Infeasibility),
    #[display("solver finished with status {status}")]
    Solver { status: SolveStatus },
    #[display("solver returned an inconsistent assignment: {detail}")]
    MalformedAssignment { detail: String },
}

impl From<InputError> for OptimizeError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<Infeasibility> for OptimizeError {
    fn from(err: Infeasibility) -> Self {
        Self::Infeasible(err)
    }
}

impl From<PoolError> for OptimizeError {
    fn from(err: PoolError) -> Self {
        Self::Input(InputError::Pool(err))
    }
}
