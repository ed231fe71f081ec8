//! Benchmarking squads against realized gameweek results.
//!
//! - [`TeamValuator`] scores any [`Lineup`] on a [`RealizedPoints`] table, with
//!   the captain counted twice and the vice-captain standing in for a captain
//!   who scored nothing
//! - [`MostSelectedBaseline`] builds the squad of the most-owned players of a
//!   gameweek and scores it, as a reference point for optimized squads

use gaffer_core::PoolError;
use gaffer_optimizer::OptimizeError;

pub use self::{baseline::*, realized::*, valuator::*};

mod baseline;
mod realized;
mod valuator;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BaselineError {
    #[display("gameweek {gameweek} has no rows in the history table")]
    EmptyRound { gameweek: u32 },
    #[display("malformed history table: {_0}")]
    Pool(PoolError),
    #[display("failed to pick the most-selected team: {_0}")]
    Optimize(OptimizeError),
}

impl From<PoolError> for BaselineError {
    fn from(err: PoolError) -> Self {
        Self::Pool(err)
    }
}

impl From<OptimizeError> for BaselineError {
    fn from(err: OptimizeError) -> Self {
        Self::Optimize(err)
    }
}
