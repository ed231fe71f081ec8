//! Domain model for fantasy squad selection.
//!
//! This crate holds the data every other part of the workspace works on:
//!
//! - [`Price`] - fixed-point money in 0.1 units, with the [`selling_price`] profit-sharing rule
//! - [`Player`], [`PlayerRecord`], [`Position`], [`ClubId`] - candidate players
//! - [`Metric`] - typed choice of the objective column
//! - [`PlayerPool`] - the validated candidate table for one decision point
//! - [`RuleSet`], [`Formation`] - squad composition rules passed explicitly to the optimizer
//! - [`synthetic`] - seeded generation of player tables
//!
//! # Data Flow
//!
//! ```text
//! PlayerRecord rows (JSON from the data pipeline)
//!     ↓ Metric accessor + validation
//! PlayerPool
//!     ↓ with RuleSet
//! optimizer (gaffer-optimizer)
//! ```
//!
//! A pool is an immutable snapshot: it is built once per optimization call and
//! only read afterwards, so independent calls never share mutable state.

pub use self::{player::*, pool::*, price::*, rules::*};

mod player;
mod pool;
mod price;
mod rules;
pub mod synthetic;

/// A malformed row in a player table.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PoolError {
    #[display("pool row {row} has an empty player name")]
    EmptyName { row: usize },
    #[display("player '{name}' has non-positive cost {cost}")]
    NonPositiveCost { name: String, cost: Price },
    #[display("player '{name}' has no value for the selected metric")]
    MissingMetric { name: String },
    #[display("player '{name}' has non-finite metric value {value}")]
    NonFiniteMetric { name: String, value: f64 },
}
