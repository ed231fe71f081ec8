//! Scoring a lineup against what actually happened.
//!
//! ```text
//! total = Σ realized(starter)
//!       + realized(captain)        if the captain scored
//!       + realized(vice_captain)   if the captain scored exactly zero
//! ```
//!
//! Bench players never count.

use gaffer_optimizer::Selection;
use log::debug;
use serde::Serialize;

use crate::RealizedPoints;

/// A starting eleven with captaincy, however it was produced.
pub trait Lineup {
    fn starter_names(&self) -> Vec<&str>;
    fn captain_name(&self) -> &str;
    fn vice_captain_name(&self) -> &str;
}

impl Lineup for Selection {
    fn starter_names(&self) -> Vec<&str> {
        self.starters.iter().map(|p| p.name.as_str()).collect()
    }

    fn captain_name(&self) -> &str {
        &self.captain.name
    }

    fn vice_captain_name(&self) -> &str {
        &self.vice_captain.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamValuation {
    /// Realized points of the starters.
    pub base_points: i32,
    /// Extra points from the captaincy.
    pub captain_bonus: i32,
    /// Whether the bonus came from the vice-captain.
    pub vice_stood_in: bool,
    pub total: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TeamValuator;

impl TeamValuator {
    #[must_use]
    pub fn value<L>(&self, lineup: &L, realized: &RealizedPoints) -> TeamValuation
    where
        L: Lineup + ?Sized,
    {
        let base_points: i32 = lineup
            .starter_names()
            .into_iter()
            .map(|name| realized.points(name))
            .sum();
        let captain_points = realized.points(lineup.captain_name());
        let vice_stood_in = captain_points == 0;
        let captain_bonus = if vice_stood_in {
            debug!(
                "captain {} scored nothing, vice-captain {} stands in",
                lineup.captain_name(),
                lineup.vice_captain_name()
            );
            realized.points(lineup.vice_captain_name())
        } else {
            captain_points
        };
        TeamValuation {
            base_points,
            captain_bonus,
            vice_stood_in,
            total: base_points + captain_bonus,
        }
    }
}
