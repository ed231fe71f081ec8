//! Player records and the typed views built from them.
//!
//! - [`PlayerRecord`] - one row of the normalized player table handed over by the data
//!   pipeline. It carries every candidate objective column.
//! - [`Player`] - an immutable snapshot used by one optimization call, with the objective
//!   value already resolved through a [`Metric`] accessor.

use std::{fmt, ops};

use serde::{Deserialize, Serialize};

use crate::Price;

/// Playing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(alias = "GK", alias = "GKP")]
    Goalkeeper,
    #[serde(alias = "DEF")]
    Defender,
    #[serde(alias = "MID")]
    Midfielder,
    #[serde(alias = "FWD")]
    Forward,
}

impl Position {
    pub const ALL: [Self; 4] = [
        Self::Goalkeeper,
        Self::Defender,
        Self::Midfielder,
        Self::Forward,
    ];

    /// Outfield positions, whose starting counts are set by the formation.
    pub const OUTFIELD: [Self; 3] = [Self::Defender, Self::Midfielder, Self::Forward];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Defender => "Defender",
            Self::Midfielder => "Midfielder",
            Self::Forward => "Forward",
        }
    }

    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::Defender => "DEF",
            Self::Midfielder => "MID",
            Self::Forward => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value for each of the four positions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionTable<T> {
    pub goalkeeper: T,
    pub defender: T,
    pub midfielder: T,
    pub forward: T,
}

impl<T> PositionTable<T> {
    #[must_use]
    pub const fn new(goalkeeper: T, defender: T, midfielder: T, forward: T) -> Self {
        Self {
            goalkeeper,
            defender,
            midfielder,
            forward,
        }
    }

    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        Self {
            goalkeeper: f(Position::Goalkeeper),
            defender: f(Position::Defender),
            midfielder: f(Position::Midfielder),
            forward: f(Position::Forward),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        Position::ALL.into_iter().map(|p| (p, &self[p]))
    }
}

impl<T> ops::Index<Position> for PositionTable<T> {
    type Output = T;

    fn index(&self, position: Position) -> &T {
        match position {
            Position::Goalkeeper => &self.goalkeeper,
            Position::Defender => &self.defender,
            Position::Midfielder => &self.midfielder,
            Position::Forward => &self.forward,
        }
    }
}

impl<T> ops::IndexMut<Position> for PositionTable<T> {
    fn index_mut(&mut self, position: Position) -> &mut T {
        match position {
            Position::Goalkeeper => &mut self.goalkeeper,
            Position::Defender => &mut self.defender,
            Position::Midfielder => &mut self.midfielder,
            Position::Forward => &mut self.forward,
        }
    }
}

/// Club identifier used by the per-club concentration cap.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ClubId(pub u32);

/// One row of the normalized player table.
///
/// Only `name`, `cost`, `position` and `club` are required. The remaining
/// columns are candidate objectives or availability information and may be
/// absent depending on the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub cost: Price,
    pub position: Position,
    pub club: ClubId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_per_game: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_by_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance_of_playing_next_round: Option<u8>,
    /// Price paid for a held player; only meaningful in a held-squad table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Price>,
}

impl PlayerRecord {
    /// Creates a record with all optional columns empty.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: Price, position: Position, club: ClubId) -> Self {
        Self {
            name: name.into(),
            cost,
            position,
            club,
            predicted_points: None,
            points_per_game: None,
            total_points: None,
            form: None,
            selected_by_percent: None,
            minutes: None,
            chance_of_playing_next_round: None,
            purchase_price: None,
        }
    }
}

/// The objective column used to score players.
///
/// Each variant maps to a typed accessor on [`PlayerRecord`], so the choice of
/// objective is checked at compile time instead of naming a column at runtime.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, Serialize, Deserialize,
)]
pub enum Metric {
    #[default]
    PredictedPoints,
    PointsPerGame,
    TotalPoints,
    Form,
    SelectedBy,
}

impl Metric {
    #[must_use]
    pub fn accessor(self) -> fn(&PlayerRecord) -> Option<f64> {
        match self {
            Self::PredictedPoints => |r: &PlayerRecord| r.predicted_points,
            Self::PointsPerGame => |r: &PlayerRecord| r.points_per_game,
            Self::TotalPoints => |r: &PlayerRecord| r.total_points,
            Self::Form => |r: &PlayerRecord| r.form,
            Self::SelectedBy => |r: &PlayerRecord| r.selected_by_percent,
        }
    }

    #[must_use]
    pub fn value(self, record: &PlayerRecord) -> Option<f64> {
        (self.accessor())(record)
    }

    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::PredictedPoints => "predicted_points",
            Self::PointsPerGame => "points_per_game",
            Self::TotalPoints => "total_points",
            Self::Form => "form",
            Self::SelectedBy => "selected_by_percent",
        }
    }
}

/// A candidate player as seen by one optimization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub cost: Price,
    pub metric: f64,
    pub position: Position,
    pub club: ClubId,
}

impl Player {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        cost: Price,
        metric: f64,
        position: Position,
        club: ClubId,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            metric,
            position,
            club,
        }
    }
}
