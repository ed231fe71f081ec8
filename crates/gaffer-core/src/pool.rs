//! The validated candidate table for one decision point.

use std::collections::HashSet;

use log::{debug, warn};

use crate::{Metric, Player, PlayerRecord, PoolError, Position, PositionTable};

/// Validated, de-duplicated set of candidate players.
///
/// Players keep the order in which they were supplied; that order is the stable
/// player index used by the optimizer and the tie-break of the squad ranking.
///
/// # Example
///
/// ```
/// use gaffer_core::{ClubId, Metric, PlayerPool, PlayerRecord, Position, Price};
///
/// let mut record = PlayerRecord::new("Raya", Price::from_tenths(55), Position::Goalkeeper, ClubId(1));
/// record.predicted_points = Some(4.5);
///
/// let pool = PlayerPool::from_records(&[record], Metric::PredictedPoints).unwrap();
/// assert_eq!(pool.len(), 1);
/// assert_eq!(pool.players()[0].metric, 4.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPool {
    players: Vec<Player>,
}

impl PlayerPool {
    /// Builds a pool, reading the objective through a [`Metric`].
    pub fn from_records(records: &[PlayerRecord], metric: Metric) -> Result<Self, PoolError> {
        Self::from_records_with(records, metric.accessor())
    }

    /// Builds a pool, reading the objective through any accessor.
    ///
    /// Fails on the first malformed row. Later rows repeating an earlier name are
    /// dropped.
    pub fn from_records_with<F>(records: &[PlayerRecord], accessor: F) -> Result<Self, PoolError>
    where
        F: Fn(&PlayerRecord) -> Option<f64>,
    {
        let players = records
            .iter()
            .map(|record| {
                let metric = accessor(record).ok_or_else(|| PoolError::MissingMetric {
                    name: record.name.clone(),
                })?;
                Ok(Player::new(
                    record.name.clone(),
                    record.cost,
                    metric,
                    record.position,
                    record.club,
                ))
            })
            .collect::<Result<Vec<_>, PoolError>>()?;
        Self::from_players(players)
    }

    pub fn from_players(players: Vec<Player>) -> Result<Self, PoolError> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(players.len());
        for (row, player) in players.into_iter().enumerate() {
            validate_player(row, &player)?;
            if !seen.insert(player.name.clone()) {
                warn!("dropping duplicate pool row {row} for player '{}'", player.name);
                continue;
            }
            kept.push(player);
        }
        debug!("player pool built with {} players", kept.len());
        Ok(Self { players: kept })
    }

    /// Appends players whose names are not yet present, keeping existing rows.
    pub fn extend_missing<I>(&mut self, players: I) -> Result<(), PoolError>
    where
        I: IntoIterator<Item = Player>,
    {
        for player in players {
            validate_player(self.players.len(), &player)?;
            if self.index_of(&player.name).is_none() {
                debug!("adding '{}' to the pool", player.name);
                self.players.push(player);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn by_position(&self, position: Position) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.position == position)
    }

    #[must_use]
    pub fn position_counts(&self) -> PositionTable<usize> {
        let mut counts = PositionTable::default();
        for player in &self.players {
            counts[player.position] += 1;
        }
        counts
    }
}

fn validate_player(row: usize, player: &Player) -> Result<(), PoolError> {
    if player.name.trim().is_empty() {
        return Err(PoolError::EmptyName { row });
    }
    if !player.cost.is_positive() {
        return Err(PoolError::NonPositiveCost {
            name: player.name.clone(),
            cost: player.cost,
        });
    }
    if !player.metric.is_finite() {
        return Err(PoolError::NonFiniteMetric {
            name: player.name.clone(),
            value: player.metric,
        });
    }
    Ok(())
}

/// Pre-filter dropping players unlikely to feature.
///
/// Keeps players with more than `min_minutes` minutes played whose chance of
/// playing the next round is unknown or 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityFilter {
    pub min_minutes: u32,
}

impl AvailabilityFilter {
    #[must_use]
    pub const fn standard() -> Self {
        Self { min_minutes: 180 }
    }

    #[must_use]
    pub fn retains(&self, record: &PlayerRecord) -> bool {
        let played_enough = record.minutes.is_some_and(|m| m > self.min_minutes);
        let fit = record
            .chance_of_playing_next_round
            .is_none_or(|chance| chance == 100);
        played_enough && fit
    }

    #[must_use]
    pub fn apply(&self, records: &[PlayerRecord]) -> Vec<PlayerRecord> {
        let kept: Vec<_> = records
            .iter()
            .filter(|r| self.retains(r))
            .cloned()
            .collect();
        debug!(
            "availability filter kept {} of {} players",
            kept.len(),
            records.len()
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClubId, Price};

    fn record(name: &str, tenths: i32, position: Position, metric: Option<f64>) -> PlayerRecord {
        let mut record = PlayerRecord::new(name, Price::from_tenths(tenths), position, ClubId(1));
        record.predicted_points = metric;
        record
    }

    #[test]
    fn test_builds_pool_in_input_order() {
        let records = [
            record("A", 45, Position::Defender, Some(2.0)),
            record("B", 80, Position::Forward, Some(6.5)),
        ];
        let pool = PlayerPool::from_records(&records, Metric::PredictedPoints).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.index_of("B"), Some(1));
        assert_eq!(pool.players()[1].metric, 6.5);
        assert_eq!(pool.position_counts()[Position::Forward], 1);
    }

    #[test]
    fn test_drops_duplicate_names() {
        let records = [
            record("A", 45, Position::Defender, Some(2.0)),
            record("A", 50, Position::Defender, Some(9.0)),
        ];
        let pool = PlayerPool::from_records(&records, Metric::PredictedPoints).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.players()[0].cost, Price::from_tenths(45));
    }

    #[test]
    fn test_rejects_malformed_rows() {
        let err = PlayerPool::from_records(
            &[record("A", 0, Position::Defender, Some(2.0))],
            Metric::PredictedPoints,
        )
        .unwrap_err();
        assert!(matches!(err, PoolError::NonPositiveCost { .. }));

        let err = PlayerPool::from_records(
            &[record(" ", 45, Position::Defender, Some(2.0))],
            Metric::PredictedPoints,
        )
        .unwrap_err();
        assert!(matches!(err, PoolError::EmptyName { row: 0 }));

        let err = PlayerPool::from_records(
            &[record("A", 45, Position::Defender, None)],
            Metric::PredictedPoints,
        )
        .unwrap_err();
        assert!(matches!(err, PoolError::MissingMetric { .. }));

        let err = PlayerPool::from_records(
            &[record("A", 45, Position::Defender, Some(f64::INFINITY))],
            Metric::PredictedPoints,
        )
        .unwrap_err();
        assert!(matches!(err, PoolError::NonFiniteMetric { .. }));
    }

    #[test]
    fn test_custom_accessor() {
        let mut r = record("A", 45, Position::Defender, None);
        r.minutes = Some(900);
        let pool =
            PlayerPool::from_records_with(&[r], |r| r.minutes.map(f64::from)).unwrap();
        assert_eq!(pool.players()[0].metric, 900.0);
    }

    #[test]
    fn test_extend_missing_keeps_existing_rows() {
        let mut pool = PlayerPool::from_records(
            &[record("A", 45, Position::Defender, Some(2.0))],
            Metric::PredictedPoints,
        )
        .unwrap();
        pool.extend_missing([
            Player::new("A", Price::from_tenths(99), 0.0, Position::Defender, ClubId(2)),
            Player::new("B", Price::from_tenths(60), 1.0, Position::Forward, ClubId(2)),
        ])
        .unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.players()[0].cost, Price::from_tenths(45));
        assert_eq!(pool.index_of("B"), Some(1));
    }

    #[test]
    fn test_availability_filter() {
        let filter = AvailabilityFilter::standard();
        let mut regular = record("A", 45, Position::Defender, Some(2.0));
        regular.minutes = Some(900);
        let mut doubtful = regular.clone();
        doubtful.chance_of_playing_next_round = Some(75);
        let mut fit = regular.clone();
        fit.chance_of_playing_next_round = Some(100);
        let mut fringe = regular.clone();
        fringe.minutes = Some(180);
        let unknown = record("B", 45, Position::Defender, Some(2.0));

        assert!(filter.retains(&regular));
        assert!(filter.retains(&fit));
        assert!(!filter.retains(&doubtful));
        assert!(!filter.retains(&fringe));
        assert!(!filter.retains(&unknown));
        assert_eq!(filter.apply(&[regular, doubtful, fit]).len(), 2);
    }
}
