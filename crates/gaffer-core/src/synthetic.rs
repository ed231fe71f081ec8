//! Seeded synthetic player tables for demos, benchmarks and property tests.

use rand::{Rng, seq::IndexedRandom as _};
use rand_distr::StandardNormal;

use crate::{ClubId, PlayerRecord, Position, Price};

/// Share of each position in a generated table, in squad-quota proportions.
const POSITION_WEIGHTS: [(Position, u32); 4] = [
    (Position::Goalkeeper, 2),
    (Position::Defender, 5),
    (Position::Midfielder, 5),
    (Position::Forward, 3),
];

const MIN_COST_TENTHS: i32 = 40;
const MAX_COST_TENTHS: i32 = 140;

/// Generates `count` players spread over `clubs` clubs.
///
/// Positions cycle through the squad-quota proportions, so any table of at least
/// 15 players can fill a standard squad. Costs fall in `[4.0, 14.0]` and every
/// metric column is populated, with predicted points loosely tracking cost.
///
/// # Panics
///
/// Panics if `clubs` is zero.
pub fn generate_records<R>(rng: &mut R, count: usize, clubs: u32) -> Vec<PlayerRecord>
where
    R: Rng + ?Sized,
{
    assert!(clubs > 0, "at least one club is required");
    let cycle: Vec<Position> = POSITION_WEIGHTS
        .iter()
        .flat_map(|&(position, weight)| std::iter::repeat_n(position, weight as usize))
        .collect();

    (0..count)
        .map(|i| {
            let position = cycle[i % cycle.len()];
            let cost_tenths = rng.random_range(MIN_COST_TENTHS..=MAX_COST_TENTHS);
            let cost = Price::from_tenths(cost_tenths);
            let club = ClubId(rng.random_range(1..=clubs));

            let base = cost.as_millions() * 0.6;
            let predicted = (base + noise(rng)).max(0.0);
            let mut record = PlayerRecord::new(format!("Player {i:03}"), cost, position, club);
            record.predicted_points = Some(round1(predicted));
            record.points_per_game = Some(round1((base + noise(rng)).max(0.0)));
            record.form = Some(round1((base + noise(rng) * 2.0).max(0.0)));
            record.total_points = Some((predicted * 20.0).round());
            record.selected_by_percent = Some(round1(rng.random_range(0.0..60.0)));
            record.minutes = Some(rng.random_range(0..=1800));
            record.chance_of_playing_next_round = [None, Some(100), Some(75), Some(0)]
                .choose(rng)
                .copied()
                .flatten();
            record
        })
        .collect()
}

fn noise<R>(rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    rng.sample(StandardNormal)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
