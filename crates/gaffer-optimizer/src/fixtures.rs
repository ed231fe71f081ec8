//! Hand-computed pools shared by the unit tests.
//!
//! `base_squad` is a legal 15-player squad (three players from each of five
//! clubs, 87.5 in total). Its best lineup is 3-4-3 with "MID A" as captain:
//!
//! ```text
//! GK A 4.0 | DEF A 5.0, DEF B 4.5, DEF C 4.0 | MID A 8.0, MID B 6.5, MID C 5.5, MID D 4.5
//!          | FWD A 7.5, FWD B 6.0, FWD C 4.0
//! starters 59.5 + captain 8.0 = 67.5
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use gaffer_core::{ClubId, Player, PlayerPool, Position, Price, RuleSet};
use gaffer_solver::{LinearModel, MicroLpSolver, Solution, Solver};

use crate::Selection;

pub(crate) const BASE_EXPECTED_POINTS: f64 = 67.5;

pub(crate) fn player(name: &str, tenths: i32, metric: f64, position: Position, club: u32) -> Player {
    Player::new(name, Price::from_tenths(tenths), metric, position, ClubId(club))
}

pub(crate) fn base_squad() -> Vec<Player> {
    use Position::{Defender as D, Forward as F, Goalkeeper as G, Midfielder as M};
    vec![
        player("GK A", 45, 4.0, G, 1),
        player("GK B", 40, 2.0, G, 2),
        player("DEF A", 55, 5.0, D, 1),
        player("DEF B", 50, 4.5, D, 2),
        player("DEF C", 45, 4.0, D, 3),
        player("DEF D", 45, 3.5, D, 4),
        player("DEF E", 40, 3.0, D, 5),
        player("MID A", 100, 8.0, M, 1),
        player("MID B", 80, 6.5, M, 2),
        player("MID C", 65, 5.5, M, 3),
        player("MID D", 55, 4.5, M, 4),
        player("MID E", 45, 3.0, M, 5),
        player("FWD A", 90, 7.5, F, 3),
        player("FWD B", 70, 6.0, F, 4),
        player("FWD C", 50, 4.0, F, 5),
    ]
}

pub(crate) fn base_pool() -> PlayerPool {
    PlayerPool::from_players(base_squad()).unwrap()
}

pub(crate) fn pool_with(extra: Vec<Player>) -> PlayerPool {
    let mut players = base_squad();
    players.extend(extra);
    PlayerPool::from_players(players).unwrap()
}

/// Forwards to microlp and counts the calls.
#[derive(Debug, Default)]
pub(crate) struct CountingSolver {
    calls: AtomicUsize,
}

impl CountingSolver {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Solver for CountingSolver {
    fn solve(&self, model: &LinearModel) -> Solution {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MicroLpSolver.solve(model)
    }
}

/// Best starting lineup value (starters plus captain) of a fixed squad, found
/// by trying every formation.
pub(crate) fn best_lineup_value(squad: &[Player], rules: &RuleSet) -> f64 {
    let sorted_metrics = |position: Position| {
        let mut metrics: Vec<f64> = squad
            .iter()
            .filter(|p| p.position == position)
            .map(|p| p.metric)
            .collect();
        metrics.sort_by(|a, b| b.total_cmp(a));
        metrics
    };
    rules
        .formations
        .iter()
        .map(|formation| {
            let starters: Vec<f64> = Position::ALL
                .into_iter()
                .flat_map(|position| {
                    let count = rules.starting_count(formation, position);
                    sorted_metrics(position).into_iter().take(count)
                })
                .collect();
            let captain = starters.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            starters.iter().sum::<f64>() + captain
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Checks every structural rule a returned selection must satisfy.
pub(crate) fn assert_selection_is_legal(selection: &Selection, rules: &RuleSet, budget: Price) {
    assert_eq!(selection.squad.len(), rules.squad_size);
    assert_eq!(selection.starters.len(), rules.starting_size);
    assert_eq!(
        selection.bench.len(),
        rules.squad_size - rules.starting_size
    );
    assert!(selection.total_cost <= budget);
    assert_eq!(
        selection.total_cost,
        selection.squad.iter().map(|p| p.cost).sum::<Price>()
    );

    for position in Position::ALL {
        let in_squad = selection
            .squad
            .iter()
            .filter(|p| p.position == position)
            .count();
        assert_eq!(in_squad, rules.position_quotas[position], "{position} quota");
        let starting = selection
            .starters
            .iter()
            .filter(|p| p.position == position)
            .count();
        assert_eq!(
            starting,
            rules.starting_count(&selection.formation, position),
            "{position} starters"
        );
    }

    for player in &selection.squad {
        let same_club = selection
            .squad
            .iter()
            .filter(|p| p.club == player.club)
            .count();
        assert!(same_club <= rules.max_per_club, "club {} over cap", player.club);
    }
    for starter in &selection.starters {
        assert!(selection.squad.contains(starter));
    }

    assert_ne!(selection.captain.name, selection.vice_captain.name);
    assert!(selection.starters.contains(&selection.captain));
    assert!(selection.starters.contains(&selection.vice_captain));

    let starters_total: f64 = selection.starters.iter().map(|p| p.metric).sum();
    let expected = starters_total + selection.captain.metric;
    assert!((selection.expected_points - expected).abs() < 1e-6);
}
