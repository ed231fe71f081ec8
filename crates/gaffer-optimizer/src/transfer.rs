//! Choosing which held players to sell and whom to buy.
//!
//! The transfer model is the selection model without its budget constraint,
//! extended with per-player transfer flags:
//!
//! ```text
//! held player:     in_squad + transfer_out = 1,  transfer_in = 0
//! other player:    in_squad - transfer_in  = 0,  transfer_out = 0
//!
//! num_transfers    = Σ transfer_out = Σ transfer_in     (0 ..= max_transfers)
//! excess_transfers >= num_transfers - free_transfers    (objective: -penalty)
//! Σ cost·transfer_in - Σ selling_price·transfer_out <= available_budget
//! ```
//!
//! Sold players raise their selling price, not their current cost; see
//! [`gaffer_core::selling_price`].

use std::collections::{BTreeSet, HashSet};

use gaffer_core::{
    Metric, Player, PlayerPool, PlayerRecord, PoolError, Price, RuleSet, selling_price,
};
use gaffer_solver::{Assignment, LinearExpr, Relation, Solution, Solver, VarId};
use log::{debug, warn};
use serde::Serialize;

use crate::{
    ConstraintModel, FeasibilityReport, Infeasibility, InputError, OptimizeError, Selection,
    TransferConfig,
    constraint_model::{count, tenths},
};

/// A player currently owned, with the price originally paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeldPlayer {
    pub player: Player,
    pub purchase_price: Price,
    pub selling_price: Price,
}

impl HeldPlayer {
    #[must_use]
    pub fn new(player: Player, purchase_price: Price) -> Self {
        let selling_price = selling_price(purchase_price, player.cost);
        Self {
            player,
            purchase_price,
            selling_price,
        }
    }
}

/// The squad owned going into a transfer window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeldSquad {
    players: Vec<HeldPlayer>,
}

impl HeldSquad {
    pub fn new(players: Vec<HeldPlayer>) -> Result<Self, InputError> {
        let mut seen = HashSet::new();
        for held in &players {
            if !seen.insert(held.player.name.as_str()) {
                return Err(InputError::DuplicateHeldPlayer {
                    name: held.player.name.clone(),
                });
            }
        }
        Ok(Self { players })
    }

    /// Builds the held squad, taking current cost and metric from `pool` for
    /// the players it lists and from the rows themselves for the rest.
    ///
    /// The cost column of a row the pool knows is ignored, so a squad file
    /// written in an earlier gameweek still sells at today's prices. A missing
    /// purchase price means the player was bought at the current cost.
    pub fn from_records_in_pool(
        records: &[PlayerRecord],
        pool: &PlayerPool,
        metric: Metric,
    ) -> Result<Self, InputError> {
        let players = records
            .iter()
            .map(|record| {
                let player = match pool.index_of(&record.name).and_then(|i| pool.get(i)) {
                    Some(player) => player.clone(),
                    None => {
                        let value =
                            metric
                                .value(record)
                                .ok_or_else(|| PoolError::MissingMetric {
                                    name: record.name.clone(),
                                })?;
                        Player::new(
                            record.name.clone(),
                            record.cost,
                            value,
                            record.position,
                            record.club,
                        )
                    }
                };
                let purchase_price = record.purchase_price.unwrap_or(player.cost);
                Ok(HeldPlayer::new(player, purchase_price))
            })
            .collect::<Result<Vec<_>, InputError>>()?;
        Self::new(players)
    }

    #[must_use]
    pub fn players(&self) -> &[HeldPlayer] {
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
    pub fn get(&self, name: &str) -> Option<&HeldPlayer> {
        self.players.iter().find(|h| h.player.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Transfer flags of one pool player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferVars {
    pub transfer_in: VarId,
    pub transfer_out: VarId,
}

/// The transfer decision and the squad it leads to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPlan {
    pub selection: Selection,
    pub transferred_in: Vec<Player>,
    pub transferred_out: Vec<Player>,
    pub num_transfers: usize,
    pub free_transfers: usize,
    pub excess_transfers: usize,
    pub penalty_per_excess_transfer: f64,
    /// Points deducted for the excess transfers.
    pub transfer_penalty: f64,
    /// Expected points of the new squad after the penalty.
    pub net_expected_points: f64,
    /// Cost of arrivals minus selling prices of departures; negative when
    /// sales raised more than was spent.
    pub net_spend: Price,
    pub remaining_budget: Price,
}

impl TransferPlan {
    #[must_use]
    pub fn is_hold(&self) -> bool {
        self.num_transfers == 0
    }
}

/// The transfer program for one held squad and pool.
#[derive(Debug, Clone)]
pub struct TransferPlanner<'a> {
    base: ConstraintModel<'a>,
    config: &'a TransferConfig,
    /// Selling price of every held player, by pool index.
    selling_prices: Vec<Option<Price>>,
    transfers: Vec<TransferVars>,
    num_transfers: VarId,
}

impl<'a> TransferPlanner<'a> {
    /// Validates the request and builds the transfer program.
    ///
    /// Every held player must already be in `pool`. Forced names that are not
    /// held are ignored.
    pub fn build(
        pool: &'a PlayerPool,
        rules: &'a RuleSet,
        held: &HeldSquad,
        config: &'a TransferConfig,
    ) -> Result<Self, OptimizeError> {
        config.validate()?;
        if held.len() != rules.squad_size {
            return Err(InputError::HeldSquadSize {
                expected: rules.squad_size,
                actual: held.len(),
            }
            .into());
        }

        let mut selling_prices = vec![None; pool.len()];
        for held_player in held.players() {
            let index = pool.index_of(&held_player.player.name).ok_or_else(|| {
                InputError::HeldPlayerNotInPool {
                    name: held_player.player.name.clone(),
                }
            })?;
            selling_prices[index] = Some(held_player.selling_price);
        }

        let must_remove = held_names(&config.must_remove, held, "removal");
        let must_keep = held_names(&config.must_keep, held, "keep");
        if must_remove.len() > config.max_transfers {
            return Err(Infeasibility::TooManyForcedRemovals {
                forced: must_remove.len(),
                max_transfers: config.max_transfers,
            }
            .into());
        }
        FeasibilityReport::new(pool, rules, None).check()?;

        let formations = rules.formations.iter().collect();
        let mut base = ConstraintModel::squad_model("transfer_plan", pool, rules, formations);
        let player_vars = base.player_vars().to_vec();
        let model = base.linear_model_mut();

        let mut transfers = Vec::with_capacity(pool.len());
        let mut spend = LinearExpr::new();
        let mut ins = LinearExpr::new();
        let mut outs = LinearExpr::new();
        for (i, (player, vars)) in pool.players().iter().zip(&player_vars).enumerate() {
            let transfer_in = model.add_binary(format!("transfer_in[{i}]"), 0.0);
            let transfer_out = model.add_binary(format!("transfer_out[{i}]"), 0.0);
            if let Some(price) = selling_prices[i] {
                model.add_constraint(
                    format!("held[{i}]"),
                    LinearExpr::new().with(vars.in_squad, 1.0).with(transfer_out, 1.0),
                    Relation::Equal,
                    1.0,
                );
                model.fix(format!("no_rebuy[{i}]"), transfer_in, 0.0);
                spend.add(transfer_out, -tenths(price));
                if must_remove.contains(player.name.as_str()) {
                    model.fix(format!("must_remove[{i}]"), transfer_out, 1.0);
                }
                if must_keep.contains(player.name.as_str()) {
                    model.fix(format!("must_keep[{i}]"), transfer_out, 0.0);
                }
            } else {
                model.add_constraint(
                    format!("bought[{i}]"),
                    LinearExpr::new().with(vars.in_squad, 1.0).with(transfer_in, -1.0),
                    Relation::Equal,
                    0.0,
                );
                model.fix(format!("not_held[{i}]"), transfer_out, 0.0);
                spend.add(transfer_in, tenths(player.cost));
            }
            ins.add(transfer_in, 1.0);
            outs.add(transfer_out, 1.0);
            transfers.push(TransferVars {
                transfer_in,
                transfer_out,
            });
        }

        let max_transfers = i32::try_from(config.max_transfers).unwrap_or(i32::MAX);
        let num_transfers = model.add_integer("num_transfers", 0.0, 0, max_transfers);
        let excess_transfers = model.add_integer(
            "excess_transfers",
            -config.penalty_per_excess_transfer,
            0,
            max_transfers,
        );

        let mut counted = outs.clone();
        counted.add(num_transfers, -1.0);
        model.add_constraint("count_transfers", counted, Relation::Equal, 0.0);
        let mut balanced = outs;
        for &(var, _) in ins.terms() {
            balanced.add(var, -1.0);
        }
        model.add_constraint("balanced_transfers", balanced, Relation::Equal, 0.0);
        model.add_constraint(
            "max_transfers",
            LinearExpr::new().with(num_transfers, 1.0),
            Relation::LessEq,
            count(config.max_transfers),
        );
        model.add_constraint(
            "excess_transfers",
            LinearExpr::new()
                .with(excess_transfers, 1.0)
                .with(num_transfers, -1.0),
            Relation::GreaterEq,
            -count(config.free_transfers),
        );
        model.add_constraint(
            "transfer_budget",
            spend,
            Relation::LessEq,
            tenths(config.available_budget),
        );

        debug!(
            "transfer model: {} players, {} variables, {} constraints",
            pool.len(),
            model.num_vars(),
            model.num_constraints()
        );
        Ok(Self {
            base,
            config,
            selling_prices,
            transfers,
            num_transfers,
        })
    }

    pub fn solve<S>(&self, solver: &S) -> Solution
    where
        S: Solver + ?Sized,
    {
        self.base.solve(solver)
    }

    #[must_use]
    pub fn constraint_model(&self) -> &ConstraintModel<'a> {
        &self.base
    }

    #[must_use]
    pub fn transfer_vars(&self) -> &[TransferVars] {
        &self.transfers
    }

    /// Reads the plan out of an optimal assignment of this model.
    pub fn extract(&self, assignment: &Assignment) -> Result<TransferPlan, OptimizeError> {
        let selection = self.base.extract(assignment)?;

        let mut transferred_in = vec![];
        let mut transferred_out = vec![];
        let mut spent = Price::ZERO;
        let mut raised = Price::ZERO;
        let players = self.base.pool().players();
        for ((player, vars), selling) in players
            .iter()
            .zip(&self.transfers)
            .zip(&self.selling_prices)
        {
            if assignment.is_set(vars.transfer_in) {
                transferred_in.push(player.clone());
                spent = spent + player.cost;
            }
            if assignment.is_set(vars.transfer_out) {
                let Some(price) = *selling else {
                    return Err(OptimizeError::MalformedAssignment {
                        detail: format!("'{}' sold but not held", player.name),
                    });
                };
                transferred_out.push(player.clone());
                raised = raised + price;
            }
        }
        if transferred_in.len() != transferred_out.len() {
            return Err(OptimizeError::MalformedAssignment {
                detail: format!(
                    "{} players bought but {} sold",
                    transferred_in.len(),
                    transferred_out.len()
                ),
            });
        }
        let num_transfers = transferred_out.len();
        let counted = assignment.integer(self.num_transfers);
        if usize::try_from(counted).ok() != Some(num_transfers) {
            warn!("transfer count variable reads {counted}, recounted {num_transfers}");
        }

        let config = self.config;
        let excess_transfers = num_transfers.saturating_sub(config.free_transfers);
        let transfer_penalty = count(excess_transfers) * config.penalty_per_excess_transfer;
        let net_expected_points = selection.expected_points - transfer_penalty;
        let net_spend = spent - raised;
        Ok(TransferPlan {
            selection,
            transferred_in,
            transferred_out,
            num_transfers,
            free_transfers: config.free_transfers,
            excess_transfers,
            penalty_per_excess_transfer: config.penalty_per_excess_transfer,
            transfer_penalty,
            net_expected_points,
            net_spend,
            remaining_budget: config.available_budget - net_spend,
        })
    }
}

/// The forced names that are actually held; the rest are dropped with a warning.
fn held_names<'s>(names: &'s BTreeSet<String>, held: &HeldSquad, kind: &str) -> BTreeSet<&'s str> {
    names
        .iter()
        .filter(|name| {
            let is_held = held.contains(name);
            if !is_held {
                warn!("ignoring forced {kind} of '{name}': not in the held squad");
            }
            is_held
        })
        .map(String::as_str)
        .collect()
}
