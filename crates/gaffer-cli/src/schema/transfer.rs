use chrono::{DateTime, Utc};
use gaffer_core::{Metric, Price};
use gaffer_optimizer::{RankedPlayer, TransferPlan};
use serde::{Deserialize, Serialize};

use crate::schema::selection::names;

/// Saved result of `plan-transfers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPlanRecord {
    /// When the plan was solved (ISO 8601)
    pub solved_at: DateTime<Utc>,
    pub metric: Metric,
    pub transferred_in: Vec<String>,
    pub transferred_out: Vec<String>,
    pub num_transfers: usize,
    pub free_transfers: usize,
    pub excess_transfers: usize,
    pub points_penalty: f64,
    /// Expected points of the new squad before the penalty
    pub expected_points: f64,
    pub net_expected_points: f64,
    pub net_spend: Price,
    pub remaining_budget: Price,
    pub formation: String,
    pub squad: Vec<String>,
    pub starters: Vec<String>,
    pub bench: Vec<String>,
    pub captain: String,
    pub vice_captain: String,
    pub total_cost: Price,
    pub ranking: Vec<RankedPlayer>,
}

impl TransferPlanRecord {
    pub fn new(plan: &TransferPlan, metric: Metric, solved_at: DateTime<Utc>) -> Self {
        let selection = &plan.selection;
        Self {
            solved_at,
            metric,
            transferred_in: names(&plan.transferred_in),
            transferred_out: names(&plan.transferred_out),
            num_transfers: plan.num_transfers,
            free_transfers: plan.free_transfers,
            excess_transfers: plan.excess_transfers,
            points_penalty: plan.transfer_penalty,
            expected_points: selection.expected_points,
            net_expected_points: plan.net_expected_points,
            net_spend: plan.net_spend,
            remaining_budget: plan.remaining_budget,
            formation: selection.formation.name.clone(),
            squad: names(&selection.squad),
            starters: names(&selection.starters),
            bench: names(&selection.bench),
            captain: selection.captain.name.clone(),
            vice_captain: selection.vice_captain.name.clone(),
            total_cost: selection.total_cost,
            ranking: selection.ranking.clone(),
        }
    }
}
