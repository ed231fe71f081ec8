use std::{collections::BTreeSet, path::PathBuf};

use anyhow::Context;
use chrono::Utc;
use gaffer_core::{Metric, Price};
use gaffer_optimizer::{HeldSquad, TransferConfig};

use crate::{
    command::{SolverArg, pick_team::load_pool},
    report,
    schema::transfer::TransferPlanRecord,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlanTransfersArg {
    /// Player pool JSON file
    #[arg(long)]
    pool: PathBuf,
    /// Held squad JSON file (pool rows, optionally with purchase_price)
    #[arg(long)]
    squad: PathBuf,
    /// Column to maximize
    #[arg(long, default_value = "PredictedPoints")]
    metric: Metric,
    /// Money in the bank, in millions
    #[arg(long, default_value_t = 0.0)]
    bank: f64,
    #[arg(long, default_value_t = 1)]
    free_transfers: usize,
    #[arg(long, default_value_t = 6)]
    max_transfers: usize,
    /// Points deducted per transfer beyond the free ones
    #[arg(long, default_value_t = 4.0)]
    penalty: f64,
    /// Held player that must be sold (repeatable)
    #[arg(long = "remove")]
    remove: Vec<String>,
    /// Held player that must be kept (repeatable)
    #[arg(long = "keep")]
    keep: Vec<String>,
    /// Keep injured and rarely-used players
    #[arg(long)]
    all_players: bool,
    #[clap(flatten)]
    pub(crate) solver: SolverArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlanTransfersArg) -> anyhow::Result<()> {
    let PlanTransfersArg {
        pool,
        squad,
        metric,
        bank,
        free_transfers,
        max_transfers,
        penalty,
        remove,
        keep,
        all_players,
        solver,
        output,
    } = arg;

    let bank = Price::from_millions(*bank).context("Invalid bank balance")?;
    let optimizer = solver.build_optimizer()?;
    let pool = load_pool(pool, *metric, *all_players)?;

    let squad_records = util::read_player_records("held squad", squad)?;
    let held = HeldSquad::from_records_in_pool(&squad_records, &pool, *metric)
        .with_context(|| format!("Invalid held squad: {}", squad.display()))?;

    let config = TransferConfig {
        free_transfers: *free_transfers,
        max_transfers: *max_transfers,
        penalty_per_excess_transfer: *penalty,
        must_remove: remove.iter().cloned().collect::<BTreeSet<_>>(),
        must_keep: keep.iter().cloned().collect::<BTreeSet<_>>(),
        ..TransferConfig::new(bank)
    };
    let plan = optimizer
        .plan_transfers(&pool, &held, &config)
        .context("Failed to plan transfers")?;
    report::print_transfer_plan(&plan);

    let record = TransferPlanRecord::new(&plan, *metric, Utc::now());
    util::save_json(&record, output.as_deref())?;
    Ok(())
}
