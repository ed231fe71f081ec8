use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};

use crate::util::{self, BoxedSolver};
use gaffer_optimizer::SquadOptimizer;

use self::{
    baseline::BaselineArg, generate_pool::GeneratePoolArg, pick_team::PickTeamArg,
    plan_transfers::PlanTransfersArg, value_team::ValueTeamArg,
};

mod baseline;
mod generate_pool;
mod pick_team;
mod plan_transfers;
mod value_team;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Pick the best squad for a budget
    PickTeam(#[clap(flatten)] PickTeamArg),
    /// Plan transfers for a held squad
    PlanTransfers(#[clap(flatten)] PlanTransfersArg),
    /// Score a saved selection against realized points
    ValueTeam(#[clap(flatten)] ValueTeamArg),
    /// Pick and score the most-selected squad of a past gameweek
    Baseline(#[clap(flatten)] BaselineArg),
    /// Generate a synthetic player pool
    GeneratePool(#[clap(flatten)] GeneratePoolArg),
}

/// Rule set and solver options shared by the optimizing commands.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SolverArg {
    /// Rule set JSON file (competition rules if omitted)
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Give up on a solve after this many seconds
    #[arg(long)]
    time_limit_secs: Option<u64>,
}

impl SolverArg {
    pub(crate) fn build_optimizer(&self) -> anyhow::Result<SquadOptimizer<BoxedSolver>> {
        util::build_optimizer(
            self.rules.as_deref(),
            self.time_limit_secs.map(Duration::from_secs),
        )
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::PickTeam(arg) => pick_team::run(&arg)?,
        Mode::PlanTransfers(arg) => plan_transfers::run(&arg)?,
        Mode::ValueTeam(arg) => value_team::run(&arg)?,
        Mode::Baseline(arg) => baseline::run(&arg)?,
        Mode::GeneratePool(arg) => generate_pool::run(&arg)?,
    }
    Ok(())
}
