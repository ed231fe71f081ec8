use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use gaffer_core::{AvailabilityFilter, Metric, PlayerPool, Price};
use gaffer_optimizer::SelectionConfig;
use log::info;

use crate::{
    command::SolverArg,
    report,
    schema::selection::SelectionRecord,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PickTeamArg {
    /// Player pool JSON file
    #[arg(long)]
    pool: PathBuf,
    /// Column to maximize
    #[arg(long, default_value = "PredictedPoints")]
    metric: Metric,
    /// Budget in millions
    #[arg(long, default_value_t = 100.0)]
    budget: f64,
    /// Force a formation, e.g. 4-4-2
    #[arg(long)]
    formation: Option<String>,
    /// Keep injured and rarely-used players
    #[arg(long)]
    all_players: bool,
    /// Only report whether a squad can be built
    #[arg(long)]
    check: bool,
    #[clap(flatten)]
    solver: SolverArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PickTeamArg) -> anyhow::Result<()> {
    let PickTeamArg {
        pool,
        metric,
        budget,
        formation,
        all_players,
        check,
        solver,
        output,
    } = arg;

    let budget = Price::from_millions(*budget).context("Invalid budget")?;
    let optimizer = solver.build_optimizer()?;
    let pool = load_pool(pool, *metric, *all_players)?;

    if *check {
        report::print_feasibility(&optimizer.check(&pool, Some(budget)));
        return Ok(());
    }

    let mut config = SelectionConfig::new(budget);
    if let Some(formation) = formation {
        config = config.with_formation(formation.clone());
    }
    let selection = optimizer
        .select(&pool, &config)
        .context("Failed to pick a squad")?;
    report::print_selection(&selection);

    let record = SelectionRecord::new(&selection, *metric, Utc::now());
    util::save_json(&record, output.as_deref())?;
    Ok(())
}

/// Reads a pool file, applying the availability filter unless `all_players` is set.
pub(crate) fn load_pool(
    path: &Path,
    metric: Metric,
    all_players: bool,
) -> anyhow::Result<PlayerPool> {
    let mut records = util::read_player_records("player pool", path)?;
    if !all_players {
        records = AvailabilityFilter::standard().apply(&records);
    }
    let pool = PlayerPool::from_records(&records, metric)
        .with_context(|| format!("Invalid player pool: {}", path.display()))?;
    info!(
        "loaded {} candidates scored by {}",
        pool.len(),
        metric.column_name()
    );
    Ok(pool)
}
