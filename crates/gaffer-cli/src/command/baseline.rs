use std::path::PathBuf;

use anyhow::Context;
use gaffer_core::Price;
use gaffer_evaluator::{GameweekRecord, MostSelectedBaseline};
use serde::Serialize;

use crate::{
    command::SolverArg,
    report,
    schema::selection::names,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BaselineArg {
    /// Per-gameweek history JSON file
    #[arg(long)]
    history: PathBuf,
    /// Gameweek to evaluate
    #[arg(long)]
    gameweek: u32,
    /// Budget in millions
    #[arg(long, default_value_t = 100.0)]
    budget: f64,
    #[clap(flatten)]
    solver: SolverArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BaselineSummary {
    gameweek: u32,
    formation: String,
    starters: Vec<String>,
    bench: Vec<String>,
    captain: String,
    vice_captain: String,
    total_cost: Price,
    base_points: i32,
    captain_bonus: i32,
    vice_stood_in: bool,
    total_points: i32,
}

pub(crate) fn run(arg: &BaselineArg) -> anyhow::Result<()> {
    let BaselineArg {
        history,
        gameweek,
        budget,
        solver,
        output,
    } = arg;

    let budget = Price::from_millions(*budget).context("Invalid budget")?;
    let optimizer = solver.build_optimizer()?;
    let history: Vec<GameweekRecord> = util::read_json_file("gameweek history", history)?;

    let result = MostSelectedBaseline::new(&history, *gameweek)
        .run(&optimizer, budget)
        .with_context(|| format!("Failed to build the baseline for gameweek {gameweek}"))?;
    report::print_baseline(&result);

    let selection = &result.selection;
    let valuation = &result.valuation;
    let summary = BaselineSummary {
        gameweek: result.gameweek,
        formation: selection.formation.name.clone(),
        starters: names(&selection.starters),
        bench: names(&selection.bench),
        captain: selection.captain.name.clone(),
        vice_captain: selection.vice_captain.name.clone(),
        total_cost: selection.total_cost,
        base_points: valuation.base_points,
        captain_bonus: valuation.captain_bonus,
        vice_stood_in: valuation.vice_stood_in,
        total_points: valuation.total,
    };
    util::save_json(&summary, output.as_deref())?;
    Ok(())
}
