use std::path::PathBuf;

use gaffer_evaluator::{RealizedPoints, RealizedRecord, TeamValuator};

use crate::{
    report,
    schema::selection::SelectionRecord,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ValueTeamArg {
    /// Selection JSON file written by `pick-team`
    #[arg(long)]
    selection: PathBuf,
    /// Realized points JSON file
    #[arg(long)]
    results: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ValueTeamArg) -> anyhow::Result<()> {
    let ValueTeamArg {
        selection,
        results,
        output,
    } = arg;

    let selection: SelectionRecord = util::read_json_file("selection", selection)?;
    let results: Vec<RealizedRecord> = util::read_json_file("realized points", results)?;
    let realized = RealizedPoints::from_records(&results);

    let valuation = TeamValuator.value(&selection, &realized);
    report::print_valuation(&valuation);
    util::save_json(&valuation, output.as_deref())?;
    Ok(())
}
