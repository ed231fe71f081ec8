use std::path::PathBuf;

use gaffer_core::synthetic;
use log::info;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GeneratePoolArg {
    /// Number of players to generate
    #[arg(long, default_value_t = 300)]
    players: usize,
    /// Number of clubs to spread them over
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    clubs: u32,
    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GeneratePoolArg) -> anyhow::Result<()> {
    let GeneratePoolArg {
        players,
        clubs,
        seed,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("generating {players} players over {clubs} clubs with seed {seed}");
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let records = synthetic::generate_records(&mut rng, *players, *clubs);
    util::save_json(&records, output.as_deref())?;
    Ok(())
}
