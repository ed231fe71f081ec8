use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
    time::Duration,
};

use anyhow::Context;
use gaffer_core::{PlayerRecord, RuleSet};
use gaffer_optimizer::SquadOptimizer;
use gaffer_solver::{MicroLpSolver, Solver, TimeLimited};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};

/// Writes `value` as pretty JSON to `path`, or to stdout without one.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(&mut BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            debug!("wrote {}", path.display());
        }
        None => write_json(&mut io::stdout().lock(), value)
            .context("Failed to write JSON to stdout")?,
    }
    Ok(())
}

fn write_json<W, T>(writer: &mut W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

pub fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} file: {}", path.display()))
}

pub fn read_player_records(file_kind: &str, path: &Path) -> anyhow::Result<Vec<PlayerRecord>> {
    read_json_file(file_kind, path)
}

/// Reads a rule set, falling back to the competition rules.
pub fn read_rules(path: Option<&Path>) -> anyhow::Result<RuleSet> {
    match path {
        Some(path) => read_json_file("rule set", path),
        None => Ok(RuleSet::standard()),
    }
}

pub type BoxedSolver = Box<dyn Solver>;

pub fn build_optimizer(
    rules_path: Option<&Path>,
    time_limit: Option<Duration>,
) -> anyhow::Result<SquadOptimizer<BoxedSolver>> {
    let rules = read_rules(rules_path)?;
    let solver: BoxedSolver = match time_limit {
        Some(limit) => Box::new(TimeLimited::new(MicroLpSolver, limit)),
        None => Box::new(MicroLpSolver),
    };
    SquadOptimizer::new(rules, solver).context("Invalid rule set")
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use gaffer_core::{ClubId, Position, Price};

    use super::*;

    #[test]
    fn test_write_json_ends_with_newline() {
        let mut buf = vec![];
        write_json(&mut buf, &Price::from_tenths(55)).unwrap();
        assert_eq!(buf, b"5.5\n");
    }

    #[test]
    fn test_saved_records_read_back() {
        let path = env::temp_dir().join(format!("gaffer-util-{}.json", process::id()));
        let mut record =
            PlayerRecord::new("Raya", Price::from_tenths(55), Position::Goalkeeper, ClubId(1));
        record.predicted_points = Some(4.5);

        save_json(&[record.clone()], Some(&path)).unwrap();
        let read = read_player_records("player pool", &path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(read, vec![record]);
    }

    #[test]
    fn test_missing_file_names_the_kind() {
        let err = read_player_records("held squad", Path::new("/nonexistent/squad.json"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to open held squad file"));
    }
}
