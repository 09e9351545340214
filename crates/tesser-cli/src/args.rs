use std::path::PathBuf;

use tesser_core::Grid;

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: tesser <input.snbt> [OPTIONS]
  --grid <n>            Target grid resolution (default: the structure's own)
  --config <path>       Load convert options from RON
  --json <path>         Write a JSON report
  --export <path>       Write the converted tiles back as structure text
  --check-overlaps      Report overlapping tiles";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub grid: Option<Grid>,
    pub config: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub check_overlaps: bool,
    pub help: bool,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Args, CliError> {
        let mut parsed = Args::default();
        let mut input = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--grid" => {
                    i += 1;
                    let text = value_of(args, i, "--grid")?;
                    let grid = text
                        .parse::<i32>()
                        .ok()
                        .and_then(|n| Grid::new(n).ok())
                        .ok_or_else(|| {
                            CliError::Usage(format!("invalid --grid value '{text}'"))
                        })?;
                    parsed.grid = Some(grid);
                }
                "--config" => {
                    i += 1;
                    parsed.config = Some(PathBuf::from(value_of(args, i, "--config")?));
                }
                "--json" => {
                    i += 1;
                    parsed.json = Some(PathBuf::from(value_of(args, i, "--json")?));
                }
                "--export" => {
                    i += 1;
                    parsed.export = Some(PathBuf::from(value_of(args, i, "--export")?));
                }
                "--check-overlaps" => parsed.check_overlaps = true,
                "--help" | "-h" => parsed.help = true,
                other if other.starts_with("--") => {
                    return Err(CliError::Usage(format!("Unknown argument: {other}")));
                }
                other => {
                    if input.is_some() {
                        return Err(CliError::Usage(format!("Unexpected argument: {other}")));
                    }
                    input = Some(PathBuf::from(other));
                }
            }
            i += 1;
        }

        match input {
            Some(path) => parsed.input = path,
            None if parsed.help => {}
            None => return Err(CliError::Usage("missing input file".into())),
        }
        Ok(parsed)
    }
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, CliError> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))
}
