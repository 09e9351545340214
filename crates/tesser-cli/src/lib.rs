//! Command-line front end: read a structure file, convert it, load the tiles
//! into a store and report on the result.

pub mod args;
pub mod error;
pub mod report;

use std::path::Path;

use tesser_blueprint::export::to_snbt;
use tesser_blueprint::{convert_blueprint, load_options_from_str, Blueprint, ConvertOptions};
use tesser_store::TileStore;

use args::Args;
use error::CliError;
use report::Report;

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Convert `args.input` and write any requested outputs. Returns the report
/// for printing.
pub fn run(args: &Args) -> Result<Report, CliError> {
    let mut options = match &args.config {
        Some(path) => load_options_from_str(&read_file(path)?)?,
        None => ConvertOptions::default(),
    };
    if args.check_overlaps {
        options.report_overlaps = true;
    }

    let text = read_file(&args.input)?;
    let blueprint = Blueprint::from_snbt(&text, &options)?;
    log::info!("Loaded {} from {}", blueprint, args.input.display());

    let target = args.grid.unwrap_or(blueprint.grid);
    let conversion = convert_blueprint(&blueprint, target, &options);

    let mut store = TileStore::new(target);
    let accepted = store.extend(conversion.tiles.iter().cloned());
    log::debug!("Stored {accepted} of {} tiles", conversion.tiles.len());

    let report = Report::new(&args.input.display().to_string(), &conversion, &store);

    if let Some(path) = &args.json {
        report::save_report(path, &report).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Saved report to {}", path.display());
    }

    if let Some(path) = &args.export {
        write_file(path, &to_snbt(store.tiles(), store.grid()))?;
        log::info!("Exported {} tiles to {}", store.len(), path.display());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tesser_core::Grid;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tesser-cli-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("should create temp dir");
        dir
    }

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/blueprints")
            .join(name)
    }

    #[test]
    fn test_run_converts_fixture() {
        let args = Args {
            input: fixture("house.snbt"),
            grid: Some(Grid::GRID_32),
            ..Args::default()
        };
        let report = run(&args).expect("should run");
        assert_eq!(report.source_grid, Grid::GRID_16);
        assert_eq!(report.target_grid, Grid::GRID_32);
        assert_eq!(report.store.tile_count, 4);
        assert_eq!(report.store.total_volume, 1536 * 8);
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = temp_dir("outputs");
        let args = Args {
            input: fixture("messy.snbt"),
            json: Some(dir.join("report.json")),
            export: Some(dir.join("out.snbt")),
            check_overlaps: true,
            ..Args::default()
        };
        let report = run(&args).expect("should run");
        assert_eq!(report.overlaps, vec![(0, 2)]);

        let json = std::fs::read_to_string(dir.join("report.json")).expect("report written");
        assert!(json.contains("\"skipped_records\": 3"));

        let exported = std::fs::read_to_string(dir.join("out.snbt")).expect("export written");
        let again = Args {
            input: dir.join("out.snbt"),
            ..Args::default()
        };
        let second = run(&again).expect("exported file converts");
        assert!(exported.starts_with("{grid:16,"));
        assert_eq!(second.store, report.store);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let args = Args {
            input: PathBuf::from("/nonexistent/tesser/input.snbt"),
            ..Args::default()
        };
        assert!(matches!(run(&args), Err(CliError::Read { .. })));
    }

    #[test]
    fn test_bad_config_is_reported() {
        let dir = temp_dir("config");
        let config = dir.join("bad.ron");
        std::fs::write(&config, "(default_grid: 3)").expect("should write config");
        let args = Args {
            input: fixture("house.snbt"),
            config: Some(config),
            ..Args::default()
        };
        assert!(matches!(run(&args), Err(CliError::Blueprint(_))));
        let _ = std::fs::remove_dir_all(dir);
    }
}
