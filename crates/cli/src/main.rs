//! GeoDissolve CLI - batch dissolve of GeoJSON feature collections

mod io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use geodissolve_algorithms::vector::{Dissolve, DissolveParams, OperatorPair};
use geodissolve_core::{Algorithm, GeometryKind};

use crate::io::{read_features, write_features};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "geodissolve")]
#[command(author, version, about = "Dissolve vector features by attribute", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show geometry kinds and columns of a GeoJSON feature collection
    Info {
        /// Input GeoJSON file
        input: PathBuf,
    },
    /// Merge features sharing geometry kind and match-column values
    Dissolve {
        /// Input GeoJSON file
        input: PathBuf,
        /// Output GeoJSON file
        output: PathBuf,
        /// Match column (repeatable, order matters)
        #[arg(short = 'm', long = "match")]
        match_columns: Vec<String>,
        /// Aggregation as column:type:operator, e.g. Population:Integer:Sum (repeatable)
        #[arg(short, long = "op")]
        operators: Vec<OperatorPair>,
        /// JSON parameter file; --match and --op values are appended to it
        #[arg(long)]
        params: Option<PathBuf>,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Logging already initialised");
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn load_params(
    file: Option<&Path>,
    match_columns: Vec<String>,
    operators: Vec<OperatorPair>,
) -> Result<DissolveParams> {
    let mut params = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<DissolveParams>(&text).context("Invalid parameter file")?
        }
        None => DissolveParams::default(),
    };
    params.match_columns.extend(match_columns);
    params.operators.extend(operators);
    Ok(params)
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let pb = spinner("Reading features...");
            let features = read_features(&input)?;
            pb.finish_and_clear();

            let (counts, unrecognized) = features.kind_counts();
            let columns: BTreeSet<&str> = features
                .iter()
                .flat_map(|f| f.properties.keys().map(String::as_str))
                .collect();

            println!("File: {}", input.display());
            println!("Features: {}", features.len());
            for kind in GeometryKind::ALL {
                println!("  {:<6} {}", kind.name(), counts.get(&kind).copied().unwrap_or(0));
            }
            if unrecognized > 0 {
                println!("  other  {} (ignored by dissolve)", unrecognized);
            }
            println!("Columns: {}", columns.into_iter().collect::<Vec<_>>().join(", "));
        }

        // ── Dissolve ─────────────────────────────────────────────────
        Commands::Dissolve {
            input,
            output,
            match_columns,
            operators,
            params,
        } => {
            let params = load_params(params.as_deref(), match_columns, operators)?;
            if params.match_columns.is_empty() {
                warn!("No match columns given: all features of a kind collapse into one");
            }

            let pb = spinner("Reading features...");
            let features = read_features(&input)?;
            pb.finish_and_clear();
            info!("Input: {} feature(s)", features.len());

            let schema = params.output_columns();
            let start = Instant::now();
            let pb = spinner("Dissolving...");
            let result = Dissolve
                .execute(features, params)
                .context("Failed to dissolve")?;
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            info!("Output: {} feature(s)", result.features.len());
            if !result.invalid.is_empty() {
                warn!("Invalid area geometries excluded from unions: {}", result.invalid.len());
            }
            if result.dropped > 0 {
                warn!("{} feature(s) without a recognised geometry kind ignored", result.dropped);
            }

            let pb = spinner("Writing output...");
            write_features(&result.features, &output)?;
            pb.finish_and_clear();

            println!(
                "Columns: {}",
                schema
                    .iter()
                    .map(|c| format!("{} ({})", c.name, c.column_type))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            done("Dissolve", &output, elapsed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use geodissolve_algorithms::vector::{AggregateOp, ColumnType};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dissolve_args() {
        let cli = Cli::try_parse_from([
            "geodissolve",
            "dissolve",
            "in.geojson",
            "out.geojson",
            "--match",
            "Type",
            "-m",
            "Zone",
            "--op",
            "Pop:Integer:Sum",
        ])
        .unwrap();

        let Commands::Dissolve { match_columns, operators, .. } = cli.command else {
            panic!("expected dissolve");
        };
        assert_eq!(match_columns, vec!["Type", "Zone"]);
        assert_eq!(operators[0].column_type, ColumnType::Integer);
        assert_eq!(operators[0].operator, AggregateOp::Sum);
    }

    #[test]
    fn test_parse_rejects_bad_operator() {
        let result = Cli::try_parse_from([
            "geodissolve", "dissolve", "in.geojson", "out.geojson", "--op", "Pop:Integer:Median",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_params_without_file() {
        let params = load_params(
            None,
            vec!["Type".into()],
            vec!["Pop:Double:Average".parse().unwrap()],
        )
        .unwrap();
        assert_eq!(params.match_columns, vec!["Type"]);
        assert_eq!(params.operators.len(), 1);
    }
}
