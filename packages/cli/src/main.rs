#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the flood-risk dataset toolchain.
//!
//! Uses `indicatif-log-bridge` (via [`flood_risk_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod report;

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use flood_risk_analytics_models::RankingWeights;
use flood_risk_cli_utils::{IndicatifProgress, resolve_output, resolve_seed};
use flood_risk_convert::{ConvertOptions, convert_files};
use flood_risk_dataset::{Table, validate_table};
use flood_risk_generate::{
    DEFAULT_DAYS, DEFAULT_JITTER_STD_DEG, GenerateConfig, Jitter, generate_to_file,
};
use flood_risk_neighborhood::{all_neighborhoods, find_neighborhood};
use flood_risk_risk::{DEFAULT_SEED, checked_rainfall, checked_tide, rate_breakdown, risk_index};

#[derive(Parser)]
#[command(name = "flood_risk", about = "Recife flood-risk dataset toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic daily dataset for every registry neighborhood
    Generate {
        /// Number of consecutive days to generate
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: u32,
        /// Last day of the window (YYYY-MM-DD). Defaults to today (UTC).
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Random seed (overrides `FLOOD_RISK_SEED` env var)
        #[arg(long)]
        seed: Option<u64>,
        /// Standard deviation of the coordinate jitter, in degrees
        #[arg(long, default_value_t = DEFAULT_JITTER_STD_DEG)]
        jitter_std: f64,
        /// Output CSV path. Defaults to `simulated_daily.csv` inside
        /// `FLOOD_RISK_OUTPUT_DIR` or `data/processed`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Convert a tide table and an APAC rain-gauge export into the dataset schema
    Convert {
        /// Tide table CSV (`Dia`, `Mês`, `Ano`, `Maré N - Altura (m)`)
        #[arg(long)]
        tide: PathBuf,
        /// APAC rain-gauge CSV (`Posto`, `Mês/Ano`, day columns `1`..`31`)
        #[arg(long)]
        rainfall: PathBuf,
        /// Random seed for occurrences and jitter (overrides `FLOOD_RISK_SEED` env var)
        #[arg(long)]
        seed: Option<u64>,
        /// Standard deviation of the coordinate jitter, in degrees
        #[arg(long, default_value_t = DEFAULT_JITTER_STD_DEG)]
        jitter_std: f64,
        /// Output CSV path. Defaults to `real_data_converted.csv` inside
        /// `FLOOD_RISK_OUTPUT_DIR` or `data/processed`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a dataset CSV and list every violation
    Validate {
        /// Dataset CSV to check
        path: PathBuf,
    },
    /// Print summary statistics of a dataset
    Summary {
        /// Dataset CSV
        path: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rank neighborhoods by weighted flood score
    Rank {
        /// Dataset CSV
        path: PathBuf,
        /// Only show the top N neighborhoods
        #[arg(long)]
        top: Option<usize>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Score one neighborhood for a given rainfall and tide
    Score {
        /// Neighborhood name as listed by `neighborhoods`
        neighborhood: String,
        /// Daily rainfall in mm (0 to 200; larger values are capped)
        #[arg(long)]
        rain: f64,
        /// Tide height in meters (0 to 3; larger values are capped)
        #[arg(long)]
        tide: f64,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the registry neighborhoods
    Neighborhoods,
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = flood_risk_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            days,
            end_date,
            seed,
            jitter_std,
            output,
        } => {
            let config = GenerateConfig {
                n_days: days,
                end_date: end_date.unwrap_or_else(|| Utc::now().date_naive()),
                seed: resolve_seed(seed, DEFAULT_SEED)?,
                jitter: Jitter::new(jitter_std)?,
            };
            let path = resolve_output(output, flood_risk_generate::DEFAULT_OUTPUT_FILE);
            log::debug!("Writing generated dataset to {}", path.display());
            let progress = IndicatifProgress::batch_bar(&multi, "Generating neighborhoods");

            let dataset = generate_to_file(&config, &path, &progress)?;
            println!("{}", report::generated(&config, &dataset));
        }
        Commands::Convert {
            tide,
            rainfall,
            seed,
            jitter_std,
            output,
        } => {
            let options = ConvertOptions {
                seed: resolve_seed(seed, DEFAULT_SEED)?,
                jitter: Jitter::new(jitter_std)?,
            };
            let path = resolve_output(output, flood_risk_convert::DEFAULT_OUTPUT_FILE);

            log::debug!("Writing converted dataset to {}", path.display());

            let conversion = convert_files(&tide, &rainfall, &path, &options)?;
            println!("{}", report::converted(&conversion));
        }
        Commands::Validate { path } => {
            let table = Table::from_path(&path)?;
            let violations = validate_table(&table);
            if !violations.is_empty() {
                eprintln!("{} failed validation:", path.display());
                for violation in &violations {
                    eprintln!("  - {violation}");
                }
                return Err(format!("{} violation(s) found", violations.len()).into());
            }
            println!("{}: {} rows, all checks passed", path.display(), table.len());
        }
        Commands::Summary { path, json } => {
            let rows = flood_risk_analytics::read_dataset(&path)?;
            let summary = flood_risk_analytics::summarize(&rows)?;
            let levels = flood_risk_analytics::risk_level_distribution(&rows)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "summary": summary,
                        "riskLevels": levels,
                    }))?
                );
            } else {
                println!("{}", report::summary(&summary, &levels));
            }
        }
        Commands::Rank { path, top, json } => {
            let rows = flood_risk_analytics::read_dataset(&path)?;
            let mut ranked =
                flood_risk_analytics::rank_neighborhoods(&rows, RankingWeights::default());
            if let Some(top) = top {
                ranked.truncate(top);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                println!("{}", report::ranking(&ranked));
            }
        }
        Commands::Score {
            neighborhood,
            rain,
            tide,
            json,
        } => {
            let Some(found) = find_neighborhood(&neighborhood) else {
                return Err(format!(
                    "Unknown neighborhood '{neighborhood}'. \
                     Run `flood_risk neighborhoods` to list them."
                )
                .into());
            };
            let rain = checked_rainfall(rain)?;
            let tide = checked_tide(tide)?;
            let rate = rate_breakdown(rain, tide, &found);
            let index = risk_index(rain, tide, found.vulnerability, found.population_density)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "neighborhood": found.name,
                        "rainfallMm": rain,
                        "tideM": tide,
                        "occurrenceRate": rate,
                        "riskIndex": index,
                    }))?
                );
            } else {
                println!("{}", report::score(&found, rain, tide, &rate, &index));
            }
        }
        Commands::Neighborhoods => {
            let neighborhoods = all_neighborhoods();
            println!("{:<20} {:<14} {:>6} {:>8}", "NAME", "CATEGORY", "VULN", "DENSITY");
            println!("{}", "-".repeat(51));
            for n in &neighborhoods {
                println!(
                    "{:<20} {:<14} {:>6.2} {:>8}",
                    n.name,
                    n.category.to_string(),
                    n.vulnerability,
                    n.population_density
                );
            }
        }
    }

    Ok(())
}
