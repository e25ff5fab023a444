//! CarbonRoute CLI
//!
//! Command-line front end for the emission calculation and recommendation
//! engine. Results are printed to stdout as JSON; logs go to stderr.

#![allow(clippy::print_stdout)]

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::TransportMode;
use infrastructure::{AppConfig, init_logging};

/// CarbonRoute CLI
#[derive(Parser)]
#[command(name = "carbonroute-cli")]
#[command(author, version, about = "Transport emission estimates and lower-carbon alternatives", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./carbonroute.toml if present)
    #[arg(short, long, global = true, env = "CARBONROUTE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the emissions of a journey
    ///
    /// Example: carbonroute-cli estimate shipment.json
    Estimate {
        /// Journey file (JSON)
        journey: PathBuf,
    },

    /// Recommend lower-emission alternatives for a journey
    ///
    /// An empty recommendation list means the journey is already optimal
    /// for the candidate modes.
    /// Example: carbonroute-cli recommend shipment.json --modes rail,sea --max 3
    Recommend {
        /// Journey file (JSON)
        journey: PathBuf,

        /// Candidate modes, comma separated (default: from configuration)
        #[arg(short, long, value_delimiter = ',')]
        modes: Vec<TransportMode>,

        /// Maximum number of recommendations (default: from configuration)
        #[arg(long)]
        max: Option<usize>,
    },

    /// Detailed per-leg report for a journey
    Report {
        /// Journey file (JSON)
        journey: PathBuf,
    },

    /// Print the active emission factor table
    Factors,

    /// Print the effective configuration
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let logging = match log_filter_from_verbosity(cli.verbose) {
        Some(filter) => config.logging.clone().with_filter(filter),
        None => config.logging.clone(),
    };
    init_logging(&logging)?;

    let output = match cli.command {
        Commands::Estimate { journey } => commands::estimate(&config, &journey)?,
        Commands::Recommend {
            journey,
            modes,
            max,
        } => commands::recommend(&config, &journey, &modes, max)?,
        Commands::Report { journey } => commands::report(&config, &journey)?,
        Commands::Factors => commands::factors(&config)?,
        Commands::Config => serde_json::to_value(&config)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_filters() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(5), Some("trace"));
    }

    #[test]
    fn recommend_parses_mode_list() {
        let cli = Cli::try_parse_from([
            "carbonroute-cli",
            "recommend",
            "j.json",
            "--modes",
            "rail,railway,sea",
            "--max",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Recommend { modes, max, .. } => {
                assert_eq!(
                    modes,
                    vec![TransportMode::Rail, TransportMode::Rail, TransportMode::Sea]
                );
                assert_eq!(max, Some(2));
            },
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn unknown_mode_is_rejected_at_parse_time() {
        let result =
            Cli::try_parse_from(["carbonroute-cli", "recommend", "j.json", "--modes", "teleport"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
