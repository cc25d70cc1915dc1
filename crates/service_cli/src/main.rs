//! mc_pricer - Command Line Monte Carlo Option Pricing
//!
//! This is the operational entry point for the Monte Carlo pricing engine.
//!
//! # Commands
//!
//! - `mc_pricer price` - Price a European call and put under GBM
//! - `mc_pricer check` - Print the resolved configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate resolves configuration
//! (defaults, TOML file, environment, flags), initialises tracing and
//! drives `pricer_pricing`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::price::PriceArgs;
use config::{build_config, CliArgs};

/// Monte Carlo European option pricer
#[derive(Parser)]
#[command(name = "mc_pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug log level unless --log-level is given)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European call and put by Monte Carlo simulation
    Price(PriceArgs),

    /// Check configuration and runtime
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let engine = match &self.command {
            Commands::Price(args) => args.engine,
            Commands::Check => None,
        };

        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            engine,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration resolved");

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pricer_pricing::mc::Execution;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_price_arguments() {
        let cli = Cli::try_parse_from([
            "mc_pricer",
            "price",
            "--spot",
            "95",
            "--rate",
            "-0.01",
            "--paths",
            "5000",
            "--seed",
            "48",
            "--engine",
            "optimized",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Price(args) = &cli.command else {
            panic!("expected price command");
        };
        assert_eq!(args.spot, 95.0);
        assert_eq!(args.rate, -0.01);
        assert_eq!(args.paths, 5000);
        assert_eq!(args.seed, Some(48));
        assert_eq!(args.engine, Some(Execution::Optimized));
        assert_eq!(cli.config_args().engine, Some(Execution::Optimized));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mc_pricer", "check", "-v", "--log-level", "trace"]).unwrap();
        let args = cli.config_args();
        assert!(args.verbose);
        assert_eq!(args.log_level.as_deref(), Some("trace"));
        assert_eq!(args.engine, None);
    }

    #[test]
    fn test_unknown_engine_rejected() {
        assert!(Cli::try_parse_from(["mc_pricer", "price", "--engine", "gpu"]).is_err());
    }
}
