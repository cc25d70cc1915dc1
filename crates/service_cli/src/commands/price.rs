//! Price command implementation
//!
//! Prices one European call/put scenario with the Monte Carlo engine and
//! reports it next to the Black-Scholes closed form.

use std::time::Instant;

use clap::{Args, ValueEnum};
use pricer_core::analytical::black_scholes_prices;
use pricer_core::types::OptionParameters;
use pricer_pricing::mc::{EngineConfig, Execution, PricingEngine, SimulationResult};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Output formats for the price command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Arguments of `mc_pricer price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Initial spot price S0
    #[arg(long, default_value_t = 100.0)]
    pub spot: f64,

    /// Strike price K
    #[arg(short = 'k', long, default_value_t = 100.0)]
    pub strike: f64,

    /// Continuously compounded risk-free rate r
    #[arg(short, long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub rate: f64,

    /// Volatility σ
    #[arg(long, default_value_t = 0.2)]
    pub volatility: f64,

    /// Time to expiry T in years
    #[arg(short = 't', long, default_value_t = 1.0)]
    pub expiry: f64,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    pub paths: usize,

    /// Seed (fresh OS entropy when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Engine variant (reference, optimized)
    #[arg(short, long)]
    pub engine: Option<Execution>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Black-Scholes prices of the same scenario
#[derive(Debug, Clone, Copy, Serialize)]
struct ReferencePrices {
    call: f64,
    put: f64,
}

/// Everything printed by one price invocation
#[derive(Debug, Clone, Serialize)]
struct PriceReport {
    parameters: OptionParameters,
    engine: EngineConfig,
    result: SimulationResult,
    black_scholes: ReferencePrices,
    elapsed_ms: f64,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    let engine = PricingEngine::new(
        args.spot,
        args.strike,
        args.rate,
        args.volatility,
        args.expiry,
        args.seed,
    )?
    .with_config(config.engine);

    info!(
        num_paths = args.paths,
        engine = %config.engine.execution(),
        chunk_size = config.engine.chunk_size(),
        summation = %config.engine.summation(),
        "Starting pricing..."
    );

    let start = Instant::now();
    let result = engine.price(args.paths)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    info!(elapsed_ms, seed = result.seed, "Pricing complete");

    let (call, put) = black_scholes_prices(engine.parameters());
    let report = PriceReport {
        parameters: *engine.parameters(),
        engine: config.engine,
        result,
        black_scholes: ReferencePrices { call, put },
        elapsed_ms,
    };

    match args.format {
        OutputFormat::Table => print!("{}", render_table(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn render_table(report: &PriceReport) -> String {
    let r = &report.result;
    let bs = &report.black_scholes;
    let mut out = String::new();

    out.push_str(&format!(
        "\nEngine: {} | paths: {} | seed: {} | {:.1} ms\n",
        report.engine.execution(),
        r.num_paths,
        r.seed,
        report.elapsed_ms
    ));
    out.push_str("┌────────┬──────────────┬──────────────┬──────────────┬──────────────┐\n");
    out.push_str("│ Option │ MC price     │ Std error    │ BS price     │ MC - BS      │\n");
    out.push_str("├────────┼──────────────┼──────────────┼──────────────┼──────────────┤\n");
    for (name, price, std_error, reference) in [
        ("Call", r.call_price, r.call_std_error, bs.call),
        ("Put", r.put_price, r.put_std_error, bs.put),
    ] {
        out.push_str(&format!(
            "│ {:<6} │ {:>12.6} │ {:>12.6} │ {:>12.6} │ {:>+12.6} │\n",
            name,
            price,
            std_error,
            reference,
            price - reference
        ));
    }
    out.push_str("└────────┴──────────────┴──────────────┴──────────────┴──────────────┘\n");
    out
}
