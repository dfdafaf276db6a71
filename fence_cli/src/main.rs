//! # Fence Calculator CLI
//!
//! Command-line front end over `fence_core`: list the configurations in a
//! price table, or price a fence and optionally export the results workbook.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fence_core::display::format_money;
use fence_core::logging::init_tracing;
use fence_core::{AppConfig, CalcError, CalcResult, Calculation, CalculatorSession, PriceTable};

use cli::{CalculateArgs, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };
    init_tracing(&config.log_level);
    tracing::debug!(config_file = ?cli.config, "Settings loaded");

    let outcome = match cli.command {
        Commands::Options { prices, metal_type } => {
            run_options(&config, prices, metal_type.as_deref())
        }
        Commands::Calculate(args) => run_calculate(&config, &args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn run_options(config: &AppConfig, prices: Option<PathBuf>, metal_type: Option<&str>) -> CalcResult<()> {
    let mut session = CalculatorSession::new();
    let path = prices.unwrap_or_else(|| config.prices_file.clone());
    let table = session.load_prices(&path)?;

    let metal_types = match metal_type {
        Some(metal) => vec![metal.to_string()],
        None => table.metal_types(),
    };

    println!("Price table: {} ({} rows)", path.display(), table.len());
    println!();
    for metal in &metal_types {
        print_options(table, metal);
    }
    Ok(())
}

fn print_options(table: &PriceTable, metal_type: &str) {
    let options = table.options(metal_type);
    println!("{}", metal_type);
    if options.profile_heights.is_empty() {
        println!("  (not in price table)");
        return;
    }
    println!("  Profile heights (mm): {}", join_values(&options.profile_heights));
    println!("  Thicknesses (mm):     {}", join_values(&options.thicknesses));
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_calculate(config: &AppConfig, args: &CalculateArgs) -> CalcResult<()> {
    let mut session = CalculatorSession::new();
    let path = args.prices.clone().unwrap_or_else(|| config.prices_file.clone());
    session.load_prices(&path)?;

    let form = args.to_form(&config.defaults);
    let calculation = session.calculate(&form)?;

    if args.json {
        let json = serde_json::to_string_pretty(calculation).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
    } else {
        print_calculation(calculation, &config.currency);
    }

    if let Some(output) = &args.output {
        session.save_results(output, &config.currency)?;
        if !args.json {
            println!();
            println!("Saved: {}", output.display());
        }
    }

    Ok(())
}

fn print_calculation(calculation: &Calculation, currency: &str) {
    println!("═══════════════════════════════════════════════════════════");
    println!("  FENCE COST");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Parameters:");
    for (name, value) in calculation.parameters() {
        println!("  {:<18} {}", name, value);
    }
    println!();
    println!("Breakdown:");
    for item in &calculation.breakdown.items {
        println!("  {:<48} {:>18}", item.detail, format_money(item.cost, currency));
    }
    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!("  TOTAL: {}", format_money(calculation.breakdown.total, currency));
    println!("═══════════════════════════════════════════════════════════");
}

fn report(error: &CalcError) -> ExitCode {
    eprintln!("Error: {}", error);
    if let Ok(json) = serde_json::to_string_pretty(error) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    ExitCode::FAILURE
}
