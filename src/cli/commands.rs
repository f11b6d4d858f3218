//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.
//! Extracted to enable comprehensive testing of command behavior.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;

use crate::config::ScenarioConfig;
use crate::error::ModelResult;
use crate::export::{self, ExportFormat};
use crate::models::{inventory, production, queueing};
use crate::models::{
    EoqInput, EoqResult, ProductionInput, ProductionResult, QueueInput, QueueResult,
};

use super::output::{print_help, print_scenario_report, print_version};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            scenario_path,
            json,
            verbose,
        } => run_scenario(&scenario_path, json, verbose),
        Command::Chart {
            scenario_path,
            out_dir,
            format,
        } => chart_scenario(&scenario_path, &out_dir, format),
        Command::Validate { scenario_path } => validate_scenario(&scenario_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

// ============================================================================
// Scenario Report
// ============================================================================

/// Evaluated production section of a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ProductionReport {
    /// Input parameters the model ran with.
    pub input: ProductionInput,
    /// Model outcome.
    pub result: ProductionResult,
}

/// Evaluated inventory section of a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    /// Input parameters the model ran with.
    pub input: EoqInput,
    /// Model outcome.
    pub result: EoqResult,
}

/// Evaluated queueing section of a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct QueueReport {
    /// Input parameters the model ran with.
    pub input: QueueInput,
    /// Model outcome.
    pub result: QueueResult,
}

/// Results for every model enabled in a scenario.
///
/// Infeasible plans and unstable queues are carried as ordinary
/// results here; they are verdicts, not failures.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Scenario name from the configuration.
    pub name: String,
    /// Production planning results, if enabled.
    pub production: Option<ProductionReport>,
    /// Inventory policy results, if enabled.
    pub inventory: Option<InventoryReport>,
    /// Service queue results, if enabled.
    pub queueing: Option<QueueReport>,
}

/// Evaluate every model section enabled in a configuration.
///
/// # Errors
///
/// Returns error if any model rejects its input or the solver fails.
pub fn build_report(config: &ScenarioConfig) -> ModelResult<ScenarioReport> {
    let samples = config.chart_samples();

    let production = match &config.production {
        Some(section) => {
            let input = section.to_input();
            let result = production::solve(&input)?;
            Some(ProductionReport { input, result })
        }
        None => None,
    };

    let inventory = match &config.inventory {
        Some(section) => {
            let input = section.to_input();
            let result = inventory::compute_with_samples(&input, samples)?;
            Some(InventoryReport { input, result })
        }
        None => None,
    };

    let queueing = match &config.queueing {
        Some(section) => {
            let input = section.to_input();
            let result = queueing::evaluate(&input)?;
            Some(QueueReport { input, result })
        }
        None => None,
    };

    Ok(ScenarioReport {
        name: config.scenario.name.clone(),
        production,
        inventory,
        queueing,
    })
}

// ============================================================================
// Commands
// ============================================================================

/// Run every model in a scenario file.
///
/// # Arguments
///
/// * `path` - Path to the scenario YAML file
/// * `json` - Emit the report as JSON instead of text
/// * `verbose` - Whether to show per-model detail
#[must_use]
pub fn run_scenario(path: &Path, json: bool, verbose: bool) -> ExitCode {
    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║           modelar - Scenario Model Runner                     ║");
        println!("╚═══════════════════════════════════════════════════════════════╝\n");

        println!("Running scenario: {}\n", path.display());
    }

    let config = match ScenarioConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match build_report(&config) {
        Ok(report) => {
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(out) => {
                        println!("{out}");
                        ExitCode::SUCCESS
                    }
                    Err(e) => {
                        eprintln!("Error: {e}");
                        ExitCode::from(1)
                    }
                }
            } else {
                print_scenario_report(&report, verbose);
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Export chart data for each model in a scenario file.
///
/// # Arguments
///
/// * `path` - Path to the scenario YAML file
/// * `out_dir` - Directory to write chart files into
/// * `format` - Output format for chart files
#[must_use]
pub fn chart_scenario(path: &Path, out_dir: &Path, format: ExportFormat) -> ExitCode {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║           modelar - Chart Data Export                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    println!("Scenario: {}", path.display());
    println!("Output:   {} ({format})\n", out_dir.display());

    let config = match ScenarioConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(out_dir) {
        eprintln!("Error: failed to create {}: {e}", out_dir.display());
        return ExitCode::from(1);
    }

    match export_charts(&config, out_dir, format) {
        Ok(written) => {
            println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("✓ Chart export complete ({written} files)");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Write one chart file per enabled model, returning the file count.
fn export_charts(
    config: &ScenarioConfig,
    out_dir: &Path,
    format: ExportFormat,
) -> ModelResult<usize> {
    let samples = config.chart_samples();
    let mut written = 0;

    if let Some(section) = &config.production {
        let input = section.to_input();
        if input.n_products() == 2 {
            let series = export::production_chart(&input, samples)?;
            let file = chart_path(out_dir, "production", format);
            export::export(&series, &file, format)?;
            println!("✓ Wrote {}", file.display());
            written += 1;
        } else {
            println!(
                "! Skipping production chart ({} products, chart needs 2)",
                input.n_products()
            );
        }
    }

    if let Some(section) = &config.inventory {
        let series = export::inventory_chart(&section.to_input(), samples)?;
        let file = chart_path(out_dir, "inventory", format);
        export::export(&series, &file, format)?;
        println!("✓ Wrote {}", file.display());
        written += 1;
    }

    if let Some(section) = &config.queueing {
        let series = export::queueing_chart(&section.to_input(), samples)?;
        let file = chart_path(out_dir, "queueing", format);
        export::export(&series, &file, format)?;
        println!("✓ Wrote {}", file.display());
        written += 1;
    }

    Ok(written)
}

fn chart_path(out_dir: &Path, stem: &str, format: ExportFormat) -> PathBuf {
    out_dir.join(format!("{stem}.{}", format.extension()))
}

/// Validate a scenario YAML file against the schema.
///
/// # Arguments
///
/// * `path` - Path to the scenario YAML file
#[must_use]
pub fn validate_scenario(path: &Path) -> ExitCode {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║           modelar - Scenario Validation                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    println!("Validating: {}\n", path.display());

    match ScenarioConfig::load(path) {
        Ok(config) => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("✓ Scenario validation PASSED");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

            println!("Enabled models:");
            if config.production.is_some() {
                println!("  ✓ production");
            }
            if config.inventory.is_some() {
                println!("  ✓ inventory");
            }
            if config.queueing.is_some() {
                println!("  ✓ queueing");
            }
            println!("\nChart samples: {}", config.chart_samples());

            println!("\nNext steps:");
            println!("  • Run: modelar run {}", path.display());
            println!("  • Charts: modelar chart {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("✗ Scenario validation FAILED");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            println!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
