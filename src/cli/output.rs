//! CLI output formatting.
//!
//! This module contains all output formatting functions for the CLI.
//! Extracted to enable testing of output generation.

use crate::models::{ProductionResult, QueueResult};

use super::commands::{InventoryReport, ProductionReport, QueueReport, ScenarioReport};

/// Print version information.
pub fn print_version() {
    println!("modelar {}", env!("CARGO_PKG_VERSION"));
    if let Some(hash) = option_env!("GIT_HASH") {
        println!("commit: {hash}");
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"modelar - Operations Modeling Toolkit

USAGE:
    modelar <COMMAND> [OPTIONS]

COMMANDS:
    run <scenario.yaml>         Evaluate every model in a scenario
        --json                  Emit the report as JSON
        -v, --verbose           Show per-model detail

    chart <scenario.yaml>       Export chart data for each model
        --out <DIR>             Output directory (default: charts)
        --format <FMT>          'json' or 'csv' (default: json)

    validate <scenario.yaml>    Validate a scenario file against the schema

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    modelar run scenarios/workshop.yaml
    modelar run scenarios/workshop.yaml --json
    modelar chart scenarios/workshop.yaml --out charts --format csv
    modelar validate scenarios/workshop.yaml

MODELS:
    production    Linear program: maximize profit subject to resource limits
    inventory     Economic order quantity and the total cost curve
    queueing      M/M/1 steady-state metrics and occupancy curve

For more information, see: https://github.com/paiml/modelar
"
    );
}

/// Print a scenario report.
///
/// # Arguments
///
/// * `report` - The evaluated scenario to display
/// * `verbose` - Whether to show per-model detail
pub fn print_scenario_report(report: &ScenarioReport, verbose: bool) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if report.name.is_empty() {
        println!("Scenario Results");
    } else {
        println!("Scenario: {}", report.name);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if let Some(production) = &report.production {
        print_production_section(production, verbose);
    }
    if let Some(inventory) = &report.inventory {
        print_inventory_section(inventory, verbose);
    }
    if let Some(queueing) = &report.queueing {
        print_queue_section(queueing, verbose);
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Scenario complete");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

/// Print the production planning section of a report.
fn print_production_section(report: &ProductionReport, verbose: bool) {
    println!("Production Plan:");
    match &report.result {
        ProductionResult::Optimal {
            quantities,
            max_profit,
        } => {
            for (i, quantity) in quantities.iter().enumerate() {
                println!("  product {}: {quantity:.3} units", i + 1);
            }
            println!("  ✓ Maximum profit: {max_profit:.2}");

            if verbose {
                println!();
                for (i, row) in report.input.constraint_coefficients.iter().enumerate() {
                    let used: f64 = row.iter().zip(quantities.iter()).map(|(a, x)| a * x).sum();
                    let limit = report.input.constraint_limits.get(i).copied().unwrap_or(0.0);
                    println!("  constraint {}: {used:.2} of {limit:.2} used", i + 1);
                }
            }
        }
        ProductionResult::Infeasible => {
            println!("  ✗ No feasible production plan");
        }
    }
    println!();
}

/// Print the inventory policy section of a report.
fn print_inventory_section(report: &InventoryReport, verbose: bool) {
    println!("Inventory Policy:");
    println!("  ✓ Economic order quantity: {:.3} units", report.result.eoq);
    println!("  Total annual cost at EOQ:  {:.2}", report.result.cost_at_eoq);

    if verbose {
        let orders_per_year = report.input.annual_demand / report.result.eoq;
        println!("  Orders per year:           {orders_per_year:.2}");
        println!(
            "  Cost curve:                {} samples",
            report.result.total_cost_curve.len()
        );
    }
    println!();
}

/// Print the service queue section of a report.
fn print_queue_section(report: &QueueReport, verbose: bool) {
    println!("Service Queue (M/M/1):");
    match &report.result {
        QueueResult::Stable(metrics) => {
            println!("  ✓ Stable (utilization {:.4})", metrics.utilization);
            println!("  Average number in system: {:.4}", metrics.avg_in_system);
            println!("  Average number in queue:  {:.4}", metrics.avg_in_queue);
            println!("  Average time in system:   {:.4}", metrics.avg_time_in_system);
            println!("  Average time in queue:    {:.4}", metrics.avg_time_in_queue);

            if verbose {
                let spare = report.input.service_rate - report.input.arrival_rate;
                println!("  Spare service capacity:   {spare:.4}");
            }
        }
        QueueResult::Unstable { utilization } => {
            println!("  ✗ Unstable: arrivals reach or exceed service capacity");
            println!("  Utilization: {utilization:.4} (>= 1)");
        }
    }
    println!();
}
