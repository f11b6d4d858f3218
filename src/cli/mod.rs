//! CLI module for modelar.
//!
//! This module contains all CLI logic extracted from main.rs to enable
//! full test coverage. The entry point `run_cli` can be called from main.rs
//! with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{
    build_report, run_cli, InventoryReport, ProductionReport, QueueReport, ScenarioReport,
};
pub use output::{print_help, print_scenario_report, print_version};
