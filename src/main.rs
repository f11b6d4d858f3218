//! modelar CLI - Operations Modeling Toolkit
//!
//! Command-line interface for evaluating scenario files.

use std::process::ExitCode;

use modelar::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
