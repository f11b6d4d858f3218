//! CLI argument parsing.
//!
//! This module provides the argument parser for the modelar CLI.
//! Extracted to enable comprehensive testing of argument parsing logic.

use std::path::PathBuf;

use crate::export::ExportFormat;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run every model in a scenario
    Run {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
        /// Emit the report as JSON instead of text.
        json: bool,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Export chart data for each model in a scenario
    Chart {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
        /// Directory to write chart files into.
        out_dir: PathBuf,
        /// Output format for chart files.
        format: ExportFormat,
    },
    /// Validate a scenario YAML file
    Validate {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "chart" => Self::parse_chart_command(args),
            "validate" => Self::parse_validate_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires scenario path");
            return Command::Help;
        }

        let mut json = false;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--json" => {
                    json = true;
                    i += 1;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            scenario_path: PathBuf::from(&args[2]),
            json,
            verbose,
        }
    }

    /// Parse the 'chart' command arguments.
    fn parse_chart_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'chart' command requires scenario path");
            return Command::Help;
        }

        let mut out_dir = PathBuf::from("charts");
        let mut format = ExportFormat::default();

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--out" => {
                    if i + 1 < args.len() {
                        out_dir = PathBuf::from(&args[i + 1]);
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--format" => {
                    if i + 1 < args.len() {
                        if let Ok(parsed) = args[i + 1].parse() {
                            format = parsed;
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }

        Command::Chart {
            scenario_path: PathBuf::from(&args[2]),
            out_dir,
            format,
        }
    }

    /// Parse the 'validate' command arguments.
    fn parse_validate_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'validate' command requires scenario path");
            return Command::Help;
        }

        Command::Validate {
            scenario_path: PathBuf::from(&args[2]),
        }
    }
}
