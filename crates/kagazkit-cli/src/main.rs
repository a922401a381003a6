// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// KagazKit — merge, split, and rotate PDFs and turn images into PDFs.
//
// Entry point. Loads the persisted config, initialises logging, and hands the
// chosen subcommand to the document operations.

mod data_dir;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kagazkit_core::error::OperationError;
use kagazkit_core::human_errors::humanize_error;
use kagazkit_core::{AppConfig, FileList};
use kagazkit_document::DocumentOperations;

#[derive(Debug, Parser)]
#[command(name = "kagazkit")]
#[command(version)]
#[command(about = "Merge, split, and rotate PDFs, and turn images into PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Operation(OperationCommand),

    /// Print the effective configuration as JSON
    Config,
}

/// The document operations, one subcommand each.
#[derive(Debug, Subcommand)]
enum OperationCommand {
    /// Merge PDFs, in the order given, into one file
    Merge {
        /// PDF files to merge
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output PDF
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Convert PNG/JPEG images into a PDF with one page per image
    Convert {
        /// Images to convert
        #[arg(value_name = "IMAGES", required = true)]
        images: Vec<PathBuf>,

        /// Output PDF
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Resolution used to size pages (overrides the config)
        #[arg(long, value_name = "DPI")]
        dpi: Option<f32>,
    },

    /// Write every page of a PDF to its own file
    Split {
        /// PDF to split
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for the page files
        #[arg(short = 'd', long = "dir", value_name = "DIR")]
        output_dir: PathBuf,
    },

    /// Rotate every page of a PDF
    Rotate {
        /// PDF to rotate
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PDF
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Degrees to add to each page's rotation (defaults to the config)
        #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
        angle: Option<i64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let data_dir = data_dir::data_dir();
    let (config, config_error) = match AppConfig::load(&data_dir) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(data_dir = %data_dir.display(), "KagazKit starting");
    if let Some(err) = config_error {
        tracing::warn!(data_dir = %data_dir.display(), error = %err, "ignoring malformed config, using defaults");
    }

    let operation = match cli.command {
        Command::Operation(operation) => operation,
        Command::Config => return print_config(&config),
    };

    match run(operation, &config) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(operation = %err.operation(), error = %err, "operation failed");
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn print_config(config: &AppConfig) -> ExitCode {
    match serde_json::to_string_pretty(config) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Could not show the configuration: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Run one document operation and return the confirmation line.
fn run(command: OperationCommand, config: &AppConfig) -> Result<String, OperationError> {
    match command {
        OperationCommand::Merge { inputs, output } => {
            let files: FileList = inputs.into_iter().collect();
            let output = config.resolve_output(&output);
            let written = DocumentOperations::from_config(config).merge(files.paths(), &output)?;
            Ok(format!("Merged {} files into {}", files.len(), written.display()))
        }

        OperationCommand::Convert {
            images,
            output,
            dpi,
        } => {
            let files: FileList = images.into_iter().collect();
            let mut options = config.convert_options();
            if let Some(dpi) = dpi {
                options.resolution_dpi = dpi;
            }
            let output = config.resolve_output(&output);
            let written = DocumentOperations::new(options).convert_images(files.paths(), &output)?;
            Ok(format!("Converted {} images into {}", files.len(), written.display()))
        }

        OperationCommand::Split { input, output_dir } => {
            let output_dir = config.resolve_output(&output_dir);
            let pages = DocumentOperations::from_config(config).split(&input, &output_dir)?;
            Ok(format!("Split into {} pages successfully!", pages.len()))
        }

        OperationCommand::Rotate {
            input,
            output,
            angle,
        } => {
            let angle = angle.unwrap_or(config.default_rotation);
            let output = config.resolve_output(&output);
            let written = DocumentOperations::from_config(config).rotate(&input, &output, angle)?;
            Ok(format!("PDF rotated successfully: {}", written.display()))
        }
    }
}
