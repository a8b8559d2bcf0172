//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{download::BEST_TRACK_URL, export::OutputFormat};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, annotate and export a best-track archive
    Process(ProcessArgs),
    /// Download the JMA best-track archive
    Fetch {
        /// Archive URL
        #[arg(long, default_value = BEST_TRACK_URL)]
        url: String,
        /// Directory to extract bst_all.txt into (defaults to the home directory)
        #[arg(long)]
        dest: Option<PathBuf>,
    },
    /// Test whether a point lies inside PAR
    CheckPoint {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Classify a single fix
    Classify {
        /// JMA grade code
        #[arg(long, default_value = "")]
        grade: String,
        /// Maximum sustained wind in knots
        #[arg(long, default_value = "")]
        wind: String,
        /// Central pressure in hPa
        #[arg(long, default_value = "")]
        pressure: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    /// Best-track archive (plain text or .gz)
    #[arg(long, default_value = "bst_all.txt")]
    pub input: PathBuf,

    /// Year / International Name / PAGASA Name table
    #[arg(long, default_value = "pagasa_mapping_all.csv")]
    pub mapping: PathBuf,

    /// Extra overrides, same columns as the mapping table
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Output file (defaults to a dated file in the current directory)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Used when the output file cannot be written
    #[arg(long)]
    pub fallback_output: Option<PathBuf>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match (self.verbose, self.quiet) {
            (true, _) => "debug",
            (_, true) => "error",
            _ => "info",
        }
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let bar = ProgressBar::new(size).with_message(message);
    if let Ok(style) = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}") {
        bar.set_style(style.progress_chars("##-"));
    }

    bar
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_process_defaults() {
        let cli = Cli::parse_from(["partrack", "process"]);
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.input, PathBuf::from("bst_all.txt"));
                assert_eq!(args.mapping, PathBuf::from("pagasa_mapping_all.csv"));
                assert!(args.output.is_none());
                assert!(args.format.is_none());
            }
            _ => panic!("expected process"),
        }
        assert_eq!(Cli::parse_from(["partrack", "process"]).log_filter(), "info");
    }

    #[test]
    fn should_parse_process_options() {
        let cli = Cli::parse_from([
            "partrack",
            "process",
            "--input",
            "bst.txt.gz",
            "--output",
            "out.parquet",
            "--format",
            "parquet",
            "--verbose",
        ]);
        assert_eq!(cli.log_filter(), "debug");
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.input, PathBuf::from("bst.txt.gz"));
                assert_eq!(args.format, Some(OutputFormat::Parquet));
            }
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn should_parse_negative_coordinates() {
        let cli = Cli::parse_from(["partrack", "check-point", "--lat", "-10.5", "--lon", "125"]);
        match cli.command {
            Commands::CheckPoint { lat, lon } => {
                assert_eq!(lat, -10.5);
                assert_eq!(lon, 125.0);
            }
            _ => panic!("expected check-point"),
        }
    }
}
