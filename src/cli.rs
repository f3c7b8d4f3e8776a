//! Command-line interface argument parsing.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = ".rlc-steady-state.toml";

/// Steady-state analysis of series RLC bench measurements
///
/// Propagates measurement uncertainty into current and power, prints the
/// result table sorted by angular frequency and plots it with error bars.
///
/// Examples:
///   rlc-steady-state current --resistance 100
///   rlc-steady-state current --resistance 1000 --model-curve
///   rlc-steady-state power --dataset r100 --resistance 1000 --csv power.csv
///   rlc-steady-state init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Configuration file overriding circuit values and adding datasets
    #[arg(short, long, global = true, value_name = "FILE", env = "RLC_STEADY_STATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Analysis to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available analyses.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Measured and theoretical current against angular frequency
    Current {
        /// Series resistance in ohms
        #[arg(short, long, default_value_t = 100.0, value_name = "OHMS")]
        resistance: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Dissipated power against angular frequency
    Power {
        /// Series resistance in ohms
        #[arg(short, long, default_value_t = 1000.0, value_name = "OHMS")]
        resistance: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = DEFAULT_CONFIG, value_name = "FILE")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by both analyses.
#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Dataset name; defaults to the one recorded with the given resistance
    #[arg(short, long, value_name = "NAME")]
    pub dataset: Option<String>,

    /// Also write the result table as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Do not open the plot window
    #[arg(long)]
    pub no_plot: bool,

    /// Overlay the nominal model prediction as a smooth curve
    #[arg(long)]
    pub model_curve: bool,

    /// Print every derived point and its correlation matrix
    #[arg(long)]
    pub print_points: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level implied by `-v`/`-q`.
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::WARN
        } else {
            match self.verbose {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_defaults_to_one_hundred_ohms() {
        let args = Args::try_parse_from(["rlc-steady-state", "current"]).expect("valid");
        match args.command {
            Command::Current { resistance, ref run } => {
                assert_eq!(resistance, 100.0);
                assert!(run.dataset.is_none());
                assert!(!run.no_plot);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(args.log_level(), Level::INFO);
    }

    #[test]
    fn power_accepts_dataset_and_csv() {
        let args = Args::try_parse_from([
            "rlc-steady-state",
            "-v",
            "power",
            "--dataset",
            "r100",
            "--csv",
            "out.csv",
            "--no-plot",
        ])
        .expect("valid");
        assert_eq!(args.log_level(), Level::DEBUG);
        match args.command {
            Command::Power { resistance, run } => {
                assert_eq!(resistance, 1000.0);
                assert_eq!(run.dataset.as_deref(), Some("r100"));
                assert_eq!(run.csv, Some(PathBuf::from("out.csv")));
                assert!(run.no_plot);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["rlc-steady-state", "-q", "-v", "current"]).is_err());
    }
}
