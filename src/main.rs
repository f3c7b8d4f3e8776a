//! rlc-steady-state - uncertainty-propagated analysis of series RLC bench data.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid data, configuration or I/O failure

mod cli;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cli::{Args, Command, RunArgs, DEFAULT_CONFIG};
use rlc_steady_state::analysis::{Analysis, AnalysisKind, AnalysisReport};
use rlc_steady_state::config::Config;
use rlc_steady_state::io::write_table_csv;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let args = Args::parse_args();

    if let Err(e) = init_logging(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::InitConfig { output, force } => init_config(&output, force),
        Command::Current { resistance, run } => {
            analyse(args.config.as_deref(), AnalysisKind::Current, resistance, &run)
        }
        Command::Power { resistance, run } => {
            analyse(args.config.as_deref(), AnalysisKind::Power, resistance, &run)
        }
    }
}

/// Handle `init-config`: write the default configuration file.
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    std::fs::write(path, Config::default_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Created {}", path.display());
    Ok(())
}

/// Explicit `--config`, else the default file in the working directory, else built-in values.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if !default.exists() {
                debug!("No config file, using bench values");
                return Ok(Config::default());
            }
            default
        }
    };
    Config::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}

fn analyse(
    config_path: Option<&Path>,
    kind: AnalysisKind,
    resistance: f64,
    run: &RunArgs,
) -> Result<()> {
    let config = load_config(config_path)?;
    let dataset = match &run.dataset {
        Some(name) => config.dataset(name)?,
        None => config.dataset_for_resistance(resistance)?,
    };

    let mut analysis = Analysis::new(kind, dataset, resistance);
    analysis.constants = config.circuit.to_constants()?;
    analysis.model_curve = run.model_curve;

    let report = analysis.run()?;
    print_report(&report, kind, run.print_points);

    if let Some(path) = &run.csv {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_table_csv(BufWriter::new(file), &report.table)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if !run.no_plot {
        show_chart(report)?;
    }
    Ok(())
}

fn print_report(report: &AnalysisReport, kind: AnalysisKind, print_points: bool) {
    if print_points || kind.lists_points() {
        for point in &report.points {
            println!("{point}");
            if print_points {
                println!("{:.3}", point.correlation_matrix());
            }
        }
    }
    println!("{}", report.table);
    println!(
        "\nResonance: w0 = {} rad/s | Q = {}",
        report.resonance, report.quality_factor
    );
}

#[cfg(feature = "plot")]
fn show_chart(report: AnalysisReport) -> Result<()> {
    rlc_steady_state::plot::show(report.chart)
        .map_err(|e| anyhow::anyhow!("Plot window failed: {e}"))
}

#[cfg(not(feature = "plot"))]
fn show_chart(_report: AnalysisReport) -> Result<()> {
    tracing::warn!("Built without the `plot` feature; skipping the plot window");
    Ok(())
}
