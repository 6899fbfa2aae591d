//! kelvin - black-body color from the command line
//!
//! Sweeps temperatures or filament voltages and reports the XYZ and RGB
//! color of each point.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kelvin_color::SweepMode;
use kelvin_primaries::MatrixVariant;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kelvin")]
#[command(author, version, about = "Black-body color sweeps")]
#[command(long_about = "
Computes the color of an ideal black body, or of a tungsten filament driven
at a given voltage, by integrating Planck's law against the CIE color
matching functions.

Examples:
  kelvin point 6500                          # XYZ and RGB at 6500 K
  kelvin point 6.3 --voltage                 # GE 47 lamp at its rated voltage
  kelvin sweep --min 1000 --max 10000 --step 100 -o locus.csv
  kelvin sweep --mode voltage --min 1 --max 6.3 --step 0.1 \\
               --reference 6.3 --luminance 1.2e6 --cmf cie1931.csv
  kelvin sweep -c run.yaml --parallel
  kelvin filament 1.5 3 6.3                  # voltage -> temperature
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep a temperature or voltage range to CSV
    #[command(visible_alias = "s")]
    Sweep(SweepArgs),

    /// Color of a single temperature or voltage
    #[command(visible_alias = "p")]
    Point(PointArgs),

    /// Filament temperature for given voltages
    #[command(visible_alias = "f")]
    Filament(FilamentArgs),
}

/// Pipeline switches shared by `sweep` and `point`.
#[derive(Args, Clone, Default)]
struct PipelineArgs {
    /// CMF table CSV (wavelength, x, y, z); built-in CIE 1931 fit if omitted
    #[arg(long)]
    cmf: Option<PathBuf>,

    /// RGB primaries: cie-rgb, srgb
    #[arg(short, long)]
    matrix: Option<MatrixVariant>,

    /// Do not scale XYZ by 683 lm/W
    #[arg(long)]
    no_efficacy: bool,

    /// Divide RGB by its largest absolute component
    #[arg(short, long)]
    normalize: bool,
}

#[derive(Args)]
struct SweepArgs {
    /// YAML run file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input unit: temperature, voltage
    #[arg(long)]
    mode: Option<SweepMode>,

    /// First value (K or V)
    #[arg(long)]
    min: Option<f64>,

    /// Last value, inclusive
    #[arg(long)]
    max: Option<f64>,

    /// Increment
    #[arg(long)]
    step: Option<f64>,

    /// Calibration reference input (K or V)
    #[arg(long, requires = "luminance")]
    reference: Option<f64>,

    /// Measured luminance at the reference (lm sr^-1 m^-2)
    #[arg(long, requires = "reference")]
    luminance: Option<f64>,

    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Evaluate points in parallel
    #[arg(long)]
    parallel: bool,

    /// Omit X, Y, Z columns (kept when calibrated)
    #[arg(long)]
    no_xyz: bool,

    /// Output CSV (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PointArgs {
    /// Temperature (K), or voltage (V) with --voltage
    value: f64,

    /// Treat the value as a filament voltage
    #[arg(long)]
    voltage: bool,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Args)]
struct FilamentArgs {
    /// Voltages (V), or temperatures (K) with --inverse
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Filament length (m)
    #[arg(long)]
    length: Option<f64>,

    /// Filament wire radius (m)
    #[arg(long)]
    radius: Option<f64>,

    /// Emissivity
    #[arg(long)]
    emissivity: Option<f64>,

    /// Convert temperatures to voltages
    #[arg(long)]
    inverse: bool,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Sweep(args) => commands::sweep::run(args),
        Commands::Point(args) => commands::point::run(args),
        Commands::Filament(args) => commands::filament::run(args),
    }
}
