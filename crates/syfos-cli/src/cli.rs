use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "SyFoS Developers",
    version,
    about = "SyFoS CLI - Synthesize atomic force microscopy force-distance curves and recover the physical parameters behind them.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to generate replicas.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize a force volume (ideal curve, shifted curve and noisy replicas) as CSV.
    Generate(GenerateArgs),
    /// Segment a curve and recover spring constant, radius, Hamaker constant and reduced modulus.
    Analyze(AnalyzeArgs),
    /// List the built-in probe and sample material presets.
    Materials,
}

/// Probe and sample selection shared by `generate` and `analyze`.
#[derive(Args, Debug, Clone, Default)]
pub struct MaterialArgs {
    /// Probe material preset (e.g., 'silicon').
    #[arg(long, value_name = "NAME")]
    pub probe: Option<String>,

    /// Sample material preset (e.g., 'gold').
    #[arg(long, value_name = "NAME")]
    pub sample: Option<String>,

    /// Cantilever spring constant in N/m.
    #[arg(short = 'k', long, value_name = "FLOAT")]
    pub spring_constant: Option<f64>,

    /// Tip radius in m.
    #[arg(short = 'r', long, value_name = "FLOAT")]
    pub tip_radius: Option<f64>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    // --- Core Arguments ---
    /// Path for the force volume CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path for the metadata CSV (reduced modulus, jump-to-contact, Hamaker constant).
    /// Defaults to '<output>_metadata.csv'.
    #[arg(long, value_name = "PATH")]
    pub metadata: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Material Overrides ---
    #[command(flatten)]
    pub material: MaterialArgs,

    // --- Measurement Overrides ---
    /// Piezo position of the first sample in m.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub start_distance: Option<f64>,

    /// Piezo step between samples in m.
    #[arg(long, value_name = "FLOAT")]
    pub step_size: Option<f64>,

    /// Piezo position at which the simulation stops, in m.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub maximum_piezo: Option<f64>,

    // --- Force Volume Overrides ---
    /// Number of noisy replicas.
    #[arg(short = 'n', long, value_name = "INT")]
    pub replicas: Option<usize>,

    /// Standard deviation of the Gaussian deflection noise in m.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub noise: Option<f64>,

    /// Constant offset added to the deflection of the shifted curve, in m.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub virtual_deflection: Option<f64>,

    /// Constant offset added to the piezo axis of the shifted curve, in m.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub topography: Option<f64>,

    /// Seed of the replica noise. A random seed is drawn and reported when omitted.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S force-volume.replicas=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to a CSV file holding the curve.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Column holding the piezo values.
    #[arg(long, value_name = "NAME", default_value = "ideal_curve_x_values")]
    pub x_column: String,

    /// Column holding the deflection values.
    #[arg(long, value_name = "NAME", default_value = "ideal_curve_y_values")]
    pub y_column: String,

    /// Path to a configuration file in TOML format (only the material sections are used).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub material: MaterialArgs,

    /// Write the per-sample approach parameters to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub approach_output: Option<PathBuf>,

    /// Write the per-sample contact parameters to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub contact_output: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S probe.tip-radius=2e-8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
