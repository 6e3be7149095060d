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
    author = "Ion Trap Design Contributors",
    version,
    about = "iontrap - Design-space exploration for surface-electrode RF Paul traps: required drive voltage, Mathieu q and trap depth over electrode geometries.",
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

    /// Set the number of threads for parallel sweeps.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare a fixed-a' sweep with a full (a', b') sweep and list the best designs.
    Survey(SurveyArgs),
    /// Search a broad (a', b') window for the lowest-voltage feasible designs.
    Search(SearchArgs),
    /// Inspect one geometry or one constant-height contour in detail.
    Explore(ExploreArgs),
    /// List the ion species known by symbol.
    Species,
}

/// Options shared by every design command: ion, target specification,
/// drive frequencies and configuration sources.
#[derive(Args, Debug, Clone, Default)]
pub struct DesignArgs {
    /// Path to a design configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Ion ---
    /// Ion species by symbol (e.g., '171Yb+', '40Ca+').
    #[arg(long, value_name = "SYMBOL", conflicts_with = "mass_number")]
    pub species: Option<String>,

    /// Ion mass number in proton masses, for species not in the catalog.
    #[arg(long, value_name = "INT")]
    pub mass_number: Option<u32>,

    /// Ion charge state in elementary charges (used with --mass-number).
    #[arg(long, value_name = "INT", requires = "mass_number", allow_hyphen_values = true)]
    pub charge: Option<i32>,

    // --- Target specification ---
    /// Target radial secular frequency in MHz.
    #[arg(long, value_name = "MHZ")]
    pub secular_frequency: Option<f64>,

    /// Upper bound on the Mathieu q-parameter.
    #[arg(long, value_name = "FLOAT")]
    pub q_max: Option<f64>,

    /// Upper bound on the RF amplitude in volts.
    #[arg(long, value_name = "VOLTS")]
    pub v_rf_max: Option<f64>,

    /// Lower bound on the trap depth in eV.
    #[arg(long, value_name = "EV")]
    pub depth_min: Option<f64>,

    /// Upper bound on the trap depth in eV.
    #[arg(long, value_name = "EV")]
    pub depth_max: Option<f64>,

    // --- Drive and geometry ---
    /// Lowest candidate drive frequency in MHz.
    #[arg(long, value_name = "MHZ")]
    pub f_min: Option<f64>,

    /// Highest candidate drive frequency in MHz.
    #[arg(long, value_name = "MHZ")]
    pub f_max: Option<f64>,

    /// Number of candidate drive frequencies.
    #[arg(long, value_name = "INT")]
    pub f_points: Option<usize>,

    /// Slot correction factor applied to the trap height (clamped to [0.5, 1.5]).
    #[arg(long, value_name = "FLOAT")]
    pub slot_correction: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S target.q-max=0.3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `survey` subcommand.
#[derive(Args, Debug, Default)]
pub struct SurveyArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Override the fixed a' (µm) of the fixed-geometry sweep.
    #[arg(long, value_name = "MICRONS")]
    pub fixed_a: Option<f64>,

    /// Number of ranked designs to print.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top: Option<usize>,

    /// Write every candidate of the full sweep to a CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Override the lower bound of the a' window (µm).
    #[arg(long, value_name = "MICRONS")]
    pub a_min: Option<f64>,

    /// Override the upper bound of the a' window (µm).
    #[arg(long, value_name = "MICRONS")]
    pub a_max: Option<f64>,

    /// Override the number of a' samples.
    #[arg(long, value_name = "INT")]
    pub a_points: Option<usize>,

    /// Override the lower bound of the b' window (µm).
    #[arg(long, value_name = "MICRONS")]
    pub b_min: Option<f64>,

    /// Override the upper bound of the b' window (µm).
    #[arg(long, value_name = "MICRONS")]
    pub b_max: Option<f64>,

    /// Override the number of b' samples.
    #[arg(long, value_name = "INT")]
    pub b_points: Option<usize>,

    /// Override the maximum number of designs returned.
    #[arg(short = 'n', long, value_name = "INT")]
    pub max_solutions: Option<usize>,

    /// Write the ranked feasible designs to a CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `explore` subcommand.
#[derive(Args, Debug, Default)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    #[command(flatten)]
    pub target: ExploreTarget,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub window: ScanWindowArgs,

    /// Maximum number of rows to print.
    #[arg(long, value_name = "INT", default_value_t = 20)]
    pub limit: usize,

    /// Write the evaluated candidates to a CSV file (not available for drive scans).
    #[arg(short, long, value_name = "PATH", conflicts_with = "scan")]
    pub output: Option<PathBuf>,
}

/// What to explore: a single geometry or a constant-height contour.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = true, multiple = true)]
pub struct ExploreTarget {
    /// Inner electrode half-width a' (µm).
    #[arg(short = 'a', long, value_name = "MICRONS", requires = "b_prime")]
    pub a_prime: Option<f64>,

    /// Outer electrode edge b' (µm).
    #[arg(short = 'b', long, value_name = "MICRONS", requires = "a_prime")]
    pub b_prime: Option<f64>,

    /// Sweep every geometry with this trap height (µm) instead.
    #[arg(long, value_name = "MICRONS", conflicts_with_all = ["a_prime", "b_prime"])]
    pub height: Option<f64>,
}

/// Hold one drive quantity fixed and scan the others at a single geometry.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(id = "scan", required = false, multiple = false)]
pub struct ScanArgs {
    /// Fix the RF amplitude (V) and scan the drive frequency.
    #[arg(long, value_name = "VOLTS", requires = "a_prime")]
    pub fix_voltage: Option<f64>,

    /// Fix the drive frequency (MHz) and scan the RF amplitude.
    #[arg(long, value_name = "MHZ", requires = "a_prime")]
    pub fix_frequency: Option<f64>,

    /// Fix the Mathieu q and scan both drive quantities.
    #[arg(long, value_name = "FLOAT", requires = "a_prime")]
    pub fix_q: Option<f64>,
}

/// Bounds and steps of the drive scans; unset values keep the built-in window.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ScanWindowArgs {
    /// Lowest scanned RF amplitude (V).
    #[arg(long, value_name = "VOLTS")]
    pub v_min: Option<f64>,

    /// Highest scanned RF amplitude (V).
    #[arg(long, value_name = "VOLTS")]
    pub v_max: Option<f64>,

    /// Amplitude step (V).
    #[arg(long, value_name = "VOLTS")]
    pub v_step: Option<f64>,

    /// Lowest scanned drive frequency (MHz).
    #[arg(long, value_name = "MHZ")]
    pub scan_f_min: Option<f64>,

    /// Highest scanned drive frequency (MHz).
    #[arg(long, value_name = "MHZ")]
    pub scan_f_max: Option<f64>,

    /// Drive frequency step (MHz).
    #[arg(long, value_name = "MHZ")]
    pub scan_f_step: Option<f64>,
}
