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
    author = "APR Restraints Developers",
    version,
    about = "APR Restraints CLI - Generate attach-pull-release restraints as PLUMED input files or native force terms.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the APR windows defined by the restraints of a configuration file.
    Windows(WindowsArgs),
    /// Write one PLUMED restraint file per APR window.
    Plumed(PlumedArgs),
    /// Append dummy atom position restraints to an existing window file.
    Dummy(DummyArgs),
    /// Evaluate the restraint energy of a structure in one window.
    Energy(EnergyArgs),
}

/// Arguments for the `windows` subcommand.
#[derive(Args, Debug)]
pub struct WindowsArgs {
    /// Path to the main configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,
}

/// Arguments for the `plumed` subcommand.
#[derive(Args, Debug)]
pub struct PlumedArgs {
    /// Path to the main configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the parent directory of the window directories.
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Override the name of the restraint file written in each window.
    #[arg(short, long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Structure holding the DM1, DM2 and DM3 dummy atoms; their position restraints are
    /// appended to every window file.
    #[arg(short, long, value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Write force constants as given instead of doubling legacy `k (x - x0)^2` constants.
    #[arg(long)]
    pub no_legacy_k: bool,
}

/// Arguments for the `dummy` subcommand.
#[derive(Args, Debug)]
pub struct DummyArgs {
    /// Structure holding the DM1, DM2 and DM3 dummy atoms.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Window label, e.g. 'p012'.
    #[arg(short, long, required = true, value_name = "LABEL")]
    pub window: String,

    /// Parent directory of the window directories.
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Name of the restraint file in the window directory.
    #[arg(short, long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Spring constant of every coordinate restraint, in file units.
    #[arg(short = 'k', long, value_name = "FLOAT")]
    pub force_constant: Option<f64>,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Path to the main configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Structure (PDB or BGF) to evaluate.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Window label, e.g. 'a003'.
    #[arg(short, long, required = true, value_name = "LABEL")]
    pub window: String,

    /// Also tether every DUM atom to its current position.
    #[arg(long)]
    pub with_dummy_tethers: bool,
}
