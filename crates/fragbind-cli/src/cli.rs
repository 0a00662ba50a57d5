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
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "fragbind CLI - Compose molecular fragments, estimate their ground-state energies, and classify the binding energy of the complex.",
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

    /// Set the number of threads used to run estimations in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose the fragments of a system file, estimate every energy, and report the binding energy.
    Run(RunArgs),
    /// Compose the fragments of a system file and write the complex as XYZ.
    Compose(ComposeArgs),
    /// Summarize an interface contact catalog.
    Contacts(ContactsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Core Arguments ---
    /// Path to the system description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an estimation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write the composed complex to this XYZ file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Estimation Overrides ---
    /// Override the estimation method (variational, perturbative, exact-diagonalization).
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Override the execution backend passed to the solver.
    #[arg(short, long, value_name = "NAME")]
    pub backend: Option<String>,

    /// Override the solver's maximum number of iterations.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Override the energy convergence tolerance in Hartree.
    #[arg(short, long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    // --- Solver ---
    /// Run this external solver program once per molecule instead of using recorded energies.
    #[arg(long, value_name = "PATH")]
    pub solver_command: Option<PathBuf>,

    /// Fixed argument passed to the solver before the estimation flags.
    /// Can be used multiple times.
    #[arg(long = "solver-arg", value_name = "ARG", requires = "solver_command", allow_hyphen_values = true)]
    pub solver_args: Vec<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S estimation.tolerance=1e-8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `compose` subcommand.
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Path to the system description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output XYZ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Path to the contact catalog in CSV format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Only list contacts made by this CDR loop (CDR1, CDR2, CDR3).
    #[arg(short, long, value_name = "REGION")]
    pub region: Option<String>,

    /// Only list contacts of this interaction type (e.g. salt-bridge).
    #[arg(short = 't', long, value_name = "TYPE")]
    pub interaction: Option<String>,
}
