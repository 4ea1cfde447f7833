//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "carnet")]
#[command(author, version, about = "Vehicle maintenance and fuel logbook", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Data directory holding the logbook files
    #[arg(long, global = true, env = "CARNET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the vehicle registry
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },

    /// Log and list maintenance entries
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },

    /// Log and list fuel fill-ups
    Fuel {
        #[command(subcommand)]
        action: FuelAction,
    },

    /// Export the merged PDF dossier (recap + receipts) for a vehicle
    Dossier {
        /// Vehicle display name
        vehicle: String,

        /// Destination file (defaults to Dossier_<name>.pdf in the current directory)
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },

    /// Show the oil-change status for a vehicle
    Status {
        /// Vehicle display name
        vehicle: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a pre-filled mail-compose link with the vehicle's status report
    Report {
        /// Vehicle display name
        vehicle: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Vehicle registry subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum VehicleAction {
    /// List known vehicles
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Register a new vehicle
    Add {
        /// Display name, e.g. "Clio Red"
        name: String,

        /// Manufacturer
        #[arg(long, default_value = "")]
        make: String,

        /// Model designation
        #[arg(long, default_value = "")]
        model: String,

        /// License plate
        #[arg(long, default_value = "")]
        plate: String,

        /// Engine description
        #[arg(long, default_value = "")]
        engine: String,

        /// Oil capacity and grade
        #[arg(long, default_value = "")]
        oil: String,

        /// Manufacturer consumption figure
        #[arg(long, default_value = "")]
        consumption: String,

        /// Photo to store for this vehicle
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Show one vehicle with its derived metrics
    Show {
        /// Vehicle display name
        name: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove a vehicle and every record that references it
    #[command(alias = "rm")]
    Remove {
        /// Vehicle display name
        name: String,
    },
}

/// Maintenance subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ServiceAction {
    /// Log a maintenance entry
    Add {
        /// Vehicle display name
        vehicle: String,

        /// Odometer reading at the time of the work
        #[arg(short, long)]
        mileage: u32,

        /// What was done
        #[arg(short, long)]
        description: String,

        /// Date of the work (YYYY-MM-DD, today when omitted)
        #[arg(long)]
        date: Option<String>,

        /// Invoiced cost
        #[arg(short, long)]
        cost: Option<f64>,

        /// Receipt file to attach (copied into the receipt store)
        #[arg(short, long)]
        receipt: Option<PathBuf>,
    },

    /// List maintenance entries
    List {
        /// Only this vehicle
        vehicle: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Omit header row in CSV output (useful for appending)
        #[arg(long)]
        no_header: bool,
    },
}

/// Fuel subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum FuelAction {
    /// Log a fill-up; consumption is derived from the previous one
    Add {
        /// Vehicle display name
        vehicle: String,

        /// Odometer reading at the pump
        #[arg(short, long)]
        mileage: u32,

        /// Liters filled
        #[arg(short, long)]
        liters: f64,

        /// Total price paid
        #[arg(short, long)]
        price: f64,

        /// Date of the fill-up (YYYY-MM-DD, today when omitted)
        #[arg(long)]
        date: Option<String>,
    },

    /// List fill-ups
    List {
        /// Only this vehicle
        vehicle: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Omit header row in CSV output (useful for appending)
        #[arg(long)]
        no_header: bool,
    },
}

/// Configuration keys
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    /// Data directory holding the logbook files
    DataDir,
    /// Default output format
    Format,
    /// Disable colored output
    NoColor,
    /// Term matched against descriptions by the oil-change alert
    ServiceTerm,
}

/// Configuration subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}
