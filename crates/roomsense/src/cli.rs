//! Clap derive structures for the `roomsense` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// roomsense -- room sensor readings from the command line
#[derive(Debug, Parser)]
#[command(
    name = "roomsense",
    version,
    about = "Query room sensor readings and device layout",
    long_about = "Fetches temperature, humidity, motion and busyness readings from the\n\
        sensor API, reshaped into chart-ready records.\n\n\
        `roomsense bridge` serves request actions read as JSON lines on stdin\n\
        and writes result actions as JSON lines on stdout.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to read instead of the platform default
    #[arg(long, env = "ROOMSENSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Sensor API base URL (overrides config)
    #[arg(long, short = 'u', env = "ROOMSENSE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, env = "ROOMSENSE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "ROOMSENSE_INSECURE", global = true)]
    pub insecure: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ROOMSENSE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Temperature readings for one device
    #[command(alias = "temp")]
    Temperature(SeriesArgs),

    /// Humidity readings for one device
    #[command(alias = "hum")]
    Humidity(SeriesArgs),

    /// Motion readings for one device
    Motion(SeriesArgs),

    /// Busyness summary for one device
    Busyness(SeriesArgs),

    /// List devices grouped by room
    #[command(alias = "dev")]
    Devices,

    /// Serve JSON-line request actions from stdin, write result actions to stdout
    Bridge,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Series Arguments ─────────────────────────────────────────────────

/// Device and time window for a series query.
///
/// `--from` / `--to` are passed to the API as given; omitted bounds default
/// to the last 24 hours.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Device name (temperature, humidity) or device id (motion, busyness)
    #[arg(long, short = 'd')]
    pub device: String,

    /// Room label attached to the result
    #[arg(long, short = 'r', default_value = "")]
    pub room: String,

    /// Start of the window (e.g., 2020-01-01T00:00:00Z)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the window
    #[arg(long)]
    pub to: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
