//! Clap derive structures for the `prtgly` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// prtgly -- query PRTG Network Monitor objects from the command line
#[derive(Debug, Parser)]
#[command(
    name = "prtgly",
    version,
    about = "Query PRTG Network Monitor objects from the command line",
    long_about = "Lists sensors, devices, groups, probes and other objects from a PRTG\n\
        core server through its table API, and resolves generic objects into\n\
        their typed form.",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "PRTGLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 's', env = "PRTGLY_SERVER", global = true)]
    pub server: Option<String>,

    /// Account name for passhash authentication
    #[arg(long, short = 'u', env = "PRTGLY_USER", global = true)]
    pub username: Option<String>,

    /// Account passhash
    #[arg(long, env = "PRTGLY_PASSHASH", global = true, hide_env = true)]
    pub passhash: Option<String>,

    /// API token (takes precedence over username/passhash)
    #[arg(long, env = "PRTGLY_API_TOKEN", global = true, hide_env = true)]
    pub api_token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PRTGLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PRTGLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PRTGLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Rows fetched per request (overrides profile)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one object ID per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List objects of any type, optionally resolving them to typed entities
    #[command(alias = "obj", alias = "o")]
    Objects(ObjectsArgs),

    /// List sensors
    #[command(alias = "sens")]
    Sensors(ListArgs),

    /// List devices
    #[command(alias = "dev", alias = "d")]
    Devices(ListArgs),

    /// List groups
    Groups(ListArgs),

    /// List probes
    Probes(ListArgs),

    /// List notification actions
    Notifications(ListArgs),

    /// List schedules
    Schedules(ListArgs),

    /// Inspect CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Filtering arguments shared by every list command.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Only objects with these IDs (repeatable, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub id: Vec<u32>,

    /// Only objects with this exact name (repeatable)
    #[arg(long)]
    pub name: Vec<String>,

    /// Only objects whose name contains this text
    #[arg(long, conflicts_with = "name")]
    pub name_contains: Option<String>,

    /// Only direct children of this object ID
    #[arg(long)]
    pub parent: Option<u32>,

    /// Only objects carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only paused (--active=false) or unpaused (--active=true) objects
    #[arg(long)]
    pub active: Option<bool>,

    /// Stop after this many results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OBJECTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ObjectsArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only objects of these types (e.g. device, probe, ping, sensor)
    #[arg(long = "type", short = 't', value_delimiter = ',')]
    pub types: Vec<String>,

    /// Resolve each object into its typed entity
    #[arg(long, short = 'r')]
    pub resolve: bool,

    /// Type partitions resolved at once
    #[arg(long, requires = "resolve", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the loaded configuration with secrets masked
    Show,

    /// List configured profiles
    Profiles,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
