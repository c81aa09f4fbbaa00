//! Clap derive structures for the `victory-admin` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// victory-admin -- live monitor for Victory pub/sub brokers
#[derive(Debug, Parser)]
#[command(
    name = "victory-admin",
    version,
    about = "Watch channels and adapters of a Victory pub/sub broker",
    long_about = "Streams the channel and adapter listings of a Victory broker's\n\
        admin service and reports whether the broker is reachable.",
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
    /// Broker admin URL (default: http://localhost:5050)
    #[arg(long, short = 'u', env = "VICTORY_ADMIN_URL", global = true)]
    pub url: Option<String>,

    /// Adapter sampling rate in Hz (0 = broker default)
    #[arg(long, env = "VICTORY_ADMIN_HZ", global = true)]
    pub hz: Option<u32>,

    /// Config file (default: platform config dir)
    #[arg(long, env = "VICTORY_ADMIN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "VICTORY_ADMIN_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Connection timeout in seconds
    #[arg(long, global = true)]
    pub connect_timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON (one document per update in `watch`)
    JsonCompact,
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

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stream status, channels and adapters until interrupted
    #[command(alias = "w")]
    Watch,

    /// Print the first channel listing the broker sends
    #[command(alias = "ch")]
    Channels(WaitArgs),

    /// Print the first adapter listing the broker sends
    #[command(alias = "ad")]
    Adapters(WaitArgs),

    /// Print the aggregate connection status
    #[command(alias = "st")]
    Status(WaitArgs),
}

#[derive(Debug, Args)]
pub struct WaitArgs {
    /// Seconds to wait for the broker
    #[arg(long, default_value = "10")]
    pub wait: u64,
}
