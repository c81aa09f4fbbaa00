//! Output formatting: table and JSON.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use victory_admin_core::{
    AggregateStatus, Adapter, Channel, ConnectionPhase, ResourceKind, StreamStatus,
};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn phase_label(phase: ConnectionPhase, color: bool) -> String {
    let label = match phase {
        ConnectionPhase::Connected => "Connected",
        ConnectionPhase::Connecting => "Connecting...",
        ConnectionPhase::Disconnected => "Disconnected",
    };
    if !color {
        return label.to_owned();
    }
    match phase {
        ConnectionPhase::Connected => label.green().bold().to_string(),
        ConnectionPhase::Connecting => label.yellow().to_string(),
        ConnectionPhase::Disconnected => label.red().to_string(),
    }
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "Topic")]
    topic: String,
    #[tabled(rename = "Publishers")]
    publishers: String,
    #[tabled(rename = "Subscribers")]
    subscribers: String,
    #[tabled(rename = "Messages")]
    message_count: u32,
}

impl From<&Channel> for ChannelRow {
    fn from(c: &Channel) -> Self {
        Self {
            topic: c.topic.clone(),
            publishers: c.publishers.join(", "),
            subscribers: c.subscribers.join(", "),
            message_count: c.message_count,
        }
    }
}

#[derive(Tabled)]
struct AdapterRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Live")]
    live: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Stats")]
    stats: String,
}

impl From<&Adapter> for AdapterRow {
    fn from(a: &Adapter) -> Self {
        Self {
            name: a.name.clone(),
            live: if a.live { "yes" } else { "no" },
            description: a.description.clone(),
            stats: a.stats.join("\n"),
        }
    }
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Resource")]
    resource: ResourceKind,
    #[tabled(rename = "Stream")]
    status: StreamStatus,
}

// ── Status view ──────────────────────────────────────────────────────

/// Aggregate status as printed: the broker URL plus the derived phase.
#[derive(Serialize)]
struct StatusView<'a> {
    url: &'a str,
    phase: String,
    #[serde(flatten)]
    status: &'a AggregateStatus,
}

// ── Render dispatchers ───────────────────────────────────────────────

pub fn render_channels(format: OutputFormat, channels: &[Channel]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_table(channels.iter().map(ChannelRow::from))),
        OutputFormat::Json => render_json(channels, false),
        OutputFormat::JsonCompact => render_json(channels, true),
    }
}

pub fn render_adapters(format: OutputFormat, adapters: &[Adapter]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_table(adapters.iter().map(AdapterRow::from))),
        OutputFormat::Json => render_json(adapters, false),
        OutputFormat::JsonCompact => render_json(adapters, true),
    }
}

pub fn render_status(
    format: OutputFormat,
    url: &str,
    status: &AggregateStatus,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let header = format!("{url}  {}", phase_label(status.phase(), color));
            let rows = status
                .per_resource
                .iter()
                .map(|(resource, stream)| ResourceRow {
                    resource: *resource,
                    status: *stream,
                });
            Ok(format!("{header}\n{}", render_table(rows)))
        }
        OutputFormat::Json | OutputFormat::JsonCompact => {
            let view = StatusView {
                url,
                phase: status.phase().to_string(),
                status,
            };
            render_json(&view, format == OutputFormat::JsonCompact)
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}
