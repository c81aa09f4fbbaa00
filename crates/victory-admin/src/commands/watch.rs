//! `watch`: print status and listings as they change, until Ctrl-C.

use tracing::info;

use victory_admin_core::ConnectionHandle;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn handle(ctx: &Ctx<'_>, handle: &ConnectionHandle) -> Result<(), CliError> {
    let format = ctx.resolved.output;
    let quiet = ctx.global.quiet;
    let color = output::should_color(ctx.global.color);
    let url = handle.endpoint().as_str();

    let mut status = ctx.monitor.status();
    let mut channels = ctx.monitor.channels();
    let mut adapters = ctx.monitor.adapters();

    // JSON output is a line-delimited event log; the pretty form would
    // interleave multi-line documents.
    let format = match format {
        OutputFormat::Json => OutputFormat::JsonCompact,
        other => other,
    };

    let current = status.borrow_and_update().clone();
    output::print_output(&output::render_status(format, url, &current, color)?, quiet);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                return Ok(());
            }
            changed = status.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let current = status.borrow_and_update().clone();
                output::print_output(&output::render_status(format, url, &current, color)?, quiet);
            }
            snap = channels.changed() => {
                let Some(snap) = snap else { return Ok(()) };
                output::print_output(&output::render_channels(format, snap.records())?, quiet);
            }
            snap = adapters.changed() => {
                let Some(snap) = snap else { return Ok(()) };
                output::print_output(&output::render_adapters(format, snap.records())?, quiet);
            }
        }
    }
}
