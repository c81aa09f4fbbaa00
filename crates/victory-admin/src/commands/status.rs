//! `status`: wait until every stream is up (or the wait runs out), then
//! print the aggregate status.

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use victory_admin_core::{ConnectionHandle, StreamStatus};

use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn handle(
    ctx: &Ctx<'_>,
    handle: &ConnectionHandle,
    wait: Duration,
) -> Result<(), CliError> {
    let generation = handle.generation();
    let mut rx = ctx.monitor.status();

    let all_up = timeout(
        wait,
        rx.wait_for(|s| {
            s.generation == generation
                && s.per_resource.values().all(|st| *st == StreamStatus::Streaming)
        }),
    )
    .await
    .is_ok_and(|r| r.is_ok());
    if !all_up {
        debug!(seconds = wait.as_secs(), "not every stream came up in time");
    }

    // A broken stream is not an error here: it shows as `connecting`.
    let status = ctx.monitor.status_snapshot();
    let rendered = output::render_status(
        ctx.resolved.output,
        handle.endpoint().as_str(),
        &status,
        output::should_color(ctx.global.color),
    )?;
    output::print_output(&rendered, ctx.global.quiet);
    Ok(())
}
