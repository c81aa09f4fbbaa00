//! `channels` / `adapters`: print the first listing the broker sends.

use std::time::Duration;

use tokio::time::timeout;

use victory_admin_core::{ConnectionHandle, ResourceSnapshot, SnapshotStream};

use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn channels(
    ctx: &Ctx<'_>,
    handle: &ConnectionHandle,
    wait: Duration,
) -> Result<(), CliError> {
    let snapshot = first_listing(ctx.monitor.channels(), handle, wait, "channel listing").await?;
    let rendered = output::render_channels(ctx.resolved.output, snapshot.records())?;
    output::print_output(&rendered, ctx.global.quiet);
    Ok(())
}

pub async fn adapters(
    ctx: &Ctx<'_>,
    handle: &ConnectionHandle,
    wait: Duration,
) -> Result<(), CliError> {
    let snapshot = first_listing(ctx.monitor.adapters(), handle, wait, "adapter listing").await?;
    let rendered = output::render_adapters(ctx.resolved.output, snapshot.records())?;
    output::print_output(&rendered, ctx.global.quiet);
    Ok(())
}

/// Wait until `handle`'s stream has delivered at least one listing.
async fn first_listing<T: Send + Sync + 'static>(
    mut stream: SnapshotStream<T>,
    handle: &ConnectionHandle,
    wait: Duration,
    waiting_for: &str,
) -> Result<ResourceSnapshot<T>, CliError> {
    let generation = handle.generation();
    let arrived = timeout(wait, async {
        loop {
            let latest = stream.latest();
            if latest.generation() == generation && latest.sequence() > 0 {
                return Some(latest);
            }
            if stream.changed().await.is_none() {
                return None;
            }
        }
    })
    .await;

    match arrived {
        Ok(Some(snapshot)) => Ok(snapshot),
        Ok(None) | Err(_) => Err(CliError::Timeout {
            url: handle.endpoint().to_string(),
            waiting_for: waiting_for.into(),
            seconds: wait.as_secs(),
        }),
    }
}
