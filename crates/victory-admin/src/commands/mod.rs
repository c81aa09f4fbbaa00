//! Command handlers. Every command builds one `Monitor`, connects it, and
//! shuts it down before returning.

mod list;
mod status;
mod watch;

use std::time::Duration;

use victory_admin_core::{ConnectionHandle, CoreError, Monitor};

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Shared per-invocation context.
pub struct Ctx<'a> {
    pub monitor: Monitor,
    pub resolved: Resolved,
    pub global: &'a GlobalOpts,
}

pub async fn dispatch(cmd: Command, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let handle = connect(ctx).await?;

    let result = match cmd {
        Command::Watch => watch::handle(ctx, &handle).await,
        Command::Channels(args) => list::channels(ctx, &handle, wait(args.wait)).await,
        Command::Adapters(args) => list::adapters(ctx, &handle, wait(args.wait)).await,
        Command::Status(args) => status::handle(ctx, &handle, wait(args.wait)).await,
    };

    ctx.monitor.shutdown().await;
    result
}

async fn connect(ctx: &Ctx<'_>) -> Result<ConnectionHandle, CliError> {
    let url = &ctx.resolved.url;
    ctx.monitor.connect(url).await.map_err(|e| match e {
        CoreError::TransportFailure { reason } => CliError::ConnectionFailed {
            url: url.clone(),
            reason,
        },
        other => other.into(),
    })
}

fn wait(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
