use std::{any::Any, future::Future, pin::Pin};

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A user intent executed by [`crate::StateCtx::flush_commands`].
///
/// `run` itself executes on the UI thread, and every update it sends before
/// returning is applied before the next queued command is flushed. Work that
/// has to wait (network IO) goes into the returned future, which is spawned
/// as a task and should watch `cancel`.
pub trait Command: Any {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}

/// Future for commands that finish synchronously.
pub fn done() -> CommandFuture {
    Box::pin(async {})
}
