//! Identity and cancellation for command tasks.
//!
//! Every flushed command that returns a future gets a [`TaskHandle`]. The
//! handle pairs a [`TaskId`] (command type + flush generation) with the
//! `CancellationToken` handed to the command, so the context can cancel all
//! tasks of one command type or everything on shutdown.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Command type plus the generation it was flushed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generations were flushed later.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Cooperative cancellation handle for a running command task.
///
/// Cancelling does not abort the task; the command future has to observe the
/// token (typically through `tokio::select!` on `token.cancelled()`).
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
