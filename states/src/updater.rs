use std::any::{Any, TypeId, type_name};

use flume::Sender;

use crate::{Command, Compute};

/// Message sent from computes and command tasks back to the UI thread.
pub(crate) enum Update {
    Compute {
        id: TypeId,
        name: &'static str,
        value: Box<dyn Any + Send>,
        generation: Option<u64>,
    },
    EnqueueCommand(TypeId),
    CancelCommand(TypeId),
}

/// Sends new compute values to the owning [`crate::StateCtx`].
///
/// Values are applied in send order on the next `sync_computes`; they are
/// never applied from the sending thread.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: Compute + Send>(&self, value: T) {
        self.send_update(Update::Compute {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
            generation: None,
        });
    }

    /// Queues a registered command; it runs on the next `flush_commands`.
    pub fn enqueue_command<C: Command>(&self) {
        self.send_update(Update::EnqueueCommand(TypeId::of::<C>()));
    }

    /// Requests cancellation of every running task spawned by command `C`.
    pub fn cancel_command<C: Command>(&self) {
        self.send_update(Update::CancelCommand(TypeId::of::<C>()));
    }

    fn send_update(&self, update: Update) {
        // The receiver lives as long as the context; a send error only happens
        // while the context is being torn down.
        if self.send.send(update).is_err() {
            log::debug!(target: "imgshare_states", "updater_send_after_shutdown");
        }
    }
}

/// An [`Updater`] stamped with the generation of the command that owns it.
///
/// When two commands write the same compute, the context keeps the write of
/// the newest generation and drops anything an older command sends later.
#[derive(Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    generation: u64,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, generation: u64) -> Self {
        Self { inner, generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set<T: Compute + Send>(&self, value: T) {
        self.inner.send_update(Update::Compute {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
            generation: Some(self.generation),
        });
    }

    pub fn enqueue_command<C: Command>(&self) {
        self.inner.enqueue_command::<C>();
    }

    pub fn cancel_command<C: Command>(&self) {
        self.inner.cancel_command::<C>();
    }
}
