//! Reactive state runtime used by the ImgShare client.
//!
//! The UI thread owns a [`StateCtx`]. Everything else (computes, command
//! tasks, timers) talks to it through an [`Updater`], so every change to the
//! app state is applied in one place, in order, once per frame.

mod command;
mod compute;
mod ctx;
mod dep;
mod snapshot;
mod state;
mod task;
mod time;
mod updater;

pub use command::{Command, CommandFuture, done};
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use snapshot::CommandSnapshot;
pub use state::{State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
pub use time::Time;
pub use updater::{LatestOnlyUpdater, Updater};
