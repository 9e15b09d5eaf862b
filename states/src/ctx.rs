use std::{
    any::{TypeId, type_name},
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    fmt,
    task::{Context, Waker},
};

use flume::{Receiver, Sender};
use tokio::task::{Id, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{
    Command, CommandSnapshot, Compute, Dep, LatestOnlyUpdater, State, TaskHandle, TaskId, Updater,
    updater::Update,
};

enum Queued {
    Registered(TypeId),
    Owned(TypeId, Box<dyn Command>),
}

/// Container for every state, compute and command of the app.
///
/// All mutation happens on the thread that owns the context. The per-frame
/// cycle is:
///
/// 1. `sync_computes` applies updates sent by tasks and computes.
/// 2. The UI reads states/computes and enqueues commands.
/// 3. `run_all_dirty` re-evaluates computes whose dependencies changed.
/// 4. `flush_commands` runs queued commands and spawns their futures.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    queue: VecDeque<Queued>,
    dirty: BTreeSet<TypeId>,
    never_run: BTreeSet<TypeId>,

    // newest command generation that wrote each compute
    writers: HashMap<TypeId, u64>,
    generation: u64,

    send: Sender<Update>,
    recv: Receiver<Update>,

    tasks: JoinSet<()>,
    handles: HashMap<Id, TaskHandle>,
    shutdown: CancellationToken,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("generation", &self.generation)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: VecDeque::new(),
            dirty: BTreeSet::new(),
            never_run: BTreeSet::new(),
            writers: HashMap::new(),
            generation: 0,
            send,
            recv,
            tasks: JoinSet::new(),
            handles: HashMap::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.states.insert(id, Box::new(state));
        self.dirty.insert(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        self.computes.insert(id, Box::new(compute));
        self.never_run.insert(id);
    }

    /// Registers (or replaces) the instance run by `enqueue_command::<C>()`.
    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(TypeId::of::<C>(), Box::new(command));
    }

    pub fn try_state<T: State>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never added.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    /// Mutable access to a state. The state is marked dirty.
    ///
    /// # Panics
    /// Panics if `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.dirty.insert(id);
        self.states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("Compute {} is not registered", type_name::<T>()))
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Queues the instance registered with `record_command`.
    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue.push_back(Queued::Registered(TypeId::of::<C>()));
    }

    /// Queues a one-off command instance carrying its own input.
    pub fn enqueue<C: Command>(&mut self, command: C) {
        self.queue
            .push_back(Queued::Owned(TypeId::of::<C>(), Box::new(command)));
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Runs queued commands in FIFO order.
    ///
    /// Updates sent synchronously by a command are applied before the next
    /// command takes its snapshot. Futures that are not finished after one
    /// poll are spawned on the current Tokio runtime.
    pub fn flush_commands(&mut self) {
        self.sync_computes();

        while let Some(queued) = self.queue.pop_front() {
            self.generation += 1;
            let generation = self.generation;
            let snap = self.snapshot();
            let updater = LatestOnlyUpdater::new(self.updater(), generation);
            let cancel = self.shutdown.child_token();

            let (type_id, mut future) = match &queued {
                Queued::Registered(id) => {
                    let Some(command) = self.commands.get(id) else {
                        log::warn!(
                            target: "imgshare_states",
                            "enqueued_command_not_registered generation={generation}"
                        );
                        continue;
                    };
                    (*id, command.run(snap, updater, cancel.clone()))
                }
                Queued::Owned(id, command) => (*id, command.run(snap, updater, cancel.clone())),
            };

            let mut cx = Context::from_waker(Waker::noop());
            let finished = future.as_mut().poll(&mut cx).is_ready();
            self.sync_computes();

            if finished {
                continue;
            }

            let handle = TaskHandle::new(TaskId::new(type_id, generation), cancel);
            let abort = self.tasks.spawn(future);
            self.handles.insert(abort.id(), handle);
            log::trace!(
                target: "imgshare_states",
                "command_task_spawned generation={generation} tasks={}",
                self.tasks.len()
            );
        }
    }

    /// Applies every pending update, in send order.
    pub fn sync_computes(&mut self) {
        self.reap_finished_tasks();

        while let Ok(update) = self.recv.try_recv() {
            match update {
                Update::Compute {
                    id,
                    name,
                    value,
                    generation,
                } => {
                    if let Some(generation) = generation {
                        let latest = self.writers.entry(id).or_insert(0);
                        if generation < *latest {
                            log::debug!(
                                target: "imgshare_states",
                                "stale_update_dropped compute={name} generation={generation} latest={latest}"
                            );
                            continue;
                        }
                        *latest = generation;
                    }

                    match self.computes.get_mut(&id) {
                        Some(compute) => {
                            compute.assign_box(value);
                            self.dirty.insert(id);
                        }
                        None => log::warn!(
                            target: "imgshare_states",
                            "update_for_unregistered_compute compute={name}"
                        ),
                    }
                }
                Update::EnqueueCommand(id) => self.queue.push_back(Queued::Registered(id)),
                Update::CancelCommand(id) => self.cancel_tasks_of(id),
            }
        }
    }

    /// Re-evaluates computes whose dependencies changed since the last run,
    /// plus computes that never ran.
    pub fn run_all_dirty(&mut self) {
        if self.dirty.is_empty() && self.never_run.is_empty() {
            return;
        }

        let dirty = std::mem::take(&mut self.dirty);
        let never_run = std::mem::take(&mut self.never_run);
        let updater = self.updater();

        for (id, compute) in &self.computes {
            let (state_ids, compute_ids) = compute.deps();
            let triggered = never_run.contains(id)
                || state_ids
                    .iter()
                    .chain(compute_ids.iter())
                    .any(|dep| dirty.contains(dep));

            if triggered {
                compute.compute(Dep::new(&self.states, &self.computes), updater.clone());
            }
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Waits for the next command task to finish. Returns `false` when no
    /// task is running.
    pub async fn join_next(&mut self) -> bool {
        match self.tasks.join_next_with_id().await {
            Some(result) => {
                self.forget_task(result.map(|(id, ())| id));
                true
            }
            None => false,
        }
    }

    /// Cancels every running task and waits for all of them to finish.
    pub async fn shutdown(&mut self) {
        self.shutdown.cancel();
        while self.join_next().await {}
        self.sync_computes();
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.snapshot() {
                snap.insert_state(*id, value);
            }
        }
        for (id, compute) in &self.computes {
            if let Some(value) = compute.snapshot() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    fn cancel_tasks_of(&mut self, type_id: TypeId) {
        for handle in self.handles.values() {
            if handle.id().type_id() == type_id && !handle.is_cancelled() {
                log::debug!(
                    target: "imgshare_states",
                    "command_task_cancelled generation={}",
                    handle.id().generation()
                );
                handle.cancel();
            }
        }
    }

    fn reap_finished_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next_with_id() {
            self.forget_task(result.map(|(id, ())| id));
        }
    }

    fn forget_task(&mut self, result: Result<Id, tokio::task::JoinError>) {
        let id = match result {
            Ok(id) => id,
            Err(err) => {
                if err.is_panic() {
                    log::error!(target: "imgshare_states", "command_task_panicked");
                }
                err.id()
            }
        };
        self.handles.remove(&id);
    }
}
