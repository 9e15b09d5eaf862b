use std::any::{Any, TypeId, type_name};

use crate::{Dep, Updater};

/// `(state ids, compute ids)` a compute is derived from.
pub type ComputeDeps = (&'static [TypeId], &'static [TypeId]);

/// Derived or cached data.
///
/// A compute is re-evaluated by [`crate::StateCtx::run_all_dirty`] whenever one
/// of its dependencies changed. Computes never mutate themselves in place:
/// new values are sent through the [`Updater`] and applied on the next
/// [`crate::StateCtx::sync_computes`]. Computes with no dependencies are pure
/// caches written only by commands.
pub trait Compute: Any {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Replaces `compute` with the boxed value when the types match.
pub fn assign_impl<T: Compute>(compute: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *compute = *value,
        Err(_) => log::warn!(
            target: "imgshare_states",
            "compute_assign_type_mismatch expected={}",
            type_name::<T>()
        ),
    }
}
