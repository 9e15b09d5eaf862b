use std::any::{Any, type_name};

/// Plain data owned by the UI thread.
///
/// States are written synchronously through [`crate::StateCtx::update`] and
/// read by computes (via [`crate::Dep`]) and commands (via
/// [`crate::CommandSnapshot`]). A state only shows up in command snapshots
/// when [`State::snapshot`] returns a clone.
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Replaces `state` with the boxed value when the types match.
pub fn state_assign_impl<T: State>(state: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *state = *value,
        Err(_) => log::warn!(
            target: "imgshare_states",
            "state_assign_type_mismatch expected={}",
            type_name::<T>()
        ),
    }
}
