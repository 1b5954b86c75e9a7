//! Observable state cells that invalidate the composition on write.

use crate::runtime::RuntimeHandle;
use std::cell::RefCell;
use std::rc::Rc;

struct StateCell<T> {
    value: RefCell<T>,
    runtime: RefCell<Option<RuntimeHandle>>,
}

/// A mutable value whose writes schedule a recomposition.
///
/// Reads return a clone of the current value. There is no subscription
/// granularity: any write marks the whole composition dirty and the next
/// pass re-runs the content closure. State cells are single-threaded.
pub struct MutableState<T: Clone + 'static> {
    inner: Rc<StateCell<T>>,
}

impl<T: Clone + 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> MutableState<T> {
    /// Creates a state cell not yet bound to a runtime. Writes are stored
    /// but schedule nothing until [`MutableState::bind_runtime`] is called.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StateCell {
                value: RefCell::new(value),
                runtime: RefCell::new(None),
            }),
        }
    }

    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        let state = Self::new(value);
        state.bind_runtime(runtime);
        state
    }

    pub fn bind_runtime(&self, runtime: RuntimeHandle) {
        *self.inner.runtime.borrow_mut() = Some(runtime);
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Alias for [`MutableState::get`]; reads better in assertions.
    pub fn value(&self) -> T {
        self.get()
    }

    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.invalidate();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.value.borrow_mut());
        self.invalidate();
    }

    /// Run `f` with a borrow of the current value, without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    fn invalidate(&self) {
        if let Some(runtime) = self.inner.runtime.borrow().as_ref() {
            runtime.request_recompose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_requests_recompose_when_bound() {
        let runtime = RuntimeHandle::new();
        let state = MutableState::with_runtime(1, runtime.clone());
        state.set(2);
        assert_eq!(state.get(), 2);
        assert!(runtime.take_recompose_request());
    }

    #[test]
    fn test_unbound_state_holds_writes() {
        let state = MutableState::new(String::from("a"));
        state.update(|value| value.push('b'));
        assert_eq!(state.get(), "ab");
    }
}
