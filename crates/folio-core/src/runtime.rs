//! Cooperative single-threaded task queue driving recomposition.
//!
//! All composition, layout and visibility callbacks run on the same thread;
//! the runtime only sequences them. Work posted while the queue drains is
//! executed in the same drain, so a callback may schedule follow-up work
//! and observe it run before the host returns to idle.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub type UiTask = Box<dyn FnOnce()>;

#[derive(Default)]
struct RuntimeInner {
    tasks: VecDeque<UiTask>,
    recompose_requested: bool,
}

/// Cheap-to-clone handle to the runtime's task queue and invalidation flag.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl RuntimeHandle {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RuntimeInner::default())),
        }
    }

    /// Posts work to run on the UI thread at the next drain.
    pub fn enqueue_ui_task(&self, task: UiTask) {
        self.inner.borrow_mut().tasks.push_back(task);
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.inner.borrow().tasks.is_empty()
    }

    /// Runs queued tasks until the queue is empty, including tasks enqueued
    /// by the tasks themselves. Returns whether any task ran.
    pub fn drain_ui_tasks(&self) -> bool {
        let mut ran = false;
        loop {
            // The borrow must not be held while the task runs; tasks enqueue
            // more tasks and flip the recompose flag.
            let task = self.inner.borrow_mut().tasks.pop_front();
            match task {
                Some(task) => {
                    task();
                    ran = true;
                }
                None => break,
            }
        }
        ran
    }

    /// Marks the composition dirty; the host recomposes on its next pass.
    pub fn request_recompose(&self) {
        self.inner.borrow_mut().recompose_requested = true;
    }

    pub fn recompose_requested(&self) -> bool {
        self.inner.borrow().recompose_requested
    }

    /// Clears and returns the recompose flag.
    pub fn take_recompose_request(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        std::mem::take(&mut inner.recompose_requested)
    }
}

impl Default for RuntimeHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_drain_runs_tasks_enqueued_during_drain() {
        let runtime = RuntimeHandle::new();
        let hits = Rc::new(Cell::new(0));

        let hits_outer = Rc::clone(&hits);
        let runtime_inner = runtime.clone();
        runtime.enqueue_ui_task(Box::new(move || {
            hits_outer.set(hits_outer.get() + 1);
            let hits_nested = Rc::clone(&hits_outer);
            runtime_inner.enqueue_ui_task(Box::new(move || {
                hits_nested.set(hits_nested.get() + 1);
            }));
        }));

        assert!(runtime.drain_ui_tasks());
        assert_eq!(hits.get(), 2);
        assert!(!runtime.has_pending_tasks());
    }

    #[test]
    fn test_recompose_flag_is_taken_once() {
        let runtime = RuntimeHandle::new();
        assert!(!runtime.take_recompose_request());
        runtime.request_recompose();
        assert!(runtime.take_recompose_request());
        assert!(!runtime.take_recompose_request());
    }
}
