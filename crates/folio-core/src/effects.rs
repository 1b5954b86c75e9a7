//! Composition-scoped effects.
//!
//! `DisposableEffect!` is the resource seam of the runtime: the effect body
//! runs once per key change after the pass commits, and the cleanup it
//! returns runs when the keys change again or when the owning group leaves
//! the composition, whichever comes first. There is exactly one release
//! path; callers never pair acquire/release sites by hand.

use crate::{hash_key, with_current_composer, Key};
use std::hash::Hash;

#[derive(Default)]
struct DisposableEffectState {
    key: Option<Key>,
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl DisposableEffectState {
    fn should_run(&self, key: Key) -> bool {
        match self.key {
            Some(current) => current != key,
            None => true,
        }
    }

    fn set_key(&mut self, key: Key) {
        self.key = Some(key);
    }

    fn set_cleanup(&mut self, cleanup: Option<Box<dyn FnOnce()>>) {
        self.cleanup = cleanup;
    }

    fn run_cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for DisposableEffectState {
    fn drop(&mut self) {
        self.run_cleanup();
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DisposableEffectScope;

#[derive(Default)]
pub struct DisposableEffectResult {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl DisposableEffectScope {
    pub fn on_dispose(&self, cleanup: impl FnOnce() + 'static) -> DisposableEffectResult {
        DisposableEffectResult::new(cleanup)
    }
}

impl DisposableEffectResult {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    fn into_cleanup(self) -> Option<Box<dyn FnOnce()>> {
        self.cleanup
    }
}

/// Registers `effect` to run after the pass commits.
#[allow(non_snake_case)]
pub fn SideEffect(effect: impl FnOnce() + 'static) {
    with_current_composer(|composer| composer.register_side_effect(effect));
}

pub fn __disposable_effect_impl<K, F>(group_key: Key, keys: K, effect: F)
where
    K: Hash,
    F: FnOnce(DisposableEffectScope) -> DisposableEffectResult + 'static,
{
    // The caller-location group gives each DisposableEffect its own slot,
    // even in conditional branches.
    with_current_composer(|composer| {
        composer.with_group(group_key, |composer| {
            let key_hash = hash_key(&keys);
            let state = composer.remember(DisposableEffectState::default);
            if state.with(|state| state.should_run(key_hash)) {
                state.update(|state| {
                    state.run_cleanup();
                    state.set_key(key_hash);
                });
                let state_for_effect = state.clone();
                let mut effect_opt = Some(effect);
                composer.register_side_effect(move || {
                    if let Some(effect) = effect_opt.take() {
                        let result = effect(DisposableEffectScope);
                        state_for_effect.update(|state| state.set_cleanup(result.into_cleanup()));
                    }
                });
            }
        });
    });
}

#[macro_export]
macro_rules! DisposableEffect {
    ($keys:expr, $effect:expr) => {
        $crate::__disposable_effect_impl(
            $crate::location_key(file!(), line!(), column!()),
            $keys,
            $effect,
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::composer::Composition;
    use crate::DisposableEffect;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_effect_runs_once_and_cleans_up_on_removal() {
        let mut composition = Composition::new();
        let runs = Rc::new(Cell::new(0));
        let cleanups = Rc::new(Cell::new(0));
        let show = Rc::new(Cell::new(true));

        let runs_for_content = Rc::clone(&runs);
        let cleanups_for_content = Rc::clone(&cleanups);
        let show_for_content = Rc::clone(&show);
        let mut content = move || {
            if show_for_content.get() {
                let runs = Rc::clone(&runs_for_content);
                let cleanups = Rc::clone(&cleanups_for_content);
                DisposableEffect!((), move |scope| {
                    runs.set(runs.get() + 1);
                    scope.on_dispose(move || cleanups.set(cleanups.get() + 1))
                });
            }
        };

        composition.render(&mut content);
        composition.render(&mut content);
        assert_eq!(runs.get(), 1, "unit-keyed effect must not re-run");
        assert_eq!(cleanups.get(), 0);

        show.set(false);
        composition.render(&mut content);
        assert_eq!(cleanups.get(), 1, "cleanup runs when the branch is left");
    }

    #[test]
    fn test_key_change_reruns_effect_after_cleanup() {
        let mut composition = Composition::new();
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let key = Rc::new(Cell::new(1u32));

        let log_for_content = Rc::clone(&log);
        let key_for_content = Rc::clone(&key);
        let mut content = move || {
            let current = key_for_content.get();
            let log_run = Rc::clone(&log_for_content);
            DisposableEffect!(current, move |scope| {
                log_run.borrow_mut().push(format!("run {current}"));
                let log_cleanup = Rc::clone(&log_run);
                scope.on_dispose(move || log_cleanup.borrow_mut().push(format!("drop {current}")))
            });
        };

        composition.render(&mut content);
        key.set(2);
        composition.render(&mut content);

        let entries = log.borrow().clone();
        assert_eq!(entries, vec!["run 1", "drop 1", "run 2"]);
    }
}
