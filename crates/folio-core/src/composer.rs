//! Positional memoization and composition passes.
//!
//! The composer keeps a slot table keyed by group position: each
//! `with_group` call resolves to a stable hash of (parent group, caller
//! key, occurrence index), and `remember` hands out positional slots inside
//! the current group. Groups not visited during a pass are garbage
//! collected at the end of the pass; dropping their slots runs any pending
//! effect cleanups, which is how subtrees release resources when they
//! leave the composition.

use crate::owned::Owned;
use crate::runtime::RuntimeHandle;
use crate::{composer_context, location_key, Key};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Combines a parent group hash with a caller key and occurrence index.
pub(crate) fn mix_keys(parent: Key, key: Key, occurrence: u32) -> Key {
    use std::hash::{Hash, Hasher};
    let mut hasher = crate::hash::default::new();
    parent.hash(&mut hasher);
    key.hash(&mut hasher);
    occurrence.hash(&mut hasher);
    hasher.finish()
}

struct GroupSlot {
    values: Vec<Box<dyn Any>>,
    cursor: usize,
    stamp: u64,
}

impl GroupSlot {
    fn new() -> Self {
        Self {
            values: Vec::new(),
            cursor: 0,
            stamp: 0,
        }
    }
}

struct GroupFrame {
    hash: Key,
    occurrences: FxHashMap<Key, u32>,
}

impl GroupFrame {
    fn new(hash: Key) -> Self {
        Self {
            hash,
            occurrences: FxHashMap::default(),
        }
    }
}

pub struct ComposerCore {
    runtime: RuntimeHandle,
    slots: RefCell<FxHashMap<Key, GroupSlot>>,
    frames: RefCell<SmallVec<[GroupFrame; 16]>>,
    side_effects: RefCell<Vec<Box<dyn FnOnce()>>>,
    pass: Cell<u64>,
}

/// Handle to the composition machinery for the current pass.
#[derive(Clone)]
pub struct Composer {
    core: Rc<ComposerCore>,
}

impl Composer {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            core: Rc::new(ComposerCore {
                runtime,
                slots: RefCell::new(FxHashMap::default()),
                frames: RefCell::new(SmallVec::new()),
                side_effects: RefCell::new(Vec::new()),
                pass: Cell::new(0),
            }),
        }
    }

    pub(crate) fn clone_core(&self) -> Rc<ComposerCore> {
        Rc::clone(&self.core)
    }

    pub(crate) fn from_core(core: Rc<ComposerCore>) -> Self {
        Self { core }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.core.runtime.clone()
    }

    /// Opens (or revisits) the child group for `key` and runs `f` inside it.
    ///
    /// Repeated sibling calls with the same key are disambiguated by an
    /// occurrence counter, so loops without explicit keys still get stable
    /// positions as long as their order is stable.
    pub fn with_group<R>(&self, key: Key, f: impl FnOnce(&Composer) -> R) -> R {
        let child_hash = {
            let mut frames = self.core.frames.borrow_mut();
            let frame = frames
                .last_mut()
                .expect("with_group: no composition pass is active");
            let counter = frame.occurrences.entry(key).or_insert(0);
            let occurrence = *counter;
            *counter += 1;
            mix_keys(frame.hash, key, occurrence)
        };
        {
            let mut slots = self.core.slots.borrow_mut();
            let slot = slots.entry(child_hash).or_insert_with(GroupSlot::new);
            slot.cursor = 0;
            slot.stamp = self.core.pass.get();
        }
        self.core.frames.borrow_mut().push(GroupFrame::new(child_hash));
        let result = f(self);
        self.core.frames.borrow_mut().pop();
        result
    }

    /// Returns the value remembered at the current group position, creating
    /// it with `init` on first composition. A type change at the position
    /// invalidates the remainder of the group's slots.
    pub fn remember<T: 'static>(&self, init: impl FnOnce() -> T) -> Owned<T> {
        enum Probe<T> {
            Hit(Owned<T>),
            Miss(usize),
        }

        let group = self.current_group_hash();
        let probe = {
            let mut slots = self.core.slots.borrow_mut();
            let slot = slots.get_mut(&group).expect("remember: unknown group");
            let index = slot.cursor;
            match slot.values.get(index) {
                Some(existing) => match existing.downcast_ref::<Owned<T>>() {
                    Some(owned) => {
                        slot.cursor += 1;
                        Probe::Hit(owned.clone())
                    }
                    None => Probe::Miss(index),
                },
                None => Probe::Miss(index),
            }
        };

        match probe {
            Probe::Hit(owned) => owned,
            Probe::Miss(index) => {
                // Drop displaced values outside the slot borrow; their Drop
                // impls may run effect cleanups.
                let stale: Vec<Box<dyn Any>> = {
                    let mut slots = self.core.slots.borrow_mut();
                    let slot = slots.get_mut(&group).expect("remember: unknown group");
                    slot.values.drain(index..).collect()
                };
                drop(stale);

                let owned = Owned::new(init());
                let mut slots = self.core.slots.borrow_mut();
                let slot = slots.get_mut(&group).expect("remember: unknown group");
                slot.values.push(Box::new(owned.clone()));
                slot.cursor = slot.values.len();
                owned
            }
        }
    }

    /// Defers `effect` until the current pass has fully composed.
    pub fn register_side_effect(&self, effect: impl FnOnce() + 'static) {
        self.core.side_effects.borrow_mut().push(Box::new(effect));
    }

    fn current_group_hash(&self) -> Key {
        self.core
            .frames
            .borrow()
            .last()
            .expect("no composition pass is active")
            .hash
    }

    pub(crate) fn begin_pass(&self, root_key: Key) {
        let pass = self.core.pass.get() + 1;
        self.core.pass.set(pass);
        let root_hash = mix_keys(0, root_key, 0);
        {
            let mut slots = self.core.slots.borrow_mut();
            let slot = slots.entry(root_hash).or_insert_with(GroupSlot::new);
            slot.cursor = 0;
            slot.stamp = pass;
        }
        let mut frames = self.core.frames.borrow_mut();
        frames.clear();
        frames.push(GroupFrame::new(root_hash));
    }

    pub(crate) fn end_pass(&self) {
        self.core.frames.borrow_mut().clear();
        let pass = self.core.pass.get();

        let mut stale: Vec<Box<dyn Any>> = Vec::new();
        {
            let mut slots = self.core.slots.borrow_mut();
            let dead: Vec<Key> = slots
                .iter()
                .filter(|(_, slot)| slot.stamp != pass)
                .map(|(key, _)| *key)
                .collect();
            for key in dead {
                if let Some(slot) = slots.remove(&key) {
                    stale.extend(slot.values);
                }
            }
            // Positional truncation: slots past the cursor were not reached
            // this pass and no longer line up with call sites.
            for slot in slots.values_mut() {
                if slot.stamp == pass && slot.cursor < slot.values.len() {
                    stale.extend(slot.values.drain(slot.cursor..));
                }
            }
        }
        drop(stale);

        // Side effects may register follow-ups while running.
        let mut rounds = 0;
        loop {
            let effects: Vec<Box<dyn FnOnce()>> =
                self.core.side_effects.borrow_mut().drain(..).collect();
            if effects.is_empty() {
                break;
            }
            rounds += 1;
            if rounds > 100 {
                log::warn!("side effects did not settle after {rounds} rounds; dropping the rest");
                break;
            }
            for effect in effects {
                effect();
            }
        }
    }
}

/// Owns a composer and drives full passes over a content closure.
pub struct Composition {
    composer: Composer,
    root_key: Key,
}

impl Composition {
    pub fn new() -> Self {
        Self::with_runtime(RuntimeHandle::new())
    }

    pub fn with_runtime(runtime: RuntimeHandle) -> Self {
        Self {
            composer: Composer::new(runtime),
            root_key: location_key(file!(), line!(), column!()),
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.composer.runtime_handle()
    }

    /// Runs one full composition pass over `content`.
    ///
    /// Clears the pending recompose request first, so writes made *during*
    /// the pass are observed and schedule a follow-up pass.
    pub fn render(&mut self, content: &mut dyn FnMut()) {
        self.composer.runtime_handle().take_recompose_request();
        self.composer.begin_pass(self.root_key);
        {
            let _guard = composer_context::enter(&self.composer);
            content();
        }
        self.composer.end_pass();
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{remember, useState, with_key};
    use std::cell::Cell;

    #[test]
    fn test_remember_survives_recomposition() {
        let mut composition = Composition::new();
        let created = Rc::new(Cell::new(0));

        let created_for_content = Rc::clone(&created);
        let mut content = move || {
            let created = Rc::clone(&created_for_content);
            let slot = remember(move || {
                created.set(created.get() + 1);
                41
            });
            assert_eq!(slot.with(|value| *value), 41);
        };

        composition.render(&mut content);
        composition.render(&mut content);
        assert_eq!(created.get(), 1, "init must run once across passes");
    }

    #[test]
    fn test_state_write_schedules_next_pass() {
        let mut composition = Composition::new();
        let runtime = composition.runtime_handle();
        let observed = Rc::new(Cell::new(0));

        let observed_for_content = Rc::clone(&observed);
        let mut content = move || {
            let counter = useState(|| 0);
            observed_for_content.set(counter.get());
            if counter.get() == 0 {
                counter.set(1);
            }
        };

        composition.render(&mut content);
        assert_eq!(observed.get(), 0);
        assert!(runtime.recompose_requested());
        composition.render(&mut content);
        assert_eq!(observed.get(), 1);
    }

    #[test]
    fn test_loop_groups_keep_distinct_slots() {
        let mut composition = Composition::new();
        let sum = Rc::new(Cell::new(0));

        let sum_for_content = Rc::clone(&sum);
        let mut content = move || {
            sum_for_content.set(0);
            for item in [10, 20, 30] {
                let sum = Rc::clone(&sum_for_content);
                with_key(&item, move || {
                    let slot = remember(move || item);
                    sum.set(sum.get() + slot.with(|value| *value));
                });
            }
        };

        composition.render(&mut content);
        composition.render(&mut content);
        assert_eq!(sum.get(), 60);
    }

    #[test]
    fn test_abandoned_group_slots_are_dropped() {
        struct Tracker(Rc<Cell<bool>>);
        impl Drop for Tracker {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let mut composition = Composition::new();
        let dropped = Rc::new(Cell::new(false));
        let show = Rc::new(Cell::new(true));

        let dropped_for_content = Rc::clone(&dropped);
        let show_for_content = Rc::clone(&show);
        let mut content = move || {
            if show_for_content.get() {
                let dropped = Rc::clone(&dropped_for_content);
                with_key(&"tracked", move || {
                    let _slot = remember(move || Tracker(dropped));
                });
            }
        };

        composition.render(&mut content);
        assert!(!dropped.get());
        show.set(false);
        composition.render(&mut content);
        assert!(dropped.get(), "leaving the branch must drop its slots");
    }
}
