//! Single-threaded reactive runtime: composer, state, effects, task queue.

pub mod composer;
pub mod composer_context;
mod effects;
pub mod hash;
pub mod owned;
pub mod runtime;
mod state;

pub use composer::{Composer, Composition};
pub use composer_context::with_composer as with_current_composer;
pub use composer_context::try_with_composer;
pub use effects::{
    DisposableEffectResult, DisposableEffectScope, SideEffect, __disposable_effect_impl,
};
pub use owned::Owned;
pub use runtime::{RuntimeHandle, UiTask};
pub use state::MutableState;

use std::hash::{Hash, Hasher};

pub type Key = u64;

/// Stable key for a source location, used to identify composition groups.
pub fn location_key(file: &str, line: u32, column: u32) -> Key {
    let mut hasher = hash::default::new();
    file.hash(&mut hasher);
    line.hash(&mut hasher);
    column.hash(&mut hasher);
    hasher.finish()
}

pub fn hash_key<K: Hash>(keys: &K) -> Key {
    let mut hasher = hash::default::new();
    keys.hash(&mut hasher);
    hasher.finish()
}

/// Remembers a value at the current composition position.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Owned<T> {
    with_current_composer(|composer| composer.remember(init))
}

/// Groups `content` under an explicit value key, giving loop bodies stable
/// slot positions independent of iteration order.
pub fn with_key<K: Hash>(key: &K, content: impl FnOnce()) {
    let hashed = hash_key(key);
    with_current_composer(|composer| composer.with_group(hashed, |_| content()));
}

/// Remembered [`MutableState`] bound to the composition's runtime.
#[allow(non_snake_case)]
pub fn useState<T: Clone + 'static>(init: impl FnOnce() -> T) -> MutableState<T> {
    with_current_composer(|composer| {
        let runtime = composer.runtime_handle();
        let state = composer.remember(move || MutableState::with_runtime(init(), runtime));
        state.with(|state| state.clone())
    })
}

/// Snake-case alias for [`useState`].
pub fn use_state<T: Clone + 'static>(init: impl FnOnce() -> T) -> MutableState<T> {
    useState(init)
}

/// Creates a [`MutableState`], bound to the current runtime when a
/// composition is active.
#[allow(non_snake_case)]
pub fn mutableStateOf<T: Clone + 'static>(initial: T) -> MutableState<T> {
    match try_with_composer(|composer| composer.runtime_handle()) {
        Some(runtime) => MutableState::with_runtime(initial, runtime),
        None => MutableState::new(initial),
    }
}
