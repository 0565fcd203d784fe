//! Locally persisted boolean preference (dark mode)
//!
//! The value lives in a synchronous [`KeyValueStore`] as the literal string
//! `"true"` or `"false"`. Every change, including the initial mount, is
//! mirrored to the store and to a [`PresentationMarker`] that switches the
//! theme.

use crate::egui_app::settings_store::KeyValueStore;

/// Settings key holding the dark mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

/// Presentation side effect of the flag, e.g. switching visuals
pub trait PresentationMarker {
    fn set_marker(&mut self, enabled: bool);
}

impl<T: PresentationMarker + ?Sized> PresentationMarker for Box<T> {
    fn set_marker(&mut self, enabled: bool) {
        (**self).set_marker(enabled)
    }
}

/// Decode a stored flag: only `"true"` is true
pub fn read_flag<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> bool {
    store.get(key).as_deref() == Some("true")
}

pub struct PersistedFlag<S, M> {
    key: &'static str,
    value: bool,
    store: S,
    marker: M,
}

impl<S: KeyValueStore, M: PresentationMarker> PersistedFlag<S, M> {
    /// Resolve the value from `store` and mirror it once
    pub fn new(key: &'static str, store: S, marker: M) -> Self {
        let value = read_flag(&store, key);
        let mut flag = Self {
            key,
            value,
            store,
            marker,
        };
        flag.mirror();
        flag
    }

    /// Dark mode flag under [`DARK_MODE_KEY`]
    pub fn dark_mode(store: S, marker: M) -> Self {
        Self::new(DARK_MODE_KEY, store, marker)
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// Value currently in the store
    pub fn read(&self) -> bool {
        read_flag(&self.store, self.key)
    }

    /// Flip the value; returns the new value
    pub fn toggle(&mut self) -> bool {
        self.set(!self.value);
        self.value
    }

    /// Set the value; a no-op when unchanged
    pub fn set(&mut self, value: bool) {
        if self.value == value {
            return;
        }
        self.value = value;
        tracing::debug!("[PersistedFlag:{}] Set to {}", self.key, value);
        self.mirror();
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    pub fn marker_mut(&mut self) -> &mut M {
        &mut self.marker
    }

    fn mirror(&mut self) {
        self.store
            .set(self.key, if self.value { "true" } else { "false" });
        self.marker.set_marker(self.value);
    }
}
