//! Lightweight preference storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::listener::{ListenerCallback, ListenerHandle, ListenerRegistry};

/// Host service for persisted preference values (raw text stored per key).
///
/// Values are read synchronously so change notifications can recompute derived state in place.
pub trait PreferenceStore {
    /// Loads the raw value stored for `key`.
    fn load_raw(&self, key: &str) -> Option<String>;

    /// Stores a raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable or rejects the write.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), String>;

    /// Deletes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable or rejects the delete.
    fn delete(&self, key: &str) -> Result<(), String>;

    /// Registers `on_change` for changes to any stored preference.
    fn subscribe(&self, on_change: ListenerCallback) -> ListenerHandle;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPreferenceStore;

impl PreferenceStore for NoopPreferenceStore {
    fn load_raw(&self, _key: &str) -> Option<String> {
        None
    }

    fn save_raw(&self, _key: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }

    fn subscribe(&self, _on_change: ListenerCallback) -> ListenerHandle {
        ListenerHandle::inert()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Every write or delete notifies subscribers, mirroring a cross-context `storage` event.
pub struct MemoryPreferenceStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    listeners: ListenerRegistry,
}

impl MemoryPreferenceStore {
    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.listeners.notify();
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        self.listeners.notify();
        Ok(())
    }

    fn subscribe(&self, on_change: ListenerCallback) -> ListenerHandle {
        self.listeners.register(on_change)
    }
}
