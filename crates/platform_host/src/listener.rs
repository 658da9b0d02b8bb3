//! Owning listener handles and the in-memory listener registry used by host fakes.

use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

/// Callback invoked when a host-side value changes.
pub type ListenerCallback = Rc<dyn Fn()>;

/// Handle for one registered host listener.
///
/// Calling [`ListenerHandle::remove`] or dropping the handle unregisters the listener, so a
/// registration never outlives the value that owns its handle.
#[must_use = "dropping a listener handle unregisters the listener"]
pub struct ListenerHandle {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerHandle {
    /// Wraps the host-specific unregister operation.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Returns a handle that owns no registration.
    pub fn inert() -> Self {
        Self { release: None }
    }

    /// Returns `true` when the handle still owns a live registration.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Unregisters the listener.
    pub fn remove(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    listeners: BTreeMap<u64, ListenerCallback>,
}

#[derive(Clone, Default)]
/// Single-threaded listener registry shared by the in-memory host implementations.
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    /// Registers `callback` and returns the handle that unregisters it.
    pub fn register(&self, callback: ListenerCallback) -> ListenerHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, callback);
            id
        };
        let registry = Rc::downgrade(&self.inner);
        ListenerHandle::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().listeners.remove(&id);
            }
        })
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every live listener in registration order.
    pub fn notify(&self) {
        // Snapshot first: listeners may unregister themselves while running.
        let callbacks: Vec<ListenerCallback> =
            self.inner.borrow().listeners.values().cloned().collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, ListenerCallback) {
        let hits = Rc::new(Cell::new(0));
        let callback: ListenerCallback = {
            let hits = hits.clone();
            Rc::new(move || hits.set(hits.get() + 1))
        };
        (hits, callback)
    }

    #[test]
    fn notify_reaches_every_live_listener() {
        let registry = ListenerRegistry::default();
        let (first_hits, first) = counter();
        let (second_hits, second) = counter();
        let _first = registry.register(first);
        let _second = registry.register(second);

        registry.notify();

        assert_eq!(first_hits.get(), 1);
        assert_eq!(second_hits.get(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn removed_and_dropped_handles_stop_delivery() {
        let registry = ListenerRegistry::default();
        let (removed_hits, removed) = counter();
        let (dropped_hits, dropped) = counter();

        registry.register(removed).remove();
        drop(registry.register(dropped));
        registry.notify();

        assert_eq!(removed_hits.get(), 0);
        assert_eq!(dropped_hits.get(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn handle_outliving_registry_releases_quietly() {
        let registry = ListenerRegistry::default();
        let (_, callback) = counter();
        let handle = registry.register(callback);
        drop(registry);

        assert!(handle.is_active());
        handle.remove();
    }

    #[test]
    fn inert_handle_owns_nothing() {
        assert!(!ListenerHandle::inert().is_active());
    }
}
