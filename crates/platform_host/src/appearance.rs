//! Ambient color-scheme contracts (`prefers-color-scheme` and equivalents).

use std::{cell::Cell, rc::Rc};

use crate::listener::{ListenerCallback, ListenerHandle, ListenerRegistry};

/// Host service reporting the operating environment's light/dark preference.
pub trait ColorSchemeSource {
    /// Returns `true` when the ambient preference is dark.
    fn prefers_dark(&self) -> bool;

    /// Registers `on_change` for ambient preference changes.
    fn subscribe(&self, on_change: ListenerCallback) -> ListenerHandle;
}

#[derive(Debug, Clone, Copy, Default)]
/// Color-scheme source for targets without an ambient preference. Always light.
pub struct NoopColorScheme;

impl ColorSchemeSource for NoopColorScheme {
    fn prefers_dark(&self) -> bool {
        false
    }

    fn subscribe(&self, _on_change: ListenerCallback) -> ListenerHandle {
        ListenerHandle::inert()
    }
}

#[derive(Debug, Clone, Default)]
/// Manually driven color-scheme source for tests and previews.
pub struct ManualColorScheme {
    dark: Rc<Cell<bool>>,
    listeners: ListenerRegistry,
}

impl ManualColorScheme {
    /// Creates a source with the given initial preference.
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            dark: Rc::new(Cell::new(prefers_dark)),
            listeners: ListenerRegistry::default(),
        }
    }

    /// Changes the ambient preference and notifies subscribers, as a platform change event would.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.dark.set(prefers_dark);
        self.listeners.notify();
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ColorSchemeSource for ManualColorScheme {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn subscribe(&self, on_change: ListenerCallback) -> ListenerHandle {
        self.listeners.register(on_change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_source_notifies_until_unsubscribed() {
        let source = ManualColorScheme::new(false);
        let seen = Rc::new(Cell::new(false));
        let handle = source.subscribe({
            let source = source.clone();
            let seen = seen.clone();
            Rc::new(move || seen.set(source.prefers_dark()))
        });

        source.set_prefers_dark(true);
        assert!(seen.get());
        assert_eq!(source.listener_count(), 1);

        handle.remove();
        source.set_prefers_dark(false);
        assert!(seen.get());
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn noop_source_is_light_and_inert() {
        let source = NoopColorScheme;
        assert!(!source.prefers_dark());
        assert!(!source.subscribe(Rc::new(|| {})).is_active());
    }
}
