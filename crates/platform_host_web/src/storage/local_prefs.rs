//! `localStorage`-backed preference store implementation.
//!
//! Browsers only deliver the `storage` event to other documents sharing the origin, so writes
//! made through this store also dispatch a synthetic `storage` event on the current window. That
//! keeps same-page subscribers in step with cross-tab ones.

use platform_host::{ListenerCallback, ListenerHandle, PreferenceStore};

#[derive(Debug, Clone, Copy, Default)]
/// Browser preference store backed by `window.localStorage`.
pub struct WebPreferenceStore;

impl WebPreferenceStore {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    fn announce_change() {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Ok(event) = web_sys::Event::new("storage") {
            let _ = window.dispatch_event(&event);
        }
    }
}

impl PreferenceStore for WebPreferenceStore {
    fn load_raw(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage().ok()?.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .set_item(key, value)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))?;
            Self::announce_change();
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))?;
            Self::announce_change();
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }

    fn subscribe(&self, on_change: ListenerCallback) -> ListenerHandle {
        #[cfg(target_arch = "wasm32")]
        {
            match web_sys::window() {
                Some(window) => {
                    crate::listener::attach_event_listener(window.into(), "storage", on_change)
                }
                None => ListenerHandle::inert(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            crate::listener::detached_listener(on_change)
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn native_fallback_is_empty_and_inert() {
        let store = WebPreferenceStore;
        store.save_raw("theme", "dark").expect("save");
        assert_eq!(store.load_raw("theme"), None);
        store.delete("theme").expect("delete");
        assert!(!store.subscribe(Rc::new(|| {})).is_active());
    }
}
