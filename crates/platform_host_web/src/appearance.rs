//! `prefers-color-scheme` media-query adapter.

use platform_host::{ColorSchemeSource, ListenerCallback, ListenerHandle};

/// Media query matched when the platform prefers a dark appearance.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, Default)]
/// Browser ambient appearance source backed by `window.matchMedia`.
pub struct WebColorScheme;

impl WebColorScheme {
    #[cfg(target_arch = "wasm32")]
    fn media_query() -> Option<web_sys::MediaQueryList> {
        web_sys::window()?.match_media(PREFERS_DARK_QUERY).ok().flatten()
    }
}

impl ColorSchemeSource for WebColorScheme {
    fn prefers_dark(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            Self::media_query().is_some_and(|query| query.matches())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    fn subscribe(&self, on_change: ListenerCallback) -> ListenerHandle {
        #[cfg(target_arch = "wasm32")]
        {
            match Self::media_query() {
                Some(query) => {
                    crate::listener::attach_event_listener(query.into(), "change", on_change)
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
