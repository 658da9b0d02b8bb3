//! Host services shared by every header mounted under one provider.

use std::{rc::Rc, time::Duration};

use leptos::{logging, provide_context, use_context};
use platform_host::{
    ColorSchemeSource, NoopColorScheme, NoopPreferenceStore, PreferenceStore, TimeoutHandle,
    TimeoutScheduler,
};

#[derive(Clone)]
/// Preference store, ambient color-scheme source, and timer used by [`crate::PageHeader`].
pub struct HeaderHost {
    /// Persisted preference store.
    pub prefs: Rc<dyn PreferenceStore>,
    /// Ambient appearance source.
    pub color_scheme: Rc<dyn ColorSchemeSource>,
    /// One-shot timer used for the loading placeholder.
    pub scheduler: Rc<dyn TimeoutScheduler>,
}

impl HeaderHost {
    /// Bundles explicit services.
    pub fn new(
        prefs: Rc<dyn PreferenceStore>,
        color_scheme: Rc<dyn ColorSchemeSource>,
        scheduler: Rc<dyn TimeoutScheduler>,
    ) -> Self {
        Self {
            prefs,
            color_scheme,
            scheduler,
        }
    }

    /// Services used when no [`HeaderHost`] was provided: nothing persisted, always light, and
    /// Leptos timers.
    pub fn detached() -> Self {
        Self::new(
            Rc::new(NoopPreferenceStore),
            Rc::new(NoopColorScheme),
            Rc::new(LeptosTimeoutScheduler),
        )
    }
}

impl std::fmt::Debug for HeaderHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderHost").finish_non_exhaustive()
    }
}

/// Makes `host` available to every header below the current owner.
pub fn provide_header_host(host: HeaderHost) {
    provide_context(host);
}

/// Returns the provided [`HeaderHost`], or [`HeaderHost::detached`] outside a provider.
pub fn use_header_host() -> HeaderHost {
    use_context::<HeaderHost>().unwrap_or_else(HeaderHost::detached)
}

#[derive(Debug, Clone, Copy, Default)]
/// [`TimeoutScheduler`] backed by the Leptos `window.setTimeout` helpers.
pub struct LeptosTimeoutScheduler;

impl TimeoutScheduler for LeptosTimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimeoutHandle {
        schedule_browser_timeout(delay, task)
    }
}

#[cfg(target_arch = "wasm32")]
fn schedule_browser_timeout(delay: Duration, task: Box<dyn FnOnce()>) -> TimeoutHandle {
    match leptos::set_timeout_with_handle(task, delay) {
        Ok(handle) => TimeoutHandle::new(move || handle.clear()),
        Err(err) => {
            logging::warn!("page header timeout could not be scheduled: {err:?}");
            TimeoutHandle::inert()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_browser_timeout(delay: Duration, task: Box<dyn FnOnce()>) -> TimeoutHandle {
    drop(task);
    logging::warn!("no browser timer on this target; {delay:?} timeout dropped");
    TimeoutHandle::inert()
}
