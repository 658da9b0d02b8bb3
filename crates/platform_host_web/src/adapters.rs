use std::rc::Rc;

use platform_host::{ColorSchemeSource, MemoryPreferenceStore, NoopColorScheme, PreferenceStore};

use crate::{WebColorScheme, WebPreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters (`localStorage`, `matchMedia`).
    Browser,
    /// Native builds without a browser: session-local memory prefs and a fixed light scheme.
    Detached,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(target_arch = "wasm32")]
    {
        HostStrategy::Browser
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        HostStrategy::Detached
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Detached => "detached",
    }
}

/// Builds the preference store for the selected host strategy.
pub fn preference_store() -> Rc<dyn PreferenceStore> {
    match selected_host_strategy() {
        HostStrategy::Browser => Rc::new(WebPreferenceStore),
        HostStrategy::Detached => Rc::new(MemoryPreferenceStore::default()),
    }
}

/// Builds the ambient color-scheme source for the selected host strategy.
pub fn color_scheme_source() -> Rc<dyn ColorSchemeSource> {
    match selected_host_strategy() {
        HostStrategy::Browser => Rc::new(WebColorScheme),
        HostStrategy::Detached => Rc::new(NoopColorScheme),
    }
}

#[derive(Clone)]
/// Host services consumed by the page header, erased behind their contracts.
pub struct HostServices {
    /// Persisted preference store.
    pub prefs: Rc<dyn PreferenceStore>,
    /// Ambient appearance source.
    pub color_scheme: Rc<dyn ColorSchemeSource>,
}

/// Builds every host service for the selected strategy.
pub fn build_host_services() -> HostServices {
    HostServices {
        prefs: preference_store(),
        color_scheme: color_scheme_source(),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_builds_select_detached_services() {
        assert_eq!(selected_host_strategy(), HostStrategy::Detached);
        assert_eq!(host_strategy_name(), "detached");

        let services = build_host_services();
        services.prefs.save_raw("theme", "dark").expect("save");
        assert_eq!(services.prefs.load_raw("theme"), Some("dark".to_string()));
        assert!(!services.color_scheme.prefers_dark());
    }
}
