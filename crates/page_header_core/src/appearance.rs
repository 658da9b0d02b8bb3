//! Light/dark appearance resolution over injected host services.

use std::{cell::Cell, fmt, rc::Rc};

use platform_host::{ColorSchemeSource, ListenerCallback, ListenerHandle, PreferenceStore};
use serde::{Deserialize, Serialize};

/// Preference key holding the persisted theme.
pub const THEME_PREF_KEY: &str = "theme";
/// Persisted value selecting the dark appearance.
pub const DARK_PREF_VALUE: &str = "dark";
/// Persisted value selecting the light appearance.
pub const LIGHT_PREF_VALUE: &str = "light";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Caller appearance selection.
pub enum AppearanceMode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Persisted preference, falling back to the ambient preference.
    #[default]
    Auto,
}

impl AppearanceMode {
    /// Stable token accepted by [`AppearanceMode::parse`].
    pub const fn token(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Parses a mode token.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    /// Explicit modes resolve without consulting (or subscribing to) any host source.
    pub const fn is_explicit(self) -> bool {
        !matches!(self, Self::Auto)
    }
}

#[derive(Clone)]
/// Resolves the "is dark" signal for one header instance.
pub struct AppearanceResolver {
    mode: AppearanceMode,
    prefs: Rc<dyn PreferenceStore>,
    color_scheme: Rc<dyn ColorSchemeSource>,
}

impl AppearanceResolver {
    /// Creates a resolver over the given host services.
    pub fn new(
        mode: AppearanceMode,
        prefs: Rc<dyn PreferenceStore>,
        color_scheme: Rc<dyn ColorSchemeSource>,
    ) -> Self {
        Self {
            mode,
            prefs,
            color_scheme,
        }
    }

    /// Computes the current appearance once.
    pub fn resolve(&self) -> bool {
        match self.mode {
            AppearanceMode::Light => false,
            AppearanceMode::Dark => true,
            AppearanceMode::Auto => resolve_auto(&*self.prefs, &*self.color_scheme),
        }
    }

    /// Resolves and, in [`AppearanceMode::Auto`], stays subscribed to persisted and ambient
    /// preference changes until the returned value is detached or dropped.
    ///
    /// `on_change` runs after a notification flips the resolved value. Explicit modes register
    /// nothing.
    pub fn attach(&self, on_change: impl Fn(bool) + 'static) -> AttachedAppearance {
        let is_dark = Rc::new(Cell::new(self.resolve()));
        if self.mode.is_explicit() {
            return AttachedAppearance {
                is_dark,
                listeners: Vec::new(),
            };
        }

        let recompute: ListenerCallback = {
            let state = Rc::downgrade(&is_dark);
            let prefs = self.prefs.clone();
            let color_scheme = self.color_scheme.clone();
            Rc::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let next = resolve_auto(&*prefs, &*color_scheme);
                if state.replace(next) != next {
                    on_change(next);
                }
            })
        };

        let listeners = vec![
            self.prefs.subscribe(recompute.clone()),
            self.color_scheme.subscribe(recompute),
        ];
        AttachedAppearance { is_dark, listeners }
    }
}

impl fmt::Debug for AppearanceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppearanceResolver")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

fn resolve_auto(prefs: &dyn PreferenceStore, color_scheme: &dyn ColorSchemeSource) -> bool {
    match prefs
        .load_raw(THEME_PREF_KEY)
        .filter(|value| !value.is_empty())
    {
        Some(value) => value == DARK_PREF_VALUE,
        None => color_scheme.prefers_dark(),
    }
}

#[derive(Debug)]
/// Live appearance state owned by one header instance.
pub struct AttachedAppearance {
    is_dark: Rc<Cell<bool>>,
    listeners: Vec<ListenerHandle>,
}

impl AttachedAppearance {
    /// Most recently resolved value.
    pub fn is_dark(&self) -> bool {
        self.is_dark.get()
    }

    /// Returns `true` while change notifications are registered.
    pub fn is_subscribed(&self) -> bool {
        self.listeners.iter().any(ListenerHandle::is_active)
    }

    /// Releases both change subscriptions.
    pub fn detach(self) {
        for listener in self.listeners {
            listener.remove();
        }
    }
}

/// Persists the opposite of `currently_dark` under [`THEME_PREF_KEY`] and returns the new value.
///
/// # Errors
///
/// Returns the store error when the write fails.
pub fn toggle_persisted_theme(
    prefs: &dyn PreferenceStore,
    currently_dark: bool,
) -> Result<bool, String> {
    let next = !currently_dark;
    let value = if next { DARK_PREF_VALUE } else { LIGHT_PREF_VALUE };
    prefs.save_raw(THEME_PREF_KEY, value)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use platform_host::{ManualColorScheme, MemoryPreferenceStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolver(
        mode: AppearanceMode,
        prefs: &MemoryPreferenceStore,
        ambient: &ManualColorScheme,
    ) -> AppearanceResolver {
        AppearanceResolver::new(mode, Rc::new(prefs.clone()), Rc::new(ambient.clone()))
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl Fn(bool) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::<bool>::new()));
        let record = {
            let seen = seen.clone();
            move |dark: bool| seen.borrow_mut().push(dark)
        };
        (seen, record)
    }

    #[test]
    fn explicit_override_ignores_every_source() {
        let prefs = MemoryPreferenceStore::default();
        prefs.save_raw(THEME_PREF_KEY, DARK_PREF_VALUE).expect("save");
        let ambient = ManualColorScheme::new(true);

        assert!(!resolver(AppearanceMode::Light, &prefs, &ambient).resolve());
        prefs.save_raw(THEME_PREF_KEY, LIGHT_PREF_VALUE).expect("save");
        ambient.set_prefers_dark(false);
        assert!(resolver(AppearanceMode::Dark, &prefs, &ambient).resolve());
    }

    #[test]
    fn auto_prefers_persisted_value_over_ambient() {
        let prefs = MemoryPreferenceStore::default();
        let ambient = ManualColorScheme::new(true);
        let auto = resolver(AppearanceMode::Auto, &prefs, &ambient);

        assert!(auto.resolve());
        prefs.save_raw(THEME_PREF_KEY, LIGHT_PREF_VALUE).expect("save");
        assert!(!auto.resolve());
        prefs.save_raw(THEME_PREF_KEY, "sepia").expect("save");
        assert!(!auto.resolve());
        prefs.save_raw(THEME_PREF_KEY, DARK_PREF_VALUE).expect("save");
        ambient.set_prefers_dark(false);
        assert!(auto.resolve());
    }

    #[test]
    fn empty_persisted_theme_defers_to_ambient() {
        let prefs = MemoryPreferenceStore::default();
        prefs.save_raw(THEME_PREF_KEY, "").expect("save");
        let ambient = ManualColorScheme::new(true);
        let auto = resolver(AppearanceMode::Auto, &prefs, &ambient);

        assert!(auto.resolve());
        ambient.set_prefers_dark(false);
        assert!(!auto.resolve());
    }

    #[test]
    fn dark_override_never_subscribes_or_reevaluates() {
        let prefs = MemoryPreferenceStore::default();
        let ambient = ManualColorScheme::new(false);
        let (seen, record) = recorder();

        let attached = resolver(AppearanceMode::Dark, &prefs, &ambient).attach(record);
        ambient.set_prefers_dark(false);
        prefs.save_raw(THEME_PREF_KEY, LIGHT_PREF_VALUE).expect("save");

        assert!(attached.is_dark());
        assert!(!attached.is_subscribed());
        assert_eq!(ambient.listener_count(), 0);
        assert_eq!(prefs.listener_count(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn auto_tracks_changes_until_detached() {
        let prefs = MemoryPreferenceStore::default();
        let ambient = ManualColorScheme::new(false);
        let (seen, record) = recorder();

        let attached = resolver(AppearanceMode::Auto, &prefs, &ambient).attach(record);
        assert!(!attached.is_dark());
        assert!(attached.is_subscribed());
        assert_eq!(ambient.listener_count(), 1);
        assert_eq!(prefs.listener_count(), 1);

        ambient.set_prefers_dark(true);
        assert!(attached.is_dark());
        prefs.save_raw(THEME_PREF_KEY, LIGHT_PREF_VALUE).expect("save");
        assert!(!attached.is_dark());
        // Persisted value still wins, so an ambient flip changes nothing.
        ambient.set_prefers_dark(false);
        assert_eq!(*seen.borrow(), vec![true, false]);

        attached.detach();
        assert_eq!(ambient.listener_count(), 0);
        assert_eq!(prefs.listener_count(), 0);
        prefs.delete(THEME_PREF_KEY).expect("delete");
        ambient.set_prefers_dark(true);
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn dropping_attachment_releases_listeners() {
        let prefs = MemoryPreferenceStore::default();
        let ambient = ManualColorScheme::new(false);

        drop(resolver(AppearanceMode::Auto, &prefs, &ambient).attach(|_| {}));

        assert_eq!(ambient.listener_count(), 0);
        assert_eq!(prefs.listener_count(), 0);
    }

    #[test]
    fn toggle_persists_the_opposite_theme() {
        let prefs = MemoryPreferenceStore::default();
        let ambient = ManualColorScheme::new(false);
        let (seen, record) = recorder();
        let attached = resolver(AppearanceMode::Auto, &prefs, &ambient).attach(record);

        let now_dark = toggle_persisted_theme(&prefs, attached.is_dark()).expect("toggle");

        assert!(now_dark);
        assert_eq!(prefs.load_raw(THEME_PREF_KEY), Some(DARK_PREF_VALUE.to_string()));
        assert!(attached.is_dark());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn mode_tokens_round_trip() {
        for mode in [AppearanceMode::Light, AppearanceMode::Dark, AppearanceMode::Auto] {
            assert_eq!(AppearanceMode::parse(mode.token()), Some(mode));
        }
        assert_eq!(AppearanceMode::parse("sepia"), None);
    }
}
