//! Metadata icons.

use leptos::*;
use page_header_core::MetaIcon;

/// Path of the built-in clock glyph on a 20x20 grid.
const CLOCK_PATH: &str = "M10 18a8 8 0 100-16 8 8 0 000 16zm1-12a1 1 0 10-2 0v4a1 1 0 00.293.707\
l2.828 2.829a1 1 0 101.415-1.415L11 9.586V6z";

#[component]
/// Built-in clock glyph used by computed metadata entries.
pub fn DefaultMetaIcon(
    /// Extra classes for the `<svg>` element.
    #[prop(optional, into)]
    class: Option<String>,
) -> impl IntoView {
    view! {
        <svg
            class=class.unwrap_or_else(|| "w-4 h-4".to_string())
            data-ui-icon="clock"
            fill="currentColor"
            viewBox="0 0 20 20"
            focusable="false"
            aria-hidden="true"
        >
            <path fill-rule="evenodd" d=CLOCK_PATH clip-rule="evenodd" />
        </svg>
    }
}

#[component]
/// Renders a [`MetaIcon`]: the clock glyph or the caller's text glyph.
pub fn MetaIconView(icon: MetaIcon) -> impl IntoView {
    match icon {
        MetaIcon::Default => view! { <DefaultMetaIcon /> }.into_view(),
        MetaIcon::Glyph(glyph) => view! {
            <span data-ui-icon="glyph" aria-hidden="true">
                {glyph}
            </span>
        }
        .into_view(),
    }
}
