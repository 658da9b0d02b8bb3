use std::rc::Rc;

use leptos::*;
use leptos_meta::{provide_meta_context, Meta, Style, Title};
use leptos_router::*;
use page_header_core::{
    estimate_reading_time, toggle_persisted_theme, AppearanceResolver, DEFAULT_CHARS_PER_MINUTE,
};
use platform_host_web::{build_host_services, host_strategy_name};
use system_ui::{prelude::*, use_header_host, LeptosTimeoutScheduler, SCOPED_STYLESHEET};

const CONFIGURED_HEADER: &str = r#"{
    "title": "Configured from JSON",
    "subtitle": "Every input of the header can come from a document",
    "author": "Bob",
    "publishedAt": "2024-01-15T08:30:00Z",
    "category": "Configuration",
    "tags": ["serde", "json"],
    "locale": "en-US",
    "structuredDataOverrides": { "headline": "A header configured from JSON" }
}"#;

const SAMPLE_BODY: &str = "Hooks let function components hold state and run effects. This \
article walks through the rules of hooks, how the reconciler keeps their order stable, and which \
memoization helpers actually pay for themselves in large trees.";

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let services = build_host_services();
    provide_header_host(HeaderHost::new(
        services.prefs,
        services.color_scheme,
        Rc::new(LeptosTimeoutScheduler),
    ));
    logging::log!("header gallery using {} host services", host_strategy_name());

    view! {
        <Title text="Page header gallery" />
        <Meta name="description" content="Article page header in utility and scoped styles." />
        <Style>{SCOPED_STYLESHEET}</Style>

        <Router>
            <main class="site-root">
                <ThemeToggle />
                <Routes>
                    <Route path="" view=GalleryEntry />
                    <Route path="/variant/:variant" view=VariantRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn GalleryEntry() -> impl IntoView {
    view! {
        <HeaderGallery style=HeaderStyleVariant::Utility />
        <HeaderGallery style=HeaderStyleVariant::Scoped />
    }
}

#[component]
fn VariantRoute() -> impl IntoView {
    let params = use_params_map();
    let query = use_query_map();
    let variant = move || params.with(|map| map.get("variant").cloned()).unwrap_or_default();
    let preview = move || {
        query.with(|map| {
            preview_options(
                map.get("locale").map(String::as_str),
                map.get("appearance").map(String::as_str),
            )
        })
    };

    move || match parse_variant(&variant()) {
        Some(style) => {
            let (locale, appearance) = preview();
            view! { <HeaderGallery style=style locale=locale appearance=appearance /> }
                .into_view()
        }
        None => view! {
            <section class="site-missing">
                <h1>"Unknown style"</h1>
                <p>{format!("No header style named `{}`.", variant())}</p>
                <A href="/">"Back to the gallery"</A>
            </section>
        }
        .into_view(),
    }
}

fn parse_variant(token: &str) -> Option<HeaderStyleVariant> {
    [HeaderStyleVariant::Utility, HeaderStyleVariant::Scoped]
        .into_iter()
        .find(|variant| variant.token() == token)
}

/// Reads the `?locale=` and `?appearance=` preview overrides; unknown values are ignored.
fn preview_options(
    locale: Option<&str>,
    appearance: Option<&str>,
) -> (Option<HeaderLocale>, AppearanceMode) {
    (
        locale.and_then(HeaderLocale::parse),
        appearance.and_then(AppearanceMode::parse).unwrap_or_default(),
    )
}

#[component]
fn ThemeToggle() -> impl IntoView {
    let host = use_header_host();
    let toggle = move |_| {
        let currently_dark = AppearanceResolver::new(
            AppearanceMode::Auto,
            host.prefs.clone(),
            host.color_scheme.clone(),
        )
        .resolve();
        match toggle_persisted_theme(&*host.prefs, currently_dark) {
            Ok(dark) => {
                logging::log!("persisted theme is now {}", if dark { "dark" } else { "light" });
            }
            Err(err) => logging::warn!("theme toggle failed: {err}"),
        }
    };

    view! {
        <button type="button" class="site-theme-toggle" on:click=toggle>
            "Toggle theme"
        </button>
    }
}

#[component]
fn DemoSection(#[prop(into)] heading: String, children: Children) -> impl IntoView {
    view! {
        <section class="site-demo">
            <h2 class="site-demo-heading">{heading}</h2>
            {children()}
        </section>
    }
}

#[component]
/// Every demo configuration rendered in one style variant.
///
/// `locale` replaces the locale of the English demos and `appearance` applies to every demo that
/// does not force its own.
pub fn HeaderGallery(
    style: HeaderStyleVariant,
    #[prop(optional_no_strip)] locale: Option<HeaderLocale>,
    #[prop(optional)] appearance: AppearanceMode,
) -> impl IntoView {
    let english = locale.unwrap_or_default();
    let (placeholder_on, set_placeholder_on) = create_signal(true);
    let replay_placeholder = move |_| {
        set_placeholder_on.set(false);
        set_placeholder_on.set(true);
    };

    let on_title_click = Callback::new(|title: String| logging::log!("title clicked: {title}"));
    let on_tag_click = Callback::new(|(tag, index): (String, usize)| {
        logging::log!("tag #{index} clicked: {tag}");
    });
    let on_meta_field_click = Callback::new(|(field, index): (MetaField, usize)| {
        logging::log!("meta field #{index} clicked: {}", field.label);
    });

    let configured = match HeaderConfig::from_json(CONFIGURED_HEADER) {
        Ok(config) => Some(view! { <PageHeaderFromConfig config=config style=style /> }),
        Err(err) => {
            logging::warn!("demo header config rejected: {err}");
            None
        }
    };

    view! {
        <div
            class="site-gallery"
            data-ui-variant=style.token()
            data-site-appearance=appearance.token()
            lang=english.tag()
        >
            <h1 class="site-gallery-title">{format!("{} style", style.token())}</h1>

            <DemoSection heading="Basic usage">
                <PageHeader
                    style=style
                    title="Simple title"
                    published_at="2024-01-15"
                    author="Author name"
                    locale=english
                    appearance=appearance
                />
            </DemoSection>

            <DemoSection heading="Full feature set">
                <PageHeader
                    style=style
                    title="深入理解 React Hooks 的设计原理与最佳实践"
                    subtitle="从函数组件的状态管理到性能优化，全面解析现代 React 开发"
                    published_at="2024-01-15"
                    author="张三"
                    reading_time=12
                    category="前端开发"
                    tags=vec![
                        "React".to_string(),
                        "Hooks".to_string(),
                        "JavaScript".to_string(),
                        "前端".to_string(),
                        "教程".to_string(),
                    ]
                    meta_fields=vec![
                        MetaField::new("更新时间", "2024-01-20")
                            .with_icon(MetaIcon::Glyph("🔄".into())),
                        MetaField::new("难度", "中级")
                            .with_icon(MetaIcon::Glyph("⭐".into()))
                            .with_style_override("text-orange-500"),
                    ]
                    locale=HeaderLocale::ZhCn
                    appearance=appearance
                    on_title_click=on_title_click
                    on_tag_click=on_tag_click
                    on_meta_field_click=on_meta_field_click
                />
            </DemoSection>

            <DemoSection heading="Loading state">
                <button type="button" class="site-demo-action" on:click=replay_placeholder>
                    "Replay placeholder"
                </button>
                <PageHeader
                    style=style
                    title=""
                    show_placeholder=placeholder_on
                    appearance=appearance
                />
            </DemoSection>

            <DemoSection heading="Long title">
                <PageHeader
                    style=style
                    title="This is a deliberately long title that checks how the header wraps and lays out long text across every screen size"
                    subtitle="Subtitles can run long too, which exercises responsive wrapping"
                    published_at="2024-01-15"
                    author="Test author"
                    reading_time=15
                    tags=vec![
                        "long title".to_string(),
                        "testing".to_string(),
                        "responsive".to_string(),
                        "wrapping".to_string(),
                        "layout".to_string(),
                    ]
                    locale=english
                    appearance=appearance
                />
            </DemoSection>

            <DemoSection heading="Custom metadata">
                <PageHeader
                    style=style
                    title="Custom metadata example"
                    meta_fields=vec![
                        MetaField::new("Version", "v2.1.0").with_icon(MetaIcon::Glyph("📦".into())),
                        MetaField::new("Status", "Done")
                            .with_icon(MetaIcon::Glyph("✅".into()))
                            .with_style_override("text-green-500"),
                        MetaField::new("Priority", "High")
                            .with_icon(MetaIcon::Glyph("🔥".into()))
                            .with_style_override("text-red-500"),
                    ]
                    locale=english
                    appearance=appearance
                />
            </DemoSection>

            <DemoSection heading="Estimated reading time, forced dark">
                <PageHeader
                    style=style
                    title="Hooks in practice"
                    author="Bob"
                    category="Frontend"
                    locale=english
                    reading_time=i64::from(estimate_reading_time(SAMPLE_BODY, DEFAULT_CHARS_PER_MINUTE))
                    appearance=AppearanceMode::Dark
                    structured_data_enabled=false
                />
            </DemoSection>

            <DemoSection heading="Configured from JSON">
                {configured}
            </DemoSection>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_routes_match_style_tokens() {
        assert_eq!(parse_variant("utility"), Some(HeaderStyleVariant::Utility));
        assert_eq!(parse_variant("scoped"), Some(HeaderStyleVariant::Scoped));
        assert_eq!(parse_variant("tailwind"), None);
    }

    #[test]
    fn preview_query_selects_locale_and_appearance() {
        assert_eq!(
            preview_options(Some("zh"), Some("dark")),
            (Some(HeaderLocale::ZhCn), AppearanceMode::Dark)
        );
        assert_eq!(
            preview_options(Some("fr-FR"), Some("sepia")),
            (None, AppearanceMode::Auto)
        );
        assert_eq!(preview_options(None, None), (None, AppearanceMode::Auto));
    }

    #[test]
    fn configured_header_document_is_valid() {
        let config = HeaderConfig::from_json(CONFIGURED_HEADER).expect("demo config");

        assert_eq!(config.tags, vec!["serde".to_string(), "json".to_string()]);
        assert_eq!(config.locale, HeaderLocale::EnUs);
    }

    #[test]
    fn sample_body_reading_time_rounds_up() {
        assert_eq!(estimate_reading_time(SAMPLE_BODY, DEFAULT_CHARS_PER_MINUTE), 2);
    }
}
