//! Article page header component.

use std::{cell::RefCell, rc::Rc};

use leptos::*;
use page_header_core::{
    AppearanceMode, AppearanceResolver, ConfigValidationError, HeaderConfig, HeaderLocale,
    MetaField, PlaceholderTimeline, PublishedAt, RenderState, StructuredData,
};
use serde_json::{Map, Value};

use crate::{
    host::{use_header_host, HeaderHost},
    icon::MetaIconView,
    style::{join_classes, HeaderStyleSheet, HeaderStyleVariant, SkeletonBlock},
};

#[derive(Clone, Copy, Default)]
/// Optional interaction callbacks.
pub struct HeaderEvents {
    /// Receives the title text.
    pub on_title_click: Option<Callback<String>>,
    /// Receives the tag text and its position.
    pub on_tag_click: Option<Callback<(String, usize)>>,
    /// Receives the clicked entry and its position in the assembled row.
    pub on_meta_field_click: Option<Callback<(MetaField, usize)>>,
}

#[component]
/// Page header for an article: title, subtitle, metadata row, tags, and a schema.org annotation.
///
/// Appearance follows `appearance`; in [`AppearanceMode::Auto`] the header tracks the persisted
/// theme and the ambient color scheme of the provided [`crate::HeaderHost`]. With
/// `show_placeholder` the header draws skeleton blocks for one second before its content.
pub fn PageHeader(
    /// Heading text.
    #[prop(into)]
    title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    /// Caller entries, shown before the computed published/author/reading-time/category entries.
    #[prop(optional)]
    meta_fields: Vec<MetaField>,
    #[prop(optional, into)] published_at: Option<PublishedAt>,
    #[prop(optional, into)] author: Option<String>,
    /// Minutes; zero hides the entry.
    #[prop(optional, into)]
    reading_time: Option<i64>,
    #[prop(optional, into)] category: Option<String>,
    #[prop(optional)] tags: Vec<String>,
    #[prop(optional)] appearance: AppearanceMode,
    /// Switching this on after mount restarts the placeholder.
    #[prop(optional, into)]
    show_placeholder: MaybeSignal<bool>,
    #[prop(default = true)] structured_data_enabled: bool,
    /// Keys merged over the generated annotation, one level deep.
    #[prop(optional)]
    structured_data_overrides: Map<String, Value>,
    /// Extra container classes.
    #[prop(optional, into)]
    class: String,
    #[prop(optional)] locale: HeaderLocale,
    #[prop(optional)] style: HeaderStyleVariant,
    #[prop(optional)] on_title_click: Option<Callback<String>>,
    #[prop(optional)] on_tag_click: Option<Callback<(String, usize)>>,
    #[prop(optional)] on_meta_field_click: Option<Callback<(MetaField, usize)>>,
) -> impl IntoView {
    let config = HeaderConfig {
        title,
        subtitle,
        meta_fields,
        published_at,
        author,
        reading_time,
        category,
        tags,
        appearance,
        show_placeholder: show_placeholder.get_untracked(),
        structured_data_enabled,
        structured_data_overrides,
        class,
        locale,
    };
    let events = HeaderEvents {
        on_title_click,
        on_tag_click,
        on_meta_field_click,
    };
    mount_header(config, show_placeholder, style, events)
}

#[component]
/// [`PageHeader`] driven by a complete [`HeaderConfig`], such as one read with
/// [`HeaderConfig::from_json`].
pub fn PageHeaderFromConfig(
    config: HeaderConfig,
    #[prop(optional)] style: HeaderStyleVariant,
    #[prop(optional)] on_title_click: Option<Callback<String>>,
    #[prop(optional)] on_tag_click: Option<Callback<(String, usize)>>,
    #[prop(optional)] on_meta_field_click: Option<Callback<(MetaField, usize)>>,
) -> impl IntoView {
    let show_placeholder = MaybeSignal::Static(config.show_placeholder);
    let events = HeaderEvents {
        on_title_click,
        on_tag_click,
        on_meta_field_click,
    };
    mount_header(config, show_placeholder, style, events)
}

/// Everything the ready branch renders, computed once per mount.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeaderContent {
    pub(crate) config: HeaderConfig,
    pub(crate) meta: Vec<MetaField>,
    pub(crate) structured_data: Option<StructuredData>,
    pub(crate) issue: Option<ConfigValidationError>,
}

impl HeaderContent {
    /// Computes the content, logging inputs that had to be dropped or flagged.
    pub(crate) fn prepare(config: HeaderConfig) -> Self {
        let issue = config.validate().err();
        if let Some(issue) = &issue {
            logging::warn!("page header input rejected ({}): {issue}", issue.field());
        }

        let (meta, date_error) = config.assemble_metadata_lenient();
        let (structured_data, _) = config.structured_data_lenient();
        if let Some(err) = date_error {
            logging::warn!("page header omits the publish date: {err}");
        }

        Self {
            config,
            meta,
            structured_data,
            issue,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        self.issue.as_ref().map(ConfigValidationError::code)
    }
}

/// Container attributes shared by the loading and ready branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderFrame {
    pub(crate) class: String,
    pub(crate) variant: &'static str,
    pub(crate) appearance: &'static str,
    pub(crate) state: &'static str,
    pub(crate) error: Option<&'static str>,
}

impl HeaderFrame {
    pub(crate) fn new(
        style: HeaderStyleVariant,
        dark: bool,
        state: RenderState,
        content: &HeaderContent,
    ) -> Self {
        Self {
            class: join_classes(style.sheet().container(dark), &content.config.class),
            variant: style.token(),
            appearance: if dark { "dark" } else { "light" },
            state: state.token(),
            error: content.error_code(),
        }
    }
}

/// Reactive state owned by one mounted header.
///
/// Attaching subscribes to appearance changes and starts the placeholder timeline; both are
/// released when the current reactive owner is cleaned up.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeaderLifecycle {
    pub(crate) is_dark: RwSignal<bool>,
    pub(crate) render_state: RwSignal<RenderState>,
}

impl HeaderLifecycle {
    pub(crate) fn attach(
        config: &HeaderConfig,
        show_placeholder: MaybeSignal<bool>,
        host: &HeaderHost,
    ) -> Self {
        let resolver = AppearanceResolver::new(
            config.appearance,
            host.prefs.clone(),
            host.color_scheme.clone(),
        );
        let is_dark = create_rw_signal(false);
        let appearance = resolver.attach(move |dark| is_dark.set(dark));
        is_dark.set(appearance.is_dark());

        let render_state = create_rw_signal(config.initial_render_state());
        let timeline = PlaceholderTimeline::start(
            config.show_placeholder,
            host.scheduler.clone(),
            move |state| render_state.set(state),
        );
        let timeline = Rc::new(RefCell::new(Some(timeline)));

        create_effect({
            let timeline = timeline.clone();
            move |_| {
                let show = show_placeholder.get();
                if let Some(timeline) = timeline.borrow_mut().as_mut() {
                    timeline.set_show_placeholder(show);
                }
            }
        });

        on_cleanup(move || {
            appearance.detach();
            let timeline = timeline.borrow_mut().take();
            if let Some(timeline) = timeline {
                timeline.destroy();
            }
        });

        Self {
            is_dark,
            render_state,
        }
    }
}

fn mount_header(
    config: HeaderConfig,
    show_placeholder: MaybeSignal<bool>,
    style: HeaderStyleVariant,
    events: HeaderEvents,
) -> View {
    let HeaderLifecycle {
        is_dark,
        render_state,
    } = HeaderLifecycle::attach(&config, show_placeholder, &use_header_host());

    let content = Rc::new(HeaderContent::prepare(config));
    (move || {
        let state = render_state.get();
        let dark = is_dark.get();
        let frame = HeaderFrame::new(style, dark, state, &content);
        match state {
            RenderState::Loading => skeleton_view(style.sheet(), frame),
            RenderState::Ready => content_view(style.sheet(), dark, frame, &content, events),
        }
    })
    .into_view()
}

fn skeleton_view(sheet: &'static dyn HeaderStyleSheet, frame: HeaderFrame) -> View {
    let block = move |kind: SkeletonBlock| {
        view! { <div class=sheet.skeleton(kind) data-ui-skeleton=kind.token()></div> }
    };

    view! {
        <header
            class=frame.class
            data-ui-kind="page-header"
            data-ui-variant=frame.variant
            data-ui-appearance=frame.appearance
            data-ui-state=frame.state
            data-ui-error=frame.error
            aria-busy="true"
        >
            {block(SkeletonBlock::Title)}
            {block(SkeletonBlock::Subtitle)}
            <div class=sheet.skeleton_meta_row()>
                {(0..SkeletonBlock::META_COUNT)
                    .map(|index| block(SkeletonBlock::Meta(index)))
                    .collect_view()}
            </div>
            <div class=sheet.skeleton_tag_row()>
                {(0..SkeletonBlock::TAG_COUNT)
                    .map(|index| block(SkeletonBlock::Tag(index)))
                    .collect_view()}
            </div>
        </header>
    }
    .into_view()
}

fn content_view(
    sheet: &'static dyn HeaderStyleSheet,
    dark: bool,
    frame: HeaderFrame,
    content: &HeaderContent,
    events: HeaderEvents,
) -> View {
    let config = &content.config;

    let script = content.structured_data.as_ref().map(|data| {
        view! { <script type="application/ld+json" inner_html=data.to_script_payload()></script> }
    });

    let title = config.title.clone();
    let clicked_title = title.clone();
    let subtitle = config
        .subtitle_text()
        .map(|subtitle| view! { <h2 class=sheet.subtitle(dark)>{subtitle.to_string()}</h2> });

    let meta_row = (!content.meta.is_empty()).then(|| {
        let items = content
            .meta
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, field)| meta_item_view(sheet, field, index, events))
            .collect_view();
        view! { <div class=sheet.meta_row(dark) data-ui-slot="meta">{items}</div> }
    });

    let tag_row = (!config.tags.is_empty()).then(|| {
        let tags = config
            .tags
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, tag)| {
                let clicked = tag.clone();
                view! {
                    <span
                        class=sheet.tag(dark)
                        data-ui-slot="tag"
                        on:click=move |_| {
                            if let Some(on_tag_click) = events.on_tag_click.as_ref() {
                                on_tag_click.call((clicked.clone(), index));
                            }
                        }
                    >
                        {tag}
                    </span>
                }
            })
            .collect_view();
        view! { <div class=sheet.tag_row() data-ui-slot="tags">{tags}</div> }
    });

    view! {
        {script}
        <header
            class=frame.class
            data-ui-kind="page-header"
            data-ui-variant=frame.variant
            data-ui-appearance=frame.appearance
            data-ui-state=frame.state
            data-ui-error=frame.error
            lang=config.locale.tag()
        >
            <h1
                class=sheet.title(dark)
                on:click=move |_| {
                    if let Some(on_title_click) = events.on_title_click.as_ref() {
                        on_title_click.call(clicked_title.clone());
                    }
                }
            >
                {title}
            </h1>
            {subtitle}
            {meta_row}
            {tag_row}
        </header>
    }
    .into_view()
}

fn meta_item_view(
    sheet: &'static dyn HeaderStyleSheet,
    field: MetaField,
    index: usize,
    events: HeaderEvents,
) -> View {
    let value_class = field
        .style_override
        .clone()
        .unwrap_or_else(|| sheet.meta_value().to_string());
    let icon = field.icon.clone().map(|icon| {
        view! {
            <span class=sheet.meta_icon()>
                <MetaIconView icon=icon />
            </span>
        }
    });
    let label = format!("{}:", field.label);
    let value = field.value.to_string();

    view! {
        <div
            class=sheet.meta_item()
            data-ui-slot="meta-item"
            on:click=move |_| {
                if let Some(on_meta_field_click) = events.on_meta_field_click.as_ref() {
                    on_meta_field_click.call((field.clone(), index));
                }
            }
        >
            {icon}
            <span class=sheet.meta_label()>{label}</span>
            <span class=value_class>{value}</span>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use page_header_core::{MetaIcon, MetaValue, PLACEHOLDER_DELAY};
    use platform_host::{ManualColorScheme, ManualScheduler, MemoryPreferenceStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn article() -> HeaderConfig {
        HeaderConfig {
            subtitle: Some("Subtitle".into()),
            published_at: Some("2024-01-15".into()),
            author: Some("Bob".into()),
            tags: vec!["a".into(), "b".into()],
            class: "article-top".into(),
            ..HeaderConfig::new("Title")
        }
    }

    #[test]
    fn prepared_content_carries_row_and_annotation() {
        let content = HeaderContent::prepare(article());

        let values: Vec<String> = content.meta.iter().map(|f| f.value.to_string()).collect();
        assert_eq!(values, vec!["January 15, 2024", "Bob"]);
        let data = content.structured_data.as_ref().expect("annotation");
        assert_eq!(
            data.get("keywords"),
            Some(&Value::String("a, b".to_string()))
        );
        assert_eq!(content.issue, None);
    }

    #[test]
    fn bad_date_is_dropped_from_row_and_annotation() {
        let content = HeaderContent::prepare(HeaderConfig {
            published_at: Some("whenever".into()),
            locale: HeaderLocale::ZhCn,
            ..article()
        });

        assert_eq!(
            content.meta,
            vec![MetaField::new("作者", MetaValue::from("Bob")).with_icon(MetaIcon::Default)]
        );
        let data = content.structured_data.as_ref().expect("annotation");
        assert_eq!(data.get("datePublished"), None);
    }

    #[test]
    fn validation_issue_becomes_the_error_hook() {
        let content = HeaderContent::prepare(HeaderConfig {
            reading_time: Some(-1),
            ..article()
        });

        let frame = HeaderFrame::new(
            HeaderStyleVariant::Scoped,
            false,
            RenderState::Ready,
            &content,
        );

        assert_eq!(frame.error, Some("negative-reading-time"));
        assert_eq!(content.meta.len(), 2);
    }

    #[test]
    fn frame_reflects_variant_appearance_and_state() {
        let content = HeaderContent::prepare(article());

        let frame = HeaderFrame::new(
            HeaderStyleVariant::Scoped,
            true,
            RenderState::Loading,
            &content,
        );

        assert_eq!(
            frame,
            HeaderFrame {
                class: "page-header page-header--dark article-top".to_string(),
                variant: "scoped",
                appearance: "dark",
                state: "loading",
                error: None,
            }
        );
    }

    #[test]
    fn placeholder_with_empty_title_is_not_an_error() {
        let content = HeaderContent::prepare(HeaderConfig {
            show_placeholder: true,
            ..HeaderConfig::default()
        });

        assert_eq!(content.issue, None);
        assert_eq!(content.structured_data, None);
        assert!(content.meta.is_empty());
    }

    struct FakeHost {
        prefs: MemoryPreferenceStore,
        ambient: ManualColorScheme,
        scheduler: ManualScheduler,
    }

    impl FakeHost {
        fn new(prefers_dark: bool) -> Self {
            Self {
                prefs: MemoryPreferenceStore::default(),
                ambient: ManualColorScheme::new(prefers_dark),
                scheduler: ManualScheduler::default(),
            }
        }

        fn host(&self) -> HeaderHost {
            HeaderHost::new(
                Rc::new(self.prefs.clone()),
                Rc::new(self.ambient.clone()),
                Rc::new(self.scheduler.clone()),
            )
        }
    }

    #[test]
    fn unmount_mid_placeholder_releases_listeners_and_timer() {
        let runtime = create_runtime();
        let fake = FakeHost::new(false);
        let config = HeaderConfig {
            show_placeholder: true,
            ..article()
        };
        let mount = as_child_of_current_owner({
            let config = config.clone();
            move |host: HeaderHost| {
                HeaderLifecycle::attach(&config, MaybeSignal::Static(true), &host)
            }
        });

        let (lifecycle, disposer) = mount(fake.host());
        assert_eq!(lifecycle.render_state.get_untracked(), RenderState::Loading);
        assert_eq!(fake.ambient.listener_count(), 1);
        assert_eq!(fake.prefs.listener_count(), 1);
        assert_eq!(fake.scheduler.pending_count(), 1);

        fake.ambient.set_prefers_dark(true);
        assert!(lifecycle.is_dark.get_untracked());

        fake.scheduler.advance(Duration::from_millis(500));
        assert_eq!(lifecycle.render_state.get_untracked(), RenderState::Loading);
        drop(disposer);

        assert_eq!(fake.ambient.listener_count(), 0);
        assert_eq!(fake.prefs.listener_count(), 0);
        assert_eq!(fake.scheduler.pending_count(), 0);
        fake.scheduler.advance(PLACEHOLDER_DELAY);
        fake.ambient.set_prefers_dark(false);
        runtime.dispose();
    }

    #[test]
    fn switching_placeholder_on_restarts_loading() {
        let runtime = create_runtime();
        let fake = FakeHost::new(false);
        let show = create_rw_signal(false);

        let lifecycle = HeaderLifecycle::attach(&article(), show.read_only().into(), &fake.host());
        assert_eq!(lifecycle.render_state.get_untracked(), RenderState::Ready);
        assert_eq!(fake.scheduler.pending_count(), 0);

        show.set(true);
        assert_eq!(lifecycle.render_state.get_untracked(), RenderState::Loading);
        assert_eq!(fake.scheduler.pending_count(), 1);

        fake.scheduler.advance(PLACEHOLDER_DELAY);
        assert_eq!(lifecycle.render_state.get_untracked(), RenderState::Ready);
        assert_eq!(fake.scheduler.pending_count(), 0);

        show.set(false);
        assert_eq!(lifecycle.render_state.get_untracked(), RenderState::Ready);
        runtime.dispose();
    }

    #[test]
    fn both_variants_share_state_and_appearance_hooks() {
        let content = HeaderContent::prepare(HeaderConfig {
            reading_time: Some(-1),
            ..article()
        });

        let frames: Vec<HeaderFrame> = [HeaderStyleVariant::Utility, HeaderStyleVariant::Scoped]
            .into_iter()
            .map(|style| HeaderFrame::new(style, true, RenderState::Loading, &content))
            .collect();

        for frame in &frames {
            assert_eq!(
                (frame.appearance, frame.state, frame.error),
                ("dark", "loading", Some("negative-reading-time"))
            );
            assert!(frame.class.ends_with(" article-top"));
        }
        assert_eq!(frames[0].variant, "utility");
        assert_eq!(frames[1].variant, "scoped");
    }
}
