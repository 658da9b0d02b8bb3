//! Presentation model for the article page header.
//!
//! The crate owns everything the header decides before markup: the typed [`HeaderConfig`] input,
//! light/dark resolution over injected host services, metadata assembly, schema.org structured
//! data generation, and the timed placeholder state machine. Renderers in `system_ui` consume the
//! results; nothing here touches the DOM.
//!
//! Data flows one way per render pass:
//! config -> ([`AppearanceResolver`], [`assemble_metadata`], [`generate_structured_data`]) ->
//! [`PlaceholderTimeline`] -> view.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod config;
pub mod error;
pub mod locale;
pub mod metadata;
pub mod render_state;
pub mod structured_data;

pub use appearance::{
    toggle_persisted_theme, AppearanceMode, AppearanceResolver, AttachedAppearance,
    DARK_PREF_VALUE, LIGHT_PREF_VALUE, THEME_PREF_KEY,
};
pub use config::{HeaderConfig, PublishedAt};
pub use error::{ConfigValidationError, DateFormatError, HeaderError};
pub use locale::HeaderLocale;
pub use metadata::{
    assemble_metadata, estimate_reading_time, MetaField, MetaIcon, MetaValue,
    DEFAULT_CHARS_PER_MINUTE,
};
pub use render_state::{PlaceholderTimeline, RenderState, PLACEHOLDER_DELAY};
pub use structured_data::{
    generate_structured_data, StructuredData, ARTICLE_TYPE, SCHEMA_CONTEXT,
};
