//! Leptos rendering for the article page header.
//!
//! The crate turns a [`page_header_core::HeaderConfig`] into markup. Class names come from a
//! [`HeaderStyleSheet`] so the utility-class and scoped-stylesheet variants share one component,
//! and host services (persisted theme, ambient color scheme, timers) are read from a
//! [`HeaderHost`] context with detached fallbacks. Containers expose stable `data-ui-*` hooks:
//! `data-ui-kind`, `data-ui-variant`, `data-ui-appearance`, `data-ui-state`, and `data-ui-error`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod host;
mod icon;
mod page_header;
mod style;

pub use host::{provide_header_host, use_header_host, HeaderHost, LeptosTimeoutScheduler};
pub use icon::{DefaultMetaIcon, MetaIconView};
pub use page_header::{HeaderEvents, PageHeader, PageHeaderFromConfig};
pub use style::{
    HeaderStyleSheet, HeaderStyleVariant, ScopedClasses, SkeletonBlock, UtilityClasses,
    SCOPED_STYLESHEET,
};

/// Convenience imports for pages mounting headers.
pub mod prelude {
    pub use crate::{
        provide_header_host, HeaderHost, HeaderStyleVariant, PageHeader, PageHeaderFromConfig,
    };
    pub use page_header_core::{
        AppearanceMode, HeaderConfig, HeaderLocale, MetaField, MetaIcon, MetaValue, PublishedAt,
    };
}
