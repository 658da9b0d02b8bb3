//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring for the page header's host services:
//! - `storage::local_prefs`: `localStorage` preferences plus the window `storage` event
//! - `appearance`: `matchMedia("(prefers-color-scheme: dark)")` and its `change` event
//! - `adapters`: target-selected service factories for runtime wiring
//!
//! Non-wasm builds compile every adapter to an inert fallback so shared crates and native tests
//! link without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod appearance;
mod listener;
pub mod storage;

pub use adapters::{
    build_host_services, color_scheme_source, host_strategy_name, preference_store,
    selected_host_strategy, HostServices, HostStrategy,
};
pub use appearance::{WebColorScheme, PREFERS_DARK_QUERY};
pub use storage::local_prefs::WebPreferenceStore;
