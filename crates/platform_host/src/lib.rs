//! Typed host-service contracts shared by the page header model and its browser adapters.
//!
//! This crate is the API-first boundary for platform services the header consumes: persisted
//! preferences, the ambient color-scheme preference, and one-shot timeouts. Every subscription and
//! timer is represented by an owning handle so callers can tie registrations to a component
//! lifetime. Concrete browser adapters live in `platform_host_web`; the in-memory and manual
//! implementations here back tests and non-browser targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod listener;
pub mod storage;
pub mod time;

pub use appearance::{ColorSchemeSource, ManualColorScheme, NoopColorScheme};
pub use listener::{ListenerCallback, ListenerHandle, ListenerRegistry};
pub use storage::prefs::{MemoryPreferenceStore, NoopPreferenceStore, PreferenceStore};
pub use time::{ManualScheduler, TimeoutHandle, TimeoutScheduler};
