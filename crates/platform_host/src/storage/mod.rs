//! Persisted preference storage contracts.

pub mod prefs;
