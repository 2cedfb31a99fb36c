//! Key/value persistence for the consent decision.
//!
//! The host page exposes a persistent key/value store (localStorage or
//! whatever the embedder provides); this module defines the [`StorageArea`]
//! trait the [`PreferenceStore`](crate::store::PreferenceStore) writes
//! through, plus two backends:
//!
//! - [`InMemoryStorageArea`] — no persistence; the default for tests and
//!   incognito-style embedders.
//! - [`JsonFileArea`] — a flat string map persisted to a single JSON file,
//!   rewritten on every mutation.
//!
//! Storage is treated as an unreliable resource: every access is fallible and
//! the preference store degrades any failure to "no decision recorded".

/// Storage area trait, defining the key/value interface.
pub mod area;
/// In-memory backend.
pub mod in_memory;
/// JSON-file backend.
pub mod json;

pub use area::{StorageArea, StorageAreaHandle};
pub use in_memory::InMemoryStorageArea;
pub use json::JsonFileArea;
