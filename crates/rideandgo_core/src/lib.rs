//! RideAndGo Core Runtime
//!
//! Foundational pieces shared by the theme and locale layers:
//!
//! - **Storage**: an async key-value contract with in-memory and JSON-file backends
//! - **Preference stores**: a single in-memory value per preference, read once from
//!   storage at startup and written through on every change
//! - **Persistence**: a background task per store that performs writes in call order
//! - **Context**: scoped, thread-local providers so consumers can reach a store
//!   without threading it through every call
//!
//! # Example
//!
//! ```rust,ignore
//! use rideandgo_core::{MemoryStore, PreferenceStore};
//! use std::sync::Arc;
//!
//! let storage = Arc::new(MemoryStore::new());
//! let store = PreferenceStore::initialize(storage, MyPreference::Default).await;
//!
//! store.set(MyPreference::Other);
//! assert_eq!(store.current(), MyPreference::Other);
//! ```

pub mod color;
pub mod context;
pub mod persist;
pub mod preference;
pub mod storage;

pub use color::Color;
pub use context::{provide, try_use_context, use_context, with_provider, ProviderGuard};
pub use persist::Persister;
pub use preference::{read_preference, Preference, PreferenceStore, RedrawCallback};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore, StorageError};
