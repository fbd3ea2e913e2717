//! Persisted preference stores
//!
//! A [`PreferenceStore`] holds exactly one current value of a closed enumeration.
//! The value is read from storage once, in [`PreferenceStore::initialize`]; after
//! that every read is served from memory and every change is written through by a
//! [`Persister`] without blocking the caller.
//!
//! Failure policy:
//! - absent, unknown or unreadable stored tags fall back to the default
//! - failed writes keep the new in-memory value and are only logged

use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::persist::Persister;
use crate::storage::{KeyValueStore, SharedStore};

/// Called after every in-memory change so the UI layer can schedule a rebuild
pub type RedrawCallback = Arc<dyn Fn() + Send + Sync>;

/// A user-selectable mode identified by a short string tag
pub trait Preference: Copy + Eq + Debug + Send + Sync + 'static {
    /// Fixed storage key the tag is persisted under
    const STORAGE_KEY: &'static str;

    /// Short name used in log fields
    const NAME: &'static str;

    /// Stable tag written to storage
    fn tag(self) -> &'static str;

    /// Parse a stored tag; `None` for anything outside the enumeration
    fn from_tag(tag: &str) -> Option<Self>;

    /// Every member of the enumeration
    fn all() -> &'static [Self];
}

/// Read a stored preference, logging (and swallowing) anything unusable
pub async fn read_preference<P: Preference>(storage: &dyn KeyValueStore) -> Option<P> {
    match storage.get(P::STORAGE_KEY).await {
        Ok(Some(tag)) => match P::from_tag(&tag) {
            Some(value) => Some(value),
            None => {
                warn!(
                    preference = P::NAME,
                    key = P::STORAGE_KEY,
                    tag = %tag,
                    "ignoring unrecognized stored preference"
                );
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(
                preference = P::NAME,
                key = P::STORAGE_KEY,
                error = %err,
                "failed to read stored preference"
            );
            None
        }
    }
}

/// Single in-memory preference value with write-through persistence
pub struct PreferenceStore<P: Preference> {
    current: RwLock<P>,
    changes: watch::Sender<P>,
    persister: Persister,
    redraw: RwLock<Option<RedrawCallback>>,
}

impl<P: Preference> PreferenceStore<P> {
    /// Load the stored tag, falling back to `default`, and start the persistence task
    pub async fn initialize(storage: SharedStore, default: P) -> Self {
        let value = read_preference::<P>(storage.as_ref())
            .await
            .unwrap_or(default);
        debug!(preference = P::NAME, value = ?value, "preference initialized");
        Self::with_value(storage, value)
    }

    /// Create a store with a known starting value without touching storage
    pub fn with_value(storage: SharedStore, value: P) -> Self {
        let (changes, _) = watch::channel(value);
        Self {
            current: RwLock::new(value),
            changes,
            persister: Persister::spawn(P::NAME, storage),
            redraw: RwLock::new(None),
        }
    }

    /// Current value, served from memory
    pub fn current(&self) -> P {
        *self.current.read().unwrap()
    }

    /// Replace the current value and queue its persistence.
    ///
    /// The write is queued even when the value is unchanged. Returns whether the
    /// in-memory value changed.
    pub fn set(&self, value: P) -> bool {
        let mut current = self.current.write().unwrap();
        let changed = *current != value;
        if changed {
            debug!(
                preference = P::NAME,
                "PreferenceStore::set - {:?} -> {:?}", *current, value
            );
        }
        *current = value;
        // Enqueue while holding the lock so queue order matches memory order.
        self.persister.persist(P::STORAGE_KEY, value.tag());
        drop(current);

        if changed {
            self.notify(value);
        }
        changed
    }

    /// Replace the current value without persisting it
    pub fn set_transient(&self, value: P) -> bool {
        let mut current = self.current.write().unwrap();
        if *current == value {
            return false;
        }
        debug!(
            preference = P::NAME,
            "PreferenceStore::set_transient - {:?} -> {:?}", *current, value
        );
        *current = value;
        drop(current);

        self.notify(value);
        true
    }

    /// Watch channel that yields every in-memory change
    pub fn subscribe(&self) -> watch::Receiver<P> {
        self.changes.subscribe()
    }

    /// Register the callback fired after each change
    pub fn set_redraw_callback(&self, callback: RedrawCallback) {
        *self.redraw.write().unwrap() = Some(callback);
    }

    /// Persistence handle, for writing companion keys in the same queue
    pub fn persister(&self) -> &Persister {
        &self.persister
    }

    /// Wait for all queued writes to be attempted
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    fn notify(&self, value: P) {
        self.changes.send_replace(value);
        let callback = self.redraw.read().unwrap().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}
