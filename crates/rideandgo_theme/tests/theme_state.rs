use std::sync::Arc;

use pretty_assertions::assert_eq;
use rideandgo_core::MemoryStore;
use rideandgo_theme::{
    palette_for, provide_theme, try_use_theme, use_theme, ColorScheme, ColorToken, ThemeState,
    DARK, LIGHT, SYSTEM_THEME_KEY, THEME_STORAGE_KEY,
};
use support::WriteFailingStore;

async fn fresh(storage: &Arc<MemoryStore>) -> ThemeState {
    ThemeState::initialize(storage.clone(), ColorScheme::Light).await
}

#[tokio::test]
async fn defaults_to_light_on_empty_storage() {
    let storage = Arc::new(MemoryStore::new());
    let theme = fresh(&storage).await;
    assert_eq!(theme.scheme(), ColorScheme::Light);
    assert!(!theme.is_system_theme());
}

#[tokio::test]
async fn set_returns_exact_palette_for_every_scheme() {
    let storage = Arc::new(MemoryStore::new());
    let theme = fresh(&storage).await;

    for (scheme, expected) in [(ColorScheme::Dark, &DARK), (ColorScheme::Light, &LIGHT)] {
        theme.set_scheme(scheme);
        let (current, palette) = theme.get_current();
        assert_eq!(current, scheme);
        assert!(std::ptr::eq(palette, expected));
        assert_eq!(theme.color(ColorToken::Background), expected.background);
    }
}

#[tokio::test]
async fn setting_dark_twice_matches_setting_it_once() {
    let once_storage = Arc::new(MemoryStore::new());
    let once = fresh(&once_storage).await;
    once.set_scheme(ColorScheme::Dark);
    once.flush().await;

    let twice_storage = Arc::new(MemoryStore::new());
    let twice = fresh(&twice_storage).await;
    twice.set_scheme(ColorScheme::Dark);
    twice.set_scheme(ColorScheme::Dark);
    twice.flush().await;

    assert_eq!(once.scheme(), twice.scheme());
    assert_eq!(
        once_storage.value(THEME_STORAGE_KEY),
        twice_storage.value(THEME_STORAGE_KEY)
    );
    assert_eq!(
        once_storage.value(SYSTEM_THEME_KEY),
        twice_storage.value(SYSTEM_THEME_KEY)
    );
}

#[tokio::test]
async fn dark_survives_a_restart() {
    let storage = Arc::new(MemoryStore::new());
    let theme = fresh(&storage).await;
    theme.set_scheme(ColorScheme::Dark);
    theme.flush().await;
    drop(theme);

    let restarted = fresh(&storage).await;
    assert_eq!(restarted.scheme(), ColorScheme::Dark);
}

#[tokio::test]
async fn corrupted_tag_falls_back_to_light() {
    let storage = Arc::new(MemoryStore::with_entries([(THEME_STORAGE_KEY, "blue")]));
    let theme = fresh(&storage).await;
    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[tokio::test]
async fn toggle_flips_and_double_toggle_restores() {
    let storage = Arc::new(MemoryStore::with_entries([(THEME_STORAGE_KEY, "dark")]));
    let theme = fresh(&storage).await;

    theme.toggle_scheme();
    assert_eq!(theme.scheme(), ColorScheme::Light);
    theme.toggle_scheme();
    assert_eq!(theme.scheme(), ColorScheme::Dark);

    theme.set_scheme(ColorScheme::Light);
    theme.toggle_scheme();
    theme.toggle_scheme();
    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[tokio::test]
async fn last_set_wins_in_memory_and_in_storage() {
    let storage = Arc::new(MemoryStore::new());
    let theme = fresh(&storage).await;

    theme.set_scheme(ColorScheme::Dark);
    theme.set_scheme(ColorScheme::Light);
    assert_eq!(theme.scheme(), ColorScheme::Light);

    theme.flush().await;
    assert_eq!(storage.value(THEME_STORAGE_KEY).as_deref(), Some("light"));
}

#[tokio::test]
async fn failed_write_keeps_the_new_scheme() {
    let storage = Arc::new(WriteFailingStore::with_theme("light"));
    let theme = ThemeState::initialize(storage, ColorScheme::Light).await;

    theme.set_scheme(ColorScheme::Dark);
    theme.flush().await;
    assert_eq!(theme.scheme(), ColorScheme::Dark);
}

#[tokio::test]
async fn follow_system_flag_adopts_host_scheme() {
    let storage = Arc::new(MemoryStore::with_entries([
        (SYSTEM_THEME_KEY, "true"),
        (THEME_STORAGE_KEY, "light"),
    ]));
    let theme = ThemeState::initialize(storage.clone(), ColorScheme::Dark).await;

    assert!(theme.is_system_theme());
    assert_eq!(theme.scheme(), ColorScheme::Dark);

    theme.set_system_scheme(ColorScheme::Light);
    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[tokio::test]
async fn explicit_choice_leaves_follow_system_mode() {
    let storage = Arc::new(MemoryStore::with_entries([(SYSTEM_THEME_KEY, "true")]));
    let theme = ThemeState::initialize(storage.clone(), ColorScheme::Light).await;

    theme.set_scheme(ColorScheme::Dark);
    assert!(!theme.is_system_theme());

    // Host changes no longer apply
    theme.set_system_scheme(ColorScheme::Light);
    assert_eq!(theme.scheme(), ColorScheme::Dark);

    theme.flush().await;
    assert_eq!(storage.value(THEME_STORAGE_KEY).as_deref(), Some("dark"));
    assert_eq!(storage.value(SYSTEM_THEME_KEY).as_deref(), Some("false"));
}

#[tokio::test]
async fn use_system_theme_persists_flag_and_adopts_host() {
    let storage = Arc::new(MemoryStore::with_entries([(THEME_STORAGE_KEY, "light")]));
    let theme = ThemeState::initialize(storage.clone(), ColorScheme::Dark).await;
    assert_eq!(theme.scheme(), ColorScheme::Light);

    theme.use_system_theme();
    assert!(theme.is_system_theme());
    assert_eq!(theme.scheme(), ColorScheme::Dark);

    theme.flush().await;
    assert_eq!(storage.value(SYSTEM_THEME_KEY).as_deref(), Some("true"));

    let restarted = ThemeState::initialize(storage, ColorScheme::Light).await;
    assert!(restarted.is_system_theme());
    assert_eq!(restarted.scheme(), ColorScheme::Light);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_mode_changes_leave_flag_consistent_with_storage() {
    for _ in 0..20 {
        let storage = Arc::new(MemoryStore::new());
        let theme = fresh(&storage).await;

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..50 {
                    theme.set_scheme(ColorScheme::Dark);
                }
            });
            scope.spawn(|| {
                for _ in 0..50 {
                    theme.use_system_theme();
                }
            });
        });
        theme.flush().await;

        let expected = if theme.is_system_theme() { "true" } else { "false" };
        assert_eq!(storage.value(SYSTEM_THEME_KEY).as_deref(), Some(expected));
    }
}

#[tokio::test]
async fn css_map_tracks_current_scheme() {
    let storage = Arc::new(MemoryStore::new());
    let theme = fresh(&storage).await;

    let light = theme.to_css_variable_map();
    assert_eq!(light["background"], "#ffffff");
    assert_eq!(light["primary"], "#ff8c00");
    assert_eq!(light.len(), ColorToken::all().len());

    theme.set_scheme(ColorScheme::Dark);
    let dark = theme.to_css_variable_map();
    assert_eq!(dark["background"], "#121212");
    assert_eq!(dark["primary-light"], "#ffaa42");
    assert_eq!(dark["shadow"], "rgba(0,0,0,0.3)");
}

#[tokio::test]
async fn provider_exposes_the_same_state() {
    let storage = Arc::new(MemoryStore::new());
    let theme = fresh(&storage).await.into_handle();

    assert!(try_use_theme().is_none());
    {
        let _guard = provide_theme(theme.clone());
        use_theme().set_scheme(ColorScheme::Dark);
    }
    assert!(try_use_theme().is_none());

    assert_eq!(theme.scheme(), ColorScheme::Dark);
    assert!(std::ptr::eq(theme.palette(), palette_for(ColorScheme::Dark)));
}

#[test]
#[should_panic(expected = "use_theme() called outside a ThemeProvider scope")]
fn use_theme_outside_provider_panics() {
    let _ = use_theme();
}

mod support {
    //! Storage double whose reads work but whose writes always fail

    use async_trait::async_trait;
    use rideandgo_core::{KeyValueStore, MemoryStore, StorageError};

    pub struct WriteFailingStore {
        inner: MemoryStore,
    }

    impl WriteFailingStore {
        pub fn with_theme(tag: &str) -> Self {
            Self {
                inner: MemoryStore::with_entries([(rideandgo_theme::THEME_STORAGE_KEY, tag)]),
            }
        }
    }

    #[async_trait]
    impl KeyValueStore for WriteFailingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only volume".into()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only volume".into()))
        }
    }
}
