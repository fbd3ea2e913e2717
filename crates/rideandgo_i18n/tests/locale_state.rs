use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rideandgo_core::MemoryStore;
use rideandgo_i18n::{
    builtin_catalog, parse_builtin, provide_locale, resolve_label, t, try_use_translation,
    use_translation, Label, Locale, LocaleState, Message, LOCALE_STORAGE_KEY,
};

async fn fresh(storage: &Arc<MemoryStore>) -> LocaleState {
    LocaleState::initialize(storage.clone(), None, Locale::En).await
}

#[test]
fn builtin_catalogs_parse() {
    for locale in Locale::ALL {
        let catalog = parse_builtin(locale).unwrap();
        assert!(!catalog.is_empty(), "{locale} catalog is empty");
    }
}

#[test]
fn builtin_catalogs_share_one_key_set() {
    let keys = |locale| builtin_catalog(locale).keys().collect::<BTreeSet<_>>();
    let en = keys(Locale::En);
    for locale in Locale::ALL {
        assert_eq!(keys(locale), en, "{locale} keys differ from en");
    }
}

#[test]
fn every_locale_names_itself() {
    for locale in Locale::ALL {
        assert_eq!(builtin_catalog(locale).get("locale"), Some(locale.display_name()));
    }
}

#[tokio::test]
async fn missing_key_returns_the_key() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await;

    for tag in Locale::ALL {
        locale.set(tag);
        assert_eq!(locale.t("doesNotExist"), "doesNotExist");
        assert_eq!(locale.tr(&Message::new("doesNotExist")), "doesNotExist");
    }
}

#[tokio::test]
async fn lookups_use_only_the_current_locale() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await;

    locale.set(Locale::Fr);
    assert_eq!(locale.t("whereToGo"), "Où allez-vous ?");
    assert_eq!(locale.t("cancel"), "Annuler");

    locale.set(Locale::En);
    assert_eq!(locale.t("whereToGo"), "Where to?");
    assert_eq!(locale.t("cancel"), "Cancel");
}

#[tokio::test]
async fn messages_fill_their_placeholders() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await;

    let summary = Message::new("routeSummary")
        .arg("distance", 12.3)
        .arg("duration", 25);
    assert_eq!(locale.tr(&summary), "12.3 km, about 25 min");

    locale.set(Locale::Fr);
    assert_eq!(locale.tr(&summary), "12.3 km, environ 25 min");
    assert_eq!(
        locale.resolve_label(&t!("fareSummary", { fare: 15.5 })),
        "Tarif estimé : 15.5 €"
    );
    assert_eq!(locale.resolve_label(&Label::raw("as is")), "as is");
}

#[tokio::test]
async fn french_survives_a_restart() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await;
    locale.set(Locale::Fr);
    locale.flush().await;
    assert_eq!(storage.value(LOCALE_STORAGE_KEY).as_deref(), Some("fr"));
    drop(locale);

    let restarted = fresh(&storage).await;
    assert_eq!(restarted.current(), Locale::Fr);
}

#[tokio::test]
async fn unknown_stored_tag_falls_back_to_default() {
    let storage = Arc::new(MemoryStore::with_entries([(LOCALE_STORAGE_KEY, "klingon")]));
    let locale = LocaleState::initialize(storage, None, Locale::En).await;
    assert_eq!(locale.current(), Locale::En);
}

#[tokio::test]
async fn unsupported_tag_is_ignored() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await;
    locale.set(Locale::Fr);

    assert!(!locale.set_tag("de"));
    assert!(!locale.set_tag("FR"));
    assert_eq!(locale.current(), Locale::Fr);

    assert!(locale.set_tag("en"));
    assert_eq!(locale.current(), Locale::En);

    locale.flush().await;
    assert_eq!(storage.value(LOCALE_STORAGE_KEY).as_deref(), Some("en"));
}

#[tokio::test]
async fn device_locale_is_the_default_when_supported() {
    let storage = Arc::new(MemoryStore::new());

    let french = LocaleState::initialize(storage.clone(), Some("fr_CA.UTF-8"), Locale::En).await;
    assert_eq!(french.current(), Locale::Fr);

    let german = LocaleState::initialize(storage.clone(), Some("de-DE"), Locale::En).await;
    assert_eq!(german.current(), Locale::En);

    let unknown = LocaleState::initialize(storage, None, Locale::Fr).await;
    assert_eq!(unknown.current(), Locale::Fr);
}

#[tokio::test]
async fn stored_choice_beats_device_locale() {
    let storage = Arc::new(MemoryStore::with_entries([(LOCALE_STORAGE_KEY, "en")]));
    let locale = LocaleState::initialize(storage, Some("fr-FR"), Locale::Fr).await;
    assert_eq!(locale.current(), Locale::En);
}

#[tokio::test]
async fn last_set_wins_in_memory_and_in_storage() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await;

    locale.set(Locale::Fr);
    locale.set(Locale::En);
    locale.set(Locale::Fr);
    assert_eq!(locale.current(), Locale::Fr);

    locale.flush().await;
    assert_eq!(storage.value(LOCALE_STORAGE_KEY).as_deref(), Some("fr"));
}

#[tokio::test]
async fn changes_are_broadcast() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await;

    let redraws = Arc::new(AtomicUsize::new(0));
    let counter = redraws.clone();
    locale.set_redraw_callback(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let mut changes = locale.subscribe();

    locale.set(Locale::Fr);
    locale.set(Locale::Fr);

    assert!(changes.has_changed().unwrap());
    assert_eq!(*changes.borrow_and_update(), Locale::Fr);
    assert_eq!(redraws.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn provider_scopes_resolution() {
    let storage = Arc::new(MemoryStore::new());
    let locale = fresh(&storage).await.into_handle();
    let label = t!("cancel");

    assert_eq!(resolve_label(&label), "cancel");
    {
        let _guard = provide_locale(locale.clone());
        use_translation().set(Locale::Fr);
        assert_eq!(resolve_label(&label), "Annuler");
    }
    assert!(try_use_translation().is_none());
    assert_eq!(locale.current(), Locale::Fr);
}

#[test]
#[should_panic(expected = "use_translation() called outside an I18nProvider scope")]
fn use_translation_outside_provider_panics() {
    let _ = use_translation();
}
