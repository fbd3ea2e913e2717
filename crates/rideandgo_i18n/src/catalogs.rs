//! Catalogs compiled into the binary

use std::sync::OnceLock;

use tracing::error;

use crate::error::I18nError;
use crate::locale::Locale;
use crate::simple::SimpleCatalog;

const FR: &str = include_str!("../locales/fr.yaml");
const EN: &str = include_str!("../locales/en.yaml");

fn source(locale: Locale) -> &'static str {
    match locale {
        Locale::Fr => FR,
        Locale::En => EN,
    }
}

/// Parse the embedded catalog for `locale`
pub fn parse_builtin(locale: Locale) -> Result<SimpleCatalog, I18nError> {
    SimpleCatalog::parse(source(locale)).map_err(|source| I18nError::Catalog {
        locale: locale.tag(),
        source,
    })
}

/// The embedded catalog for `locale`, parsed on first use.
///
/// A catalog that fails to parse is logged and replaced by an empty one, so
/// every lookup in that locale falls back to the raw key.
pub fn builtin_catalog(locale: Locale) -> &'static SimpleCatalog {
    static FR_CATALOG: OnceLock<SimpleCatalog> = OnceLock::new();
    static EN_CATALOG: OnceLock<SimpleCatalog> = OnceLock::new();

    let cell = match locale {
        Locale::Fr => &FR_CATALOG,
        Locale::En => &EN_CATALOG,
    };
    cell.get_or_init(|| {
        parse_builtin(locale).unwrap_or_else(|err| {
            error!(%locale, error = %err, "built-in catalog is unusable");
            SimpleCatalog::new()
        })
    })
}
