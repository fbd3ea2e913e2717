use thiserror::Error;

use crate::simple::SimpleParseError;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("failed to load the `{locale}` catalog: {source}")]
    Catalog {
        locale: &'static str,
        #[source]
        source: SimpleParseError,
    },

    #[error("unsupported locale `{0}` (supported: fr, en)")]
    UnsupportedLocale(String),
}
