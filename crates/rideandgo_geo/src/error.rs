use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("no route found between the given points")]
    NoRoute,

    #[error("malformed {service} response: {reason}")]
    Malformed {
        service: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, GeoError>;
