//! Fare estimation
//!
//! Two pricing rules are in use: the public fare calculator quotes from a
//! [`FareSchedule`], and the booking screen suggests a price from
//! [`BookingPricing`] that the rider may override with their own proposal.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::client::GeoService;
use crate::coord::Coordinate;
use crate::error::GeoError;
use crate::route::{estimate_route, RouteEstimate};

#[derive(Debug, Error)]
pub enum FareError {
    #[error("both a pickup and a destination address are required")]
    MissingAddress,

    #[error("no location found for `{0}`")]
    AddressNotFound(String),

    #[error("`{0}` is not a valid price")]
    InvalidPrice(String),

    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// Calculator pricing: a flat base plus a per-kilometer rate
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct FareSchedule {
    #[serde(default = "default_base_fare")]
    pub base_fare: f64,
    #[serde(default = "default_per_km")]
    pub per_km: f64,
}

fn default_base_fare() -> f64 {
    3.50
}

fn default_per_km() -> f64 {
    1.25
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base_fare: default_base_fare(),
            per_km: default_per_km(),
        }
    }
}

/// A calculator quote
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FareQuote {
    pub distance_km: f64,
    pub fare: f64,
    /// Rough trip time: ten minutes plus one per two kilometers
    pub duration_min: u32,
}

impl FareSchedule {
    pub fn quote(&self, distance_km: f64) -> FareQuote {
        let distance_km = distance_km.max(0.0);
        FareQuote {
            distance_km,
            fare: self.base_fare + self.per_km * distance_km,
            duration_min: (distance_km / 2.0).floor() as u32 + 10,
        }
    }
}

/// Booking-screen suggested price
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BookingPricing {
    pub base: f64,
    pub per_km: f64,
}

impl Default for BookingPricing {
    fn default() -> Self {
        Self {
            base: 5.0,
            per_km: 0.8,
        }
    }
}

impl BookingPricing {
    /// Suggested price in euros, rounded to cents
    pub fn price(&self, distance_km: f64) -> f64 {
        round_cents(self.per_km * distance_km.max(0.0) + self.base)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a rider-proposed price; it must be a finite amount above zero
pub fn validate_proposed_price(input: &str) -> Result<f64, FareError> {
    match input.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(FareError::InvalidPrice(input.to_string())),
    }
}

/// Everything the fare screen shows for one trip
#[derive(Clone, Debug, PartialEq)]
pub struct TripQuote {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub route: RouteEstimate,
    pub fare: FareQuote,
}

/// Geocode both addresses, route between them and price the trip
pub async fn quote_trip(
    service: &dyn GeoService,
    schedule: &FareSchedule,
    from: &str,
    to: &str,
) -> Result<TripQuote, FareError> {
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(FareError::MissingAddress);
    }

    let origin = locate(service, from).await?;
    let destination = locate(service, to).await?;
    let route = estimate_route(service, origin, destination).await;
    let fare = schedule.quote(route.distance_km);

    debug!(
        from,
        to,
        distance_km = route.distance_km,
        fare = fare.fare,
        approximate = route.approximate,
        "trip quoted"
    );
    Ok(TripQuote {
        origin,
        destination,
        route,
        fare,
    })
}

async fn locate(service: &dyn GeoService, address: &str) -> Result<Coordinate, FareError> {
    service
        .geocode(address)
        .await?
        .ok_or_else(|| FareError::AddressNotFound(address.to_string()))
}
