//! RideAndGo geo services
//!
//! - [`Coordinate`] and great-circle distance
//! - The [`GeoService`] trait with an HTTP implementation ([`HttpGeoService`])
//! - Route estimates that degrade to a straight line when routing fails
//! - Fare quotes built on top of a route

pub mod client;
pub mod coord;
pub mod error;
pub mod fare;
pub mod route;

pub use client::{GeoConfig, GeoService, HttpGeoService};
pub use coord::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use error::{GeoError, Result};
pub use fare::{
    quote_trip, validate_proposed_price, BookingPricing, FareError, FareQuote, FareSchedule,
    TripQuote,
};
pub use route::{estimate_route, RouteEstimate};
