//! Route estimates with a straight-line fallback

use tracing::warn;

use crate::client::GeoService;
use crate::coord::{haversine_km, round_tenth, Coordinate};

/// Distance and travel time between two points
#[derive(Clone, Debug, PartialEq)]
pub struct RouteEstimate {
    /// Kilometers, rounded to one decimal
    pub distance_km: f64,
    /// Minutes, rounded
    pub duration_min: u32,
    /// Points along the route, empty when unknown
    pub path: Vec<Coordinate>,
    /// Whether this is a great-circle estimate rather than a routed path
    pub approximate: bool,
}

impl RouteEstimate {
    /// Build from a router's raw meters and seconds
    pub fn from_meters_and_seconds(
        distance_m: f64,
        duration_s: f64,
        path: Vec<Coordinate>,
    ) -> Self {
        Self {
            distance_km: round_tenth(distance_m / 1000.0),
            duration_min: whole_minutes(duration_s / 60.0),
            path,
            approximate: false,
        }
    }

    /// Great-circle estimate, assuming two minutes per kilometer
    pub fn straight_line(start: Coordinate, end: Coordinate) -> Self {
        let distance = haversine_km(start, end);
        Self {
            distance_km: round_tenth(distance),
            duration_min: whole_minutes(distance * 2.0),
            path: Vec::new(),
            approximate: true,
        }
    }
}

fn whole_minutes(minutes: f64) -> u32 {
    minutes.round().max(0.0) as u32
}

/// Route between `start` and `end`, falling back to a straight-line estimate
/// when the service fails
pub async fn estimate_route(
    service: &dyn GeoService,
    start: Coordinate,
    end: Coordinate,
) -> RouteEstimate {
    match service.route(start, end).await {
        Ok(route) => route,
        Err(err) => {
            warn!(%start, %end, error = %err, "routing failed; using straight-line estimate");
            RouteEstimate::straight_line(start, end)
        }
    }
}
