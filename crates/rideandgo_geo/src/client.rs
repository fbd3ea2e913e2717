//! Geocoding and routing services
//!
//! [`GeoService`] is the seam the fare flow depends on. [`HttpGeoService`] talks to
//! Nominatim-style search/reverse endpoints and an OSRM-style route endpoint; the
//! URLs are configuration, not a provider choice baked into the code.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coord::Coordinate;
use crate::error::{GeoError, Result};
use crate::route::RouteEstimate;

/// Forward/reverse geocoding and routing
#[async_trait]
pub trait GeoService: Send + Sync {
    /// Coordinates of the best match for `address`, if any
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>>;

    /// Human-readable address for `at`.
    ///
    /// Never fails: implementations fall back to the coordinate's display form.
    async fn reverse_geocode(&self, at: Coordinate) -> String;

    /// Driving route between two points
    async fn route(&self, start: Coordinate, end: Coordinate) -> Result<RouteEstimate>;
}

/// Endpoints and HTTP settings for [`HttpGeoService`]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GeoConfig {
    /// Forward geocoding endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Reverse geocoding endpoint
    #[serde(default = "default_reverse_url")]
    pub reverse_url: String,
    /// Routing endpoint; coordinates are appended as a path segment
    #[serde(default = "default_route_url")]
    pub route_url: String,
    /// Sent on every request; public geocoders reject anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_search_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_reverse_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_route_url() -> String {
    "https://router.project-osrm.org/route/v1/driving".to_string()
}

fn default_user_agent() -> String {
    concat!("rideandgo/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            reverse_url: default_reverse_url(),
            route_url: default_route_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ========== Wire Types ==========

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteLeg {
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    /// GeoJSON order: `[longitude, latitude]`
    coordinates: Vec<[f64; 2]>,
}

fn coordinate_from_hits(hits: Vec<SearchHit>) -> Result<Option<Coordinate>> {
    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };
    let parse = |field: &str, value: &str| {
        value.trim().parse::<f64>().map_err(|_| GeoError::Malformed {
            service: "search",
            reason: format!("{field} `{value}` is not a number"),
        })
    };
    Ok(Some(Coordinate::new(
        parse("lat", &hit.lat)?,
        parse("lon", &hit.lon)?,
    )))
}

fn route_from_response(response: RouteResponse) -> Result<RouteEstimate> {
    let leg = response.routes.into_iter().next().ok_or(GeoError::NoRoute)?;
    let path = leg
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Coordinate::new(lat, lon))
        .collect();
    Ok(RouteEstimate::from_meters_and_seconds(
        leg.distance,
        leg.duration,
        path,
    ))
}

/// [`GeoService`] backed by public HTTP endpoints
#[derive(Clone)]
pub struct HttpGeoService {
    client: Client,
    config: GeoConfig,
}

impl HttpGeoService {
    pub fn new(config: GeoConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeoConfig {
        &self.config
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        service: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status {
                service,
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn fetch_display_name(&self, at: Coordinate) -> Result<Option<String>> {
        let request = self.client.get(&self.config.reverse_url).query(&[
            ("format", "json".to_string()),
            ("lat", at.latitude.to_string()),
            ("lon", at.longitude.to_string()),
        ]);
        let body: ReverseResponse = self.get_json("reverse", request).await?;
        Ok(body.display_name.filter(|name| !name.is_empty()))
    }
}

#[async_trait]
impl GeoService for HttpGeoService {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeoError::EmptyAddress);
        }

        let request = self.client.get(&self.config.search_url).query(&[
            ("format", "json"),
            ("q", address),
            ("limit", "1"),
        ]);
        let hits: Vec<SearchHit> = self.get_json("search", request).await?;
        let found = coordinate_from_hits(hits)?;
        debug!(address, ?found, "geocoded");
        Ok(found)
    }

    async fn reverse_geocode(&self, at: Coordinate) -> String {
        match self.fetch_display_name(at).await {
            Ok(Some(name)) => name,
            Ok(None) => at.to_string(),
            Err(err) => {
                warn!(%at, error = %err, "reverse geocoding failed");
                at.to_string()
            }
        }
    }

    async fn route(&self, start: Coordinate, end: Coordinate) -> Result<RouteEstimate> {
        let url = format!(
            "{}/{},{};{},{}",
            self.config.route_url.trim_end_matches('/'),
            start.longitude,
            start.latitude,
            end.longitude,
            end.latitude
        );
        let request = self
            .client
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")]);
        let response: RouteResponse = self.get_json("route", request).await?;
        route_from_response(response)
    }
}
