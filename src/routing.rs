//! Walking route client for an OSRM-compatible routing API
//!
//! Route lookups are strictly best-effort: every failure mode degrades to
//! `None` so the caller can fall back to straight-line distance. Nothing in
//! this module raises past its own boundary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::RoutingConfig;
use crate::models::{Point, RouteResult};

/// Inclusive plausibility band for route distances. Rejects both degenerate
/// near-zero routes and clearly erroneous continent-spanning ones without
/// validating path topology.
pub const MIN_ROUTE_METERS: f64 = 10.0;
pub const MAX_ROUTE_METERS: f64 = 10_000.0;

/// Whether a reported route distance falls inside the plausibility band
#[must_use]
pub fn plausible_distance(distance_meters: f64) -> bool {
    (MIN_ROUTE_METERS..=MAX_ROUTE_METERS).contains(&distance_meters)
}

/// Source of walking routes between two WGS84 points.
///
/// Implementations never error; an unusable route is `None`.
#[async_trait]
pub trait RouteSource: Send + Sync {
    async fn walking_route(&self, start: Point, end: Point) -> Option<RouteResult>;
}

/// OSRM routing API client
pub struct OsrmClient {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a new client
    pub fn new(config: &RoutingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("playreach/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            profile: config.profile.clone(),
        }
    }

    /// Request a walking route between two WGS84 points.
    ///
    /// Returns `None` when the service is unreachable, reports no route, or
    /// reports a distance outside the plausibility band.
    pub async fn fetch_route(&self, start: Point, end: Point) -> Option<RouteResult> {
        let url = format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url, self.profile, start.x, start.y, end.x, end.y
        );

        let response = match self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Route request failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("Routing API returned {}", response.status());
            return None;
        }

        let body: osrm::RouteResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Malformed routing response: {e}");
                return None;
            }
        };

        osrm::route_from_response(body)
    }
}

#[async_trait]
impl RouteSource for OsrmClient {
    async fn walking_route(&self, start: Point, end: Point) -> Option<RouteResult> {
        self.fetch_route(start, end).await
    }
}

/// OSRM API response structures and conversion utilities
mod osrm {
    use serde::Deserialize;
    use tracing::debug;

    use super::plausible_distance;
    use crate::models::{Point, RouteResult};

    #[derive(Debug, Deserialize)]
    pub struct RouteResponse {
        pub code: String,
        #[serde(default)]
        pub routes: Vec<Route>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Route {
        pub distance: f64,
        pub geometry: Geometry,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub coordinates: Vec<[f64; 2]>,
    }

    /// Extract a usable route, or `None` when the response reports failure
    /// or an implausible distance
    pub fn route_from_response(response: RouteResponse) -> Option<RouteResult> {
        if response.code != "Ok" {
            debug!("Routing API reported code {}", response.code);
            return None;
        }

        let route = response.routes.into_iter().next()?;

        if !plausible_distance(route.distance) {
            debug!("Rejected implausible route distance {}m", route.distance);
            return None;
        }

        let path = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Point::new(lon, lat))
            .collect();

        Some(RouteResult {
            distance_meters: route.distance,
            path,
        })
    }
}
