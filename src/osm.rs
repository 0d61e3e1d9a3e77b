//! Overpass API client for the playground feature query

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::config::OverpassConfig;
use crate::error::PlayreachError;
use crate::models::{Candidate, Point};
use crate::Result;

/// Degrees of latitude per meter, flat-earth approximation. Only used to
/// build the loose fetch bounding box; the engine's planar radius filter is
/// authoritative.
const DEGREES_PER_METER: f64 = 1.0 / 111_000.0;

/// Overpass API client
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

/// Bounding box in degrees, ordered south, west, north, east
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Square box around `center` with half-width `radius_meters`, using the
    /// flat-earth degrees-per-meter approximation. Valid only for small
    /// radii; intentionally loose.
    #[must_use]
    pub fn around(center: Point, radius_meters: f64) -> Self {
        let margin = radius_meters * DEGREES_PER_METER;
        Self {
            south: center.y - margin,
            west: center.x - margin,
            north: center.y + margin,
            east: center.x + margin,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

/// Overpass QL query for playground-tagged nodes and ways within `bbox`
fn playground_query(bbox: &BoundingBox) -> String {
    format!(
        "[out:json][timeout:25];(node[\"leisure\"=\"playground\"]({bbox});way[\"leisure\"=\"playground\"]({bbox}););out center;"
    )
}

impl OverpassClient {
    /// Create a new client
    pub fn new(config: &OverpassConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("playreach/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Fetch playground candidates around `center` (WGS84).
    ///
    /// Fails with [`PlayreachError::Upstream`] when the call errors or
    /// returns a non-success status; the caller decides whether to abort or
    /// proceed with zero candidates.
    pub async fn fetch_candidates(
        &self,
        center: Point,
        radius_meters: f64,
    ) -> Result<Vec<Candidate>> {
        let bbox = BoundingBox::around(center, radius_meters);
        let query = playground_query(&bbox);

        let response = self
            .client
            .post(&self.base_url)
            .body(query)
            .send()
            .await
            .map_err(|e| PlayreachError::upstream(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PlayreachError::upstream(format!(
                "Overpass API returned {}",
                response.status()
            )));
        }

        let body: overpass::QueryResponse = response
            .json()
            .await
            .map_err(|e| PlayreachError::upstream(format!("malformed response: {e}")))?;

        let candidates: Vec<Candidate> = body
            .elements
            .into_iter()
            .filter_map(overpass::Element::into_candidate)
            .collect();

        info!("Found {} playground features from Overpass", candidates.len());
        Ok(candidates)
    }
}

/// Overpass API response structures and conversion utilities
mod overpass {
    use serde::Deserialize;

    use crate::models::{Candidate, Point, SourceTag};

    #[derive(Debug, Deserialize)]
    pub struct QueryResponse {
        #[serde(default)]
        pub elements: Vec<Element>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Element {
        #[serde(rename = "type")]
        pub kind: String,
        pub lat: Option<f64>,
        pub lon: Option<f64>,
        pub center: Option<Center>,
        #[serde(default)]
        pub tags: Tags,
    }

    #[derive(Debug, Deserialize)]
    pub struct Center {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Tags {
        pub name: Option<String>,
    }

    impl Element {
        /// Convert to a [`Candidate`]. Nodes carry their own coordinate,
        /// ways carry a computed `center`; elements with neither are
        /// skipped.
        pub fn into_candidate(self) -> Option<Candidate> {
            let (location, source) = if self.kind == "node" {
                (Point::new(self.lon?, self.lat?), SourceTag::Node)
            } else if let Some(center) = self.center {
                (Point::new(center.lon, center.lat), SourceTag::WayCenter)
            } else {
                return None;
            };

            Some(Candidate::new(
                location,
                self.tags
                    .name
                    .unwrap_or_else(|| "Playground".to_string()),
                source,
            ))
        }
    }
}
