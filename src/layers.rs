//! Map layer adapter
//!
//! Turns an [`AnalysisResult`] into renderable GeoJSON features for a host
//! mapping canvas. Pure rendering, no decision logic; each feature carries
//! the style parameters the host is expected to apply.

use std::fs;
use std::path::PathBuf;

use geo::{Coord, LineString, Point as GeoPoint, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde_json::json;

use crate::models::{AnalysisResult, Candidate, Point, RouteResult};
use crate::projection::PlanarProjection;
use crate::Result;

const CIRCLE_SEGMENTS: usize = 32;

/// Consumer of rendered layer collections
pub trait LayerSink {
    fn render(&mut self, layers: &FeatureCollection) -> Result<()>;
}

/// Writes the layer collection to a GeoJSON file
pub struct GeoJsonFileSink {
    path: PathBuf,
}

impl GeoJsonFileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LayerSink for GeoJsonFileSink {
    fn render(&mut self, layers: &FeatureCollection) -> Result<()> {
        let payload =
            serde_json::to_string_pretty(layers).map_err(std::io::Error::other)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

fn style(properties: serde_json::Value) -> Option<JsonObject> {
    properties.as_object().cloned()
}

fn feature(geometry: Geometry, properties: serde_json::Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: style(properties),
        foreign_members: None,
    }
}

/// Circle polygon around `center` with the search radius, built in planar
/// space and unprojected vertex by vertex
fn search_area_ring(
    center: Point,
    radius_meters: f64,
    projection: &dyn PlanarProjection,
) -> LineString<f64> {
    let planar = projection.to_planar(center);
    // The final vertex repeats segment 0 so the ring closes bit-exactly.
    let coords: Vec<Coord<f64>> = (0..=CIRCLE_SEGMENTS)
        .map(|segment| {
            let segment = segment % CIRCLE_SEGMENTS;
            let angle = std::f64::consts::TAU * (segment as f64) / (CIRCLE_SEGMENTS as f64);
            let vertex = Point::new(
                planar.x + radius_meters * angle.cos(),
                planar.y + radius_meters * angle.sin(),
            );
            let geographic = projection.to_geographic(vertex);
            Coord {
                x: geographic.x,
                y: geographic.y,
            }
        })
        .collect();
    LineString::new(coords)
}

/// Search radius buffer feature
#[must_use]
pub fn search_area_feature(
    center: Point,
    radius_meters: f64,
    projection: &dyn PlanarProjection,
) -> Feature {
    let ring = search_area_ring(center, radius_meters, projection);
    let polygon = Polygon::new(ring, Vec::new());
    feature(
        Geometry::new(GeoJsonValue::from(&polygon)),
        json!({
            "layer": "search_radius",
            "radius_meters": radius_meters,
            "fill_color": "0,0,255,30",
            "outline_color": "blue",
            "outline_width": 2,
        }),
    )
}

/// Analysis point marker feature
#[must_use]
pub fn analysis_point_feature(center: Point) -> Feature {
    feature(
        Geometry::new(GeoJsonValue::from(&GeoPoint::new(center.x, center.y))),
        json!({
            "layer": "analysis_point",
            "marker": "circle",
            "color": "red",
            "size": 6,
            "outline_color": "darkred",
            "outline_width": 2,
        }),
    )
}

/// Playground marker feature
#[must_use]
pub fn playground_feature(candidate: &Candidate) -> Feature {
    feature(
        Geometry::new(GeoJsonValue::from(&GeoPoint::new(
            candidate.location.x,
            candidate.location.y,
        ))),
        json!({
            "layer": "playgrounds",
            "name": candidate.name,
            "marker": "square",
            "color": "green",
            "size": 8,
            "outline_color": "darkgreen",
            "outline_width": 2,
        }),
    )
}

/// Walking route line feature
#[must_use]
pub fn route_feature(route: &RouteResult) -> Feature {
    let coords: Vec<Coord<f64>> = route
        .path
        .iter()
        .map(|point| Coord {
            x: point.x,
            y: point.y,
        })
        .collect();
    feature(
        Geometry::new(GeoJsonValue::from(&LineString::new(coords))),
        json!({
            "layer": "walking_route",
            "distance_meters": route.distance_meters,
            "color": "red",
            "width": 3,
            "line_style": "dash",
        }),
    )
}

/// Assemble the full layer collection for one analysis.
///
/// Always contains the search radius buffer and the analysis point; adds one
/// marker per in-radius playground and the best walking route when present.
#[must_use]
pub fn build_layers(
    center: Point,
    result: &AnalysisResult,
    radius_meters: f64,
    projection: &dyn PlanarProjection,
) -> FeatureCollection {
    let mut features = vec![
        search_area_feature(center, radius_meters, projection),
        analysis_point_feature(center),
    ];

    features.extend(result.candidates_in_radius.iter().map(playground_feature));

    if let Some(route) = &result.best_walking_route {
        features.push(route_feature(route));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessScore, SourceTag};
    use crate::projection::WebMercator;

    fn layer_name(feature: &Feature) -> &str {
        feature
            .properties
            .as_ref()
            .and_then(|p| p.get("layer"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_result_renders_buffer_and_point_only() {
        let layers = build_layers(
            Point::new(8.5, 47.4),
            &AnalysisResult::empty(),
            400.0,
            &WebMercator,
        );
        assert_eq!(layers.features.len(), 2);
        assert_eq!(layer_name(&layers.features[0]), "search_radius");
        assert_eq!(layer_name(&layers.features[1]), "analysis_point");
    }

    #[test]
    fn test_populated_result_renders_all_layers() {
        let candidates = vec![
            Candidate::new(Point::new(8.51, 47.4), "A".to_string(), SourceTag::Node),
            Candidate::new(Point::new(8.49, 47.4), "B".to_string(), SourceTag::WayCenter),
        ];
        let result = AnalysisResult {
            count: 2,
            nearest_straight_distance: 120.0,
            best_walking_distance: Some(150.0),
            best_walking_route: Some(RouteResult {
                distance_meters: 150.0,
                path: vec![Point::new(8.5, 47.4), Point::new(8.51, 47.4)],
            }),
            score: AccessScore::Excellent,
            candidates_in_radius: candidates,
        };

        let layers = build_layers(Point::new(8.5, 47.4), &result, 400.0, &WebMercator);
        let names: Vec<&str> = layers.features.iter().map(layer_name).collect();
        assert_eq!(
            names,
            vec![
                "search_radius",
                "analysis_point",
                "playgrounds",
                "playgrounds",
                "walking_route"
            ]
        );
    }

    #[test]
    fn test_search_area_ring_is_closed() {
        let feature = search_area_feature(Point::new(8.5, 47.4), 400.0, &WebMercator);
        let Some(Geometry {
            value: GeoJsonValue::Polygon { coordinates: rings },
            ..
        }) = feature.geometry
        else {
            panic!("expected a polygon geometry");
        };
        let ring = &rings[0];
        assert_eq!(ring.len(), CIRCLE_SEGMENTS + 1);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_playground_feature_carries_name() {
        let candidate = Candidate::new(
            Point::new(8.51, 47.41),
            "Spielplatz Altstadt".to_string(),
            SourceTag::Node,
        );
        let feature = playground_feature(&candidate);
        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str());
        assert_eq!(name, Some("Spielplatz Altstadt"));
    }
}
