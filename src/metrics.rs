//! Accessibility metrics engine
//!
//! Combines straight-line and walking-network distances into a single
//! qualitative score. Walking distance is preferred for scoring because it
//! reflects real pedestrian access; straight-line distance is always
//! computed as the fallback and for display, since routing may be
//! unavailable per-candidate or entirely.

use tracing::{debug, info};

use crate::models::{AccessScore, AnalysisResult, Candidate, Point, RouteResult};
use crate::projection::PlanarProjection;
use crate::routing::RouteSource;

/// Euclidean distance between two planar points
#[must_use]
pub fn planar_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Analyze playground accessibility around `center` (WGS84).
///
/// Candidates are reprojected through `projection` and filtered to planar
/// distance <= `radius_meters`; this filter is authoritative, the fetch
/// bounding box is intentionally loose. A walking route is requested for
/// every retained candidate in sequence; per-candidate failures contribute
/// nothing and never abort the loop.
pub async fn analyze(
    center: Point,
    candidates: Vec<Candidate>,
    radius_meters: f64,
    projection: &dyn PlanarProjection,
    routes: &dyn RouteSource,
) -> AnalysisResult {
    let planar_center = projection.to_planar(center);

    let mut in_radius = Vec::new();
    let mut nearest_straight_distance = f64::INFINITY;
    for candidate in candidates {
        let distance = planar_distance(planar_center, projection.to_planar(candidate.location));
        if distance <= radius_meters {
            nearest_straight_distance = nearest_straight_distance.min(distance);
            in_radius.push(candidate);
        }
    }

    if in_radius.is_empty() {
        info!("No playgrounds within {radius_meters}m");
        return AnalysisResult::empty();
    }

    info!(
        "{} playgrounds within {radius_meters}m, nearest at {:.0}m straight-line",
        in_radius.len(),
        nearest_straight_distance
    );

    // Route to every retained candidate, keeping the shortest resolved
    // route; it need not belong to the straight-line-nearest candidate.
    let mut best_walking_route: Option<RouteResult> = None;
    for candidate in &in_radius {
        let Some(route) = routes.walking_route(center, candidate.location).await else {
            debug!("No walking route to {}", candidate.name);
            continue;
        };

        let is_improvement = best_walking_route
            .as_ref()
            .is_none_or(|best| route.distance_meters < best.distance_meters);
        if is_improvement {
            best_walking_route = Some(route);
        }
    }

    let best_walking_distance = best_walking_route.as_ref().map(|r| r.distance_meters);
    let score_distance = best_walking_distance.unwrap_or(nearest_straight_distance);

    AnalysisResult {
        count: in_radius.len(),
        nearest_straight_distance,
        best_walking_distance,
        best_walking_route,
        score: AccessScore::classify(score_distance),
        candidates_in_radius: in_radius,
    }
}
