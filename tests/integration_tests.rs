//! Integration tests for the playreach analysis workflow
//!
//! Exercises the full pipeline from candidates through scoring, formatting,
//! layer building and HTML rendering against a stubbed route source, so no
//! network access is required.

use async_trait::async_trait;
use playreach::export::{render_html, DocumentSink, HtmlReportWriter};
use playreach::layers::build_layers;
use playreach::metrics::analyze;
use playreach::models::{AccessScore, Candidate, Point, RouteResult, SourceTag};
use playreach::projection::PlanarProjection;
use playreach::report::{build_document, summary_text};
use playreach::routing::RouteSource;

/// Treats coordinates as already planar so candidates sit at exact distances
struct IdentityProjection;

impl PlanarProjection for IdentityProjection {
    fn to_planar(&self, point: Point) -> Point {
        point
    }

    fn to_geographic(&self, point: Point) -> Point {
        point
    }
}

/// Resolves a route only for configured destinations
struct StubRoutes(Vec<(Point, f64)>);

#[async_trait]
impl RouteSource for StubRoutes {
    async fn walking_route(&self, start: Point, end: Point) -> Option<RouteResult> {
        self.0
            .iter()
            .find(|(destination, _)| *destination == end)
            .map(|(_, distance)| RouteResult {
                distance_meters: *distance,
                path: vec![start, end],
            })
    }
}

fn candidate(x: f64, y: f64, name: &str) -> Candidate {
    Candidate::new(Point::new(x, y), name.to_string(), SourceTag::Node)
}

#[tokio::test]
async fn analysis_flows_into_report_and_layers() {
    let center = Point::new(0.0, 0.0);
    let near = Point::new(300.0, 0.0);
    let candidates = vec![
        candidate(300.0, 0.0, "Riverside"),
        candidate(0.0, 700.0, "Out of range"),
    ];

    let result = analyze(
        center,
        candidates,
        400.0,
        &IdentityProjection,
        &StubRoutes(vec![(near, 450.0)]),
    )
    .await;

    assert_eq!(result.count, 1);
    assert_eq!(result.nearest_straight_distance, 300.0);
    assert_eq!(result.best_walking_distance, Some(450.0));
    assert_eq!(result.score, AccessScore::Moderate);

    let summary = summary_text(&result, 400.0);
    assert!(summary.contains("Playgrounds found: 1"));
    assert!(summary.contains("Walking distance: 450m (1.5x straight-line)"));

    let layers = build_layers(center, &result, 400.0, &IdentityProjection);
    // buffer + point + one playground + route
    assert_eq!(layers.features.len(), 4);

    let completed_at = chrono::Utc::now();
    let document = build_document(&result, 400.0, layers, completed_at);
    let html = render_html(&document).unwrap();
    assert!(html.contains("Walking distance: 450m"));
    assert!(html.contains("walking_route"));
}

#[tokio::test]
async fn empty_area_reports_distinctly() {
    let result = analyze(
        Point::new(0.0, 0.0),
        vec![candidate(2000.0, 0.0, "Far away")],
        400.0,
        &IdentityProjection,
        &StubRoutes(Vec::new()),
    )
    .await;

    assert_eq!(result.count, 0);
    assert_eq!(result.score, AccessScore::None);

    let summary = summary_text(&result, 400.0);
    assert!(summary.contains("No playgrounds found in this area"));
    assert!(!summary.contains("Walking distance"));

    let layers = build_layers(Point::new(0.0, 0.0), &result, 400.0, &IdentityProjection);
    assert_eq!(layers.features.len(), 2);
}

#[tokio::test]
async fn nearest_distance_grows_as_radius_shrinks() {
    let center = Point::new(0.0, 0.0);
    let candidates = vec![
        candidate(150.0, 0.0, "A"),
        candidate(0.0, 450.0, "B"),
        candidate(900.0, 0.0, "C"),
    ];

    let mut previous = 0.0_f64;
    for radius in [1000.0, 500.0, 200.0, 100.0] {
        let result = analyze(
            center,
            candidates.clone(),
            radius,
            &IdentityProjection,
            &StubRoutes(Vec::new()),
        )
        .await;
        assert!(result.nearest_straight_distance >= previous);
        previous = result.nearest_straight_distance;
    }
    // The tightest radius admits nothing
    assert!(previous.is_infinite());
}

#[tokio::test]
async fn route_failures_fall_back_to_straight_line() {
    let second = Point::new(350.0, 0.0);

    // Only the farther candidate's route resolves
    let result = analyze(
        Point::new(0.0, 0.0),
        vec![candidate(100.0, 0.0, "Near"), candidate(350.0, 0.0, "Far")],
        400.0,
        &IdentityProjection,
        &StubRoutes(vec![(second, 420.0)]),
    )
    .await;
    assert_eq!(result.best_walking_distance, Some(420.0));

    // No route resolves at all: scored from straight-line distance
    let fallback = analyze(
        Point::new(0.0, 0.0),
        vec![candidate(100.0, 0.0, "Near")],
        400.0,
        &IdentityProjection,
        &StubRoutes(Vec::new()),
    )
    .await;
    assert_eq!(fallback.best_walking_distance, None);
    assert_eq!(fallback.score, AccessScore::Excellent);
    assert!(summary_text(&fallback, 400.0).contains("Walking distance: Not available"));
}

#[test]
fn export_writes_a_self_contained_report() {
    let document = build_document(
        &playreach::AnalysisResult::empty(),
        400.0,
        geojson::FeatureCollection {
            bbox: None,
            features: Vec::new(),
            foreign_members: None,
        },
        chrono::Utc::now(),
    );

    let path = std::env::temp_dir().join(format!(
        "playreach_workflow_test_{}.html",
        std::process::id()
    ));
    HtmlReportWriter.write_document(&document, &path).unwrap();
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("No playgrounds found in this area"));
    std::fs::remove_file(&path).unwrap();
}
