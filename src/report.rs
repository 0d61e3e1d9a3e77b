//! Presentation adapter
//!
//! Formats an [`AnalysisResult`] into the human-readable summary used for
//! on-screen display and into the minimal document layout consumed by the
//! export sink. Pure formatting, no decision logic.

use chrono::{DateTime, Utc};
use geojson::FeatureCollection;

use crate::models::AnalysisResult;

/// A document assembled from text and map blocks
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<DocBlock>,
}

/// One block of an exportable document
#[derive(Debug, Clone)]
pub enum DocBlock {
    Text(String),
    MapSnapshot(FeatureCollection),
}

/// Human-readable analysis summary.
///
/// The empty case is formatted distinctly: no walking-distance line, no
/// ratio, plus hints for widening the search.
#[must_use]
pub fn summary_text(result: &AnalysisResult, radius_meters: f64) -> String {
    let mut text = String::from("PLAYGROUND ACCESSIBILITY ANALYSIS\n\n");
    text.push_str(&format!("Search radius: {radius_meters:.0}m\n\n"));

    if result.count == 0 {
        text.push_str(
            "No playgrounds found in this area\n\n\
             Try:\n\
             - increasing the search distance\n\
             - selecting a more urban location\n\n",
        );
    } else {
        text.push_str(&format!("Playgrounds found: {}\n", result.count));
        text.push_str(&format!(
            "Straight-line distance: {:.0}m\n",
            result.nearest_straight_distance
        ));
        let walking_line = match (result.best_walking_distance, result.walking_ratio()) {
            (Some(walking), Some(ratio)) => {
                format!("Walking distance: {walking:.0}m ({ratio:.1}x straight-line)\n")
            }
            (Some(walking), None) => format!("Walking distance: {walking:.0}m\n"),
            (None, _) => "Walking distance: Not available\n".to_string(),
        };
        text.push_str(&walking_line);
        text.push('\n');
    }

    text.push_str(&format!("{} - {}", result.score, result.score.description()));
    text
}

/// Assemble the exportable document: title, map snapshot and the same
/// summary text shown on screen, stamped with the completion time
#[must_use]
pub fn build_document(
    result: &AnalysisResult,
    radius_meters: f64,
    layers: FeatureCollection,
    completed_at: DateTime<Utc>,
) -> Document {
    let summary = format!(
        "{}\n\nAnalysis completed: {}",
        summary_text(result, radius_meters),
        completed_at.format("%Y-%m-%d %H:%M:%S")
    );

    Document {
        title: "Playground Accessibility Analysis".to_string(),
        blocks: vec![DocBlock::MapSnapshot(layers), DocBlock::Text(summary)],
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::{AccessScore, Candidate, Point, RouteResult, SourceTag};

    fn populated_result(walking: Option<f64>) -> AnalysisResult {
        AnalysisResult {
            count: 3,
            nearest_straight_distance: 300.0,
            best_walking_distance: walking,
            best_walking_route: walking.map(|distance_meters| RouteResult {
                distance_meters,
                path: vec![Point::new(8.5, 47.4)],
            }),
            score: AccessScore::Moderate,
            candidates_in_radius: vec![
                Candidate::new(Point::new(8.51, 47.4), "A".to_string(), SourceTag::Node),
                Candidate::new(Point::new(8.49, 47.4), "B".to_string(), SourceTag::Node),
                Candidate::new(Point::new(8.5, 47.41), "C".to_string(), SourceTag::WayCenter),
            ],
        }
    }

    #[test]
    fn test_empty_summary_has_no_walking_line() {
        let text = summary_text(&AnalysisResult::empty(), 400.0);
        assert!(text.contains("Search radius: 400m"));
        assert!(text.contains("No playgrounds found in this area"));
        assert!(text.contains("increasing the search distance"));
        assert!(!text.contains("Walking distance"));
        assert!(!text.contains("Straight-line distance"));
        assert!(text.ends_with("NONE - No playgrounds found."));
    }

    #[test]
    fn test_populated_summary_with_ratio() {
        let text = summary_text(&populated_result(Some(450.0)), 400.0);
        assert!(text.contains("Playgrounds found: 3"));
        assert!(text.contains("Straight-line distance: 300m"));
        assert!(text.contains("Walking distance: 450m (1.5x straight-line)"));
        assert!(text.ends_with("MODERATE - Reasonable access to playgrounds."));
    }

    #[test]
    fn test_populated_summary_without_route() {
        let text = summary_text(&populated_result(None), 400.0);
        assert!(text.contains("Walking distance: Not available"));
        assert!(!text.contains("straight-line)"));
    }

    #[test]
    fn test_document_layout() {
        let completed_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let layers = FeatureCollection {
            bbox: None,
            features: Vec::new(),
            foreign_members: None,
        };
        let document = build_document(&populated_result(Some(450.0)), 400.0, layers, completed_at);

        assert_eq!(document.title, "Playground Accessibility Analysis");
        assert_eq!(document.blocks.len(), 2);
        assert!(matches!(document.blocks[0], DocBlock::MapSnapshot(_)));
        let DocBlock::Text(text) = &document.blocks[1] else {
            panic!("expected a text block");
        };
        assert!(text.contains("Analysis completed: 2024-06-01 12:30:00"));
    }
}
