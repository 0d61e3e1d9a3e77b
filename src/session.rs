//! Analysis session
//!
//! Replaces host-toolkit dialog state with explicit dependency injection:
//! the point picker, layer sink and document sink are passed in rather than
//! held as ambient globals. A session owns the API clients, the currently
//! selected point and the last computed result, which is kept for display
//! and one-shot export only.

use std::path::{Path, PathBuf};

use chrono::Utc;
use geojson::FeatureCollection;
use tracing::info;

use crate::config::PlayreachConfig;
use crate::error::PlayreachError;
use crate::export::{self, DocumentSink};
use crate::layers::{self, LayerSink};
use crate::metrics;
use crate::models::{AnalysisResult, Point};
use crate::osm::OverpassClient;
use crate::projection::{PlanarProjection, WebMercator};
use crate::report;
use crate::routing::OsrmClient;
use crate::Result;

/// Capability that yields a user-selected point in WGS84.
///
/// Implementations wrapping a host canvas are responsible for reprojecting
/// canvas coordinates before yielding.
pub trait PointPicker {
    /// The picked point, or `None` when selection was cancelled
    fn pick_point(&mut self) -> Option<Point>;
}

struct CompletedAnalysis {
    result: AnalysisResult,
    radius_meters: f64,
    layers: FeatureCollection,
}

/// One interactive analysis session
pub struct AccessSession {
    overpass: OverpassClient,
    router: OsrmClient,
    projection: Box<dyn PlanarProjection>,
    current_point: Option<Point>,
    last_analysis: Option<CompletedAnalysis>,
}

impl AccessSession {
    /// Create a session with the default Web Mercator planar projection
    #[must_use]
    pub fn new(config: &PlayreachConfig) -> Self {
        Self::with_projection(config, Box::new(WebMercator))
    }

    /// Create a session with a caller-supplied planar projection
    #[must_use]
    pub fn with_projection(
        config: &PlayreachConfig,
        projection: Box<dyn PlanarProjection>,
    ) -> Self {
        Self {
            overpass: OverpassClient::new(&config.overpass),
            router: OsrmClient::new(&config.routing),
            projection,
            current_point: None,
            last_analysis: None,
        }
    }

    /// Ask the picker for a point; a cancelled pick clears the selection
    pub fn select_point(&mut self, picker: &mut dyn PointPicker) -> Option<Point> {
        self.current_point = picker.pick_point();
        if let Some(point) = self.current_point {
            info!("Point selected: {}", point.format_coordinates());
        }
        self.current_point
    }

    /// The currently selected point, if any
    #[must_use]
    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    /// The last computed result, if any
    #[must_use]
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_analysis.as_ref().map(|analysis| &analysis.result)
    }

    /// Run one analysis around the selected point.
    ///
    /// Fails with [`PlayreachError::NoPointSelected`] before any network
    /// call when no point is selected, and with [`PlayreachError::Upstream`]
    /// when the feature query fails; a failed analysis leaves any previous
    /// result untouched.
    pub async fn analyze(
        &mut self,
        radius_meters: f64,
        layer_sink: &mut dyn LayerSink,
    ) -> Result<&AnalysisResult> {
        let center = self.current_point.ok_or(PlayreachError::NoPointSelected)?;

        info!("Fetching playground data around {}", center.format_coordinates());
        let candidates = self
            .overpass
            .fetch_candidates(center, radius_meters)
            .await?;

        let result = metrics::analyze(
            center,
            candidates,
            radius_meters,
            self.projection.as_ref(),
            &self.router,
        )
        .await;

        let layers = layers::build_layers(center, &result, radius_meters, self.projection.as_ref());
        layer_sink.render(&layers)?;

        let stored = self.last_analysis.insert(CompletedAnalysis {
            result,
            radius_meters,
            layers,
        });
        Ok(&stored.result)
    }

    /// Export the last result as a document under `directory`.
    ///
    /// Fails with [`PlayreachError::NoAnalysis`] when no analysis has run;
    /// export failures never disturb the stored result.
    pub fn export(&self, sink: &dyn DocumentSink, directory: &Path) -> Result<PathBuf> {
        let analysis = self
            .last_analysis
            .as_ref()
            .ok_or(PlayreachError::NoAnalysis)?;

        let completed_at = Utc::now();
        let document = report::build_document(
            &analysis.result,
            analysis.radius_meters,
            analysis.layers.clone(),
            completed_at,
        );

        let path = directory.join(export::export_filename(completed_at));
        sink.write_document(&document, &path)?;
        info!("Report exported to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::report::Document;

    struct FixedPicker(Option<Point>);

    impl PointPicker for FixedPicker {
        fn pick_point(&mut self) -> Option<Point> {
            self.0.take()
        }
    }

    struct RecordingSink {
        called: Cell<bool>,
    }

    impl DocumentSink for RecordingSink {
        fn write_document(&self, _document: &Document, _path: &Path) -> Result<()> {
            self.called.set(true);
            Ok(())
        }
    }

    struct DiscardLayers;

    impl LayerSink for DiscardLayers {
        fn render(&mut self, _layers: &FeatureCollection) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_select_point() {
        let config = PlayreachConfig::default();
        let mut session = AccessSession::new(&config);
        assert!(session.current_point().is_none());

        let picked = session.select_point(&mut FixedPicker(Some(Point::new(8.5, 47.4))));
        assert_eq!(picked, Some(Point::new(8.5, 47.4)));
        assert_eq!(session.current_point(), picked);

        // A cancelled pick clears the selection
        session.select_point(&mut FixedPicker(None));
        assert!(session.current_point().is_none());
    }

    #[tokio::test]
    async fn test_analyze_requires_selected_point() {
        let config = PlayreachConfig::default();
        let mut session = AccessSession::new(&config);

        let result = session.analyze(400.0, &mut DiscardLayers).await;
        assert!(matches!(result, Err(PlayreachError::NoPointSelected)));
    }

    #[test]
    fn test_export_requires_prior_analysis() {
        let config = PlayreachConfig::default();
        let session = AccessSession::new(&config);
        let sink = RecordingSink {
            called: Cell::new(false),
        };

        let result = session.export(&sink, Path::new("/tmp"));
        assert!(matches!(result, Err(PlayreachError::NoAnalysis)));
        assert!(!sink.called.get());
    }
}
