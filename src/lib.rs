//! `playreach` - Playground accessibility scoring around a map point
//!
//! This library provides the core functionality for querying playground
//! features from OpenStreetMap, resolving walking routes, and deriving a
//! qualitative accessibility score together with map layers and an
//! exportable report.

pub mod config;
pub mod error;
pub mod export;
pub mod layers;
pub mod metrics;
pub mod models;
pub mod osm;
pub mod projection;
pub mod report;
pub mod routing;
pub mod session;

// Re-export core types for public API
pub use config::PlayreachConfig;
pub use error::PlayreachError;
pub use export::{DocumentSink, HtmlReportWriter};
pub use layers::{GeoJsonFileSink, LayerSink};
pub use models::{AccessScore, AnalysisResult, Candidate, Point, RouteResult, SourceTag};
pub use osm::OverpassClient;
pub use projection::{PlanarProjection, WebMercator};
pub use report::{DocBlock, Document};
pub use routing::{OsrmClient, RouteSource};
pub use session::{AccessSession, PointPicker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlayreachError>;
