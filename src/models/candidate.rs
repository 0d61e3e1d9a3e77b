//! Playground candidate model

use serde::{Deserialize, Serialize};

use super::Point;

/// Origin of a candidate's coordinate within the OSM data model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceTag {
    /// A point feature carrying its own coordinate
    Node,
    /// An area feature, represented by its computed center
    WayCenter,
}

/// A playground returned by the feature query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Location in WGS84 (`x` = longitude, `y` = latitude)
    pub location: Point,
    /// Feature name, defaulting to "Playground" when untagged
    pub name: String,
    /// Whether the coordinate came from a node or a way center
    pub source: SourceTag,
}

impl Candidate {
    /// Create a new candidate
    #[must_use]
    pub fn new(location: Point, name: String, source: SourceTag) -> Self {
        Self {
            location,
            name,
            source,
        }
    }
}
