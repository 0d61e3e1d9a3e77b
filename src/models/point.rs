//! Bare 2D coordinate model

use serde::{Deserialize, Serialize};

/// A 2D coordinate pair.
///
/// The reference system is implicit: API clients and geometry output use
/// geographic WGS84 (`x` = longitude, `y` = latitude), while distance
/// calculations run on planar coordinates in meters obtained through a
/// [`crate::projection::PlanarProjection`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Format the point as a coordinate string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.5}, {:.5}", self.x, self.y)
    }
}
