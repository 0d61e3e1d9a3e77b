//! Analysis result models: walking routes, qualitative scores and the
//! per-invocation result record

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Candidate, Point};

/// A successfully resolved walking route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Network distance along the route in meters
    pub distance_meters: f64,
    /// Route geometry as an ordered sequence of WGS84 points
    pub path: Vec<Point>,
}

/// Qualitative accessibility score derived from the scoring distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessScore {
    Excellent,
    Moderate,
    Limited,
    /// No playgrounds within the search radius
    None,
}

impl AccessScore {
    /// Classify a scoring distance in meters.
    ///
    /// Band upper bounds are inclusive: 200 m still scores `Excellent`,
    /// 500 m still scores `Moderate`. Only an empty candidate set yields
    /// [`AccessScore::None`]; this function never does.
    #[must_use]
    pub fn classify(distance_meters: f64) -> Self {
        if distance_meters <= 200.0 {
            Self::Excellent
        } else if distance_meters <= 500.0 {
            Self::Moderate
        } else {
            Self::Limited
        }
    }

    /// Short uppercase label for display
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Moderate => "MODERATE",
            Self::Limited => "LIMITED",
            Self::None => "NONE",
        }
    }

    /// Human-readable description of the score
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Great access to playgrounds!",
            Self::Moderate => "Reasonable access to playgrounds.",
            Self::Limited => "Limited access to playgrounds.",
            Self::None => "No playgrounds found.",
        }
    }
}

impl fmt::Display for AccessScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of a single accessibility analysis.
///
/// Created fresh per invocation and held only for the duration of one
/// session, for display and one-shot export. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Number of playgrounds within the search radius
    pub count: usize,
    /// Minimum planar distance to any in-radius playground, or +inf when none
    pub nearest_straight_distance: f64,
    /// Minimum successfully resolved walking distance across all in-radius
    /// playgrounds, not necessarily to the straight-line-nearest one
    pub best_walking_distance: Option<f64>,
    /// Route belonging to `best_walking_distance`
    pub best_walking_route: Option<RouteResult>,
    /// Qualitative score derived from the scoring distance
    pub score: AccessScore,
    /// The playgrounds that passed the planar radius filter
    pub candidates_in_radius: Vec<Candidate>,
}

impl AnalysisResult {
    /// Result for a search that found nothing within the radius
    #[must_use]
    pub fn empty() -> Self {
        Self {
            count: 0,
            nearest_straight_distance: f64::INFINITY,
            best_walking_distance: None,
            best_walking_route: None,
            score: AccessScore::None,
            candidates_in_radius: Vec::new(),
        }
    }

    /// Ratio of walking distance to straight-line distance.
    ///
    /// Only available when a walking route resolved and the straight-line
    /// distance is finite and nonzero.
    #[must_use]
    pub fn walking_ratio(&self) -> Option<f64> {
        let walking = self.best_walking_distance?;
        if self.nearest_straight_distance.is_finite() && self.nearest_straight_distance > 0.0 {
            Some(walking / self.nearest_straight_distance)
        } else {
            None
        }
    }
}
