//! Planar reprojection capability
//!
//! Raw lon/lat pairs cannot be differenced as Euclidean distance, so the
//! engine reprojects everything through a caller-supplied projection before
//! measuring. The host canvas decides which planar system is in use; the
//! default is spherical Web Mercator.

use crate::models::Point;

/// Reprojection between geographic WGS84 and a planar system in meters
pub trait PlanarProjection: Send + Sync {
    /// Project a WGS84 point (`x` = longitude, `y` = latitude) into planar
    /// coordinates
    fn to_planar(&self, point: Point) -> Point;

    /// Invert the projection back to WGS84
    fn to_geographic(&self, point: Point) -> Point;
}

/// Spherical Web Mercator (EPSG:3857).
///
/// Planar distances are scale-distorted away from the equator by roughly
/// 1/cos(latitude); acceptable for the few-hundred-meter search radii this
/// tool works with.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

impl PlanarProjection for WebMercator {
    fn to_planar(&self, point: Point) -> Point {
        let x = point.x.to_radians() * EARTH_RADIUS_METERS;
        let y = (std::f64::consts::FRAC_PI_4 + point.y.to_radians() / 2.0)
            .tan()
            .ln()
            * EARTH_RADIUS_METERS;
        Point::new(x, y)
    }

    fn to_geographic(&self, point: Point) -> Point {
        let lon = (point.x / EARTH_RADIUS_METERS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS_METERS).exp().atan()
            - std::f64::consts::FRAC_PI_2)
            .to_degrees();
        Point::new(lon, lat)
    }
}
