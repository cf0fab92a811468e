//! Straight-line distances and walking estimates between places.

use geo::{Distance, Haversine, Point};

use super::LatLng;

/// Average walking speed used for estimates.
const WALKING_KMH: f64 = 5.0;

/// Great-circle distance in metres.
#[must_use]
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

/// Minutes to walk the straight line between two points, rounded.
#[must_use]
pub fn walking_minutes(a: LatLng, b: LatLng) -> i64 {
    let km = distance_meters(a, b) / 1000.0;
    // A day's walk fits comfortably in i64 minutes.
    #[allow(clippy::cast_possible_truncation)]
    let minutes = (km / WALKING_KMH * 60.0).round() as i64;
    minutes
}

/// `850 m` below a kilometre, `1.2 km` above.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round())
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

impl From<LatLng> for Point<f64> {
    fn from(p: LatLng) -> Self {
        Point::new(p.lng, p.lat)
    }
}
