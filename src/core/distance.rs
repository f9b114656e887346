use crate::models::GeoPoint;

/// Earth's radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Calculate the Haversine (great-circle) distance between two points in miles
///
/// Coordinates are not validated. Out-of-range latitude or longitude yields a
/// defined but meaningless distance.
///
/// # Arguments
/// * `from` - First point, degrees
/// * `to` - Second point, degrees
///
/// # Returns
/// Non-negative distance in miles
#[inline]
pub fn haversine_miles(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}
