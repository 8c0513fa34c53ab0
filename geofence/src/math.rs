//! Spherical trigonometry on a mean-radius Earth.
//!
//! Destination point given a start, a bearing and a distance:
//!
//! ```notrust
//! φ2 = asin(sin φ1 ⋅ cos δ + cos φ1 ⋅ sin δ ⋅ cos θ)
//! λ2 = λ1 + atan2(sin θ ⋅ sin δ ⋅ cos φ1, cos δ − sin φ1 ⋅ sin φ2)
//! ```
//!
//! Distance between two points (Haversine):
//!
//! ```notrust
//! d = 2R ⋅ asin(√(sin²((φ2 − φ1)/2) + cos φ1 ⋅ cos φ2 ⋅ sin²((λ2 − λ1)/2)))
//! ```
//!
//! where:
//!
//! - φ, λ – latitude and longitude in radians;
//! - θ – bearing clockwise from north in radians;
//! - δ – angular distance `d / R`;
//! - R – mean Earth radius.
//!
//! A sphere is good enough for fences of tens of meters up to a few kilometers.

use crate::GeoPoint;

/// Mean radius of Earth in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[inline]
pub const fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

#[inline]
pub const fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Point reached from `origin` after `distance_m` meters along a great circle
/// starting at `bearing_rad`.
pub fn destination(origin: GeoPoint, bearing_rad: f64, distance_m: f64) -> GeoPoint {
    let lat = deg_to_rad(origin.latitude);
    let lon = deg_to_rad(origin.longitude);
    let delta = distance_m / EARTH_RADIUS_M;

    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let lat_dest = (sin_lat * cos_delta + cos_lat * sin_delta * bearing_rad.cos()).asin();
    let lon_dest = lon
        + (bearing_rad.sin() * sin_delta * cos_lat).atan2(cos_delta - sin_lat * lat_dest.sin());

    GeoPoint::new(rad_to_deg(lat_dest), rad_to_deg(lon_dest))
}

/// Great-circle distance between two points in meters
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = deg_to_rad(to.latitude - from.latitude);
    let d_lon = deg_to_rad(to.longitude - from.longitude);

    let latitude_1 = deg_to_rad(from.latitude);
    let latitude_2 = deg_to_rad(to.latitude);

    EARTH_RADIUS_M
        * (2.0
            * ((d_lat / 2.0).sin().powi(2)
                + (d_lon / 2.0).sin().powi(2) * latitude_1.cos() * latitude_2.cos())
            .sqrt()
            .asin())
}
