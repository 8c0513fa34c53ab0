//! Point in polygon by ray casting.
//!
//! Longitude is the x axis and latitude the y axis. A ray is cast east from
//! the point and the polygon edges it crosses are counted, an odd count means
//! the point is inside.
//!
//! Points lying exactly at the latitude of a vertex are moved north by
//! [`VERTEX_NUDGE`] before testing, so a ray passing through a vertex is
//! counted for exactly one of the two edges sharing it.

use crate::{GeoPoint, GeofencePolygon};

/// Degrees added to the latitude of a point level with an edge endpoint
pub const VERTEX_NUDGE: f64 = 1e-8;

pub fn contains(point: GeoPoint, polygon: &GeofencePolygon) -> bool {
    ring_contains(point, polygon.vertices())
}

/// Same as [`contains`] for a ring that is already closed.
///
/// Consecutive pairs are tested without wrapping from the last vertex back to
/// the first one. Rings shorter than a closed triangle contain nothing.
pub fn ring_contains(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 4 {
        return false;
    }

    ring.windows(2)
        .filter(|edge| ray_intersects_segment(point, edge[0], edge[1]))
        .count()
        % 2
        == 1
}

fn ray_intersects_segment(point: GeoPoint, a: GeoPoint, b: GeoPoint) -> bool {
    if a.latitude > b.latitude {
        return ray_intersects_segment(point, b, a);
    }

    let mut latitude = point.latitude;
    if latitude == a.latitude || latitude == b.latitude {
        latitude += VERTEX_NUDGE;
    }

    if latitude < a.latitude
        || latitude > b.latitude
        || point.longitude > a.longitude.max(b.longitude)
    {
        return false;
    }

    if point.longitude < a.longitude.min(b.longitude) {
        return true;
    }

    // The point is inside the bounding box of the edge and strictly between
    // its endpoint latitudes, so `b.latitude - a.latitude > 0`. Horizontal
    // edges never get here because of the nudge. Comparing
    //
    //   (lon - a.lon) / (b.lon - a.lon)  against  (lat - a.lat) / (b.lat - a.lat)
    //
    // multiplied out keeps the sign right whichever way the edge leans and
    // needs no division, a vertical edge reduces to `lon <= a.lon`.
    let ray = (point.longitude - a.longitude) * (b.latitude - a.latitude);
    let edge = (latitude - a.latitude) * (b.longitude - a.longitude);

    ray <= edge
}
