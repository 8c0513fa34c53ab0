//! Polygonal approximation of a geodesic circle.
//!
//! Vertices are destination points at `segments` evenly spaced bearings, so
//! they lie exactly on the circle at any latitude. Edges are chords, the
//! polygon sits inside the circle by at most `r ⋅ (1 − cos(π / segments))`,
//! about 0.12% of the radius for 64 segments.

use std::f64::consts::TAU;

use crate::{
    GeoPoint, GeofenceDefinition, GeofencePolygon, GeofenceResult,
    math::destination,
    models::{validate_radius, validate_segments},
};

pub const DEFAULT_SEGMENTS: usize = 64;

/// Returns `segments + 1` vertices, the last one is a copy of the first.
pub fn generate(
    center: GeoPoint,
    radius_m: f64,
    segments: usize,
) -> GeofenceResult<GeofencePolygon> {
    let center = GeoPoint::try_new(center.latitude, center.longitude)?;
    let radius_m = validate_radius(radius_m)?;
    let segments = validate_segments(segments)?;

    let mut vertices = (0..segments)
        .map(|i| {
            let bearing = TAU * i as f64 / segments as f64;
            destination(center, bearing, radius_m)
        })
        .collect::<Vec<_>>();

    // Bearing 2π lands on bearing 0 up to rounding, reuse the exact vertex.
    vertices.push(vertices[0]);

    tracing::debug!(
        latitude = center.latitude,
        longitude = center.longitude,
        radius_m,
        segments,
        "generated geofence polygon"
    );

    Ok(GeofencePolygon::from_closed_ring(vertices))
}

impl GeofencePolygon {
    pub fn from_definition(definition: &GeofenceDefinition) -> GeofenceResult<Self> {
        generate(definition.center, definition.radius_m, definition.segments)
    }
}
