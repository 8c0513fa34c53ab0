use std::fmt;

use crate::{
    circle::DEFAULT_SEGMENTS,
    error::{GeofenceError, GeofenceResult, ensure_finite},
};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Degrees, positive north
    pub latitude: f64,
    /// Degrees, positive east
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Same as [`GeoPoint::new`] but rejects NaN and infinite coordinates.
    pub fn try_new(latitude: f64, longitude: f64) -> GeofenceResult<Self> {
        Ok(Self {
            latitude: ensure_finite("latitude", latitude)?,
            longitude: ensure_finite("longitude", longitude)?,
        })
    }

    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A single reading from the location provider.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level, `None` when the provider has no altitude fix
    #[cfg_attr(feature = "serde", serde(default))]
    pub altitude: Option<f64>,
}

impl LocationSample {
    pub const fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(30.723398, 76.847850);
pub const DEFAULT_RADIUS_M: f64 = 50.0;
pub const DEFAULT_GROUND_ELEVATION_M: f64 = 320.0;
pub const DEFAULT_CEILING_HEIGHT_M: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GeofenceDefinition {
    pub center: GeoPoint,
    /// Radius of the circle along the surface of the Earth
    pub radius_m: f64,
    /// Elevation of the ground at the center, meters above sea level
    pub ground_elevation_m: f64,
    /// Height of the ceiling over the ground. Samples above
    /// `ground_elevation_m + ceiling_height_m` are outside the geofence.
    pub ceiling_height_m: f64,
    /// Number of polygon edges approximating the circle
    pub segments: usize,
}

impl GeofenceDefinition {
    pub const fn new() -> Self {
        Self {
            center: DEFAULT_CENTER,
            radius_m: DEFAULT_RADIUS_M,
            ground_elevation_m: DEFAULT_GROUND_ELEVATION_M,
            ceiling_height_m: DEFAULT_CEILING_HEIGHT_M,
            segments: DEFAULT_SEGMENTS,
        }
    }

    pub const fn set_center(mut self, center: GeoPoint) -> Self {
        self.center = center;
        self
    }

    pub const fn set_radius_m(mut self, radius_m: f64) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub const fn set_ground_elevation_m(mut self, ground_elevation_m: f64) -> Self {
        self.ground_elevation_m = ground_elevation_m;
        self
    }

    pub const fn set_ceiling_height_m(mut self, ceiling_height_m: f64) -> Self {
        self.ceiling_height_m = ceiling_height_m;
        self
    }

    pub const fn set_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Highest altitude, meters above sea level, still inside the geofence.
    pub const fn ceiling_altitude_m(&self) -> f64 {
        self.ground_elevation_m + self.ceiling_height_m
    }

    pub fn validate(&self) -> GeofenceResult<()> {
        GeoPoint::try_new(self.center.latitude, self.center.longitude)?;
        ensure_finite("ground_elevation_m", self.ground_elevation_m)?;
        ensure_finite("ceiling_height_m", self.ceiling_height_m)?;
        validate_radius(self.radius_m)?;
        validate_segments(self.segments)?;

        Ok(())
    }
}

impl Default for GeofenceDefinition {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_radius(radius_m: f64) -> GeofenceResult<f64> {
    if ensure_finite("radius_m", radius_m)? <= 0.0 {
        return Err(GeofenceError::invalid_input(
            "radius_m",
            format!("must be greater than zero, got {radius_m}"),
        ));
    }

    Ok(radius_m)
}

pub(crate) fn validate_segments(segments: usize) -> GeofenceResult<usize> {
    if segments < 3 {
        return Err(GeofenceError::invalid_input(
            "segments",
            format!("a polygon needs at least 3 edges, got {segments}"),
        ));
    }

    Ok(segments)
}

/// Closed ring of vertices, the first vertex is repeated as the last one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<GeoPoint>", into = "Vec<GeoPoint>")
)]
pub struct GeofencePolygon {
    vertices: Vec<GeoPoint>,
}

impl GeofencePolygon {
    /// Builds a polygon from an arbitrary simple ring.
    ///
    /// The ring is closed if the last vertex is not already equal to the first.
    pub fn from_vertices(vertices: impl IntoIterator<Item = GeoPoint>) -> GeofenceResult<Self> {
        let mut vertices = vertices.into_iter().collect::<Vec<_>>();

        if let Some(vertex) = vertices.iter().find(|this| !this.is_finite()) {
            return Err(GeofenceError::invalid_input(
                "vertices",
                format!("non-finite vertex {vertex:?}"),
            ));
        }

        let closed = vertices.len() > 1 && vertices.first() == vertices.last();
        let distinct = match closed {
            true => vertices.len() - 1,
            false => vertices.len(),
        };

        validate_segments(distinct)?;

        if !closed {
            vertices.push(vertices[0]);
        }

        Ok(Self { vertices })
    }

    /// Caller guarantees the ring is closed.
    pub(crate) fn from_closed_ring(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Number of points including the closing one.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        crate::containment::contains(point, self)
    }
}

impl TryFrom<Vec<GeoPoint>> for GeofencePolygon {
    type Error = GeofenceError;

    fn try_from(value: Vec<GeoPoint>) -> Result<Self, Self::Error> {
        Self::from_vertices(value)
    }
}

impl From<GeofencePolygon> for Vec<GeoPoint> {
    fn from(value: GeofencePolygon) -> Self {
        value.vertices
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainmentState {
    pub inside_horizontally: bool,
    pub below_ceiling: bool,
    /// `inside_horizontally && below_ceiling`
    pub inside_geofence: bool,
}

impl ContainmentState {
    pub const fn new(inside_horizontally: bool, below_ceiling: bool) -> Self {
        Self {
            inside_horizontally,
            below_ceiling,
            inside_geofence: inside_horizontally && below_ceiling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TransitionEvent {
    Entered,
    Exited,
    /// Still inside the footprint, but above the ceiling
    ExitedAboveCeiling,
}

impl TransitionEvent {
    pub const fn message(self) -> &'static str {
        match self {
            TransitionEvent::Entered => "You have entered the geofence",
            TransitionEvent::Exited => "You have exited the geofence",
            TransitionEvent::ExitedAboveCeiling => {
                "You have exited the geofence: above the altitude ceiling"
            }
        }
    }

    pub const fn is_entry(self) -> bool {
        matches!(self, TransitionEvent::Entered)
    }
}

impl fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
