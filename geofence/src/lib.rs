//! # Geofence
//!
//! Altitude-aware circular geofence.
//!
//! A geofence is a circle of `radius_m` meters around a center point with a
//! ceiling at `ground_elevation_m + ceiling_height_m` meters above sea level.
//! The circle is approximated once by a closed polygon whose vertices lie on
//! the geodesic circle, and every location sample is then tested against the
//! polygon and the ceiling:
//!
//! ```notrust
//! inside = contains(sample, polygon) && (altitude is unknown || altitude <= ceiling)
//! ```
//!
//! [`GeofenceEvaluator`] turns the per-sample result into edge-triggered
//! [`TransitionEvent`]s: nothing for the first sample, nothing while the
//! state holds, one event when it flips.
//!
//! Containment treats longitude/latitude as planar x/y. That is accurate for
//! fences of a few kilometers away from the poles and the antimeridian, which
//! is all this crate targets.

pub mod circle;
#[cfg(feature = "binary")]
pub mod config;
pub mod containment;
mod error;
pub mod evaluator;
pub mod math;
mod models;
pub mod monitor;

pub use error::*;
pub use evaluator::{GeofenceEvaluator, GeofenceState};
pub use models::*;
pub use monitor::{GeofenceMonitor, NotificationSink};
