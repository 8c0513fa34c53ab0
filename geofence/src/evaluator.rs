//! Edge-triggered entry/exit detection.
//!
//! ```notrust
//!                  first sample
//! Uninitialized ───────────────▶ Inside | Outside     (no event)
//!
//! Outside ── inside ──▶ Inside                         Entered
//! Inside ── outside, above ceiling ──▶ Outside         ExitedAboveCeiling
//! Inside ── outside ──▶ Outside                        Exited
//! ```
//!
//! Only one event is reported per sample. An excursion that starts and ends
//! between two samples is never seen.

use crate::{
    ContainmentState, GeoPoint, GeofenceDefinition, GeofencePolygon, GeofenceResult,
    TransitionEvent, containment::contains, error::ensure_finite,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GeofenceState {
    /// No sample evaluated yet
    #[default]
    Uninitialized,
    Inside,
    Outside,
}

impl GeofenceState {
    const fn from_inside(inside: bool) -> Self {
        match inside {
            true => Self::Inside,
            false => Self::Outside,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeofenceEvaluator {
    definition: GeofenceDefinition,
    polygon: GeofencePolygon,
    state: GeofenceState,
}

impl GeofenceEvaluator {
    pub fn new(definition: GeofenceDefinition) -> GeofenceResult<Self> {
        definition.validate()?;

        let polygon = GeofencePolygon::from_definition(&definition)?;

        Ok(Self {
            definition,
            polygon,
            state: GeofenceState::Uninitialized,
        })
    }

    pub fn definition(&self) -> &GeofenceDefinition {
        &self.definition
    }

    pub fn polygon(&self) -> &GeofencePolygon {
        &self.polygon
    }

    pub fn state(&self) -> GeofenceState {
        self.state
    }

    /// Containment of a single sample, doesn't touch the state.
    ///
    /// An unknown altitude always passes the ceiling check.
    pub fn containment(&self, sample: GeoPoint, altitude: Option<f64>) -> ContainmentState {
        let inside_horizontally = contains(sample, &self.polygon);
        let below_ceiling =
            altitude.is_none_or(|altitude| altitude <= self.definition.ceiling_altitude_m());

        ContainmentState::new(inside_horizontally, below_ceiling)
    }

    /// Feeds the next sample, returns an event only if the sample flips the state.
    pub fn evaluate(&mut self, sample: GeoPoint, altitude: Option<f64>) -> Option<TransitionEvent> {
        let containment = self.containment(sample, altitude);
        let next = GeofenceState::from_inside(containment.inside_geofence);

        let event = match (self.state, next) {
            (GeofenceState::Uninitialized, _) => None,
            (GeofenceState::Inside, GeofenceState::Inside)
            | (GeofenceState::Outside, GeofenceState::Outside) => None,
            (_, GeofenceState::Inside) => Some(TransitionEvent::Entered),
            (_, _) if !containment.below_ceiling => Some(TransitionEvent::ExitedAboveCeiling),
            (_, _) => Some(TransitionEvent::Exited),
        };

        tracing::trace!(
            from = ?self.state,
            to = ?next,
            inside_horizontally = containment.inside_horizontally,
            below_ceiling = containment.below_ceiling,
            "evaluated sample"
        );

        self.state = next;

        event
    }

    /// Same as [`GeofenceEvaluator::evaluate`] but rejects NaN and infinite
    /// input. A rejected sample leaves the state as it was.
    pub fn try_evaluate(
        &mut self,
        sample: GeoPoint,
        altitude: Option<f64>,
    ) -> GeofenceResult<Option<TransitionEvent>> {
        let sample = GeoPoint::try_new(sample.latitude, sample.longitude)?;
        let altitude = altitude
            .map(|altitude| ensure_finite("altitude", altitude))
            .transpose()?;

        Ok(self.evaluate(sample, altitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::destination;

    const CENTER: GeoPoint = GeoPoint::new(30.723398, 76.847850);
    const NORTH_200M: GeoPoint = GeoPoint::new(30.725198, 76.847850);

    fn evaluator() -> GeofenceEvaluator {
        GeofenceEvaluator::new(GeofenceDefinition::new()).unwrap()
    }

    #[test]
    fn first_sample_never_emits() {
        let mut inside = evaluator();
        assert_eq!(inside.evaluate(CENTER, None), None);
        assert_eq!(inside.state(), GeofenceState::Inside);

        let mut outside = evaluator();
        assert_eq!(outside.evaluate(NORTH_200M, None), None);
        assert_eq!(outside.state(), GeofenceState::Outside);

        let mut above = evaluator();
        assert_eq!(above.evaluate(CENTER, Some(400.0)), None);
        assert_eq!(above.state(), GeofenceState::Outside);
    }

    #[test]
    fn single_fire_transitions() {
        let mut evaluator = evaluator();

        let events = [NORTH_200M, NORTH_200M, CENTER, CENTER, NORTH_200M]
            .into_iter()
            .filter_map(|sample| evaluator.evaluate(sample, None))
            .collect::<Vec<_>>();

        assert_eq!(events, [TransitionEvent::Entered, TransitionEvent::Exited]);
    }

    #[test]
    fn ceiling_dominates_cause() {
        let mut evaluator = evaluator();

        assert_eq!(evaluator.evaluate(CENTER, Some(321.0)), None);
        assert_eq!(
            evaluator.evaluate(CENTER, Some(330.0)),
            Some(TransitionEvent::ExitedAboveCeiling)
        );
        assert_eq!(
            evaluator.evaluate(CENTER, Some(322.0)),
            Some(TransitionEvent::Entered)
        );
    }

    #[test]
    fn ceiling_exceeded_outside_footprint() {
        let mut evaluator = evaluator();

        assert_eq!(evaluator.evaluate(CENTER, None), None);
        // Both checks fail, the ceiling still names the cause
        assert_eq!(
            evaluator.evaluate(NORTH_200M, Some(1_000.0)),
            Some(TransitionEvent::ExitedAboveCeiling)
        );
    }

    #[test]
    fn ceiling_is_inclusive() {
        let evaluator = evaluator();

        assert!(evaluator.containment(CENTER, Some(325.0)).inside_geofence);
        assert!(!evaluator.containment(CENTER, Some(325.000_1)).inside_geofence);
    }

    #[test]
    fn unknown_altitude_passes_ceiling() {
        let evaluator = evaluator();

        let inside = evaluator.containment(CENTER, None);
        assert_eq!(inside, ContainmentState::new(true, true));

        let outside = evaluator.containment(NORTH_200M, None);
        assert_eq!(outside, ContainmentState::new(false, true));
    }

    #[test]
    fn scenario() {
        let mut evaluator = evaluator();

        // A: first sample, state becomes inside
        assert_eq!(evaluator.evaluate(CENTER, None), None);
        assert_eq!(evaluator.state(), GeofenceState::Inside);

        // B: ~200 m north
        assert_eq!(
            evaluator.evaluate(NORTH_200M, None),
            Some(TransitionEvent::Exited)
        );

        // C: back over the center but 75 m above the ceiling
        assert_eq!(evaluator.evaluate(CENTER, Some(400.0)), None);
        assert_eq!(evaluator.state(), GeofenceState::Outside);
    }

    #[test]
    fn walk_across_the_fence() {
        let mut evaluator = evaluator();

        let events = (0..=20)
            .map(|step| destination(CENTER, 1.0, 100.0 - step as f64 * 5.0))
            .filter_map(|sample| evaluator.evaluate(sample, Some(321.0)))
            .collect::<Vec<_>>();

        assert_eq!(events, [TransitionEvent::Entered]);
    }

    #[test]
    fn try_evaluate_rejects_without_touching_state() {
        let mut evaluator = evaluator();

        assert!(
            evaluator
                .try_evaluate(GeoPoint::new(f64::NAN, 76.0), None)
                .is_err()
        );
        assert!(evaluator.try_evaluate(CENTER, Some(f64::INFINITY)).is_err());
        assert_eq!(evaluator.state(), GeofenceState::Uninitialized);

        assert_eq!(evaluator.try_evaluate(CENTER, None), Ok(None));
        assert_eq!(
            evaluator.try_evaluate(NORTH_200M, None),
            Ok(Some(TransitionEvent::Exited))
        );
    }

    #[test]
    fn rejects_invalid_definition() {
        assert!(GeofenceEvaluator::new(GeofenceDefinition::new().set_radius_m(-5.0)).is_err());
        assert!(GeofenceEvaluator::new(GeofenceDefinition::new().set_segments(0)).is_err());
    }
}
