//! Glue between a location provider, the evaluator and whoever shows the
//! notifications.

use crate::{
    GeofenceEvaluator, GeofenceResult, LocationSample, TransitionEvent,
    math::haversine_distance,
};

/// Receives one call per transition.
pub trait NotificationSink {
    fn notify(&mut self, event: TransitionEvent, message: &str);
}

impl NotificationSink for Vec<String> {
    fn notify(&mut self, _event: TransitionEvent, message: &str) {
        self.push(message.to_owned());
    }
}

impl<F> NotificationSink for F
where
    F: FnMut(TransitionEvent, &str),
{
    fn notify(&mut self, event: TransitionEvent, message: &str) {
        self(event, message)
    }
}

#[derive(Debug)]
pub struct GeofenceMonitor<S> {
    evaluator: GeofenceEvaluator,
    sink: S,
}

impl<S: NotificationSink> GeofenceMonitor<S> {
    pub const fn new(evaluator: GeofenceEvaluator, sink: S) -> Self {
        Self { evaluator, sink }
    }

    pub fn evaluator(&self) -> &GeofenceEvaluator {
        &self.evaluator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn process(&mut self, sample: &LocationSample) -> GeofenceResult<Option<TransitionEvent>> {
        let point = sample.point();
        let event = self.evaluator.try_evaluate(point, sample.altitude)?;

        tracing::debug!(
            latitude = sample.latitude,
            longitude = sample.longitude,
            altitude = ?sample.altitude,
            distance_m = haversine_distance(self.evaluator.definition().center, point),
            state = ?self.evaluator.state(),
            "location sample"
        );

        if let Some(event) = event {
            tracing::info!(?event, "{}", event.message());
            self.sink.notify(event, event.message());
        }

        Ok(event)
    }

    /// Processes every sample, skipping the ones [`GeofenceEvaluator::try_evaluate`]
    /// rejects. Returns number of notifications sent.
    pub fn run(&mut self, samples: impl IntoIterator<Item = LocationSample>) -> usize {
        samples
            .into_iter()
            .filter_map(|sample| match self.process(&sample) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(?sample, error = %e, "skipping location sample");
                    None
                }
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeofenceDefinition, GeofenceState};

    fn monitor<S: NotificationSink>(sink: S) -> GeofenceMonitor<S> {
        GeofenceMonitor::new(
            GeofenceEvaluator::new(GeofenceDefinition::new()).unwrap(),
            sink,
        )
    }

    #[test]
    fn forwards_messages() {
        let mut monitor = monitor(Vec::<String>::new());

        let sent = monitor.run([
            LocationSample::new(30.723398, 76.847850, None),
            LocationSample::new(30.725198, 76.847850, None),
            LocationSample::new(30.723398, 76.847850, Some(321.0)),
            LocationSample::new(30.723398, 76.847850, Some(400.0)),
        ]);

        assert_eq!(sent, 3);
        assert_eq!(
            monitor.into_sink(),
            [
                TransitionEvent::Exited.message(),
                TransitionEvent::Entered.message(),
                TransitionEvent::ExitedAboveCeiling.message(),
            ]
        );
    }

    #[test]
    fn skips_invalid_samples() {
        let mut events = Vec::new();
        let mut monitor = monitor(|event: TransitionEvent, _: &str| events.push(event));

        let sent = monitor.run([
            LocationSample::new(30.725198, 76.847850, None),
            LocationSample::new(f64::NAN, 76.847850, None),
            LocationSample::new(30.723398, 76.847850, Some(f64::NAN)),
            LocationSample::new(30.723398, 76.847850, None),
        ]);

        assert_eq!(sent, 1);
        assert_eq!(monitor.evaluator().state(), GeofenceState::Inside);
        drop(monitor);
        assert_eq!(events, [TransitionEvent::Entered]);
    }

    #[test]
    fn process_reports_errors() {
        let mut monitor = monitor(Vec::<String>::new());

        assert!(
            monitor
                .process(&LocationSample::new(f64::INFINITY, 0.0, None))
                .is_err()
        );
        assert!(monitor.sink().is_empty());
    }
}
